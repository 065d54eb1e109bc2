use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use schoolhouse_core::{AppError, PaginationMeta};
use schoolhouse_models::ids::{SchoolId, StudentId};

use super::model::{CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams};

const STUDENT_COLUMNS: &str =
    "id, school_id, first_name, last_name, admission_number, date_of_birth, \
     created_at, updated_at";

/// List the students of a school, optionally filtered by name.
#[instrument(skip(db, params))]
pub async fn get_students(
    db: &PgPool,
    school_id: SchoolId,
    params: StudentFilterParams,
) -> Result<PaginatedStudentsResponse, AppError> {
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();
    let name_pattern = params.name.as_ref().map(|n| format!("%{}%", n));

    let (students, total) = if let Some(ref pattern) = name_pattern {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students WHERE school_id = $1 \
             AND (first_name ILIKE $2 OR last_name ILIKE $2) \
             ORDER BY last_name, first_name LIMIT $3 OFFSET $4",
            STUDENT_COLUMNS
        ))
        .bind(school_id)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM students WHERE school_id = $1 \
             AND (first_name ILIKE $2 OR last_name ILIKE $2)",
        )
        .bind(school_id)
        .bind(pattern)
        .fetch_one(db)
        .await?;

        (students, total)
    } else {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students WHERE school_id = $1 \
             ORDER BY last_name, first_name LIMIT $2 OFFSET $3",
            STUDENT_COLUMNS
        ))
        .bind(school_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE school_id = $1")
                .bind(school_id)
                .fetch_one(db)
                .await?;

        (students, total)
    };

    let has_more = offset + (students.len() as i64) < total;

    Ok(PaginatedStudentsResponse {
        data: students,
        meta: PaginationMeta {
            total,
            limit,
            offset: Some(offset),
            page: params.pagination.page(),
            has_more,
        },
    })
}

/// Enroll a student in a school.
#[instrument(skip(db, dto), fields(admission_number = %dto.admission_number))]
pub async fn create_student(
    db: &PgPool,
    school_id: SchoolId,
    dto: CreateStudentDto,
) -> Result<Student, AppError> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "INSERT INTO students (school_id, first_name, last_name, admission_number, date_of_birth) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        STUDENT_COLUMNS
    ))
    .bind(school_id)
    .bind(&dto.first_name)
    .bind(&dto.last_name)
    .bind(&dto.admission_number)
    .bind(dto.date_of_birth)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e
            && db_err.is_unique_violation()
        {
            return AppError::bad_request(anyhow!(
                "A student with this admission number already exists"
            ));
        }
        AppError::from(e)
    })?;

    info!(student_id = %student.id, school_id = %school_id, "Student enrolled");

    Ok(student)
}

/// Fetch a single student record.
#[instrument(skip(db))]
pub async fn get_student(db: &PgPool, id: StudentId) -> Result<Option<Student>, AppError> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "SELECT {} FROM students WHERE id = $1",
        STUDENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(student)
}

/// The school a student belongs to, for ownership checks.
#[instrument(skip(db))]
pub async fn find_school_id(db: &PgPool, id: StudentId) -> Result<Option<SchoolId>, AppError> {
    let school_id =
        sqlx::query_scalar::<_, SchoolId>("SELECT school_id FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?;

    Ok(school_id)
}
