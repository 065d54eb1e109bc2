use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use schoolhouse_core::{PaginationMeta, PaginationParams};
use schoolhouse_models::ids::{SchoolId, StudentId};

/// A student enrolled at a school.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub school_id: SchoolId,
    pub first_name: String,
    pub last_name: String,
    /// School-assigned admission number, unique within the school.
    pub admission_number: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for enrolling a student.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 50, message = "Admission number is required"))]
    pub admission_number: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

/// Query parameters for listing students.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StudentFilterParams {
    /// Case-insensitive match against first or last name
    pub name: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing students.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_student_dto_validation() {
        let valid = CreateStudentDto {
            first_name: "Ngozi".to_string(),
            last_name: "Okafor".to_string(),
            admission_number: "HC-2031".to_string(),
            date_of_birth: None,
        };
        assert!(valid.validate().is_ok());

        let missing_admission = CreateStudentDto {
            first_name: "Ngozi".to_string(),
            last_name: "Okafor".to_string(),
            admission_number: "".to_string(),
            date_of_birth: None,
        };
        assert!(missing_admission.validate().is_err());
    }
}
