use sqlx::PgPool;
use tracing::instrument;

use schoolhouse_core::{AppError, PaginationMeta};
use schoolhouse_models::ids::{InvoiceId, SchoolId};

use super::model::{Invoice, InvoiceFilterParams, PaginatedInvoicesResponse};

const INVOICE_COLUMNS: &str = "id, school_id, student_id, reference, description, \
     amount_cents, currency, status, due_date, created_at, updated_at";

/// List the invoices of a school, optionally filtered by status.
#[instrument(skip(db, params))]
pub async fn get_invoices(
    db: &PgPool,
    school_id: SchoolId,
    params: InvoiceFilterParams,
) -> Result<PaginatedInvoicesResponse, AppError> {
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let (invoices, total) = if let Some(ref status) = params.status {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {} FROM invoices WHERE school_id = $1 AND status = $2 \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
            INVOICE_COLUMNS
        ))
        .bind(school_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM invoices WHERE school_id = $1 AND status = $2",
        )
        .bind(school_id)
        .bind(status)
        .fetch_one(db)
        .await?;

        (invoices, total)
    } else {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {} FROM invoices WHERE school_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            INVOICE_COLUMNS
        ))
        .bind(school_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM invoices WHERE school_id = $1")
                .bind(school_id)
                .fetch_one(db)
                .await?;

        (invoices, total)
    };

    let has_more = offset + (invoices.len() as i64) < total;

    Ok(PaginatedInvoicesResponse {
        data: invoices,
        meta: PaginationMeta {
            total,
            limit,
            offset: Some(offset),
            page: params.pagination.page(),
            has_more,
        },
    })
}

/// Fetch a single invoice.
#[instrument(skip(db))]
pub async fn get_invoice(db: &PgPool, id: InvoiceId) -> Result<Option<Invoice>, AppError> {
    let invoice = sqlx::query_as::<_, Invoice>(&format!(
        "SELECT {} FROM invoices WHERE id = $1",
        INVOICE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(invoice)
}

/// The school an invoice belongs to, for ownership checks.
#[instrument(skip(db))]
pub async fn find_school_id(db: &PgPool, id: InvoiceId) -> Result<Option<SchoolId>, AppError> {
    let school_id =
        sqlx::query_scalar::<_, SchoolId>("SELECT school_id FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?;

    Ok(school_id)
}
