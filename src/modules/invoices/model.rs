use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use schoolhouse_core::{PaginationMeta, PaginationParams};
use schoolhouse_models::ids::{InvoiceId, SchoolId, StudentId};

/// A fee invoice issued to a student.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Invoice {
    pub id: InvoiceId,
    pub school_id: SchoolId,
    pub student_id: StudentId,
    /// School-facing reference, unique within the school.
    pub reference: String,
    pub description: Option<String>,
    /// Amount in the smallest currency unit.
    pub amount_cents: i64,
    pub currency: String,
    /// Lifecycle state as the billing integration reports it.
    pub status: String,
    pub due_date: Option<chrono::NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Query parameters for listing invoices.
#[derive(Debug, Deserialize, ToSchema)]
pub struct InvoiceFilterParams {
    /// Filter by lifecycle state
    pub status: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing invoices.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedInvoicesResponse {
    pub data: Vec<Invoice>,
    pub meta: PaginationMeta,
}
