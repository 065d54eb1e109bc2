use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::instrument;

use schoolhouse_core::AppError;
use schoolhouse_models::ids::InvoiceId;

use super::model::{Invoice, InvoiceFilterParams, PaginatedInvoicesResponse};
use super::service;
use crate::access::guard::RequireManageFinances;
use crate::access::outcome::{AccessDenied, GuardError};
use crate::access::ownership::{OwnedResource, require_school_ownership};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// List the invoices of the current school
#[utoipa::path(
    get,
    path = "/api/invoices",
    params(
        ("status" = Option<String>, Query, description = "Filter by lifecycle state"),
        ("limit" = Option<i64>, Query, description = "Limit number of results"),
        ("offset" = Option<i64>, Query, description = "Offset for pagination")
    ),
    responses(
        (status = 200, description = "Paginated list of invoices", body = PaginatedInvoicesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing manage_finances capability", body = ErrorResponse)
    ),
    tag = "Invoices",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx, params))]
pub async fn get_invoices(
    State(state): State<AppState>,
    RequireManageFinances(ctx): RequireManageFinances,
    Query(params): Query<InvoiceFilterParams>,
) -> Result<Json<PaginatedInvoicesResponse>, AppError> {
    let invoices = service::get_invoices(&state.db, ctx.school.id, params).await?;
    Ok(Json(invoices))
}

/// Get one invoice
#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    params(("id" = String, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice", body = Invoice),
        (status = 403, description = "Missing manage_finances capability", body = ErrorResponse),
        (status = 404, description = "Not found or access denied", body = ErrorResponse)
    ),
    tag = "Invoices",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn get_invoice(
    State(state): State<AppState>,
    RequireManageFinances(ctx): RequireManageFinances,
    Path(id): Path<InvoiceId>,
) -> Result<Json<Invoice>, GuardError> {
    require_school_ownership(&state.db, &ctx, OwnedResource::Invoice(id)).await?;

    let invoice = service::get_invoice(&state.db, id)
        .await?
        .ok_or_else(|| AccessDenied::not_found(ctx.transport))?;

    Ok(Json(invoice))
}
