use axum::Json;
use tracing::instrument;

use super::model::DashboardResponse;
use crate::access::AccessContext;
use crate::modules::auth::controller::ErrorResponse;

/// Get the dashboard for the current school
///
/// The capability map is built from the same evaluation path the guards
/// enforce with, so what the front-end shows and what the API allows
/// cannot drift apart.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard for the current school", body = DashboardResponse),
        (status = 400, description = "No current school", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
#[instrument(skip(ctx))]
pub async fn get_dashboard(ctx: AccessContext) -> Json<DashboardResponse> {
    let capabilities = ctx
        .capability_map()
        .into_iter()
        .map(|(token, granted)| (token.to_string(), granted))
        .collect();

    Json(DashboardResponse {
        role: ctx.membership.as_ref().map(|m| m.role.name.clone()),
        role_type: ctx.role_type().map(|t| t.as_str().to_string()),
        is_superuser: ctx.user.is_superuser,
        capabilities,
        school: ctx.school,
    })
}
