use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_invoice, get_invoices};

pub fn init_invoices_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_invoices))
        .route("/{id}", get(get_invoice))
}
