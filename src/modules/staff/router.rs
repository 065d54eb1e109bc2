use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_staff, get_staff_member};

pub fn init_staff_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_staff))
        .route("/{id}", get(get_staff_member))
}
