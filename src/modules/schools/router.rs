use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_current_school, get_my_schools, select_school};

pub fn init_schools_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_my_schools))
        .route("/select", post(select_school))
        .route("/current", get(get_current_school))
}
