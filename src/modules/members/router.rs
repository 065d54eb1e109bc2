use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller::{add_member, change_member_role, get_members, remove_member};

pub fn init_members_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_members).post(add_member))
        .route("/{id}", patch(change_member_role).delete(remove_member))
}
