use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    create_role, delete_role, get_roles, grant_permissions, revoke_permission, update_flags,
};

pub fn init_roles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_roles).post(create_role))
        .route("/{id}", delete(delete_role))
        .route("/{id}/permissions", post(grant_permissions))
        .route("/{id}/permissions/{token}", delete(revoke_permission))
        .route("/{id}/flags", patch(update_flags))
}
