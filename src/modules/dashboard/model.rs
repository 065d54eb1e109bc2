use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use schoolhouse_models::School;

/// Dashboard payload: where the user is, what they are there, and what
/// they can do. Front-ends drive navigation off `capabilities`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub school: School,
    /// Display name of the user's role here, if they have one.
    pub role: Option<String>,
    /// System tag of the user's role here, if they have one.
    pub role_type: Option<String>,
    pub is_superuser: bool,
    /// Grant status for every capability in the vocabulary.
    pub capabilities: BTreeMap<String, bool>,
}
