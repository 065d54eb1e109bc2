use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use schoolhouse_models::{School, SchoolId};

/// Request body for selecting the current school.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectSchoolDto {
    #[schema(value_type = String, format = "uuid")]
    pub school_id: SchoolId,
}

/// Response after selecting a school.
#[derive(Debug, Serialize, ToSchema)]
pub struct SelectSchoolResponse {
    pub message: String,
    pub school: School,
}
