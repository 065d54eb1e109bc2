use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Deserialize an optional UUID, treating an empty string as `None`.
///
/// Query-string filters arrive as strings and an empty value means
/// "no filter", not an invalid id.
pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => Uuid::parse_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
