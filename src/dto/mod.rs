pub mod application_dto;
pub mod auth_dto;
pub mod company_dto;
pub mod event_dto;
pub mod job_dto;
pub mod question_dto;
pub mod status_dto;

use serde::{Deserialize, Deserializer};

/// Query-string ids where `?job_id=` (empty) means "no filter".
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
