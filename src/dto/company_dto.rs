use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::company::Company;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompanyPayload {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub id: i64,
    pub url: String,
    pub name: String,
}

impl From<Company> for CompanyResponse {
    fn from(value: Company) -> Self {
        Self {
            id: value.id,
            url: format!("/companies/{}", value.id),
            name: value.name,
        }
    }
}
