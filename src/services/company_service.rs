use std::sync::Arc;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::models::company::{normalize_name, Company, MAX_NAME_LENGTH};

/// Companies are shared reference data: no ownership filter applies.
#[derive(Clone)]
pub struct CompanyService {
    store: Arc<dyn Store>,
}

/// Checks the stored form of the name, after trimming and lowercasing.
fn stored_name(raw: &str) -> Result<String> {
    let name = normalize_name(raw);
    if name.is_empty() {
        return Err(Error::BadRequest("Company name may not be blank".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::BadRequest(format!(
            "Company name may not exceed {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(name)
}

impl CompanyService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Company>> {
        self.store.list_companies().await
    }

    pub async fn retrieve(&self, id: i64) -> Result<Company> {
        self.store.find_company(id).await?.ok_or_else(Error::missing)
    }

    pub async fn create(&self, name: &str) -> Result<Company> {
        self.store.create_company(stored_name(name)?).await
    }

    pub async fn update(&self, id: i64, name: &str) -> Result<Company> {
        self.store
            .update_company(id, stored_name(name)?)
            .await?
            .ok_or_else(Error::missing)
    }

    pub async fn destroy(&self, id: i64) -> Result<()> {
        if !self.store.delete_company(id).await? {
            return Err(Error::missing());
        }
        tracing::info!(company_id = id, "Deleted company");
        Ok(())
    }
}
