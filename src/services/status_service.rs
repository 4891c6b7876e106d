use std::sync::Arc;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::models::status::Status;

/// Read-only: statuses are seeded by migration and never written via the API.
#[derive(Clone)]
pub struct StatusService {
    store: Arc<dyn Store>,
}

impl StatusService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Status>> {
        self.store.list_statuses().await
    }

    pub async fn retrieve(&self, id: i64) -> Result<Status> {
        self.store.find_status(id).await?.ok_or_else(Error::missing)
    }
}
