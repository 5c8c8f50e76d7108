use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CatalogEntry, CreateCatalogEntry};
use crate::repository::CatalogRepository;

pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(kind = %self.repository.kind(), name = %input.name))]
    pub async fn create_entry(&self, input: CreateCatalogEntry) -> CatalogResult<CatalogEntry> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let entry = CatalogEntry::new(input);
        if entry.name.is_empty() {
            return Err(CatalogError::Validation("name must not be blank".to_string()));
        }

        let entry = self.repository.create(entry).await?;
        tracing::info!(entry_id = %entry.id, "Catalog entry created");
        Ok(entry)
    }

    #[instrument(skip(self))]
    pub async fn get_entry(&self, id: Uuid) -> CatalogResult<CatalogEntry> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound {
                kind: self.repository.kind(),
                id,
            })
    }

    #[instrument(skip(self))]
    pub async fn list_entries(&self) -> CatalogResult<Vec<CatalogEntry>> {
        self.repository.list().await
    }
}

impl<R: CatalogRepository> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
