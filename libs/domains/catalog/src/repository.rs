use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{CatalogEntry, CatalogKind};

/// Storage for one catalog table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    fn kind(&self) -> CatalogKind;

    /// Fails with `DuplicateName` when the name is taken
    async fn create(&self, entry: CatalogEntry) -> CatalogResult<CatalogEntry>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<CatalogEntry>>;

    /// All entries sorted by name
    async fn list(&self) -> CatalogResult<Vec<CatalogEntry>>;
}
