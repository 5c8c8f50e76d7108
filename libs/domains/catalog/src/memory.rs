use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CatalogEntry, CatalogKind};
use crate::repository::CatalogRepository;

/// In-memory CatalogRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryCatalogRepository {
    kind: CatalogKind,
    entries: Arc<RwLock<HashMap<Uuid, CatalogEntry>>>,
}

impl InMemoryCatalogRepository {
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    fn kind(&self) -> CatalogKind {
        self.kind
    }

    async fn create(&self, entry: CatalogEntry) -> CatalogResult<CatalogEntry> {
        let mut entries = self.entries.write().await;

        if entries.values().any(|e| e.name == entry.name) {
            return Err(CatalogError::DuplicateName {
                kind: self.kind,
                name: entry.name,
            });
        }

        entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<CatalogEntry>> {
        Ok(self.entries.read().await.get(&id).cloned())
    }

    async fn list(&self) -> CatalogResult<Vec<CatalogEntry>> {
        let mut result: Vec<CatalogEntry> = self.entries.read().await.values().cloned().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }
}
