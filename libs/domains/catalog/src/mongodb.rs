//! MongoDB implementation of CatalogRepository

use async_trait::async_trait;
use database::mongodb::{ensure_index, id_filter, is_duplicate_key_error};
use futures_util::TryStreamExt;
use mongodb::{Collection, Database, bson::doc, options::FindOptions};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CatalogEntry, CatalogKind};
use crate::repository::CatalogRepository;

pub struct MongoCatalogRepository {
    kind: CatalogKind,
    collection: Collection<CatalogEntry>,
}

impl MongoCatalogRepository {
    pub fn new(db: &Database, kind: CatalogKind) -> Self {
        Self {
            kind,
            collection: db.collection::<CatalogEntry>(kind.collection()),
        }
    }

    pub fn categories(db: &Database) -> Self {
        Self::new(db, CatalogKind::Category)
    }

    pub fn statuses(db: &Database) -> Self {
        Self::new(db, CatalogKind::Status)
    }

    pub async fn create_indexes(&self) -> CatalogResult<()> {
        let name = format!("{}_name_unique", self.kind.collection());
        ensure_index(&self.collection, doc! { "name": 1 }, &name, true).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    fn kind(&self) -> CatalogKind {
        self.kind
    }

    #[instrument(skip(self, entry), fields(kind = %self.kind, name = %entry.name))]
    async fn create(&self, entry: CatalogEntry) -> CatalogResult<CatalogEntry> {
        match self.collection.insert_one(&entry).await {
            Ok(_) => Ok(entry),
            Err(e) if is_duplicate_key_error(&e) => Err(CatalogError::DuplicateName {
                kind: self.kind,
                name: entry.name,
            }),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<CatalogEntry>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    async fn list(&self) -> CatalogResult<Vec<CatalogEntry>> {
        let options = FindOptions::builder().sort(doc! { "name": 1 }).build();
        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }
}
