use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Which lookup table an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum CatalogKind {
    Category,
    Status,
}

impl CatalogKind {
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Status => "statuses",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Status => "Status",
        }
    }
}

/// A named category or status that events reference by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntry {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    #[serde(with = "database::mongodb::bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateCatalogEntry {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

impl CatalogEntry {
    pub fn new(input: CreateCatalogEntry) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_trims_name() {
        let entry = CatalogEntry::new(CreateCatalogEntry {
            name: "  Music ".to_string(),
        });
        assert_eq!(entry.name, "Music");
    }

    #[test]
    fn test_kind_collections() {
        assert_eq!(CatalogKind::Category.collection(), "categories");
        assert_eq!(CatalogKind::Status.collection(), "statuses");
        assert_eq!(CatalogKind::Status.to_string(), "status");
    }
}
