//! Catalog documents: component items and the folders organizing them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exception::Result;
use crate::store::RecordId;

/// A catalog entry describing a transmission component.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogItem {
	pub id: RecordId,
	pub name: String,
	/// Free-form component properties.
	pub data: serde_json::Value,
	pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewCatalogItem {
	pub name: String,
	pub data: serde_json::Value,
}

/// A folder grouping catalog entries, unique by name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogFolder {
	pub id: RecordId,
	pub name: String,
	pub created_at: DateTime<Utc>,
}

/// Catalog collections (items + folders).
#[async_trait]
pub trait CatalogStore: Send + Sync {
	async fn list_items(&self) -> Result<Vec<CatalogItem>>;

	async fn insert_item(&self, item: NewCatalogItem) -> Result<CatalogItem>;

	async fn insert_folder(&self, name: &str) -> Result<CatalogFolder>;

	async fn find_folder_by_name(&self, name: &str) -> Result<Option<CatalogFolder>>;

	/// Rename a folder, returning whether it existed.
	async fn rename_folder(&self, id: &RecordId, name: &str) -> Result<bool>;

	/// Delete a folder, returning whether it existed.
	async fn delete_folder(&self, id: &RecordId) -> Result<bool>;
}
