//! Catalog endpoints: component listing for users, folder management for
//! admins, and the public reference-data tables.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::apps::catalog::models::{CatalogItem, CatalogStore};
use crate::apps::catalog::reference;
use crate::exception::{Error, Result};
use crate::http::{Handler, Request, Response};
use crate::store::RecordId;

#[derive(Serialize)]
struct MessageResponse<'a> {
	message: &'a str,
}

#[derive(Serialize)]
struct CatalogResponse {
	catalog: Vec<CatalogItem>,
}

/// GET /api/catalog
pub struct CatalogView {
	catalog: Arc<dyn CatalogStore>,
}

impl CatalogView {
	pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
		Self { catalog }
	}
}

#[async_trait]
impl Handler for CatalogView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		let catalog = self.catalog.list_items().await?;
		Response::ok().with_json(&CatalogResponse { catalog })
	}
}

#[derive(Default, Deserialize)]
struct CreateFolderRequest {
	folder_name: Option<String>,
}

#[derive(Serialize)]
struct FolderCreatedResponse<'a> {
	message: &'a str,
	folder_id: RecordId,
}

/// POST /api/admin/catalog/folder/create
pub struct CreateCatalogFolderView {
	catalog: Arc<dyn CatalogStore>,
}

impl CreateCatalogFolderView {
	pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
		Self { catalog }
	}
}

#[async_trait]
impl Handler for CreateCatalogFolderView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let body: CreateFolderRequest = request.json().unwrap_or_default();
		let name = body
			.folder_name
			.filter(|n| !n.is_empty())
			.ok_or_else(|| Error::Validation("Folder name required".to_string()))?;

		if self.catalog.find_folder_by_name(&name).await?.is_some() {
			return Err(Error::Validation("Folder already exists".to_string()));
		}

		let folder = self.catalog.insert_folder(&name).await?;
		Response::created().with_json(&FolderCreatedResponse {
			message: "Folder created",
			folder_id: folder.id,
		})
	}
}

#[derive(Default, Deserialize)]
struct EditFolderRequest {
	folder_id: Option<RecordId>,
	new_name: Option<String>,
}

/// PUT /api/admin/catalog/folder/edit
pub struct EditCatalogFolderView {
	catalog: Arc<dyn CatalogStore>,
}

impl EditCatalogFolderView {
	pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
		Self { catalog }
	}
}

#[async_trait]
impl Handler for EditCatalogFolderView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let body: EditFolderRequest = request.json().unwrap_or_default();
		let (folder_id, new_name) = match (body.folder_id, body.new_name.filter(|n| !n.is_empty())) {
			(Some(id), Some(name)) => (id, name),
			_ => return Err(Error::Validation("Folder ID and new name required".to_string())),
		};

		if !self.catalog.rename_folder(&folder_id, &new_name).await? {
			return Err(Error::NotFound("Folder"));
		}
		Response::ok().with_json(&MessageResponse {
			message: "Folder updated successfully",
		})
	}
}

#[derive(Default, Deserialize)]
struct DeleteFolderRequest {
	folder_id: Option<RecordId>,
}

/// DELETE /api/admin/catalog/folder/delete
pub struct DeleteCatalogFolderView {
	catalog: Arc<dyn CatalogStore>,
}

impl DeleteCatalogFolderView {
	pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
		Self { catalog }
	}
}

#[async_trait]
impl Handler for DeleteCatalogFolderView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let body: DeleteFolderRequest = request.json().unwrap_or_default();
		let folder_id = body
			.folder_id
			.ok_or_else(|| Error::Validation("Folder ID required".to_string()))?;

		self.catalog.delete_folder(&folder_id).await?;
		Response::ok().with_json(&MessageResponse {
			message: "Folder deleted",
		})
	}
}

#[derive(Serialize)]
struct ReferenceResponse<T: Serialize> {
	success: bool,
	data: Vec<T>,
}

/// GET /api/reference/efficiency: public reference table.
pub struct EfficiencyView;

#[async_trait]
impl Handler for EfficiencyView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		Response::ok().with_json(&ReferenceResponse {
			success: true,
			data: reference::efficiency_table(),
		})
	}
}

/// GET /api/reference/ratios: public reference table.
pub struct TransmissionRatiosView;

#[async_trait]
impl Handler for TransmissionRatiosView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		Response::ok().with_json(&ReferenceResponse {
			success: true,
			data: reference::transmission_ratio_table(),
		})
	}
}

#[derive(Serialize)]
struct EngineResponse {
	success: bool,
	engines: Vec<reference::EngineEntry>,
}

/// GET /api/reference/engines: public motor catalog.
pub struct EngineDataView;

#[async_trait]
impl Handler for EngineDataView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		Response::ok().with_json(&EngineResponse {
			success: true,
			engines: reference::engine_table(),
		})
	}
}
