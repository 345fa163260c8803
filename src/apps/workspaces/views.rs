//! Workspace endpoints. Every view runs behind the user-role guard; the
//! registry enforces ownership and membership beyond that.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::apps::workspaces::models::{WorkspaceDetail, WorkspaceOverview};
use crate::apps::workspaces::registry::WorkspaceRegistry;
use crate::auth::CurrentUser;
use crate::exception::{Error, Result};
use crate::http::{Handler, Request, Response};
use crate::store::{UserId, WorkspaceId};

#[derive(Serialize)]
struct WorkspaceResponse<'a> {
	message: &'a str,
	workspace: WorkspaceDetail,
}

#[derive(Serialize)]
struct MessageResponse<'a> {
	message: &'a str,
}

#[derive(Default, Deserialize)]
struct CreateWorkspaceRequest {
	name: Option<String>,
}

/// POST /api/workspace/create
pub struct CreateWorkspaceView {
	registry: Arc<WorkspaceRegistry>,
}

impl CreateWorkspaceView {
	pub fn new(registry: Arc<WorkspaceRegistry>) -> Self {
		Self { registry }
	}
}

#[async_trait]
impl Handler for CreateWorkspaceView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let body: CreateWorkspaceRequest = request.json().unwrap_or_default();
		let name = body
			.name
			.filter(|n| !n.is_empty())
			.unwrap_or_else(|| "Untitled Workspace".to_string());

		let workspace = self.registry.create(&current.user().id, &name).await?;
		Response::created().with_json(&WorkspaceResponse {
			message: "Workspace created",
			workspace,
		})
	}
}

#[derive(Default, Deserialize)]
struct JoinWorkspaceRequest {
	code: Option<String>,
}

/// POST /api/workspace/join
pub struct JoinWorkspaceView {
	registry: Arc<WorkspaceRegistry>,
}

impl JoinWorkspaceView {
	pub fn new(registry: Arc<WorkspaceRegistry>) -> Self {
		Self { registry }
	}
}

#[async_trait]
impl Handler for JoinWorkspaceView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let body: JoinWorkspaceRequest = request.json().unwrap_or_default();
		let code = body
			.code
			.filter(|c| !c.is_empty())
			.ok_or_else(|| Error::Validation("Workspace code is required".to_string()))?;

		let workspace = self.registry.join(&code, &current.user().id).await?;
		Response::ok().with_json(&WorkspaceResponse {
			message: "Joined workspace successfully",
			workspace,
		})
	}
}

#[derive(Default, Deserialize)]
struct WorkspaceIdRequest {
	workspace_id: Option<WorkspaceId>,
}

impl WorkspaceIdRequest {
	fn into_id(self) -> Result<WorkspaceId> {
		self.workspace_id
			.ok_or_else(|| Error::Validation("Workspace ID required".to_string()))
	}
}

/// POST /api/workspace/leave
pub struct LeaveWorkspaceView {
	registry: Arc<WorkspaceRegistry>,
}

impl LeaveWorkspaceView {
	pub fn new(registry: Arc<WorkspaceRegistry>) -> Self {
		Self { registry }
	}
}

#[async_trait]
impl Handler for LeaveWorkspaceView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let workspace_id = request.json::<WorkspaceIdRequest>().unwrap_or_default().into_id()?;

		self.registry.leave(&workspace_id, &current.user().id).await?;
		Response::ok().with_json(&MessageResponse {
			message: "Left workspace successfully",
		})
	}
}

#[derive(Default, Deserialize)]
struct KickMemberRequest {
	workspace_id: Option<WorkspaceId>,
	member_id: Option<UserId>,
}

/// POST /api/workspace/kick
pub struct KickMemberView {
	registry: Arc<WorkspaceRegistry>,
}

impl KickMemberView {
	pub fn new(registry: Arc<WorkspaceRegistry>) -> Self {
		Self { registry }
	}
}

#[async_trait]
impl Handler for KickMemberView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let body: KickMemberRequest = request.json().unwrap_or_default();
		let (workspace_id, member_id) = match (body.workspace_id, body.member_id) {
			(Some(w), Some(m)) => (w, m),
			_ => {
				return Err(Error::Validation(
					"workspace_id and member_id are required".to_string(),
				));
			}
		};

		self.registry
			.kick(&workspace_id, &current.user().id, &member_id)
			.await?;
		Response::ok().with_json(&MessageResponse {
			message: "Member kicked successfully",
		})
	}
}

/// DELETE /api/workspace/delete
pub struct DeleteWorkspaceView {
	registry: Arc<WorkspaceRegistry>,
}

impl DeleteWorkspaceView {
	pub fn new(registry: Arc<WorkspaceRegistry>) -> Self {
		Self { registry }
	}
}

#[async_trait]
impl Handler for DeleteWorkspaceView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let workspace_id = request.json::<WorkspaceIdRequest>().unwrap_or_default().into_id()?;

		self.registry.delete(&workspace_id, &current.user().id).await?;
		Response::ok().with_json(&MessageResponse {
			message: "Workspace deleted successfully",
		})
	}
}

#[derive(Serialize)]
struct WorkspaceListResponse {
	workspaces: Vec<WorkspaceDetail>,
}

/// GET /api/workspace/list
pub struct ListWorkspacesView {
	registry: Arc<WorkspaceRegistry>,
}

impl ListWorkspacesView {
	pub fn new(registry: Arc<WorkspaceRegistry>) -> Self {
		Self { registry }
	}
}

#[async_trait]
impl Handler for ListWorkspacesView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let workspaces = self.registry.list_for_user(&current.user().id).await?;
		Response::ok().with_json(&WorkspaceListResponse { workspaces })
	}
}

#[derive(Serialize)]
struct WorkspaceDetailResponse {
	workspace: WorkspaceDetail,
}

/// GET /api/workspace/detail/{code}
pub struct WorkspaceDetailView {
	registry: Arc<WorkspaceRegistry>,
}

impl WorkspaceDetailView {
	pub fn new(registry: Arc<WorkspaceRegistry>) -> Self {
		Self { registry }
	}
}

#[async_trait]
impl Handler for WorkspaceDetailView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let code = request
			.path_param("code")
			.ok_or_else(|| Error::Validation("Workspace code is required".to_string()))?
			.to_string();

		let workspace = self.registry.detail(&code, &current.user().id).await?;
		Response::ok().with_json(&WorkspaceDetailResponse { workspace })
	}
}

#[derive(Serialize)]
struct WorkspaceOverviewResponse {
	workspaces: Vec<WorkspaceOverview>,
}

/// GET /api/admin/workspaces: raw listing for the admin console.
pub struct AdminListWorkspacesView {
	registry: Arc<WorkspaceRegistry>,
}

impl AdminListWorkspacesView {
	pub fn new(registry: Arc<WorkspaceRegistry>) -> Self {
		Self { registry }
	}
}

#[async_trait]
impl Handler for AdminListWorkspacesView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		let workspaces = self.registry.list_all().await?;
		Response::ok().with_json(&WorkspaceOverviewResponse {
			workspaces: workspaces.into_iter().map(WorkspaceOverview::from).collect(),
		})
	}
}
