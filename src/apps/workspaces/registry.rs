//! Workspace membership lifecycle.
//!
//! The registry owns every workspace mutation and enforces the membership
//! invariants: the owner is always a member, join codes are unique among
//! live workspaces, and a user appears in a member list at most once.

use std::sync::Arc;

use rand::Rng;

use crate::apps::accounts::models::UserStore;
use crate::apps::calculations::models::CalculationStore;
use crate::apps::chat::models::ChatStore;
use crate::apps::workspaces::models::{
	NewWorkspace, Workspace, WorkspaceDetail, WorkspaceStore,
};
use crate::exception::{Error, Result};
use crate::store::{UserId, WorkspaceId};

/// Attempts before giving up on drawing an unused join code.
const JOIN_CODE_ATTEMPTS: usize = 16;

pub struct WorkspaceRegistry {
	workspaces: Arc<dyn WorkspaceStore>,
	users: Arc<dyn UserStore>,
	calculations: Arc<dyn CalculationStore>,
	chats: Arc<dyn ChatStore>,
}

impl WorkspaceRegistry {
	pub fn new(
		workspaces: Arc<dyn WorkspaceStore>,
		users: Arc<dyn UserStore>,
		calculations: Arc<dyn CalculationStore>,
		chats: Arc<dyn ChatStore>,
	) -> Self {
		Self {
			workspaces,
			users,
			calculations,
			chats,
		}
	}

	/// Create a workspace owned by `owner`, who becomes the sole member.
	pub async fn create(&self, owner: &UserId, name: &str) -> Result<WorkspaceDetail> {
		let code = self.generate_code().await?;
		let workspace = self
			.workspaces
			.insert(NewWorkspace {
				name: name.to_string(),
				code,
				owner: owner.clone(),
				members: vec![owner.clone()],
			})
			.await?;
		self.expand(workspace).await
	}

	/// Draw an unused six-digit join code, retrying on collision.
	async fn generate_code(&self) -> Result<String> {
		for _ in 0..JOIN_CODE_ATTEMPTS {
			let code = rand::thread_rng().gen_range(100_000..=999_999).to_string();
			if self.workspaces.find_by_code(&code).await?.is_none() {
				return Ok(code);
			}
		}
		Err(Error::Store("could not allocate an unused join code".to_string()))
	}

	/// Join the workspace with the given code.
	///
	/// The membership pre-check and the store update are separate calls; the
	/// set-union `add_member` absorbs the race where two joins pass the
	/// check concurrently, and the loser surfaces `AlreadyMember`.
	pub async fn join(&self, code: &str, user: &UserId) -> Result<WorkspaceDetail> {
		let workspace = self
			.workspaces
			.find_by_code(code)
			.await?
			.ok_or(Error::NotFound("Workspace"))?;

		if workspace.is_member(user) {
			return Err(Error::AlreadyMember);
		}
		if !self.workspaces.add_member(&workspace.id, user).await? {
			return Err(Error::AlreadyMember);
		}

		let updated = self
			.workspaces
			.find_by_id(&workspace.id)
			.await?
			.ok_or(Error::NotFound("Workspace"))?;
		self.expand(updated).await
	}

	/// Remove `user` from the workspace. The owner cannot leave; a caller
	/// who is not currently a member is rejected rather than ignored.
	pub async fn leave(&self, id: &WorkspaceId, user: &UserId) -> Result<()> {
		let workspace = self
			.workspaces
			.find_by_id(id)
			.await?
			.ok_or(Error::NotFound("Workspace"))?;

		if workspace.is_owner(user) {
			return Err(Error::OwnerCannotLeave);
		}
		if !workspace.is_member(user) {
			return Err(Error::MemberNotFound);
		}

		self.workspaces.remove_member(id, user).await?;
		Ok(())
	}

	/// Owner-only removal of another member.
	pub async fn kick(&self, id: &WorkspaceId, caller: &UserId, target: &UserId) -> Result<()> {
		let workspace = self
			.workspaces
			.find_by_id(id)
			.await?
			.ok_or(Error::NotFound("Workspace"))?;

		if !workspace.is_owner(caller) {
			return Err(Error::Forbidden(
				"Only the workspace owner can kick members".to_string(),
			));
		}
		if !workspace.is_member(target) {
			return Err(Error::MemberNotFound);
		}
		if workspace.is_owner(target) {
			return Err(Error::CannotKickOwner);
		}

		self.workspaces.remove_member(id, target).await?;
		Ok(())
	}

	/// Owner-only deletion, cascading to calculation and chat records.
	///
	/// The cascade is best-effort sequential: the workspace document goes
	/// first, then each peripheral collection; a failed step is logged and
	/// the cascade continues. A crash mid-cascade can orphan records.
	pub async fn delete(&self, id: &WorkspaceId, caller: &UserId) -> Result<()> {
		let workspace = self
			.workspaces
			.find_by_id(id)
			.await?
			.ok_or(Error::NotFound("Workspace"))?;

		if !workspace.is_owner(caller) {
			return Err(Error::Forbidden(
				"Only the workspace owner can delete it".to_string(),
			));
		}

		self.workspaces.delete(id).await?;

		if let Err(err) = self.calculations.delete_for_workspace(id).await {
			tracing::warn!(workspace = %id, error = %err, "cascade: failed to delete calculations");
		}
		if let Err(err) = self.chats.delete_for_workspace(id).await {
			tracing::warn!(workspace = %id, error = %err, "cascade: failed to delete chats");
		}
		Ok(())
	}

	/// All workspaces the user belongs to, members expanded.
	pub async fn list_for_user(&self, user: &UserId) -> Result<Vec<WorkspaceDetail>> {
		let workspaces = self.workspaces.list_with_member(user).await?;
		let mut details = Vec::with_capacity(workspaces.len());
		for workspace in workspaces {
			details.push(self.expand(workspace).await?);
		}
		Ok(details)
	}

	/// Raw listing of every workspace (admin console).
	pub async fn list_all(&self) -> Result<Vec<Workspace>> {
		self.workspaces.list_all().await
	}

	/// Member-only detail lookup by join code.
	pub async fn detail(&self, code: &str, user: &UserId) -> Result<WorkspaceDetail> {
		let workspace = self
			.workspaces
			.find_by_code(code)
			.await?
			.ok_or(Error::NotFound("Workspace"))?;

		if !workspace.is_member(user) {
			return Err(Error::AccessDenied);
		}
		self.expand(workspace).await
	}

	/// Expand member ids into id + email summaries. Members whose user
	/// record has since been deleted are omitted.
	async fn expand(&self, workspace: Workspace) -> Result<WorkspaceDetail> {
		let members = self.users.find_many(&workspace.members).await?;
		Ok(WorkspaceDetail {
			id: workspace.id,
			name: workspace.name,
			code: workspace.code,
			owner: workspace.owner,
			members: members.iter().map(|m| m.summary()).collect(),
			created_at: workspace.created_at,
		})
	}
}
