//! Workspace documents and the workspace collection interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::apps::accounts::models::UserSummary;
use crate::exception::Result;
use crate::store::{UserId, WorkspaceId};

/// A stored workspace document.
///
/// Invariants maintained by the registry: the owner is always a member, the
/// join code maps to at most one live workspace, and the member list never
/// contains duplicates.
#[derive(Clone, Debug)]
pub struct Workspace {
	pub id: WorkspaceId,
	pub name: String,
	/// Six-digit decimal join code, unique among live workspaces.
	pub code: String,
	/// Immutable after creation.
	pub owner: UserId,
	pub members: Vec<UserId>,
	pub created_at: DateTime<Utc>,
}

impl Workspace {
	pub fn is_member(&self, user: &UserId) -> bool {
		self.members.contains(user)
	}

	pub fn is_owner(&self, user: &UserId) -> bool {
		&self.owner == user
	}
}

/// Workspace fields prior to insertion; the store generates the identifier
/// and creation timestamp.
#[derive(Clone, Debug)]
pub struct NewWorkspace {
	pub name: String,
	pub code: String,
	pub owner: UserId,
	pub members: Vec<UserId>,
}

/// Outward-facing workspace payload with members expanded to id + email
/// summaries. Password hashes never appear here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkspaceDetail {
	pub id: WorkspaceId,
	pub name: String,
	pub code: String,
	pub owner: UserId,
	pub members: Vec<UserSummary>,
	pub created_at: DateTime<Utc>,
}

/// Admin-facing raw listing entry (member ids, not expanded).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkspaceOverview {
	pub id: WorkspaceId,
	pub name: String,
	pub code: String,
	pub owner: UserId,
	pub members: Vec<UserId>,
	pub created_at: DateTime<Utc>,
}

impl From<Workspace> for WorkspaceOverview {
	fn from(ws: Workspace) -> Self {
		Self {
			id: ws.id,
			name: ws.name,
			code: ws.code,
			owner: ws.owner,
			members: ws.members,
			created_at: ws.created_at,
		}
	}
}

/// Workspace collection.
///
/// Membership mutations are set-semantics updates executed atomically per
/// document: `add_member` is a no-op returning `false` when the user is
/// already present, so concurrent joins cannot duplicate a member.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
	async fn insert(&self, workspace: NewWorkspace) -> Result<Workspace>;

	async fn find_by_id(&self, id: &WorkspaceId) -> Result<Option<Workspace>>;

	async fn find_by_code(&self, code: &str) -> Result<Option<Workspace>>;

	/// All workspaces whose member set contains `user`.
	async fn list_with_member(&self, user: &UserId) -> Result<Vec<Workspace>>;

	async fn list_all(&self) -> Result<Vec<Workspace>>;

	/// Set-union add: returns `true` if the user was added, `false` if
	/// already present. `Ok(None)`-like absence is an error at the caller.
	async fn add_member(&self, id: &WorkspaceId, user: &UserId) -> Result<bool>;

	/// Set removal: returns `true` if the user was present and removed.
	async fn remove_member(&self, id: &WorkspaceId, user: &UserId) -> Result<bool>;

	/// Delete the document, returning whether it existed.
	async fn delete(&self, id: &WorkspaceId) -> Result<bool>;
}
