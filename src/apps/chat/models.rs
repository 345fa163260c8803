//! Chat messages and design-change proposals.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exception::Result;
use crate::store::{RecordId, UserId, WorkspaceId};

/// Party in a direct conversation: a concrete user, or the admin console.
///
/// Serialized as the bare user id, or the literal `"admin"`: the one
/// canonical string form, converted at the storage boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatParty {
	User(UserId),
	Admin,
}

impl ChatParty {
	pub fn as_str(&self) -> &str {
		match self {
			ChatParty::User(id) => id.as_str(),
			ChatParty::Admin => "admin",
		}
	}
}

impl From<&str> for ChatParty {
	fn from(raw: &str) -> Self {
		if raw == "admin" {
			ChatParty::Admin
		} else {
			ChatParty::User(UserId::from(raw))
		}
	}
}

impl Serialize for ChatParty {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for ChatParty {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Ok(ChatParty::from(raw.as_str()))
	}
}

/// Scope of a chat message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
	Direct,
	Workspace,
}

/// A stored chat message. Direct messages carry a receiver; workspace
/// messages carry the workspace id instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
	pub id: RecordId,
	pub kind: ChatKind,
	pub sender: ChatParty,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub receiver: Option<ChatParty>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub workspace_id: Option<WorkspaceId>,
	pub message: String,
	pub sent_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewChatMessage {
	pub kind: ChatKind,
	pub sender: ChatParty,
	pub receiver: Option<ChatParty>,
	pub workspace_id: Option<WorkspaceId>,
	pub message: String,
}

/// Chat collection.
#[async_trait]
pub trait ChatStore: Send + Sync {
	async fn insert(&self, message: NewChatMessage) -> Result<ChatMessage>;

	/// Direct conversation between a user and the admin console, oldest
	/// first.
	async fn direct_conversation(&self, user: &UserId) -> Result<Vec<ChatMessage>>;

	/// Every direct message, newest first (admin console).
	async fn list_direct(&self) -> Result<Vec<ChatMessage>>;

	/// Messages of one workspace, oldest first.
	async fn list_for_workspace(&self, workspace: &WorkspaceId) -> Result<Vec<ChatMessage>>;

	/// Cascade step: drop every message scoped to the workspace.
	async fn delete_for_workspace(&self, workspace: &WorkspaceId) -> Result<usize>;
}

/// Review state of a proposal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
	Pending,
	Approved,
	Rejected,
}

/// A design-change proposal submitted by a user and reviewed by an admin.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
	pub id: RecordId,
	pub sender: UserId,
	pub proposal: String,
	pub status: ProposalStatus,
	pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewProposal {
	pub sender: UserId,
	pub proposal: String,
}

/// Proposal collection.
#[async_trait]
pub trait ProposalStore: Send + Sync {
	async fn insert(&self, proposal: NewProposal) -> Result<Proposal>;

	/// Pending proposals, oldest first.
	async fn list_pending(&self) -> Result<Vec<Proposal>>;

	/// Update a proposal's status, returning whether it existed.
	async fn set_status(&self, id: &RecordId, status: ProposalStatus) -> Result<bool>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_chat_party_roundtrip() {
		let id = UserId::generate();
		let user = ChatParty::User(id.clone());
		assert_eq!(ChatParty::from(user.as_str()), user);
		assert_eq!(ChatParty::from("admin"), ChatParty::Admin);
	}

	#[test]
	fn test_chat_party_serializes_as_string() {
		assert_eq!(serde_json::to_string(&ChatParty::Admin).unwrap(), "\"admin\"");

		let id = UserId::from("u-1");
		assert_eq!(
			serde_json::to_string(&ChatParty::User(id)).unwrap(),
			"\"u-1\""
		);
	}
}
