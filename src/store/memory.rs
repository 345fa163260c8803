//! In-memory store backends.
//!
//! Each store guards its collection with one async mutex, so every trait
//! method is atomic with respect to the documents it touches: the
//! per-document atomicity the components rely on. Multi-call sequences in
//! the components (find, check, mutate) are deliberately not atomic; see the
//! workspace registry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::apps::accounts::models::{NewUser, User, UserStore};
use crate::apps::calculations::models::{CalculationRecord, CalculationStore, NewCalculation};
use crate::apps::catalog::models::{
	CatalogFolder, CatalogItem, CatalogStore, NewCatalogItem,
};
use crate::apps::chat::models::{
	ChatKind, ChatMessage, ChatParty, ChatStore, NewChatMessage, NewProposal, Proposal,
	ProposalStatus, ProposalStore,
};
use crate::apps::workspaces::models::{NewWorkspace, Workspace, WorkspaceStore};
use crate::exception::Result;
use crate::store::{RecordId, UserId, WorkspaceId};

/// In-memory user collection.
pub struct InMemoryUserStore {
	rows: Arc<Mutex<HashMap<UserId, User>>>,
}

impl InMemoryUserStore {
	pub fn new() -> Self {
		Self {
			rows: Arc::new(Mutex::new(HashMap::new())),
		}
	}
}

impl Default for InMemoryUserStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl UserStore for InMemoryUserStore {
	async fn insert(&self, user: NewUser) -> Result<User> {
		let record = User {
			id: UserId::generate(),
			email: user.email,
			password_hash: user.password_hash,
			role: user.role,
			created_at: Utc::now(),
		};
		let mut rows = self.rows.lock().await;
		rows.insert(record.id.clone(), record.clone());
		Ok(record)
	}

	async fn find_by_id(&self, id: &UserId) -> Result<Option<User>> {
		let rows = self.rows.lock().await;
		Ok(rows.get(id).cloned())
	}

	async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
		let rows = self.rows.lock().await;
		Ok(rows.values().find(|u| u.email == email).cloned())
	}

	async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>> {
		let rows = self.rows.lock().await;
		Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
	}

	async fn list(&self) -> Result<Vec<User>> {
		let rows = self.rows.lock().await;
		let mut users: Vec<User> = rows.values().cloned().collect();
		users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
		Ok(users)
	}

	async fn delete(&self, id: &UserId) -> Result<bool> {
		let mut rows = self.rows.lock().await;
		Ok(rows.remove(id).is_some())
	}
}

/// In-memory workspace collection.
pub struct InMemoryWorkspaceStore {
	rows: Arc<Mutex<HashMap<WorkspaceId, Workspace>>>,
}

impl InMemoryWorkspaceStore {
	pub fn new() -> Self {
		Self {
			rows: Arc::new(Mutex::new(HashMap::new())),
		}
	}
}

impl Default for InMemoryWorkspaceStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl WorkspaceStore for InMemoryWorkspaceStore {
	async fn insert(&self, workspace: NewWorkspace) -> Result<Workspace> {
		let record = Workspace {
			id: WorkspaceId::generate(),
			name: workspace.name,
			code: workspace.code,
			owner: workspace.owner,
			members: workspace.members,
			created_at: Utc::now(),
		};
		let mut rows = self.rows.lock().await;
		rows.insert(record.id.clone(), record.clone());
		Ok(record)
	}

	async fn find_by_id(&self, id: &WorkspaceId) -> Result<Option<Workspace>> {
		let rows = self.rows.lock().await;
		Ok(rows.get(id).cloned())
	}

	async fn find_by_code(&self, code: &str) -> Result<Option<Workspace>> {
		let rows = self.rows.lock().await;
		Ok(rows.values().find(|w| w.code == code).cloned())
	}

	async fn list_with_member(&self, user: &UserId) -> Result<Vec<Workspace>> {
		let rows = self.rows.lock().await;
		let mut workspaces: Vec<Workspace> =
			rows.values().filter(|w| w.members.contains(user)).cloned().collect();
		workspaces.sort_by(|a, b| a.created_at.cmp(&b.created_at));
		Ok(workspaces)
	}

	async fn list_all(&self) -> Result<Vec<Workspace>> {
		let rows = self.rows.lock().await;
		let mut workspaces: Vec<Workspace> = rows.values().cloned().collect();
		workspaces.sort_by(|a, b| a.created_at.cmp(&b.created_at));
		Ok(workspaces)
	}

	async fn add_member(&self, id: &WorkspaceId, user: &UserId) -> Result<bool> {
		let mut rows = self.rows.lock().await;
		let Some(workspace) = rows.get_mut(id) else {
			return Ok(false);
		};
		// Set semantics: a duplicate add is a no-op.
		if workspace.members.contains(user) {
			return Ok(false);
		}
		workspace.members.push(user.clone());
		Ok(true)
	}

	async fn remove_member(&self, id: &WorkspaceId, user: &UserId) -> Result<bool> {
		let mut rows = self.rows.lock().await;
		let Some(workspace) = rows.get_mut(id) else {
			return Ok(false);
		};
		let before = workspace.members.len();
		workspace.members.retain(|m| m != user);
		Ok(workspace.members.len() != before)
	}

	async fn delete(&self, id: &WorkspaceId) -> Result<bool> {
		let mut rows = self.rows.lock().await;
		Ok(rows.remove(id).is_some())
	}
}

/// In-memory calculation collection.
pub struct InMemoryCalculationStore {
	rows: Arc<Mutex<HashMap<RecordId, CalculationRecord>>>,
}

impl InMemoryCalculationStore {
	pub fn new() -> Self {
		Self {
			rows: Arc::new(Mutex::new(HashMap::new())),
		}
	}
}

impl Default for InMemoryCalculationStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl CalculationStore for InMemoryCalculationStore {
	async fn insert(&self, calculation: NewCalculation) -> Result<CalculationRecord> {
		let record = CalculationRecord {
			id: RecordId::generate(),
			user_id: calculation.user_id,
			workspace_id: calculation.workspace_id,
			parameters: calculation.parameters,
			result: calculation.result,
			status: "completed".to_string(),
			created_at: Utc::now(),
		};
		let mut rows = self.rows.lock().await;
		rows.insert(record.id.clone(), record.clone());
		Ok(record)
	}

	async fn list_for_user(&self, user: &UserId) -> Result<Vec<CalculationRecord>> {
		let rows = self.rows.lock().await;
		let mut records: Vec<CalculationRecord> =
			rows.values().filter(|r| &r.user_id == user).cloned().collect();
		records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
		Ok(records)
	}

	async fn delete_for_workspace(&self, workspace: &WorkspaceId) -> Result<usize> {
		let mut rows = self.rows.lock().await;
		let before = rows.len();
		rows.retain(|_, r| r.workspace_id.as_ref() != Some(workspace));
		Ok(before - rows.len())
	}
}

/// In-memory chat collection.
pub struct InMemoryChatStore {
	rows: Arc<Mutex<HashMap<RecordId, ChatMessage>>>,
}

impl InMemoryChatStore {
	pub fn new() -> Self {
		Self {
			rows: Arc::new(Mutex::new(HashMap::new())),
		}
	}
}

impl Default for InMemoryChatStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
	async fn insert(&self, message: NewChatMessage) -> Result<ChatMessage> {
		let record = ChatMessage {
			id: RecordId::generate(),
			kind: message.kind,
			sender: message.sender,
			receiver: message.receiver,
			workspace_id: message.workspace_id,
			message: message.message,
			sent_at: Utc::now(),
		};
		let mut rows = self.rows.lock().await;
		rows.insert(record.id.clone(), record.clone());
		Ok(record)
	}

	async fn direct_conversation(&self, user: &UserId) -> Result<Vec<ChatMessage>> {
		let party = ChatParty::User(user.clone());
		let rows = self.rows.lock().await;
		let mut messages: Vec<ChatMessage> = rows
			.values()
			.filter(|m| m.kind == ChatKind::Direct)
			.filter(|m| {
				(m.sender == party && m.receiver == Some(ChatParty::Admin))
					|| (m.sender == ChatParty::Admin && m.receiver == Some(party.clone()))
			})
			.cloned()
			.collect();
		messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));
		Ok(messages)
	}

	async fn list_direct(&self) -> Result<Vec<ChatMessage>> {
		let rows = self.rows.lock().await;
		let mut messages: Vec<ChatMessage> = rows
			.values()
			.filter(|m| m.kind == ChatKind::Direct)
			.cloned()
			.collect();
		messages.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
		Ok(messages)
	}

	async fn list_for_workspace(&self, workspace: &WorkspaceId) -> Result<Vec<ChatMessage>> {
		let rows = self.rows.lock().await;
		let mut messages: Vec<ChatMessage> = rows
			.values()
			.filter(|m| m.kind == ChatKind::Workspace && m.workspace_id.as_ref() == Some(workspace))
			.cloned()
			.collect();
		messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));
		Ok(messages)
	}

	async fn delete_for_workspace(&self, workspace: &WorkspaceId) -> Result<usize> {
		let mut rows = self.rows.lock().await;
		let before = rows.len();
		rows.retain(|_, m| m.workspace_id.as_ref() != Some(workspace));
		Ok(before - rows.len())
	}
}

/// In-memory proposal collection.
pub struct InMemoryProposalStore {
	rows: Arc<Mutex<HashMap<RecordId, Proposal>>>,
}

impl InMemoryProposalStore {
	pub fn new() -> Self {
		Self {
			rows: Arc::new(Mutex::new(HashMap::new())),
		}
	}
}

impl Default for InMemoryProposalStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl ProposalStore for InMemoryProposalStore {
	async fn insert(&self, proposal: NewProposal) -> Result<Proposal> {
		let record = Proposal {
			id: RecordId::generate(),
			sender: proposal.sender,
			proposal: proposal.proposal,
			status: ProposalStatus::Pending,
			submitted_at: Utc::now(),
		};
		let mut rows = self.rows.lock().await;
		rows.insert(record.id.clone(), record.clone());
		Ok(record)
	}

	async fn list_pending(&self) -> Result<Vec<Proposal>> {
		let rows = self.rows.lock().await;
		let mut proposals: Vec<Proposal> = rows
			.values()
			.filter(|p| p.status == ProposalStatus::Pending)
			.cloned()
			.collect();
		proposals.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
		Ok(proposals)
	}

	async fn set_status(&self, id: &RecordId, status: ProposalStatus) -> Result<bool> {
		let mut rows = self.rows.lock().await;
		match rows.get_mut(id) {
			Some(proposal) => {
				proposal.status = status;
				Ok(true)
			}
			None => Ok(false),
		}
	}
}

/// In-memory catalog collections.
pub struct InMemoryCatalogStore {
	items: Arc<Mutex<HashMap<RecordId, CatalogItem>>>,
	folders: Arc<Mutex<HashMap<RecordId, CatalogFolder>>>,
}

impl InMemoryCatalogStore {
	pub fn new() -> Self {
		Self {
			items: Arc::new(Mutex::new(HashMap::new())),
			folders: Arc::new(Mutex::new(HashMap::new())),
		}
	}
}

impl Default for InMemoryCatalogStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
	async fn list_items(&self) -> Result<Vec<CatalogItem>> {
		let items = self.items.lock().await;
		let mut listed: Vec<CatalogItem> = items.values().cloned().collect();
		listed.sort_by(|a, b| a.created_at.cmp(&b.created_at));
		Ok(listed)
	}

	async fn insert_item(&self, item: NewCatalogItem) -> Result<CatalogItem> {
		let record = CatalogItem {
			id: RecordId::generate(),
			name: item.name,
			data: item.data,
			created_at: Utc::now(),
		};
		let mut items = self.items.lock().await;
		items.insert(record.id.clone(), record.clone());
		Ok(record)
	}

	async fn insert_folder(&self, name: &str) -> Result<CatalogFolder> {
		let record = CatalogFolder {
			id: RecordId::generate(),
			name: name.to_string(),
			created_at: Utc::now(),
		};
		let mut folders = self.folders.lock().await;
		folders.insert(record.id.clone(), record.clone());
		Ok(record)
	}

	async fn find_folder_by_name(&self, name: &str) -> Result<Option<CatalogFolder>> {
		let folders = self.folders.lock().await;
		Ok(folders.values().find(|f| f.name == name).cloned())
	}

	async fn rename_folder(&self, id: &RecordId, name: &str) -> Result<bool> {
		let mut folders = self.folders.lock().await;
		match folders.get_mut(id) {
			Some(folder) => {
				folder.name = name.to_string();
				Ok(true)
			}
			None => Ok(false),
		}
	}

	async fn delete_folder(&self, id: &RecordId) -> Result<bool> {
		let mut folders = self.folders.lock().await;
		Ok(folders.remove(id).is_some())
	}
}
