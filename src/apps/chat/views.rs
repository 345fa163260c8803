//! Chat and proposal endpoints.
//!
//! Direct chat is user-to-admin support messaging: a regular user's messages
//! always address the admin console, and admins reply through the console
//! endpoints. Workspace chat is a flat message stream per workspace.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::apps::accounts::models::UserStore;
use crate::apps::chat::models::{
	ChatKind, ChatMessage, ChatParty, ChatStore, NewChatMessage, NewProposal, Proposal,
	ProposalStatus, ProposalStore,
};
use crate::auth::CurrentUser;
use crate::exception::{Error, Result};
use crate::http::{Handler, Request, Response};
use crate::store::{RecordId, UserId, WorkspaceId};

#[derive(Serialize)]
struct MessageResponse<'a> {
	message: &'a str,
}

/// A chat message with the sender's email resolved for display.
#[derive(Serialize)]
struct EnrichedChatMessage {
	#[serde(flatten)]
	message: ChatMessage,
	sender_email: String,
}

/// Resolve sender emails for a batch of messages. Senders whose account no
/// longer exists render as "Unknown"; the admin console renders as "admin".
async fn enrich(users: &Arc<dyn UserStore>, messages: Vec<ChatMessage>) -> Result<Vec<EnrichedChatMessage>> {
	let ids: Vec<UserId> = messages
		.iter()
		.filter_map(|m| match &m.sender {
			ChatParty::User(id) => Some(id.clone()),
			ChatParty::Admin => None,
		})
		.collect();
	let records = users.find_many(&ids).await?;

	Ok(messages
		.into_iter()
		.map(|message| {
			let sender_email = match &message.sender {
				ChatParty::Admin => "admin".to_string(),
				ChatParty::User(id) => records
					.iter()
					.find(|u| &u.id == id)
					.map(|u| u.email.clone())
					.unwrap_or_else(|| "Unknown".to_string()),
			};
			EnrichedChatMessage {
				message,
				sender_email,
			}
		})
		.collect())
}

#[derive(Default, Deserialize)]
struct SendDirectChatRequest {
	message: Option<String>,
}

/// POST /api/chat/direct/send: a regular user messages the admin console.
pub struct SendDirectChatView {
	chats: Arc<dyn ChatStore>,
}

impl SendDirectChatView {
	pub fn new(chats: Arc<dyn ChatStore>) -> Self {
		Self { chats }
	}
}

#[async_trait]
impl Handler for SendDirectChatView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let body: SendDirectChatRequest = request.json().unwrap_or_default();
		let message = body
			.message
			.filter(|m| !m.is_empty())
			.ok_or_else(|| Error::Validation("Message required".to_string()))?;

		self.chats
			.insert(NewChatMessage {
				kind: ChatKind::Direct,
				sender: ChatParty::User(current.user().id.clone()),
				receiver: Some(ChatParty::Admin),
				workspace_id: None,
				message,
			})
			.await?;

		Response::ok().with_json(&MessageResponse {
			message: "Direct message sent",
		})
	}
}

#[derive(Serialize)]
struct ChatHistoryResponse {
	messages: Vec<EnrichedChatMessage>,
}

/// GET /api/chat/direct: the caller's conversation with the admin console.
pub struct GetDirectChatView {
	chats: Arc<dyn ChatStore>,
	users: Arc<dyn UserStore>,
}

impl GetDirectChatView {
	pub fn new(chats: Arc<dyn ChatStore>, users: Arc<dyn UserStore>) -> Self {
		Self { chats, users }
	}
}

#[async_trait]
impl Handler for GetDirectChatView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let messages = self.chats.direct_conversation(&current.user().id).await?;
		Response::ok().with_json(&ChatHistoryResponse {
			messages: enrich(&self.users, messages).await?,
		})
	}
}

#[derive(Default, Deserialize)]
struct SendWorkspaceChatRequest {
	workspace_id: Option<WorkspaceId>,
	message: Option<String>,
}

/// POST /api/workspace/chat/send
pub struct SendWorkspaceChatView {
	chats: Arc<dyn ChatStore>,
}

impl SendWorkspaceChatView {
	pub fn new(chats: Arc<dyn ChatStore>) -> Self {
		Self { chats }
	}
}

#[async_trait]
impl Handler for SendWorkspaceChatView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let body: SendWorkspaceChatRequest = request.json().unwrap_or_default();
		let (workspace_id, message) = match (body.workspace_id, body.message.filter(|m| !m.is_empty())) {
			(Some(w), Some(m)) => (w, m),
			_ => return Err(Error::Validation("Workspace and message required".to_string())),
		};

		self.chats
			.insert(NewChatMessage {
				kind: ChatKind::Workspace,
				sender: ChatParty::User(current.user().id.clone()),
				receiver: None,
				workspace_id: Some(workspace_id),
				message,
			})
			.await?;

		Response::ok().with_json(&MessageResponse {
			message: "Workspace chat message sent",
		})
	}
}

/// GET /api/workspace/chat/{workspace_id}
pub struct GetWorkspaceChatView {
	chats: Arc<dyn ChatStore>,
	users: Arc<dyn UserStore>,
}

impl GetWorkspaceChatView {
	pub fn new(chats: Arc<dyn ChatStore>, users: Arc<dyn UserStore>) -> Self {
		Self { chats, users }
	}
}

#[async_trait]
impl Handler for GetWorkspaceChatView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let _ = CurrentUser::from_request(&request)?;
		let workspace_id = request
			.path_param("workspace_id")
			.map(WorkspaceId::from)
			.ok_or_else(|| Error::Validation("Workspace ID required".to_string()))?;

		let messages = self.chats.list_for_workspace(&workspace_id).await?;
		Response::ok().with_json(&ChatHistoryResponse {
			messages: enrich(&self.users, messages).await?,
		})
	}
}

#[derive(Default, Deserialize)]
struct ProposeRequest {
	proposal: Option<String>,
}

/// POST /api/chat/propose: submit a design-change proposal for admin review.
pub struct ProposeView {
	proposals: Arc<dyn ProposalStore>,
}

impl ProposeView {
	pub fn new(proposals: Arc<dyn ProposalStore>) -> Self {
		Self { proposals }
	}
}

#[async_trait]
impl Handler for ProposeView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let body: ProposeRequest = request.json().unwrap_or_default();
		let proposal = body
			.proposal
			.filter(|p| !p.is_empty())
			.ok_or_else(|| Error::Validation("Proposal required".to_string()))?;

		self.proposals
			.insert(NewProposal {
				sender: current.user().id.clone(),
				proposal,
			})
			.await?;

		Response::ok().with_json(&MessageResponse {
			message: "Proposal submitted",
		})
	}
}

#[derive(Serialize)]
struct ProposalListResponse {
	proposals: Vec<Proposal>,
}

/// GET /api/chat/proposals: pending proposals, oldest first.
pub struct ListProposalsView {
	proposals: Arc<dyn ProposalStore>,
}

impl ListProposalsView {
	pub fn new(proposals: Arc<dyn ProposalStore>) -> Self {
		Self { proposals }
	}
}

#[async_trait]
impl Handler for ListProposalsView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		let proposals = self.proposals.list_pending().await?;
		Response::ok().with_json(&ProposalListResponse { proposals })
	}
}

/// POST /api/chat/proposals/{id}/approve and .../reject.
pub struct ProposalDecisionView {
	proposals: Arc<dyn ProposalStore>,
	decision: ProposalStatus,
}

impl ProposalDecisionView {
	pub fn approve(proposals: Arc<dyn ProposalStore>) -> Self {
		Self {
			proposals,
			decision: ProposalStatus::Approved,
		}
	}

	pub fn reject(proposals: Arc<dyn ProposalStore>) -> Self {
		Self {
			proposals,
			decision: ProposalStatus::Rejected,
		}
	}
}

#[async_trait]
impl Handler for ProposalDecisionView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let id = request
			.path_param("id")
			.map(RecordId::from)
			.ok_or_else(|| Error::Validation("Proposal ID required".to_string()))?;

		if !self.proposals.set_status(&id, self.decision).await? {
			return Err(Error::NotFound("Proposal"));
		}

		Response::ok().with_json(&MessageResponse {
			message: match self.decision {
				ProposalStatus::Approved => "Proposal approved",
				ProposalStatus::Rejected => "Proposal rejected",
				ProposalStatus::Pending => "Proposal pending",
			},
		})
	}
}

#[derive(Serialize)]
struct AdminChatListResponse {
	chats: Vec<EnrichedChatMessage>,
}

/// GET /api/admin/chats: every direct conversation, newest first.
pub struct AdminListChatsView {
	chats: Arc<dyn ChatStore>,
	users: Arc<dyn UserStore>,
}

impl AdminListChatsView {
	pub fn new(chats: Arc<dyn ChatStore>, users: Arc<dyn UserStore>) -> Self {
		Self { chats, users }
	}
}

#[async_trait]
impl Handler for AdminListChatsView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		let messages = self.chats.list_direct().await?;
		Response::ok().with_json(&AdminChatListResponse {
			chats: enrich(&self.users, messages).await?,
		})
	}
}

#[derive(Default, Deserialize)]
struct AdminSendChatRequest {
	receiver_id: Option<UserId>,
	message: Option<String>,
}

/// POST /api/admin/chats: admin replies to a user's direct conversation.
pub struct AdminSendChatView {
	chats: Arc<dyn ChatStore>,
}

impl AdminSendChatView {
	pub fn new(chats: Arc<dyn ChatStore>) -> Self {
		Self { chats }
	}
}

#[async_trait]
impl Handler for AdminSendChatView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let _ = CurrentUser::from_request(&request)?;
		let body: AdminSendChatRequest = request.json().unwrap_or_default();
		let (receiver_id, message) = match (body.receiver_id, body.message.filter(|m| !m.is_empty())) {
			(Some(r), Some(m)) => (r, m),
			_ => return Err(Error::Validation("Receiver and message required".to_string())),
		};

		self.chats
			.insert(NewChatMessage {
				kind: ChatKind::Direct,
				sender: ChatParty::Admin,
				receiver: Some(ChatParty::User(receiver_id)),
				workspace_id: None,
				message,
			})
			.await?;

		Response::ok().with_json(&MessageResponse {
			message: "Direct reply sent from admin",
		})
	}
}
