//! Direct/workspace chat and design-change proposals.

pub mod models;
pub mod views;

pub use models::{
	ChatKind, ChatMessage, ChatParty, ChatStore, NewChatMessage, NewProposal, Proposal,
	ProposalStatus, ProposalStore,
};
