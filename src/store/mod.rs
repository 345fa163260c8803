//! Storage layer: typed identifiers and the in-memory store backends.
//!
//! Every collection sits behind a trait defined next to its model (the way
//! the collection's owning component consumes it); the implementations here
//! are injected as `Arc<dyn ...Store>` handles so tests and the server share
//! the same wiring. Identifiers are opaque typed strings generated by the
//! store layer; nothing in the application compares raw strings across
//! identifier types.

pub mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a user record.
///
/// # Examples
///
/// ```
/// use gearcalc::store::UserId;
///
/// let id = UserId::generate();
/// let same = UserId::from(id.as_str());
/// assert_eq!(id, same);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
	pub fn generate() -> Self {
		Self(Uuid::new_v4().to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for UserId {
	fn from(raw: &str) -> Self {
		Self(raw.to_string())
	}
}

impl From<String> for UserId {
	fn from(raw: String) -> Self {
		Self(raw)
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Identifier of a workspace document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(String);

impl WorkspaceId {
	pub fn generate() -> Self {
		Self(Uuid::new_v4().to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for WorkspaceId {
	fn from(raw: &str) -> Self {
		Self(raw.to_string())
	}
}

impl From<String> for WorkspaceId {
	fn from(raw: String) -> Self {
		Self(raw)
	}
}

impl fmt::Display for WorkspaceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Identifier of a peripheral record (calculation, chat message, proposal,
/// catalog document).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
	pub fn generate() -> Self {
		Self(Uuid::new_v4().to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for RecordId {
	fn from(raw: &str) -> Self {
		Self(raw.to_string())
	}
}

impl From<String> for RecordId {
	fn from(raw: String) -> Self {
		Self(raw)
	}
}

impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generated_ids_are_unique() {
		assert_ne!(UserId::generate(), UserId::generate());
		assert_ne!(WorkspaceId::generate(), WorkspaceId::generate());
	}

	#[test]
	fn test_id_serializes_as_plain_string() {
		let id = UserId::from("abc-123");
		assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-123\"");
	}
}
