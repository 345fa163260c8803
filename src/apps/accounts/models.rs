//! User records and the credential collection interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exception::Result;
use crate::store::UserId;

/// Coarse permission tier attached to a credential record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
	Admin,
}

impl Default for Role {
	fn default() -> Self {
		Role::User
	}
}

impl std::fmt::Display for Role {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Role::User => f.write_str("user"),
			Role::Admin => f.write_str("admin"),
		}
	}
}

/// A stored user record. The password hash never leaves the accounts app;
/// every outward-facing projection goes through [`PublicUser`].
#[derive(Clone, Debug)]
pub struct User {
	pub id: UserId,
	pub email: String,
	pub password_hash: String,
	pub role: Role,
	pub created_at: DateTime<Utc>,
}

impl User {
	/// Hash-free projection safe to serialize into responses.
	pub fn public(&self) -> PublicUser {
		PublicUser {
			id: self.id.clone(),
			email: self.email.clone(),
			role: self.role,
		}
	}

	/// Summary used when expanding workspace member lists: id + email only.
	pub fn summary(&self) -> UserSummary {
		UserSummary {
			id: self.id.clone(),
			email: self.email.clone(),
		}
	}
}

/// Public projection of a user record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicUser {
	pub id: UserId,
	pub email: String,
	pub role: Role,
}

/// Minimal member summary embedded in workspace payloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
	pub id: UserId,
	pub email: String,
}

/// Fields of a user record prior to insertion; the store generates the
/// identifier and creation timestamp.
#[derive(Clone, Debug)]
pub struct NewUser {
	pub email: String,
	pub password_hash: String,
	pub role: Role,
}

/// Credential collection.
#[async_trait]
pub trait UserStore: Send + Sync {
	async fn insert(&self, user: NewUser) -> Result<User>;

	async fn find_by_id(&self, id: &UserId) -> Result<Option<User>>;

	async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

	/// Fetch the records for the given ids; missing ids are skipped.
	async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>>;

	async fn list(&self) -> Result<Vec<User>>;

	/// Delete a record, returning whether it existed.
	async fn delete(&self, id: &UserId) -> Result<bool>;
}
