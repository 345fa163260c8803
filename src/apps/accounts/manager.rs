//! Credential store operations: the only component that touches passwords.

use std::sync::Arc;

use crate::apps::accounts::models::{NewUser, Role, User, UserStore};
use crate::auth::hasher::PasswordHasher;
use crate::exception::{Error, Result};
use crate::store::UserId;

/// Manages user credentials over an injected [`UserStore`] and hasher.
pub struct UserManager {
	store: Arc<dyn UserStore>,
	hasher: Arc<dyn PasswordHasher>,
	/// Verified against when the email is unknown, so the unknown-email and
	/// wrong-password paths cost the same hash work.
	dummy_hash: String,
}

impl UserManager {
	pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
		let dummy_hash = hasher.hash("gearcalc-credential-placeholder").unwrap_or_default();
		Self {
			store,
			hasher,
			dummy_hash,
		}
	}

	/// Create a user with a freshly hashed password.
	///
	/// Email uniqueness is check-then-insert; the store serializes on the
	/// collection, a distributed backend would need a unique index.
	pub async fn create(&self, email: &str, raw_password: &str, role: Role) -> Result<User> {
		if self.store.find_by_email(email).await?.is_some() {
			return Err(Error::DuplicateEmail);
		}

		let password_hash = self.hasher.hash(raw_password)?;
		self.store
			.insert(NewUser {
				email: email.to_string(),
				password_hash,
				role,
			})
			.await
	}

	/// Verify credentials, returning the matching user.
	///
	/// The error is the same whether the email is unknown or the password is
	/// wrong.
	pub async fn verify(&self, email: &str, raw_password: &str) -> Result<User> {
		match self.store.find_by_email(email).await? {
			Some(user) => {
				if self.hasher.verify(raw_password, &user.password_hash)? {
					Ok(user)
				} else {
					Err(Error::InvalidCredentials)
				}
			}
			None => {
				let _ = self.hasher.verify(raw_password, &self.dummy_hash);
				Err(Error::InvalidCredentials)
			}
		}
	}

	/// Resolve a user by id (used by the access-control guard).
	pub async fn get(&self, id: &UserId) -> Result<Option<User>> {
		self.store.find_by_id(id).await
	}

	pub async fn delete(&self, id: &UserId) -> Result<bool> {
		self.store.delete(id).await
	}

	pub async fn list(&self) -> Result<Vec<User>> {
		self.store.list().await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::auth::hasher::Argon2Hasher;
	use crate::store::memory::InMemoryUserStore;

	fn manager() -> UserManager {
		UserManager::new(Arc::new(InMemoryUserStore::new()), Arc::new(Argon2Hasher::new()))
	}

	#[tokio::test]
	async fn test_create_then_verify() {
		let users = manager();
		let created = users.create("a@x.com", "p1", Role::User).await.unwrap();

		let verified = users.verify("a@x.com", "p1").await.unwrap();
		assert_eq!(verified.id, created.id);
	}

	#[tokio::test]
	async fn test_duplicate_email_rejected() {
		let users = manager();
		users.create("a@x.com", "p1", Role::User).await.unwrap();

		let err = users.create("a@x.com", "p2", Role::Admin).await.unwrap_err();
		assert_eq!(err, Error::DuplicateEmail);
		assert_eq!(users.list().await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn test_verify_failures_are_indistinguishable() {
		let users = manager();
		users.create("a@x.com", "p1", Role::User).await.unwrap();

		let wrong_password = users.verify("a@x.com", "nope").await.unwrap_err();
		let unknown_email = users.verify("b@x.com", "p1").await.unwrap_err();
		assert_eq!(wrong_password, unknown_email);
	}

	#[tokio::test]
	async fn test_stored_password_is_hashed() {
		let users = manager();
		let created = users.create("a@x.com", "p1", Role::User).await.unwrap();
		assert_ne!(created.password_hash, "p1");
		assert!(created.password_hash.starts_with("$argon2"));
	}
}
