//! Password hashing.

use crate::exception::{Error, Result};

/// Password hasher trait.
///
/// The credential store is the only consumer; swapping the algorithm means
/// implementing this trait and injecting the new hasher.
pub trait PasswordHasher: Send + Sync {
	/// Hashes a password, producing a PHC-format string with embedded salt.
	fn hash(&self, password: &str) -> Result<String>;

	/// Verifies a password against a stored hash.
	///
	/// Returns `Ok(true)` on a match, `Ok(false)` on a mismatch, and an error
	/// only when the stored hash cannot be parsed.
	fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Argon2id password hasher.
///
/// Argon2id is memory-hard and resistant to GPU and side-channel attacks;
/// the underlying crate performs the comparison in constant time.
pub struct Argon2Hasher;

impl Argon2Hasher {
	pub fn new() -> Self {
		Self
	}
}

impl Default for Argon2Hasher {
	fn default() -> Self {
		Self::new()
	}
}

impl PasswordHasher for Argon2Hasher {
	fn hash(&self, password: &str) -> Result<String> {
		use argon2::{
			Argon2,
			password_hash::{PasswordHasher as _, SaltString},
		};
		use rand::RngCore;

		let mut salt_bytes = [0u8; 16];
		rand::thread_rng().fill_bytes(&mut salt_bytes);

		let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| Error::Hashing(e.to_string()))?;

		Argon2::default()
			.hash_password(password.as_bytes(), &salt)
			.map(|hash| hash.to_string())
			.map_err(|e| Error::Hashing(e.to_string()))
	}

	fn verify(&self, password: &str, hash: &str) -> Result<bool> {
		use argon2::{
			Argon2,
			password_hash::{PasswordHash, PasswordVerifier},
		};

		let parsed_hash = PasswordHash::new(hash).map_err(|e| Error::Hashing(e.to_string()))?;

		Ok(Argon2::default()
			.verify_password(password.as_bytes(), &parsed_hash)
			.is_ok())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hash_and_verify() {
		let hasher = Argon2Hasher::new();
		let hash = hasher.hash("my_secure_password").unwrap();

		assert!(hasher.verify("my_secure_password", &hash).unwrap());
		assert!(!hasher.verify("wrong_password", &hash).unwrap());
	}

	#[test]
	fn test_hash_is_salted() {
		let hasher = Argon2Hasher::new();
		let first = hasher.hash("password").unwrap();
		let second = hasher.hash("password").unwrap();

		assert_ne!(first, second);
	}

	#[test]
	fn test_verify_rejects_garbage_hash() {
		let hasher = Argon2Hasher::new();
		assert!(hasher.verify("password", "not-a-phc-string").is_err());
	}
}
