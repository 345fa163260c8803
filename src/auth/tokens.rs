//! Stateless session tokens.
//!
//! Tokens are HS256 JWTs binding a user identifier to an absolute expiry.
//! They are bearer credentials: possession is sufficient, there is no
//! server-side revocation, and the only mitigation for a leaked token is the
//! short lifetime.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::exception::{Error, Result};
use crate::store::UserId;

/// JWT claims: subject (user id), issued-at and expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
	pub sub: String,
	pub iat: i64,
	pub exp: i64,
}

impl Claims {
	/// Claims for `user_id` expiring `expires_in` from now.
	pub fn new(user_id: &UserId, expires_in: Duration) -> Self {
		let now = Utc::now();
		Self {
			sub: user_id.to_string(),
			iat: now.timestamp(),
			exp: (now + expires_in).timestamp(),
		}
	}
}

/// Issues and verifies session tokens.
pub struct TokenService {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
	validation: Validation,
	lifetime: Duration,
}

impl TokenService {
	pub fn new(secret: &[u8], lifetime: Duration) -> Self {
		let mut validation = Validation::new(Algorithm::HS256);
		// Strict expiry: a token one second past its expiry must fail.
		validation.leeway = 0;
		Self {
			encoding_key: EncodingKey::from_secret(secret),
			decoding_key: DecodingKey::from_secret(secret),
			validation,
			lifetime,
		}
	}

	/// Issue a token for `user_id` with the configured lifetime.
	pub fn issue(&self, user_id: &UserId) -> Result<String> {
		self.sign(&Claims::new(user_id, self.lifetime))
	}

	/// Sign explicit claims. Exposed so tests can mint expired tokens.
	pub fn sign(&self, claims: &Claims) -> Result<String> {
		encode(&Header::default(), claims, &self.encoding_key)
			.map_err(|e| Error::Internal(format!("token signing failed: {e}")))
	}

	/// Verify a token's signature and expiry, returning the embedded user id.
	///
	/// Fails closed: any decoding error, malformed payload or expired
	/// timestamp collapses into [`Error::InvalidToken`].
	pub fn verify(&self, token: &str) -> Result<UserId> {
		decode::<Claims>(token, &self.decoding_key, &self.validation)
			.map(|data| UserId::from(data.claims.sub))
			.map_err(|_| Error::InvalidToken)
	}
}
