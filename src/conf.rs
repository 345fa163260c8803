//! Environment-backed runtime settings.
//!
//! Settings are read once at startup and injected into the components that
//! need them. Every value has a development default so `manage runserver`
//! works out of the box; production deployments override via environment.

use std::net::SocketAddr;

use crate::exception::{Error, Result};

/// Default session token lifetime in hours.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 2;

#[derive(Clone, Debug)]
pub struct Settings {
	/// Address the HTTP server binds to.
	pub bind_addr: SocketAddr,
	/// HMAC secret for session token signing.
	pub secret_key: String,
	/// Session token lifetime in hours.
	pub token_ttl_hours: i64,
	/// Shared key required by the admin seed endpoint.
	pub admin_seed_key: String,
}

impl Settings {
	/// Load settings from `GEARCALC_*` environment variables, falling back
	/// to development defaults.
	pub fn from_env() -> Result<Self> {
		let bind_addr = match std::env::var("GEARCALC_BIND") {
			Ok(raw) => raw
				.parse()
				.map_err(|_| Error::Validation(format!("GEARCALC_BIND is not a socket address: {raw}")))?,
			Err(_) => "127.0.0.1:8000".parse().expect("default bind address"),
		};

		let secret_key = match std::env::var("GEARCALC_SECRET_KEY") {
			Ok(key) if !key.is_empty() => key,
			_ => {
				tracing::warn!("GEARCALC_SECRET_KEY not set, using insecure development key");
				"gearcalc-development-secret".to_string()
			}
		};

		let token_ttl_hours = match std::env::var("GEARCALC_TOKEN_TTL_HOURS") {
			Ok(raw) => raw
				.parse()
				.map_err(|_| Error::Validation(format!("GEARCALC_TOKEN_TTL_HOURS is not a number: {raw}")))?,
			Err(_) => DEFAULT_TOKEN_TTL_HOURS,
		};

		let admin_seed_key = match std::env::var("GEARCALC_SEED_KEY") {
			Ok(key) if !key.is_empty() => key,
			_ => "admin-creation-secret".to_string(),
		};

		Ok(Self {
			bind_addr,
			secret_key,
			token_ttl_hours,
			admin_seed_key,
		})
	}
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			bind_addr: "127.0.0.1:8000".parse().expect("default bind address"),
			secret_key: "gearcalc-development-secret".to_string(),
			token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
			admin_seed_key: "admin-creation-secret".to_string(),
		}
	}
}
