//! Crate-wide error taxonomy.
//!
//! Every failure surfaced to a caller carries a stable category (HTTP status)
//! and a user-facing message. Handlers and components propagate `Error` with
//! `?`; the server boundary renders it as a structured JSON response.

use hyper::StatusCode;
use serde::Serialize;

use crate::http::Response;

pub type Result<T> = std::result::Result<T, Error>;

/// Application error taxonomy.
///
/// Validation errors map to 400, authentication failures to 401, role and
/// membership denials to 403, missing entities to 404, state conflicts to
/// 409 and everything else to 500.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// Missing or malformed input supplied by the caller.
	#[error("{0}")]
	Validation(String),

	/// No token was supplied in the `x-access-token` header.
	#[error("Token is missing")]
	MissingToken,

	/// The supplied token failed signature or expiry verification.
	#[error("Token is invalid")]
	InvalidToken,

	/// The token verified but its user record no longer exists.
	#[error("User not found")]
	UnknownUser,

	/// Login failed. Deliberately does not distinguish unknown email from
	/// wrong password.
	#[error("Invalid email or password")]
	InvalidCredentials,

	/// The caller is authenticated but lacks the required role or ownership.
	#[error("{0}")]
	Forbidden(String),

	/// The caller is authenticated but is not a member of the workspace.
	#[error("Access denied")]
	AccessDenied,

	/// A referenced entity does not exist.
	#[error("{0} not found")]
	NotFound(&'static str),

	/// The target user is not in the workspace's member set.
	#[error("Member not found in workspace")]
	MemberNotFound,

	#[error("Email already exists")]
	DuplicateEmail,

	#[error("Already a member")]
	AlreadyMember,

	#[error("Owner cannot leave the workspace")]
	OwnerCannotLeave,

	#[error("Owner cannot be kicked")]
	CannotKickOwner,

	/// Password hashing or verification failed.
	#[error("Password hashing error: {0}")]
	Hashing(String),

	/// A response body could not be serialized.
	#[error("Serialization error: {0}")]
	Serialization(String),

	/// The persistent store reported a failure.
	#[error("Storage error: {0}")]
	Store(String),

	/// Invariant violation inside the application itself.
	#[error("Internal error: {0}")]
	Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
	message: &'a str,
}

impl Error {
	/// HTTP status this error renders as.
	pub fn status(&self) -> StatusCode {
		match self {
			Error::Validation(_) => StatusCode::BAD_REQUEST,
			Error::MissingToken | Error::InvalidToken | Error::UnknownUser | Error::InvalidCredentials => {
				StatusCode::UNAUTHORIZED
			}
			Error::Forbidden(_) | Error::AccessDenied => StatusCode::FORBIDDEN,
			Error::NotFound(_) | Error::MemberNotFound => StatusCode::NOT_FOUND,
			Error::DuplicateEmail
			| Error::AlreadyMember
			| Error::OwnerCannotLeave
			| Error::CannotKickOwner => StatusCode::CONFLICT,
			Error::Hashing(_) | Error::Serialization(_) | Error::Store(_) | Error::Internal(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	/// Render this error as the structured JSON response sent to the caller.
	///
	/// Internal error details are not leaked: 5xx responses carry a generic
	/// message while the specifics stay in the server log.
	pub fn into_response(self) -> Response {
		let status = self.status();
		let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
			tracing::error!(error = %self, "request failed");
			"Internal server error".to_string()
		} else {
			self.to_string()
		};
		Response::new(status)
			.with_json(&ErrorBody { message: &message })
			.unwrap_or_else(|_| Response::internal_server_error())
	}
}
