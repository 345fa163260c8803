//! Access-control guard.
//!
//! Every protected route is wrapped in an [`AuthGuard`] exactly once, at
//! route construction. The guard resolves the bearer token to a live user
//! record, optionally enforces a role, and only then invokes the wrapped
//! handler with the resolved user attached to the request.

use std::sync::Arc;

use async_trait::async_trait;

use crate::apps::accounts::manager::UserManager;
use crate::apps::accounts::models::{Role, User};
use crate::exception::{Error, Result};
use crate::http::{Handler, Middleware, Request, Response};

/// Request header carrying the bearer token.
pub const TOKEN_HEADER: &str = "x-access-token";

/// The resolved user attached to a request by the guard.
#[derive(Clone)]
pub struct CurrentUser(pub Arc<User>);

impl CurrentUser {
	/// Fetch the resolved user from a guarded request.
	///
	/// Absence means the route was wired without its guard, which is a
	/// programming error, not a client error.
	pub fn from_request(request: &Request) -> Result<Self> {
		request
			.extensions
			.get::<CurrentUser>()
			.ok_or_else(|| Error::Internal("authentication context missing".to_string()))
	}

	pub fn user(&self) -> &User {
		&self.0
	}
}

/// Token-resolution and role-check middleware.
///
/// Two capability levels: `authenticated` accepts any resolvable token,
/// `role_restricted` additionally requires an exact role match.
pub struct AuthGuard {
	tokens: Arc<crate::auth::tokens::TokenService>,
	users: Arc<UserManager>,
	required_role: Option<Role>,
}

impl AuthGuard {
	/// Guard requiring only a valid token.
	pub fn authenticated(
		tokens: Arc<crate::auth::tokens::TokenService>,
		users: Arc<UserManager>,
	) -> Self {
		Self {
			tokens,
			users,
			required_role: None,
		}
	}

	/// Guard requiring a valid token and an exact role.
	pub fn role_restricted(
		tokens: Arc<crate::auth::tokens::TokenService>,
		users: Arc<UserManager>,
		role: Role,
	) -> Self {
		Self {
			tokens,
			users,
			required_role: Some(role),
		}
	}

	async fn resolve(&self, request: &Request) -> Result<User> {
		let token = request.header(TOKEN_HEADER).ok_or(Error::MissingToken)?;
		let user_id = self.tokens.verify(token)?;
		let user = self.users.get(&user_id).await?.ok_or(Error::UnknownUser)?;

		if let Some(required) = self.required_role {
			if user.role != required {
				return Err(Error::Forbidden(match required {
					Role::Admin => "Admin privilege required".to_string(),
					Role::User => "Only regular users can access this endpoint".to_string(),
				}));
			}
		}

		Ok(user)
	}
}

#[async_trait]
impl Middleware for AuthGuard {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let user = self.resolve(&request).await?;
		request.extensions.insert(CurrentUser(Arc::new(user)));
		next.handle(request).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::auth::hasher::Argon2Hasher;
	use crate::auth::tokens::TokenService;
	use crate::store::memory::InMemoryUserStore;
	use chrono::Duration;
	use hyper::Method;
	use rstest::rstest;

	struct WhoAmI;

	#[async_trait]
	impl Handler for WhoAmI {
		async fn handle(&self, request: Request) -> Result<Response> {
			let current = CurrentUser::from_request(&request)?;
			Ok(Response::ok().with_body(current.user().email.clone()))
		}
	}

	struct Fixture {
		tokens: Arc<TokenService>,
		users: Arc<UserManager>,
	}

	impl Fixture {
		fn new() -> Self {
			Self {
				tokens: Arc::new(TokenService::new(b"secret", Duration::hours(2))),
				users: Arc::new(UserManager::new(
					Arc::new(InMemoryUserStore::new()),
					Arc::new(Argon2Hasher::new()),
				)),
			}
		}

		async fn user_with_role(&self, email: &str, role: Role) -> (User, String) {
			let user = self.users.create(email, "pw", role).await.unwrap();
			let token = self.tokens.issue(&user.id).unwrap();
			(user, token)
		}
	}

	fn request_with_token(token: Option<&str>) -> Request {
		let mut builder = Request::builder().method(Method::GET).uri("/protected");
		if let Some(token) = token {
			builder = builder.header(TOKEN_HEADER, token);
		}
		builder.build().unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_missing_token_rejected() {
		let fixture = Fixture::new();
		let guard = AuthGuard::authenticated(fixture.tokens.clone(), fixture.users.clone());

		let err = guard
			.process(request_with_token(None), Arc::new(WhoAmI))
			.await
			.unwrap_err();
		assert_eq!(err, Error::MissingToken);
	}

	#[rstest]
	#[tokio::test]
	async fn test_invalid_token_rejected() {
		let fixture = Fixture::new();
		let guard = AuthGuard::authenticated(fixture.tokens.clone(), fixture.users.clone());

		let err = guard
			.process(request_with_token(Some("garbage")), Arc::new(WhoAmI))
			.await
			.unwrap_err();
		assert_eq!(err, Error::InvalidToken);
	}

	#[rstest]
	#[tokio::test]
	async fn test_deleted_user_rejected() {
		let fixture = Fixture::new();
		let (user, token) = fixture.user_with_role("gone@x.com", Role::User).await;
		fixture.users.delete(&user.id).await.unwrap();

		let guard = AuthGuard::authenticated(fixture.tokens.clone(), fixture.users.clone());
		let err = guard
			.process(request_with_token(Some(&token)), Arc::new(WhoAmI))
			.await
			.unwrap_err();
		assert_eq!(err, Error::UnknownUser);
	}

	#[rstest]
	#[tokio::test]
	async fn test_role_mismatch_forbidden() {
		let fixture = Fixture::new();
		let (_, token) = fixture.user_with_role("user@x.com", Role::User).await;

		let guard =
			AuthGuard::role_restricted(fixture.tokens.clone(), fixture.users.clone(), Role::Admin);
		let err = guard
			.process(request_with_token(Some(&token)), Arc::new(WhoAmI))
			.await
			.unwrap_err();
		assert!(matches!(err, Error::Forbidden(_)));
	}

	#[rstest]
	#[tokio::test]
	async fn test_admin_rejected_from_user_endpoint() {
		let fixture = Fixture::new();
		let (_, token) = fixture.user_with_role("admin@x.com", Role::Admin).await;

		let guard =
			AuthGuard::role_restricted(fixture.tokens.clone(), fixture.users.clone(), Role::User);
		let err = guard
			.process(request_with_token(Some(&token)), Arc::new(WhoAmI))
			.await
			.unwrap_err();
		assert!(matches!(err, Error::Forbidden(_)));
	}

	#[rstest]
	#[tokio::test]
	async fn test_success_attaches_current_user() {
		let fixture = Fixture::new();
		let (_, token) = fixture.user_with_role("ok@x.com", Role::User).await;

		let guard =
			AuthGuard::role_restricted(fixture.tokens.clone(), fixture.users.clone(), Role::User);
		let response = guard
			.process(request_with_token(Some(&token)), Arc::new(WhoAmI))
			.await
			.unwrap();
		assert_eq!(String::from_utf8(response.body.to_vec()).unwrap(), "ok@x.com");
	}
}
