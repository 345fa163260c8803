//! Account endpoints: registration, login, logout, admin seeding and the
//! admin user console.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::apps::accounts::manager::UserManager;
use crate::apps::accounts::models::{PublicUser, Role};
use crate::auth::{CurrentUser, TokenService};
use crate::exception::{Error, Result};
use crate::http::{Handler, Request, Response};
use crate::store::UserId;

/// Request header carrying the admin seed key.
pub const SEED_KEY_HEADER: &str = "x-seed-key";

#[derive(Default, Deserialize)]
struct CredentialsRequest {
	email: Option<String>,
	password: Option<String>,
}

impl CredentialsRequest {
	/// Extract non-empty email and password, or the canonical missing-fields
	/// error.
	fn into_fields(self) -> Result<(String, String)> {
		match (
			self.email.filter(|e| !e.is_empty()),
			self.password.filter(|p| !p.is_empty()),
		) {
			(Some(email), Some(password)) => Ok((email, password)),
			_ => Err(Error::Validation("Missing required fields".to_string())),
		}
	}
}

#[derive(Serialize)]
struct CreatedUserResponse<'a> {
	message: &'a str,
	user_id: UserId,
}

/// POST /api/register: open registration, always with the `user` role.
pub struct RegisterView {
	users: Arc<UserManager>,
}

impl RegisterView {
	pub fn new(users: Arc<UserManager>) -> Self {
		Self { users }
	}
}

#[async_trait]
impl Handler for RegisterView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let body: CredentialsRequest = request.json().unwrap_or_default();
		let (email, password) = body.into_fields()?;

		let user = self.users.create(&email, &password, Role::User).await?;
		Response::created().with_json(&CreatedUserResponse {
			message: "Registration successful",
			user_id: user.id,
		})
	}
}

#[derive(Serialize)]
struct LoginResponse<'a> {
	message: &'a str,
	token: String,
	user: PublicUser,
}

/// POST /api/login: verify credentials and mint a session token.
pub struct LoginView {
	users: Arc<UserManager>,
	tokens: Arc<TokenService>,
}

impl LoginView {
	pub fn new(users: Arc<UserManager>, tokens: Arc<TokenService>) -> Self {
		Self { users, tokens }
	}
}

#[async_trait]
impl Handler for LoginView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let body: CredentialsRequest = request.json().unwrap_or_default();
		let (email, password) = body.into_fields()?;

		let user = self.users.verify(&email, &password).await?;
		let token = self.tokens.issue(&user.id)?;

		Response::ok().with_json(&LoginResponse {
			message: "Login successful",
			token,
			user: user.public(),
		})
	}
}

#[derive(Serialize)]
struct MessageResponse<'a> {
	message: &'a str,
}

/// POST /api/logout: tokens are stateless, so logout is an acknowledgement
/// that the client drops its token.
pub struct LogoutView;

#[async_trait]
impl Handler for LogoutView {
	async fn handle(&self, request: Request) -> Result<Response> {
		// Guarded route: resolving the user validates the token one last time.
		let _ = CurrentUser::from_request(&request)?;
		Response::ok().with_json(&MessageResponse {
			message: "Logout successful, discard your token client-side",
		})
	}
}

/// POST /api/seed_admin: create an admin account, gated by the shared seed
/// key rather than a session token.
pub struct SeedAdminView {
	users: Arc<UserManager>,
	seed_key: String,
}

impl SeedAdminView {
	pub fn new(users: Arc<UserManager>, seed_key: String) -> Self {
		Self { users, seed_key }
	}
}

#[async_trait]
impl Handler for SeedAdminView {
	async fn handle(&self, request: Request) -> Result<Response> {
		// The seed key check comes first: a wrong key fails regardless of
		// payload.
		if request.header(SEED_KEY_HEADER) != Some(self.seed_key.as_str()) {
			return Err(Error::Forbidden(
				"Not authorized to seed admin account".to_string(),
			));
		}

		let body: CredentialsRequest = request.json().unwrap_or_default();
		let (email, password) = body.into_fields()?;

		let user = self.users.create(&email, &password, Role::Admin).await?;
		Response::created().with_json(&CreatedUserResponse {
			message: "Admin account created successfully",
			user_id: user.id,
		})
	}
}

#[derive(Serialize)]
struct UserListResponse {
	users: Vec<PublicUser>,
}

/// GET /api/admin/users: list all users, hash-free.
pub struct AdminListUsersView {
	users: Arc<UserManager>,
}

impl AdminListUsersView {
	pub fn new(users: Arc<UserManager>) -> Self {
		Self { users }
	}
}

#[async_trait]
impl Handler for AdminListUsersView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		let users = self.users.list().await?;
		Response::ok().with_json(&UserListResponse {
			users: users.iter().map(|u| u.public()).collect(),
		})
	}
}

#[derive(Default, Deserialize)]
struct AdminAddUserRequest {
	email: Option<String>,
	password: Option<String>,
	#[serde(default)]
	role: Option<Role>,
}

/// POST /api/admin/add_user: admin-created account, any role.
pub struct AdminAddUserView {
	users: Arc<UserManager>,
}

impl AdminAddUserView {
	pub fn new(users: Arc<UserManager>) -> Self {
		Self { users }
	}
}

#[async_trait]
impl Handler for AdminAddUserView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let body: AdminAddUserRequest = request.json().unwrap_or_default();
		let role = body.role.unwrap_or_default();
		let (email, password) = CredentialsRequest {
			email: body.email,
			password: body.password,
		}
		.into_fields()?;

		let user = self.users.create(&email, &password, role).await?;
		Response::created().with_json(&CreatedUserResponse {
			message: "User added successfully",
			user_id: user.id,
		})
	}
}

#[derive(Default, Deserialize)]
struct DeleteUserRequest {
	user_id: Option<UserId>,
}

/// DELETE /api/admin/user/delete: remove a user record. Deleting an absent
/// user is reported as success, matching the operation's idempotent intent.
pub struct AdminDeleteUserView {
	users: Arc<UserManager>,
}

impl AdminDeleteUserView {
	pub fn new(users: Arc<UserManager>) -> Self {
		Self { users }
	}
}

#[async_trait]
impl Handler for AdminDeleteUserView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let body: DeleteUserRequest = request.json().unwrap_or_default();
		let user_id = body
			.user_id
			.ok_or_else(|| Error::Validation("User ID required".to_string()))?;

		self.users.delete(&user_id).await?;
		Response::ok().with_json(&MessageResponse {
			message: "User deleted successfully",
		})
	}
}
