//! Shared fixture: the full application wired over in-memory stores, driven
//! through the router exactly as the server would drive it.

// Not every test binary uses every helper.
#![allow(dead_code)]

use hyper::{Method, StatusCode};
use serde_json::Value;

use gearcalc::auth::TOKEN_HEADER;
use gearcalc::conf::Settings;
use gearcalc::http::{Handler, Request, Response};
use gearcalc::routing::Router;
use gearcalc::urls::{AppContext, build_router};

pub const SEED_KEY: &str = "test-seed-key";

pub struct TestApp {
	pub ctx: AppContext,
	router: Router,
}

impl TestApp {
	pub fn new() -> Self {
		let settings = Settings {
			secret_key: "test-secret".to_string(),
			admin_seed_key: SEED_KEY.to_string(),
			..Settings::default()
		};
		let ctx = AppContext::with_memory_stores(settings);
		let router = build_router(&ctx);
		Self { ctx, router }
	}

	/// Dispatch through the router, rendering errors the way the server does.
	pub async fn dispatch(&self, request: Request) -> Response {
		self.router
			.handle(request)
			.await
			.unwrap_or_else(gearcalc::Error::into_response)
	}

	pub async fn request(
		&self,
		method: Method,
		path: &str,
		token: Option<&str>,
		body: Option<&Value>,
	) -> (StatusCode, Value) {
		let mut builder = Request::builder().method(method).uri(path);
		if let Some(token) = token {
			builder = builder.header(TOKEN_HEADER, token);
		}
		if let Some(body) = body {
			builder = builder.json(body);
		}
		let response = self.dispatch(builder.build().unwrap()).await;

		let status = response.status;
		let body = if response.body.is_empty() {
			Value::Null
		} else {
			serde_json::from_slice(&response.body).expect("response body is JSON")
		};
		(status, body)
	}

	pub async fn post(&self, path: &str, token: Option<&str>, body: &Value) -> (StatusCode, Value) {
		self.request(Method::POST, path, token, Some(body)).await
	}

	pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
		self.request(Method::GET, path, token, None).await
	}

	pub async fn delete(&self, path: &str, token: Option<&str>, body: &Value) -> (StatusCode, Value) {
		self.request(Method::DELETE, path, token, Some(body)).await
	}

	/// Register a regular user and log in, returning (token, user_id).
	pub async fn register_and_login(&self, email: &str, password: &str) -> (String, String) {
		let (status, _) = self
			.post(
				"/api/register",
				None,
				&serde_json::json!({"email": email, "password": password}),
			)
			.await;
		assert_eq!(status, StatusCode::CREATED, "registration failed for {email}");

		self.login(email, password).await
	}

	pub async fn login(&self, email: &str, password: &str) -> (String, String) {
		let (status, body) = self
			.post(
				"/api/login",
				None,
				&serde_json::json!({"email": email, "password": password}),
			)
			.await;
		assert_eq!(status, StatusCode::OK, "login failed for {email}");

		let token = body["token"].as_str().expect("token in login response").to_string();
		let user_id = body["user"]["id"].as_str().expect("user id in login response").to_string();
		(token, user_id)
	}

	/// Seed an admin account and log in, returning its token.
	pub async fn seed_admin(&self, email: &str, password: &str) -> String {
		let request = Request::builder()
			.method(Method::POST)
			.uri("/api/seed_admin")
			.header("x-seed-key", SEED_KEY)
			.json(&serde_json::json!({"email": email, "password": password}))
			.build()
			.unwrap();
		let response = self.dispatch(request).await;
		assert_eq!(response.status, StatusCode::CREATED, "admin seeding failed");

		self.login(email, password).await.0
	}

	/// Create a workspace as `token`, returning (workspace_id, code).
	pub async fn create_workspace(&self, token: &str, name: &str) -> (String, String) {
		let (status, body) = self
			.post(
				"/api/workspace/create",
				Some(token),
				&serde_json::json!({"name": name}),
			)
			.await;
		assert_eq!(status, StatusCode::CREATED, "workspace creation failed");

		let workspace = &body["workspace"];
		(
			workspace["id"].as_str().unwrap().to_string(),
			workspace["code"].as_str().unwrap().to_string(),
		)
	}
}
