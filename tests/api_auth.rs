//! Authentication and account endpoint tests.

mod common;

use chrono::Duration;
use hyper::{Method, StatusCode};
use serde_json::json;

use common::TestApp;
use gearcalc::auth::Claims;
use gearcalc::http::Request;
use gearcalc::store::UserId;

#[tokio::test]
async fn test_register_then_login_roundtrip() {
	let app = TestApp::new();

	let (status, body) = app
		.post("/api/register", None, &json!({"email": "a@x.com", "password": "p1"}))
		.await;
	assert_eq!(status, StatusCode::CREATED);
	let registered_id = body["user_id"].as_str().unwrap().to_string();

	let (token, user_id) = app.login("a@x.com", "p1").await;
	assert_eq!(user_id, registered_id);

	// The token verifies to the same user identifier.
	let verified = app.ctx.tokens.verify(&token).unwrap();
	assert_eq!(verified, UserId::from(registered_id.as_str()));
}

#[tokio::test]
async fn test_register_duplicate_email_conflict() {
	let app = TestApp::new();
	app.register_and_login("a@x.com", "p1").await;

	let (status, body) = app
		.post("/api/register", None, &json!({"email": "a@x.com", "password": "p2"}))
		.await;
	assert_eq!(status, StatusCode::CONFLICT);
	assert_eq!(body["message"], "Email already exists");

	// No duplicate record was created.
	let admin_token = app.seed_admin("root@x.com", "pw").await;
	let (_, body) = app.get("/api/admin/users", Some(&admin_token)).await;
	let with_email = body["users"]
		.as_array()
		.unwrap()
		.iter()
		.filter(|u| u["email"] == "a@x.com")
		.count();
	assert_eq!(with_email, 1);
}

#[tokio::test]
async fn test_register_missing_fields() {
	let app = TestApp::new();

	let (status, body) = app
		.post("/api/register", None, &json!({"email": "a@x.com"}))
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["message"], "Missing required fields");
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
	let app = TestApp::new();
	app.register_and_login("a@x.com", "p1").await;

	let (wrong_pw_status, wrong_pw) = app
		.post("/api/login", None, &json!({"email": "a@x.com", "password": "nope"}))
		.await;
	let (unknown_status, unknown) = app
		.post("/api/login", None, &json!({"email": "b@x.com", "password": "p1"}))
		.await;

	assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
	assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
	assert_eq!(wrong_pw["message"], unknown["message"]);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
	let app = TestApp::new();

	let (status, body) = app.get("/api/workspace/list", None).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["message"], "Token is missing");

	let (status, body) = app.get("/api/workspace/list", Some("garbage")).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["message"], "Token is invalid");
}

#[tokio::test]
async fn test_expired_token_rejected_even_with_valid_signature() {
	let app = TestApp::new();
	let (_, user_id) = app.register_and_login("a@x.com", "p1").await;

	let expired = app
		.ctx
		.tokens
		.sign(&Claims::new(&UserId::from(user_id.as_str()), Duration::seconds(-5)))
		.unwrap();

	let (status, body) = app.get("/api/workspace/list", Some(&expired)).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["message"], "Token is invalid");
}

#[tokio::test]
async fn test_token_of_deleted_user_rejected() {
	let app = TestApp::new();
	let (token, user_id) = app.register_and_login("a@x.com", "p1").await;
	let admin_token = app.seed_admin("root@x.com", "pw").await;

	app.delete(
		"/api/admin/user/delete",
		Some(&admin_token),
		&json!({"user_id": user_id}),
	)
	.await;

	let (status, body) = app.get("/api/workspace/list", Some(&token)).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_seed_admin_requires_correct_key() {
	let app = TestApp::new();

	// Wrong key fails regardless of payload.
	let request = Request::builder()
		.method(Method::POST)
		.uri("/api/seed_admin")
		.header("x-seed-key", "wrong-key")
		.json(&json!({"email": "root@x.com", "password": "pw"}))
		.build()
		.unwrap();
	let response = app.dispatch(request).await;
	assert_eq!(response.status, StatusCode::FORBIDDEN);

	// Missing key fails too.
	let (status, _) = app
		.post("/api/seed_admin", None, &json!({"email": "root@x.com", "password": "pw"}))
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	// Correct key succeeds and yields an admin-capable account.
	let admin_token = app.seed_admin("root@x.com", "pw").await;
	let (status, _) = app.get("/api/admin/users", Some(&admin_token)).await;
	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_role_gates_cut_both_ways() {
	let app = TestApp::new();
	let (user_token, _) = app.register_and_login("user@x.com", "pw").await;
	let admin_token = app.seed_admin("root@x.com", "pw").await;

	// Regular user cannot reach the admin console.
	let (status, _) = app.get("/api/admin/users", Some(&user_token)).await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	// Admin cannot use user-only endpoints.
	let (status, _) = app
		.post("/api/workspace/create", Some(&admin_token), &json!({"name": "X"}))
		.await;
	assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_user_listing_never_exposes_hashes() {
	let app = TestApp::new();
	app.register_and_login("user@x.com", "pw").await;
	let admin_token = app.seed_admin("root@x.com", "pw").await;

	let (_, body) = app.get("/api/admin/users", Some(&admin_token)).await;
	let listed = serde_json::to_string(&body).unwrap();
	assert!(!listed.contains("argon2"));
	assert!(!listed.contains("password"));
}

#[tokio::test]
async fn test_admin_add_user_with_role() {
	let app = TestApp::new();
	let admin_token = app.seed_admin("root@x.com", "pw").await;

	let (status, _) = app
		.post(
			"/api/admin/add_user",
			Some(&admin_token),
			&json!({"email": "second@x.com", "password": "pw", "role": "admin"}),
		)
		.await;
	assert_eq!(status, StatusCode::CREATED);

	// The new admin can log in and use the console.
	let (token, _) = app.login("second@x.com", "pw").await;
	let (status, _) = app.get("/api/admin/users", Some(&token)).await;
	assert_eq!(status, StatusCode::OK);

	// Duplicate email is rejected on the admin path too.
	let (status, _) = app
		.post(
			"/api/admin/add_user",
			Some(&admin_token),
			&json!({"email": "second@x.com", "password": "pw"}),
		)
		.await;
	assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_logout_acknowledges_authenticated_caller() {
	let app = TestApp::new();
	let (token, _) = app.register_and_login("a@x.com", "p1").await;

	let (status, _) = app.post("/api/logout", Some(&token), &json!({})).await;
	assert_eq!(status, StatusCode::OK);

	let (status, _) = app.post("/api/logout", None, &json!({})).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
}
