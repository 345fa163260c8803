//! Peripheral surface tests: calculations, chat, proposals, catalog and the
//! public reference data.

mod common;

use hyper::StatusCode;
use serde_json::json;

use common::TestApp;
use gearcalc::apps::catalog::models::{CatalogStore as _, NewCatalogItem};

#[tokio::test]
async fn test_calculate_records_history() {
	let app = TestApp::new();
	let (token, _) = app.register_and_login("a@x.com", "p1").await;

	let (status, body) = app
		.post("/api/calculate", Some(&token), &json!({"a": 2.5, "b": 4.0}))
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["result"].as_f64().unwrap(), 6.5);

	let (status, body) = app.get("/api/history", Some(&token)).await;
	assert_eq!(status, StatusCode::OK);
	let history = body["history"].as_array().unwrap();
	assert_eq!(history.len(), 1);
	assert_eq!(history[0]["result"].as_f64().unwrap(), 6.5);
	assert_eq!(history[0]["parameters"]["a"].as_f64().unwrap(), 2.5);
}

#[tokio::test]
async fn test_calculate_requires_numeric_parameters() {
	let app = TestApp::new();
	let (token, _) = app.register_and_login("a@x.com", "p1").await;

	let (status, _) = app
		.post("/api/calculate", Some(&token), &json!({"a": 1.0}))
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_history_is_per_user() {
	let app = TestApp::new();
	let (token_a, _) = app.register_and_login("a@x.com", "p1").await;
	let (token_b, _) = app.register_and_login("b@x.com", "p2").await;

	app.post("/api/calculate", Some(&token_a), &json!({"a": 1.0, "b": 1.0}))
		.await;

	let (_, body) = app.get("/api/history", Some(&token_b)).await;
	assert!(body["history"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_direct_chat_conversation_with_admin() {
	let app = TestApp::new();
	let (token, user_id) = app.register_and_login("a@x.com", "p1").await;
	let admin_token = app.seed_admin("root@x.com", "pw").await;

	// User writes to the console.
	let (status, _) = app
		.post(
			"/api/chat/direct/send",
			Some(&token),
			&json!({"message": "help with the bevel stage"}),
		)
		.await;
	assert_eq!(status, StatusCode::OK);

	// Admin sees it and replies.
	let (_, body) = app.get("/api/admin/chats", Some(&admin_token)).await;
	let chats = body["chats"].as_array().unwrap();
	assert_eq!(chats.len(), 1);
	assert_eq!(chats[0]["sender_email"], "a@x.com");

	let (status, _) = app
		.post(
			"/api/admin/chats",
			Some(&admin_token),
			&json!({"receiver_id": user_id, "message": "use the sealed ratio"}),
		)
		.await;
	assert_eq!(status, StatusCode::OK);

	// The user's conversation now holds both messages, oldest first.
	let (_, body) = app.get("/api/chat/direct", Some(&token)).await;
	let messages = body["messages"].as_array().unwrap();
	assert_eq!(messages.len(), 2);
	assert_eq!(messages[0]["message"], "help with the bevel stage");
	assert_eq!(messages[1]["message"], "use the sealed ratio");
	assert_eq!(messages[1]["sender_email"], "admin");
}

#[tokio::test]
async fn test_direct_chat_is_private_per_user() {
	let app = TestApp::new();
	let (token_a, _) = app.register_and_login("a@x.com", "p1").await;
	let (token_b, _) = app.register_and_login("b@x.com", "p2").await;

	app.post("/api/chat/direct/send", Some(&token_a), &json!({"message": "mine"}))
		.await;

	let (_, body) = app.get("/api/chat/direct", Some(&token_b)).await;
	assert!(body["messages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_workspace_chat_roundtrip() {
	let app = TestApp::new();
	let (token, _) = app.register_and_login("a@x.com", "p1").await;
	let (workspace_id, _) = app.create_workspace(&token, "Team1").await;

	let (status, _) = app
		.post(
			"/api/workspace/chat/send",
			Some(&token),
			&json!({"workspace_id": workspace_id, "message": "first"}),
		)
		.await;
	assert_eq!(status, StatusCode::OK);

	let (status, body) = app
		.get(&format!("/api/workspace/chat/{workspace_id}"), Some(&token))
		.await;
	assert_eq!(status, StatusCode::OK);
	let messages = body["messages"].as_array().unwrap();
	assert_eq!(messages.len(), 1);
	assert_eq!(messages[0]["message"], "first");
	assert_eq!(messages[0]["sender_email"], "a@x.com");
}

#[tokio::test]
async fn test_proposal_review_flow() {
	let app = TestApp::new();
	let (token, _) = app.register_and_login("a@x.com", "p1").await;
	let admin_token = app.seed_admin("root@x.com", "pw").await;

	let (status, _) = app
		.post(
			"/api/chat/propose",
			Some(&token),
			&json!({"proposal": "switch to a chain drive on stage two"}),
		)
		.await;
	assert_eq!(status, StatusCode::OK);

	// Pending list is admin-only.
	let (status, _) = app.get("/api/chat/proposals", Some(&token)).await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	let (_, body) = app.get("/api/chat/proposals", Some(&admin_token)).await;
	let proposals = body["proposals"].as_array().unwrap();
	assert_eq!(proposals.len(), 1);
	let id = proposals[0]["id"].as_str().unwrap().to_string();

	// Approval clears it from the pending list.
	let (status, _) = app
		.post(&format!("/api/chat/proposals/{id}/approve"), Some(&admin_token), &json!({}))
		.await;
	assert_eq!(status, StatusCode::OK);

	let (_, body) = app.get("/api/chat/proposals", Some(&admin_token)).await;
	assert!(body["proposals"].as_array().unwrap().is_empty());

	// Deciding an unknown proposal is NotFound.
	let (status, _) = app
		.post("/api/chat/proposals/missing/reject", Some(&admin_token), &json!({}))
		.await;
	assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_folder_management() {
	let app = TestApp::new();
	let admin_token = app.seed_admin("root@x.com", "pw").await;

	let (status, body) = app
		.post(
			"/api/admin/catalog/folder/create",
			Some(&admin_token),
			&json!({"folder_name": "Helical gears"}),
		)
		.await;
	assert_eq!(status, StatusCode::CREATED);
	let folder_id = body["folder_id"].as_str().unwrap().to_string();

	// Duplicate name is rejected.
	let (status, _) = app
		.post(
			"/api/admin/catalog/folder/create",
			Some(&admin_token),
			&json!({"folder_name": "Helical gears"}),
		)
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);

	// Rename, then delete.
	let (status, _) = app
		.request(
			hyper::Method::PUT,
			"/api/admin/catalog/folder/edit",
			Some(&admin_token),
			Some(&json!({"folder_id": folder_id, "new_name": "Bevel gears"})),
		)
		.await;
	assert_eq!(status, StatusCode::OK);

	let (status, _) = app
		.delete(
			"/api/admin/catalog/folder/delete",
			Some(&admin_token),
			&json!({"folder_id": folder_id}),
		)
		.await;
	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_catalog_listing_requires_user_role() {
	let app = TestApp::new();
	let (token, _) = app.register_and_login("a@x.com", "p1").await;

	app.ctx
		.catalog
		.insert_item(NewCatalogItem {
			name: "Helical gear 40CrMo".to_string(),
			data: json!({"module_mm": 2.5, "teeth": 40}),
		})
		.await
		.unwrap();

	let (status, body) = app.get("/api/catalog", Some(&token)).await;
	assert_eq!(status, StatusCode::OK);
	let catalog = body["catalog"].as_array().unwrap();
	assert_eq!(catalog.len(), 1);
	assert_eq!(catalog[0]["name"], "Helical gear 40CrMo");

	let (status, _) = app.get("/api/catalog", None).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reference_data_is_public() {
	let app = TestApp::new();

	let (status, body) = app.get("/api/reference/efficiency", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["success"], true);
	assert!(!body["data"].as_array().unwrap().is_empty());

	let (status, body) = app.get("/api/reference/ratios", None).await;
	assert_eq!(status, StatusCode::OK);
	assert!(!body["data"].as_array().unwrap().is_empty());

	let (status, body) = app.get("/api/reference/engines", None).await;
	assert_eq!(status, StatusCode::OK);
	assert!(!body["engines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
	let app = TestApp::new();

	let (status, body) = app.get("/api/nope", None).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["message"], "Not found");
}
