//! Application wiring: component construction and the URL route table.
//!
//! The route table is the single place where the access-control guard is
//! attached. Public routes (register, login, seeding, reference data) carry
//! no guard; every other route carries exactly one, either user-role,
//! admin-role or plain authenticated.

use std::sync::Arc;

use hyper::Method;

use crate::apps::accounts::manager::UserManager;
use crate::apps::accounts::models::{Role, UserStore};
use crate::apps::accounts::views::{
	AdminAddUserView, AdminDeleteUserView, AdminListUsersView, LoginView, LogoutView,
	RegisterView, SeedAdminView,
};
use crate::apps::calculations::models::CalculationStore;
use crate::apps::calculations::views::{CalculateView, HistoryView};
use crate::apps::catalog::models::CatalogStore;
use crate::apps::catalog::views::{
	CatalogView, CreateCatalogFolderView, DeleteCatalogFolderView, EditCatalogFolderView,
	EfficiencyView, EngineDataView, TransmissionRatiosView,
};
use crate::apps::chat::models::{ChatStore, ProposalStore};
use crate::apps::chat::views::{
	AdminListChatsView, AdminSendChatView, GetDirectChatView, GetWorkspaceChatView,
	ListProposalsView, ProposalDecisionView, ProposeView, SendDirectChatView,
	SendWorkspaceChatView,
};
use crate::apps::workspaces::registry::WorkspaceRegistry;
use crate::apps::workspaces::views::{
	AdminListWorkspacesView, CreateWorkspaceView, DeleteWorkspaceView, JoinWorkspaceView,
	KickMemberView, LeaveWorkspaceView, ListWorkspacesView, WorkspaceDetailView,
};
use crate::auth::{Argon2Hasher, AuthGuard, TokenService};
use crate::conf::Settings;
use crate::routing::{Route, Router};
use crate::store::memory::{
	InMemoryCalculationStore, InMemoryCatalogStore, InMemoryChatStore, InMemoryProposalStore,
	InMemoryUserStore, InMemoryWorkspaceStore,
};

/// Constructed components shared by the server and the tests.
pub struct AppContext {
	pub settings: Settings,
	pub users: Arc<UserManager>,
	pub tokens: Arc<TokenService>,
	pub registry: Arc<WorkspaceRegistry>,
	pub user_store: Arc<dyn UserStore>,
	pub calculations: Arc<dyn CalculationStore>,
	pub chats: Arc<dyn ChatStore>,
	pub proposals: Arc<dyn ProposalStore>,
	pub catalog: Arc<dyn CatalogStore>,
}

impl AppContext {
	/// Wire every component over fresh in-memory stores.
	pub fn with_memory_stores(settings: Settings) -> Self {
		let user_store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
		let workspace_store = Arc::new(InMemoryWorkspaceStore::new());
		let calculations: Arc<dyn CalculationStore> = Arc::new(InMemoryCalculationStore::new());
		let chats: Arc<dyn ChatStore> = Arc::new(InMemoryChatStore::new());
		let proposals: Arc<dyn ProposalStore> = Arc::new(InMemoryProposalStore::new());
		let catalog: Arc<dyn CatalogStore> = Arc::new(InMemoryCatalogStore::new());

		let users = Arc::new(UserManager::new(user_store.clone(), Arc::new(Argon2Hasher::new())));
		let tokens = Arc::new(TokenService::new(
			settings.secret_key.as_bytes(),
			chrono::Duration::hours(settings.token_ttl_hours),
		));
		let registry = Arc::new(WorkspaceRegistry::new(
			workspace_store,
			user_store.clone(),
			calculations.clone(),
			chats.clone(),
		));

		Self {
			settings,
			users,
			tokens,
			registry,
			user_store,
			calculations,
			chats,
			proposals,
			catalog,
		}
	}
}

/// Build the route table over the given context.
pub fn build_router(ctx: &AppContext) -> Router {
	let authenticated = Arc::new(AuthGuard::authenticated(
		ctx.tokens.clone(),
		ctx.users.clone(),
	));
	let user_only = Arc::new(AuthGuard::role_restricted(
		ctx.tokens.clone(),
		ctx.users.clone(),
		Role::User,
	));
	let admin_only = Arc::new(AuthGuard::role_restricted(
		ctx.tokens.clone(),
		ctx.users.clone(),
		Role::Admin,
	));

	let mut router = Router::new();

	// Public account endpoints.
	router.add_route(Route::new(
		Method::POST,
		"/api/register",
		Arc::new(RegisterView::new(ctx.users.clone())),
	));
	router.add_route(Route::new(
		Method::POST,
		"/api/login",
		Arc::new(LoginView::new(ctx.users.clone(), ctx.tokens.clone())),
	));
	router.add_route(Route::new(
		Method::POST,
		"/api/seed_admin",
		Arc::new(SeedAdminView::new(
			ctx.users.clone(),
			ctx.settings.admin_seed_key.clone(),
		)),
	));
	router.add_route(
		Route::new(Method::POST, "/api/logout", Arc::new(LogoutView))
			.with_middleware(authenticated.clone()),
	);

	// Workspace lifecycle (regular users).
	router.add_route(
		Route::new(
			Method::POST,
			"/api/workspace/create",
			Arc::new(CreateWorkspaceView::new(ctx.registry.clone())),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::POST,
			"/api/workspace/join",
			Arc::new(JoinWorkspaceView::new(ctx.registry.clone())),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::POST,
			"/api/workspace/leave",
			Arc::new(LeaveWorkspaceView::new(ctx.registry.clone())),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::POST,
			"/api/workspace/kick",
			Arc::new(KickMemberView::new(ctx.registry.clone())),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::DELETE,
			"/api/workspace/delete",
			Arc::new(DeleteWorkspaceView::new(ctx.registry.clone())),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::GET,
			"/api/workspace/list",
			Arc::new(ListWorkspacesView::new(ctx.registry.clone())),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::GET,
			"/api/workspace/detail/{code}",
			Arc::new(WorkspaceDetailView::new(ctx.registry.clone())),
		)
		.with_middleware(user_only.clone()),
	);

	// Calculations.
	router.add_route(
		Route::new(
			Method::POST,
			"/api/calculate",
			Arc::new(CalculateView::new(ctx.calculations.clone())),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::GET,
			"/api/history",
			Arc::new(HistoryView::new(ctx.calculations.clone())),
		)
		.with_middleware(user_only.clone()),
	);

	// Chat and proposals.
	router.add_route(
		Route::new(
			Method::POST,
			"/api/chat/direct/send",
			Arc::new(SendDirectChatView::new(ctx.chats.clone())),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::GET,
			"/api/chat/direct",
			Arc::new(GetDirectChatView::new(ctx.chats.clone(), ctx.user_store.clone())),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::POST,
			"/api/workspace/chat/send",
			Arc::new(SendWorkspaceChatView::new(ctx.chats.clone())),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::GET,
			"/api/workspace/chat/{workspace_id}",
			Arc::new(GetWorkspaceChatView::new(
				ctx.chats.clone(),
				ctx.user_store.clone(),
			)),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::POST,
			"/api/chat/propose",
			Arc::new(ProposeView::new(ctx.proposals.clone())),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::GET,
			"/api/chat/proposals",
			Arc::new(ListProposalsView::new(ctx.proposals.clone())),
		)
		.with_middleware(admin_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::POST,
			"/api/chat/proposals/{id}/approve",
			Arc::new(ProposalDecisionView::approve(ctx.proposals.clone())),
		)
		.with_middleware(admin_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::POST,
			"/api/chat/proposals/{id}/reject",
			Arc::new(ProposalDecisionView::reject(ctx.proposals.clone())),
		)
		.with_middleware(admin_only.clone()),
	);

	// Catalog and reference data.
	router.add_route(
		Route::new(
			Method::GET,
			"/api/catalog",
			Arc::new(CatalogView::new(ctx.catalog.clone())),
		)
		.with_middleware(user_only.clone()),
	);
	router.add_route(Route::new(
		Method::GET,
		"/api/reference/efficiency",
		Arc::new(EfficiencyView),
	));
	router.add_route(Route::new(
		Method::GET,
		"/api/reference/ratios",
		Arc::new(TransmissionRatiosView),
	));
	router.add_route(Route::new(
		Method::GET,
		"/api/reference/engines",
		Arc::new(EngineDataView),
	));

	// Admin console.
	router.add_route(
		Route::new(
			Method::GET,
			"/api/admin/users",
			Arc::new(AdminListUsersView::new(ctx.users.clone())),
		)
		.with_middleware(admin_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::POST,
			"/api/admin/add_user",
			Arc::new(AdminAddUserView::new(ctx.users.clone())),
		)
		.with_middleware(admin_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::DELETE,
			"/api/admin/user/delete",
			Arc::new(AdminDeleteUserView::new(ctx.users.clone())),
		)
		.with_middleware(admin_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::GET,
			"/api/admin/workspaces",
			Arc::new(AdminListWorkspacesView::new(ctx.registry.clone())),
		)
		.with_middleware(admin_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::GET,
			"/api/admin/chats",
			Arc::new(AdminListChatsView::new(
				ctx.chats.clone(),
				ctx.user_store.clone(),
			)),
		)
		.with_middleware(admin_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::POST,
			"/api/admin/chats",
			Arc::new(AdminSendChatView::new(ctx.chats.clone())),
		)
		.with_middleware(admin_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::POST,
			"/api/admin/catalog/folder/create",
			Arc::new(CreateCatalogFolderView::new(ctx.catalog.clone())),
		)
		.with_middleware(admin_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::PUT,
			"/api/admin/catalog/folder/edit",
			Arc::new(EditCatalogFolderView::new(ctx.catalog.clone())),
		)
		.with_middleware(admin_only.clone()),
	);
	router.add_route(
		Route::new(
			Method::DELETE,
			"/api/admin/catalog/folder/delete",
			Arc::new(DeleteCatalogFolderView::new(ctx.catalog.clone())),
		)
		.with_middleware(admin_only.clone()),
	);

	router
}
