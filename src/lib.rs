//! Multi-tenant web backend for a mechanical-transmission calculation tool.
//!
//! Users register and log in with email + password, collaborate in
//! workspaces joined by a six-digit code, record calculations, and exchange
//! direct and workspace chat; an admin console manages users, workspaces and
//! the component catalog.
//!
//! The engineered core is the access-control and membership-consistency
//! layer:
//!
//! - [`apps::accounts::UserManager`]: the credential store (Argon2id
//!   hashes, duplicate-email rejection, indistinguishable login failures).
//! - [`auth::TokenService`]: stateless HS256 session tokens with strict
//!   expiry.
//! - [`auth::AuthGuard`]: middleware resolving the bearer token to a live
//!   user record and enforcing the route's role, applied exactly once per
//!   protected route in [`urls::build_router`].
//! - [`apps::workspaces::WorkspaceRegistry`]: workspace membership
//!   lifecycle with its invariants (owner always a member, unique join
//!   codes, duplicate-free member sets) and the best-effort cascade delete.
//!
//! Storage is injected: every collection is a trait object backed by the
//! in-memory stores in [`store::memory`], which tests reuse directly.

pub mod apps;
pub mod auth;
pub mod conf;
pub mod exception;
pub mod http;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod store;
pub mod urls;

pub use exception::{Error, Result};
