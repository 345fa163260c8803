//! Workspaces: membership lifecycle and its endpoints.

pub mod models;
pub mod registry;
pub mod views;

pub use models::{NewWorkspace, Workspace, WorkspaceDetail, WorkspaceStore};
pub use registry::WorkspaceRegistry;
