//! Calculation records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exception::Result;
use crate::store::{RecordId, UserId, WorkspaceId};

/// A stored calculation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalculationRecord {
	pub id: RecordId,
	pub user_id: UserId,
	pub workspace_id: Option<WorkspaceId>,
	/// Raw input parameters as submitted.
	pub parameters: serde_json::Value,
	pub result: f64,
	pub status: String,
	pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewCalculation {
	pub user_id: UserId,
	pub workspace_id: Option<WorkspaceId>,
	pub parameters: serde_json::Value,
	pub result: f64,
}

/// Calculation collection.
#[async_trait]
pub trait CalculationStore: Send + Sync {
	async fn insert(&self, calculation: NewCalculation) -> Result<CalculationRecord>;

	/// History for one user, oldest first.
	async fn list_for_user(&self, user: &UserId) -> Result<Vec<CalculationRecord>>;

	/// Cascade step: drop every record scoped to the workspace, returning
	/// how many were removed.
	async fn delete_for_workspace(&self, workspace: &WorkspaceId) -> Result<usize>;
}
