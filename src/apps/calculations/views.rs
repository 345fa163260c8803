//! Calculation endpoints.
//!
//! The arithmetic is a placeholder for the real transmission formulas; the
//! interesting part is the record keeping and the auth gating.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::apps::calculations::models::{CalculationRecord, CalculationStore, NewCalculation};
use crate::auth::CurrentUser;
use crate::exception::{Error, Result};
use crate::http::{Handler, Request, Response};
use crate::store::WorkspaceId;

#[derive(Default, Deserialize)]
struct CalculateRequest {
	a: Option<f64>,
	b: Option<f64>,
	workspace_id: Option<WorkspaceId>,
}

#[derive(Serialize)]
struct CalculateResponse<'a> {
	message: &'a str,
	result: f64,
}

/// POST /api/calculate: run the placeholder calculation and record it.
pub struct CalculateView {
	calculations: Arc<dyn CalculationStore>,
}

impl CalculateView {
	pub fn new(calculations: Arc<dyn CalculationStore>) -> Self {
		Self { calculations }
	}
}

#[async_trait]
impl Handler for CalculateView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let parameters: serde_json::Value = request.json().unwrap_or_default();
		let body: CalculateRequest = request.json().unwrap_or_default();

		let (a, b) = match (body.a, body.b) {
			(Some(a), Some(b)) => (a, b),
			_ => return Err(Error::Validation("Parameters a and b are required".to_string())),
		};
		if !a.is_finite() || !b.is_finite() {
			return Err(Error::Validation("Parameters must be finite numbers".to_string()));
		}

		// Placeholder for the real transmission calculation.
		let result = a + b;

		self.calculations
			.insert(NewCalculation {
				user_id: current.user().id.clone(),
				workspace_id: body.workspace_id,
				parameters,
				result,
			})
			.await?;

		Response::ok().with_json(&CalculateResponse {
			message: "Calculation successful",
			result,
		})
	}
}

#[derive(Serialize)]
struct HistoryResponse {
	history: Vec<CalculationRecord>,
}

/// GET /api/history: the caller's calculation history, oldest first.
pub struct HistoryView {
	calculations: Arc<dyn CalculationStore>,
}

impl HistoryView {
	pub fn new(calculations: Arc<dyn CalculationStore>) -> Self {
		Self { calculations }
	}
}

#[async_trait]
impl Handler for HistoryView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let current = CurrentUser::from_request(&request)?;
		let history = self.calculations.list_for_user(&current.user().id).await?;
		Response::ok().with_json(&HistoryResponse { history })
	}
}
