//! Server-level middleware: request logging and CORS.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use hyper::Method;

use crate::exception::Result;
use crate::http::{Handler, Middleware, Request, Response};

/// Logs each request with method, path, status and duration.
pub struct LoggingMiddleware;

impl LoggingMiddleware {
	pub fn new() -> Self {
		Self
	}
}

impl Default for LoggingMiddleware {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Middleware for LoggingMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let start = Utc::now();
		let method = request.method.to_string();
		let path = request.path().to_string();

		let result = next.handle(request).await;

		let elapsed_ms = Utc::now().signed_duration_since(start).num_milliseconds();
		match &result {
			Ok(response) => {
				tracing::info!(%method, %path, status = response.status.as_u16(), elapsed_ms);
			}
			Err(err) => {
				tracing::info!(%method, %path, status = err.status().as_u16(), elapsed_ms, error = %err);
			}
		}

		result
	}
}

/// Permissive CORS for the separately-hosted frontend.
///
/// Answers preflight requests directly and stamps the allow-origin header on
/// every other response.
pub struct CorsMiddleware {
	allow_origin: String,
}

impl CorsMiddleware {
	pub fn permissive() -> Self {
		Self {
			allow_origin: "*".to_string(),
		}
	}

	pub fn with_origin(origin: impl Into<String>) -> Self {
		Self {
			allow_origin: origin.into(),
		}
	}

	fn apply_headers(&self, response: Response) -> Response {
		response
			.with_header("access-control-allow-origin", &self.allow_origin)
			.with_header(
				"access-control-allow-headers",
				"content-type, x-access-token, x-seed-key",
			)
			.with_header("access-control-allow-methods", "GET, POST, PUT, DELETE, OPTIONS")
	}
}

#[async_trait]
impl Middleware for CorsMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		if request.method == Method::OPTIONS {
			return Ok(self.apply_headers(Response::no_content()));
		}

		let response = next.handle(request).await?;
		Ok(self.apply_headers(response))
	}
}
