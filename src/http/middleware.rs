//! Handler and middleware traits for HTTP request processing.
//!
//! The `Handler` trait is the core abstraction: every endpoint view and the
//! router itself implement it. Middleware wraps handlers to add cross-cutting
//! concerns (logging, CORS, the access-control guard) and is composed into an
//! explicit chain, so there is no implicit wrapping order.

use std::sync::Arc;

use async_trait::async_trait;

use crate::exception::Result;
use crate::http::{Request, Response};

/// Handler trait for processing requests.
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response>;
}

/// Blanket implementation so `Arc<dyn Handler>` is itself a Handler.
#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}

/// Middleware trait for request/response processing.
///
/// A middleware may short-circuit by returning a response (or error) without
/// calling `next`, which is exactly how the access-control guard rejects
/// unauthenticated requests before any business logic runs.
#[async_trait]
pub trait Middleware: Send + Sync {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response>;
}

/// Composes middleware around a handler, applied in the order added.
pub struct MiddlewareChain {
	middlewares: Vec<Arc<dyn Middleware>>,
	handler: Arc<dyn Handler>,
}

impl MiddlewareChain {
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			middlewares: Vec::new(),
			handler,
		}
	}

	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.push(middleware);
		self
	}

	pub fn add_middleware(&mut self, middleware: Arc<dyn Middleware>) {
		self.middlewares.push(middleware);
	}
}

#[async_trait]
impl Handler for MiddlewareChain {
	async fn handle(&self, request: Request) -> Result<Response> {
		if self.middlewares.is_empty() {
			return self.handler.handle(request).await;
		}

		// Build the nested handler inside-out so middleware runs in the
		// order it was added.
		let mut current_handler = self.handler.clone();
		for middleware in self.middlewares.iter().rev() {
			current_handler = Arc::new(ComposedHandler {
				middleware: middleware.clone(),
				next: current_handler,
			});
		}

		current_handler.handle(request).await
	}
}

/// Internal handler pairing one middleware with the rest of the chain.
struct ComposedHandler {
	middleware: Arc<dyn Middleware>,
	next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for ComposedHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		self.middleware.process(request, self.next.clone()).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use hyper::Method;
	use rstest::rstest;

	struct MockHandler {
		response_body: String,
	}

	#[async_trait]
	impl Handler for MockHandler {
		async fn handle(&self, _request: Request) -> Result<Response> {
			Ok(Response::ok().with_body(self.response_body.clone()))
		}
	}

	struct PrefixMiddleware {
		prefix: String,
	}

	#[async_trait]
	impl Middleware for PrefixMiddleware {
		async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
			let response = next.handle(request).await?;
			let current_body = String::from_utf8(response.body.to_vec()).unwrap_or_default();
			Ok(Response::ok().with_body(format!("{}{}", self.prefix, current_body)))
		}
	}

	struct RejectingMiddleware;

	#[async_trait]
	impl Middleware for RejectingMiddleware {
		async fn process(&self, _request: Request, _next: Arc<dyn Handler>) -> Result<Response> {
			Ok(Response::unauthorized().with_body("Auth required"))
		}
	}

	fn test_request() -> Request {
		Request::builder()
			.method(Method::GET)
			.uri("/")
			.build()
			.unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_chain_empty() {
		let chain = MiddlewareChain::new(Arc::new(MockHandler {
			response_body: "Test".to_string(),
		}));

		let response = chain.handle(test_request()).await.unwrap();
		assert_eq!(String::from_utf8(response.body.to_vec()).unwrap(), "Test");
	}

	#[rstest]
	#[tokio::test]
	async fn test_chain_applies_in_order() {
		let chain = MiddlewareChain::new(Arc::new(MockHandler {
			response_body: "Data".to_string(),
		}))
		.with_middleware(Arc::new(PrefixMiddleware {
			prefix: "M1:".to_string(),
		}))
		.with_middleware(Arc::new(PrefixMiddleware {
			prefix: "M2:".to_string(),
		}));

		let response = chain.handle(test_request()).await.unwrap();
		assert_eq!(String::from_utf8(response.body.to_vec()).unwrap(), "M1:M2:Data");
	}

	#[rstest]
	#[tokio::test]
	async fn test_middleware_short_circuits() {
		let chain = MiddlewareChain::new(Arc::new(MockHandler {
			response_body: "Handler".to_string(),
		}))
		.with_middleware(Arc::new(RejectingMiddleware))
		.with_middleware(Arc::new(PrefixMiddleware {
			prefix: "Never:".to_string(),
		}));

		let response = chain.handle(test_request()).await.unwrap();
		assert_eq!(response.status, hyper::StatusCode::UNAUTHORIZED);
		assert_eq!(
			String::from_utf8(response.body.to_vec()).unwrap(),
			"Auth required"
		);
	}
}
