//! URL routing: path patterns, routes and the dispatching router.
//!
//! A [`Route`] pairs an HTTP method and a path pattern (literal segments plus
//! `{param}` placeholders) with a handler and an optional per-route
//! middleware stack. The access-control guard is attached here, once per
//! protected route, so no protected handler is reachable without it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use hyper::Method;
use serde::Serialize;

use crate::exception::Result;
use crate::http::{Handler, Middleware, MiddlewareChain, Request, Response};

/// Compiled path pattern such as `/api/workspace/detail/{code}`.
#[derive(Clone, Debug)]
pub struct PathPattern {
	segments: Vec<Segment>,
}

#[derive(Clone, Debug)]
enum Segment {
	Literal(String),
	Param(String),
}

impl PathPattern {
	pub fn new(pattern: &str) -> Self {
		let segments = pattern
			.split('/')
			.filter(|s| !s.is_empty())
			.map(|s| {
				if let Some(name) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
					Segment::Param(name.to_string())
				} else {
					Segment::Literal(s.to_string())
				}
			})
			.collect();
		Self { segments }
	}

	/// Match a concrete request path, returning extracted parameters.
	///
	/// # Examples
	///
	/// ```
	/// use gearcalc::routing::PathPattern;
	///
	/// let pattern = PathPattern::new("/api/workspace/detail/{code}");
	/// let params = pattern.matches("/api/workspace/detail/123456").unwrap();
	/// assert_eq!(params.get("code"), Some(&"123456".to_string()));
	/// assert!(pattern.matches("/api/workspace/detail").is_none());
	/// ```
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
		if parts.len() != self.segments.len() {
			return None;
		}

		let mut params = HashMap::new();
		for (segment, part) in self.segments.iter().zip(parts) {
			match segment {
				Segment::Literal(expected) if expected == part => {}
				Segment::Literal(_) => return None,
				Segment::Param(name) => {
					params.insert(name.clone(), part.to_string());
				}
			}
		}
		Some(params)
	}
}

/// Route definition: method + path pattern + handler + per-route middleware.
pub struct Route {
	pub method: Method,
	pub path: String,
	pattern: PathPattern,
	handler: Arc<dyn Handler>,
	middleware: Vec<Arc<dyn Middleware>>,
}

impl Route {
	pub fn new(method: Method, path: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
		let path = path.into();
		let pattern = PathPattern::new(&path);
		Self {
			method,
			path,
			pattern,
			handler,
			middleware: Vec::new(),
		}
	}

	/// Attach a middleware to this route. Middleware runs in the order added,
	/// before the handler.
	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middleware.push(middleware);
		self
	}

	/// The effective handler with the route's middleware stack applied.
	fn effective_handler(&self) -> Arc<dyn Handler> {
		if self.middleware.is_empty() {
			return self.handler.clone();
		}
		let mut chain = MiddlewareChain::new(self.handler.clone());
		for middleware in &self.middleware {
			chain.add_middleware(middleware.clone());
		}
		Arc::new(chain)
	}
}

#[derive(Serialize)]
struct RouterMessage<'a> {
	message: &'a str,
}

/// Dispatches requests to the first route whose method and pattern match.
#[derive(Default)]
pub struct Router {
	routes: Vec<Route>,
}

impl Router {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_route(&mut self, route: Route) {
		self.routes.push(route);
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}
}

#[async_trait]
impl Handler for Router {
	async fn handle(&self, mut request: Request) -> Result<Response> {
		let mut path_matched = false;

		for route in &self.routes {
			let Some(params) = route.pattern.matches(request.path()) else {
				continue;
			};
			path_matched = true;
			if route.method != request.method {
				continue;
			}

			for (key, value) in params {
				request.set_path_param(key, value);
			}
			return route.effective_handler().handle(request).await;
		}

		if path_matched {
			return Response::method_not_allowed().with_json(&RouterMessage {
				message: "Method not allowed",
			});
		}
		Response::not_found().with_json(&RouterMessage {
			message: "Not found",
		})
	}
}
