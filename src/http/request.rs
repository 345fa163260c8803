//! HTTP request representation handed to handlers.

use std::collections::HashMap;
use std::net::SocketAddr;

use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri, Version};
use serde::de::DeserializeOwned;

use crate::exception::{Error, Result};
use crate::http::Extensions;

/// HTTP request as seen by handlers and middleware.
///
/// Path parameters are filled in by the router when a pattern like
/// `/api/workspace/detail/{code}` matches.
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	pub path_params: HashMap<String, String>,
	pub query_params: HashMap<String, String>,
	pub extensions: Extensions,
	pub remote_addr: Option<SocketAddr>,
}

impl Request {
	pub fn new(method: Method, uri: Uri, version: Version, headers: HeaderMap, body: Bytes) -> Self {
		let query_params = Self::parse_query_params(&uri);
		Self {
			method,
			uri,
			version,
			headers,
			body,
			path_params: HashMap::new(),
			query_params,
			extensions: Extensions::new(),
			remote_addr: None,
		}
	}

	/// Start building a request (used heavily by tests).
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	/// Parse query parameters from the URI.
	fn parse_query_params(uri: &Uri) -> HashMap<String, String> {
		uri.query()
			.map(|q| {
				q.split('&')
					.filter_map(|pair| {
						// Split on the first '=' only so values may contain '='
						let mut parts = pair.splitn(2, '=');
						Some((
							parts.next()?.to_string(),
							parts.next().unwrap_or("").to_string(),
						))
					})
					.collect()
			})
			.unwrap_or_default()
	}

	/// The request path without query string.
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// A header value as UTF-8, if present and decodable.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}

	/// A path parameter extracted by the router.
	pub fn path_param(&self, name: &str) -> Option<&str> {
		self.path_params.get(name).map(String::as_str)
	}

	pub fn query_param(&self, name: &str) -> Option<&str> {
		self.query_params.get(name).map(String::as_str)
	}

	/// Set a path parameter (called by the router during dispatch).
	pub fn set_path_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.path_params.insert(key.into(), value.into());
	}

	/// Deserialize the request body as JSON.
	///
	/// Fails with a [`Error::Validation`] so malformed bodies surface as 400.
	pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
		serde_json::from_slice(&self.body)
			.map_err(|e| Error::Validation(format!("Invalid JSON body: {e}")))
	}
}

/// Builder for [`Request`].
#[derive(Default)]
pub struct RequestBuilder {
	method: Option<Method>,
	uri: Option<Uri>,
	version: Option<Version>,
	headers: HeaderMap,
	body: Bytes,
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn uri(mut self, uri: impl AsRef<str>) -> Self {
		self.uri = uri.as_ref().parse().ok();
		self
	}

	pub fn version(mut self, version: Version) -> Self {
		self.version = Some(version);
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	pub fn header(mut self, name: &str, value: &str) -> Self {
		if let (Ok(name), Ok(value)) = (
			hyper::header::HeaderName::from_bytes(name.as_bytes()),
			hyper::header::HeaderValue::from_str(value),
		) {
			self.headers.insert(name, value);
		}
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Serialize `data` as the JSON request body.
	pub fn json<T: serde::Serialize>(mut self, data: &T) -> Self {
		if let Ok(bytes) = serde_json::to_vec(data) {
			self.body = Bytes::from(bytes);
		}
		self
	}

	pub fn build(self) -> Result<Request> {
		let uri = self
			.uri
			.ok_or_else(|| Error::Validation("request URI is required".to_string()))?;
		Ok(Request::new(
			self.method.unwrap_or(Method::GET),
			uri,
			self.version.unwrap_or(Version::HTTP_11),
			self.headers,
			self.body,
		))
	}
}
