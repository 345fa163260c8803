//! HTTP response representation produced by handlers.

use bytes::Bytes;
use hyper::{HeaderMap, StatusCode};
use serde::Serialize;

use crate::exception::Error;

/// HTTP response.
#[derive(Debug)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new response with the given status code.
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// 200 OK.
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// 201 Created.
	pub fn created() -> Self {
		Self::new(StatusCode::CREATED)
	}

	/// 204 No Content.
	pub fn no_content() -> Self {
		Self::new(StatusCode::NO_CONTENT)
	}

	/// 400 Bad Request.
	pub fn bad_request() -> Self {
		Self::new(StatusCode::BAD_REQUEST)
	}

	/// 401 Unauthorized.
	pub fn unauthorized() -> Self {
		Self::new(StatusCode::UNAUTHORIZED)
	}

	/// 403 Forbidden.
	pub fn forbidden() -> Self {
		Self::new(StatusCode::FORBIDDEN)
	}

	/// 404 Not Found.
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// 405 Method Not Allowed.
	pub fn method_not_allowed() -> Self {
		Self::new(StatusCode::METHOD_NOT_ALLOWED)
	}

	/// 500 Internal Server Error.
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// Set the response body.
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Add a header to the response. Invalid names or values are ignored.
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = hyper::header::HeaderName::from_bytes(name.as_bytes()) {
			if let Ok(header_value) = hyper::header::HeaderValue::from_str(value) {
				self.headers.insert(header_name, header_value);
			}
		}
		self
	}

	/// Set the body to the JSON serialization of `data` and the matching
	/// `Content-Type` header.
	pub fn with_json<T: Serialize>(mut self, data: &T) -> crate::exception::Result<Self> {
		let json = serde_json::to_vec(data).map_err(|e| Error::Serialization(e.to_string()))?;
		self.body = Bytes::from(json);
		self.headers.insert(
			hyper::header::CONTENT_TYPE,
			hyper::header::HeaderValue::from_static("application/json"),
		);
		Ok(self)
	}
}
