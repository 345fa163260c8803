//! HTTP primitives: request/response types, extensions, and the
//! handler/middleware composition model.

pub mod extensions;
pub mod middleware;
pub mod request;
pub mod response;

pub use extensions::Extensions;
pub use middleware::{Handler, Middleware, MiddlewareChain};
pub use request::{Request, RequestBuilder};
pub use response::Response;
