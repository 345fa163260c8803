//! Authentication core: password hashing, session tokens and the
//! access-control guard.

pub mod guard;
pub mod hasher;
pub mod tokens;

pub use guard::{AuthGuard, CurrentUser, TOKEN_HEADER};
pub use hasher::{Argon2Hasher, PasswordHasher};
pub use tokens::{Claims, TokenService};
