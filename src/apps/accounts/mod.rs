//! User accounts: credential records, the credential store manager and the
//! account endpoints.

pub mod manager;
pub mod models;
pub mod views;

pub use manager::UserManager;
pub use models::{NewUser, PublicUser, Role, User, UserStore, UserSummary};
