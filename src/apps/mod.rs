//! Application modules, one per domain surface.

pub mod accounts;
pub mod calculations;
pub mod catalog;
pub mod chat;
pub mod workspaces;
