//! Calculation records and endpoints.

pub mod models;
pub mod views;

pub use models::{CalculationRecord, CalculationStore, NewCalculation};
