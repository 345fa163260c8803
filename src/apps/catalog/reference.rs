//! Static engineering reference data.
//!
//! Placeholder tables served to the frontend's selection forms. Real data
//! would come from the component manufacturers' datasheets.

use serde::Serialize;

/// Efficiency range of one transmission stage, for sealed and open builds.
#[derive(Clone, Debug, Serialize)]
pub struct EfficiencyEntry {
	pub name: &'static str,
	pub sealed_min: f64,
	pub sealed_max: f64,
	pub open_min: f64,
	pub open_max: f64,
}

pub fn efficiency_table() -> Vec<EfficiencyEntry> {
	vec![
		EfficiencyEntry {
			name: "Spur gear stage",
			sealed_min: 0.90,
			sealed_max: 0.95,
			open_min: 0.85,
			open_max: 0.90,
		},
		EfficiencyEntry {
			name: "Bevel gear stage",
			sealed_min: 0.88,
			sealed_max: 0.93,
			open_min: 0.84,
			open_max: 0.89,
		},
		EfficiencyEntry {
			name: "Chain drive",
			sealed_min: 0.86,
			sealed_max: 0.92,
			open_min: 0.82,
			open_max: 0.87,
		},
		EfficiencyEntry {
			name: "Rolling bearing pair",
			sealed_min: 0.95,
			sealed_max: 0.98,
			open_min: 0.93,
			open_max: 0.96,
		},
	]
}

/// Admissible transmission ratio range of one drive type.
#[derive(Clone, Debug, Serialize)]
pub struct TransmissionRatioEntry {
	pub drive_type: &'static str,
	pub ratio_min: f64,
	pub ratio_max: f64,
}

pub fn transmission_ratio_table() -> Vec<TransmissionRatioEntry> {
	vec![
		TransmissionRatioEntry {
			drive_type: "Bevel-helical two-stage reducer",
			ratio_min: 1.5,
			ratio_max: 2.5,
		},
		TransmissionRatioEntry {
			drive_type: "Chain drive",
			ratio_min: 0.8,
			ratio_max: 1.2,
		},
	]
}

/// Catalog motor option.
#[derive(Clone, Debug, Serialize)]
pub struct EngineEntry {
	pub id: &'static str,
	pub model: &'static str,
	pub power_kw: f64,
	pub speed_rpm_50hz: f64,
	pub efficiency: f64,
}

pub fn engine_table() -> Vec<EngineEntry> {
	vec![
		EngineEntry {
			id: "engine1",
			model: "Motor A",
			power_kw: 100.0,
			speed_rpm_50hz: 1500.0,
			efficiency: 0.95,
		},
		EngineEntry {
			id: "engine2",
			model: "Motor B",
			power_kw: 150.0,
			speed_rpm_50hz: 1450.0,
			efficiency: 0.93,
		},
	]
}
