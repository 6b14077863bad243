//! Simulated energy-system state, the snapshot handed to callers, and
//! rounding helpers.

use std::collections::VecDeque;

use serde::Serialize;

/// Maximum number of consumption readings retained, oldest evicted first.
pub const HISTORY_LEN: usize = 10;

/// One switchable household appliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appliance {
    pub id: u32,
    pub name: String,
    pub is_on: bool,
}

impl Appliance {
    pub fn new(id: u32, name: &str, is_on: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            is_on,
        }
    }
}

/// Live mutable state owned by the simulator.
///
/// Constructed once at startup with fixed values and mutated in place on
/// every read; it lives for the lifetime of the [`EnergySimulator`] that
/// holds it.
///
/// [`EnergySimulator`]: super::EnergySimulator
#[derive(Debug, Clone)]
pub struct EnergyState {
    pub grid_status: String,
    /// Battery charge in percent, kept within [0, 100].
    pub battery_level: f64,
    /// Household consumption in kW, never below 1.
    pub energy_consumption: f64,
    /// Recent consumption readings, capped at [`HISTORY_LEN`].
    pub consumption_history: VecDeque<f64>,
    /// Solar generation in kW, never below 0.
    pub solar_generation: f64,
    /// Grid price in EUR/kWh, never below 0.1.
    pub grid_price: f64,
    /// Fixed appliance roster; only the `is_on` flags change.
    pub appliances: Vec<Appliance>,
}

impl EnergyState {
    /// The documented startup state of the simulated home.
    pub fn initial() -> Self {
        Self {
            grid_status: "Online".to_string(),
            battery_level: 87.0,
            energy_consumption: 2.3,
            consumption_history: VecDeque::from([1.5, 1.8, 2.1, 2.3, 2.2, 2.5, 2.4]),
            solar_generation: 1.2,
            grid_price: 0.15,
            appliances: vec![
                Appliance::new(1, "Air Conditioner", true),
                Appliance::new(2, "Washing Machine", false),
                Appliance::new(3, "Dishwasher", true),
                Appliance::new(4, "EV Charger", false),
            ],
        }
    }
}

/// Rounded copy of the simulated system at one point in time.
///
/// Battery is rounded to the nearest whole percent, consumption, solar,
/// and history entries to one decimal, price to two. Serializes with
/// camelCase keys for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergySnapshot {
    pub grid_status: String,
    pub battery_level: f64,
    pub energy_consumption: f64,
    pub consumption_history: Vec<f64>,
    pub solar_generation: f64,
    pub grid_price: f64,
    pub appliances: Vec<Appliance>,
}

/// Rounds to one decimal place.
pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Rounds to two decimal places.
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
