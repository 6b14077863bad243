//! Flat decision-record shape and per-field coercion.

use serde::Serialize;
use serde_json::{Map, Value};

/// One decision-log row, flattened into the shape the dashboard expects.
///
/// Every numeric field is either a finite number or `None` — never NaN,
/// never infinity, never a string smuggled through. Textual fields fall
/// back to their documented defaults when the source column is missing or
/// not text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRecord {
    /// ISO-8601 timestamp of the decision, if present.
    pub time_iso: Option<String>,
    /// Action taken (default `""`).
    pub action: String,
    /// Free-text rationale (default `""`).
    pub rationale: String,
    /// Spot price at decision time (EUR/kWh).
    pub price_eur_kwh: Option<f64>,
    /// Average price over the next 60 minutes (EUR/kWh).
    pub avg_next_60min_price_eur_kwh: Option<f64>,
    /// Irradiance at decision time (W/m²).
    pub irradiance_wm2: Option<f64>,
    /// Average irradiance over the next 60 minutes (W/m²).
    pub avg_next_60min_irradiance_wm2: Option<f64>,
    /// Price trend label (default `"Stable"`).
    pub cost_trend: String,
    /// Grid stress label (default `"Medium"`).
    pub grid_stress: String,
}

impl DecisionRecord {
    /// Maps one raw `fields` object into the flat record shape.
    ///
    /// Unknown source fields are dropped. An empty map yields a record of
    /// all defaults.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            time_iso: text(fields, "time_iso"),
            action: text_or(fields, "action", ""),
            rationale: text_or(fields, "rationale", ""),
            price_eur_kwh: finite_num(fields, "price_eur_kwh"),
            avg_next_60min_price_eur_kwh: finite_num(fields, "avg_next_60min_price_eur_kwh"),
            irradiance_wm2: finite_num(fields, "irradiance_wm2"),
            avg_next_60min_irradiance_wm2: finite_num(fields, "avg_next_60min_irradiance_wm2"),
            cost_trend: text_or(fields, "cost_trend", "Stable"),
            grid_stress: text_or(fields, "grid_stress", "Medium"),
        }
    }
}

fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn text_or(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    text(fields, key).unwrap_or_else(|| default.to_string())
}

/// Lenient numeric read: numbers pass through, strings get a parse attempt,
/// everything else (and any non-finite result) becomes `None`.
fn finite_num(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    match fields.get(key)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
