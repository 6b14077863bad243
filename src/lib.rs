//! Data-access helpers for a home energy dashboard.
//!
//! Two independent components live here:
//!
//! - [`feed`] — a read-only client for a hosted decision-log table. One
//!   request per call, newest rows first, each raw row mapped into a flat
//!   [`feed::DecisionRecord`] with lenient type coercion.
//! - [`sim`] — a simulated home energy feed (battery, consumption, solar,
//!   grid price, appliance switches). Each read advances a bounded random
//!   walk and returns a rounded snapshot after an artificial latency.
//!
//! No data flows between the two.

pub mod config;
pub mod feed;
pub mod sim;
