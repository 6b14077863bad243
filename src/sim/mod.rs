//! Energy Simulator.
//!
//! An owned service handle over one simulated home energy system. Each
//! read applies a bounded random-walk step to the scalar sensors and
//! returns a rounded [`EnergySnapshot`]; [`EnergySimulator::toggle_appliance`]
//! flips one switch by id. Both operations sleep for a configurable
//! artificial latency to emulate a network round trip.

mod engine;
mod noise;
mod types;

pub use engine::{EnergySimulator, READ_LATENCY, TOGGLE_LATENCY};
pub use noise::{NoiseSource, UniformNoise};
pub use types::{Appliance, EnergySnapshot, EnergyState, HISTORY_LEN};
