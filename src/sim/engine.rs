//! Simulator service handle: bounded random walk plus appliance toggles.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::sleep;

use super::noise::{NoiseSource, UniformNoise};
use super::types::{Appliance, EnergySnapshot, EnergyState, HISTORY_LEN, round1, round2};

/// Simulated latency of a full snapshot read.
pub const READ_LATENCY: Duration = Duration::from_millis(1000);
/// Simulated latency of an appliance toggle.
pub const TOGGLE_LATENCY: Duration = Duration::from_millis(500);

/// Per-read walk half-ranges, one per scalar.
const BATTERY_STEP: f64 = 1.0;
const CONSUMPTION_STEP: f64 = 0.25;
const SOLAR_STEP: f64 = 0.15;
const PRICE_STEP: f64 = 0.025;

/// Floors (and the battery ceiling) of the walked scalars.
const CONSUMPTION_FLOOR: f64 = 1.0;
const SOLAR_FLOOR: f64 = 0.0;
const PRICE_FLOOR: f64 = 0.1;

struct Inner {
    state: EnergyState,
    noise: Box<dyn NoiseSource>,
}

/// Service handle over one simulated home energy system.
///
/// Owns the state explicitly — callers receive the handle by injection,
/// there is no ambient global. The state sits behind a mutex so the
/// read-modify-write of a walk step (and the history eviction) stays
/// atomic under parallel invocation.
pub struct EnergySimulator {
    inner: Mutex<Inner>,
    read_latency: Duration,
    toggle_latency: Duration,
}

impl EnergySimulator {
    /// Creates a simulator with the documented initial state, a seeded
    /// uniform noise source, and the default latencies.
    pub fn new(seed: u64) -> Self {
        Self::with_parts(
            EnergyState::initial(),
            Box::new(UniformNoise::seeded(seed)),
            READ_LATENCY,
            TOGGLE_LATENCY,
        )
    }

    /// Full-injection constructor: explicit starting state, offset source,
    /// and latencies. Tests pass a scripted source and zero latencies to
    /// run synchronously.
    pub fn with_parts(
        state: EnergyState,
        noise: Box<dyn NoiseSource>,
        read_latency: Duration,
        toggle_latency: Duration,
    ) -> Self {
        Self {
            inner: Mutex::new(Inner { state, noise }),
            read_latency,
            toggle_latency,
        }
    }

    /// Advances the walk one step and returns a rounded snapshot.
    ///
    /// Offsets are drawn in a fixed order (battery, consumption, solar,
    /// price), each clamped to its domain. The new consumption value is
    /// appended to the history, evicting the oldest entry past
    /// [`HISTORY_LEN`].
    pub async fn energy_data(&self) -> EnergySnapshot {
        sleep(self.read_latency).await;

        let mut inner = self.inner.lock().await;
        let Inner { state, noise } = &mut *inner;

        state.battery_level = (state.battery_level + noise.offset(BATTERY_STEP)).clamp(0.0, 100.0);
        state.energy_consumption =
            (state.energy_consumption + noise.offset(CONSUMPTION_STEP)).max(CONSUMPTION_FLOOR);
        state.solar_generation =
            (state.solar_generation + noise.offset(SOLAR_STEP)).max(SOLAR_FLOOR);
        state.grid_price = (state.grid_price + noise.offset(PRICE_STEP)).max(PRICE_FLOOR);

        state.consumption_history.push_back(state.energy_consumption);
        if state.consumption_history.len() > HISTORY_LEN {
            state.consumption_history.pop_front();
        }

        EnergySnapshot {
            grid_status: state.grid_status.clone(),
            battery_level: state.battery_level.round(),
            energy_consumption: round1(state.energy_consumption),
            consumption_history: state.consumption_history.iter().copied().map(round1).collect(),
            solar_generation: round1(state.solar_generation),
            grid_price: round2(state.grid_price),
            appliances: state.appliances.clone(),
        }
    }

    /// Flips the first appliance whose id matches and returns its new
    /// state. An unknown id is not an error: nothing changes and `None`
    /// comes back.
    pub async fn toggle_appliance(&self, appliance_id: u32) -> Option<Appliance> {
        sleep(self.toggle_latency).await;

        let mut inner = self.inner.lock().await;
        let appliance = inner
            .state
            .appliances
            .iter_mut()
            .find(|a| a.id == appliance_id)?;
        appliance.is_on = !appliance.is_on;
        Some(appliance.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Replays a fixed offset sequence, then returns zeros.
    struct ScriptedNoise {
        offsets: VecDeque<f64>,
    }

    impl ScriptedNoise {
        fn new(offsets: &[f64]) -> Self {
            Self {
                offsets: offsets.iter().copied().collect(),
            }
        }
    }

    impl NoiseSource for ScriptedNoise {
        fn offset(&mut self, _half_range: f64) -> f64 {
            self.offsets.pop_front().unwrap_or(0.0)
        }
    }

    /// Always walks by `sign * half_range` (the worst case in one direction).
    struct ExtremeNoise {
        sign: f64,
    }

    impl NoiseSource for ExtremeNoise {
        fn offset(&mut self, half_range: f64) -> f64 {
            self.sign * half_range
        }
    }

    fn instant_sim(noise: Box<dyn NoiseSource>) -> EnergySimulator {
        EnergySimulator::with_parts(
            EnergyState::initial(),
            noise,
            Duration::ZERO,
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn scripted_walk_produces_exact_rounded_snapshot() {
        // Draw order is battery, consumption, solar, price.
        let sim = instant_sim(Box::new(ScriptedNoise::new(&[0.2, 0.2, 0.1, 0.02])));
        let snap = sim.energy_data().await;

        assert_eq!(snap.grid_status, "Online");
        assert_eq!(snap.battery_level, 87.0); // 87.2 rounded
        assert_eq!(snap.energy_consumption, 2.5); // 2.3 + 0.2
        assert_eq!(snap.solar_generation, 1.3); // 1.2 + 0.1
        assert_eq!(snap.grid_price, 0.17); // 0.15 + 0.02
        assert_eq!(snap.appliances.len(), 4);
        assert_eq!(*snap.consumption_history.last().expect("history"), 2.5);
    }

    #[tokio::test]
    async fn battery_clamps_at_both_ends() {
        let mut state = EnergyState::initial();
        state.battery_level = 99.5;
        let sim = EnergySimulator::with_parts(
            state,
            Box::new(ExtremeNoise { sign: 1.0 }),
            Duration::ZERO,
            Duration::ZERO,
        );
        // Two max-upward steps from 99.5 would reach 101.5 unclamped.
        sim.energy_data().await;
        let snap = sim.energy_data().await;
        assert_eq!(snap.battery_level, 100.0);

        let mut state = EnergyState::initial();
        state.battery_level = 0.5;
        let sim = EnergySimulator::with_parts(
            state,
            Box::new(ExtremeNoise { sign: -1.0 }),
            Duration::ZERO,
            Duration::ZERO,
        );
        sim.energy_data().await;
        let snap = sim.energy_data().await;
        assert_eq!(snap.battery_level, 0.0);
    }

    #[tokio::test]
    async fn scalars_never_cross_their_floors() {
        let sim = instant_sim(Box::new(ExtremeNoise { sign: -1.0 }));
        // Battery starts at 87.0 and drops 1.0 per read, so it needs the
        // most steps to reach its floor; 150 covers all four scalars.
        let mut last = sim.energy_data().await;
        for _ in 0..150 {
            last = sim.energy_data().await;
        }
        assert_eq!(last.energy_consumption, 1.0);
        assert_eq!(last.solar_generation, 0.0);
        assert_eq!(last.grid_price, 0.1);
        assert_eq!(last.battery_level, 0.0);
    }

    #[tokio::test]
    async fn history_is_capped_fifo() {
        let sim = instant_sim(Box::new(ScriptedNoise::new(&[])));
        // Initial history holds 7 entries; each read appends one and
        // evicts at most one.
        for expected_len in [8, 9, 10, 10, 10] {
            let snap = sim.energy_data().await;
            assert_eq!(snap.consumption_history.len(), expected_len);
        }
        // Zero noise keeps consumption at 2.3; after 11 reads the window
        // holds only appended values.
        let mut snap = sim.energy_data().await;
        for _ in 0..5 {
            snap = sim.energy_data().await;
        }
        assert_eq!(snap.consumption_history, vec![2.3; 10]);
    }

    #[tokio::test]
    async fn history_is_chronological_most_recent_last() {
        // Only the consumption draw moves; it rises every read.
        struct RisingConsumption;
        impl NoiseSource for RisingConsumption {
            fn offset(&mut self, half_range: f64) -> f64 {
                if half_range == CONSUMPTION_STEP { 0.2 } else { 0.0 }
            }
        }

        let sim = instant_sim(Box::new(RisingConsumption));
        let mut snap = sim.energy_data().await;
        for _ in 0..11 {
            snap = sim.energy_data().await;
        }
        assert_eq!(snap.consumption_history.len(), 10);
        assert!(
            snap.consumption_history.windows(2).all(|w| w[0] < w[1]),
            "history should be oldest-first: {:?}",
            snap.consumption_history
        );
        assert_eq!(
            snap.consumption_history.last().copied(),
            Some(snap.energy_consumption)
        );
    }

    #[tokio::test]
    async fn toggle_flips_exactly_one_appliance() {
        let sim = instant_sim(Box::new(ScriptedNoise::new(&[])));
        let toggled = sim.toggle_appliance(2).await.expect("id 2 exists");
        assert_eq!(toggled.name, "Washing Machine");
        assert!(toggled.is_on);

        let snap = sim.energy_data().await;
        let on_flags: Vec<bool> = snap.appliances.iter().map(|a| a.is_on).collect();
        // Baseline is [true, false, true, false]; only id 2 flipped.
        assert_eq!(on_flags, vec![true, true, true, false]);
    }

    #[tokio::test]
    async fn toggle_twice_restores_original_state() {
        let sim = instant_sim(Box::new(ScriptedNoise::new(&[])));
        let first = sim.toggle_appliance(1).await.expect("id 1 exists");
        assert!(!first.is_on);
        let second = sim.toggle_appliance(1).await.expect("id 1 exists");
        assert!(second.is_on);
    }

    #[tokio::test]
    async fn toggle_unknown_id_changes_nothing() {
        let sim = instant_sim(Box::new(ScriptedNoise::new(&[])));
        assert!(sim.toggle_appliance(99).await.is_none());

        let snap = sim.energy_data().await;
        let on_flags: Vec<bool> = snap.appliances.iter().map(|a| a.is_on).collect();
        assert_eq!(on_flags, vec![true, false, true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn default_latencies_are_observed() {
        let start = tokio::time::Instant::now();
        let sim = EnergySimulator::new(42);
        sim.energy_data().await;
        assert_eq!(start.elapsed(), READ_LATENCY);

        let start = tokio::time::Instant::now();
        let _ = sim.toggle_appliance(1).await;
        assert_eq!(start.elapsed(), TOGGLE_LATENCY);
    }
}
