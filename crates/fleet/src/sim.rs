use std::ops::Range;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use futures::FutureExt;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::state::FleetState;

/// Wall-clock interval between movement ticks.
pub const TICK: Duration = Duration::from_secs(4);
/// Maximum per-axis drift per tick, in degrees.
pub const DRIFT_DEGREES: f64 = 0.001;
/// Speeds are resampled into this band on every tick.
pub const SPEED_RANGE_MPH: Range<u32> = 25..45;

/// One movement pass over the fleet. Idle assets are never touched; every
/// other asset drifts by an independently sampled perturbation per axis
/// and gets a fresh speed and timestamp.
pub fn advance<R>(fleet: &mut FleetState, rng: &mut R, now: DateTime<Local>)
where
    R: Rng + ?Sized,
{
    for asset in fleet.assets_mut() {
        if asset.is_idle() {
            continue;
        }
        asset.position.latitude +=
            rng.random_range(-DRIFT_DEGREES..=DRIFT_DEGREES);
        asset.position.longitude +=
            rng.random_range(-DRIFT_DEGREES..=DRIFT_DEGREES);
        asset.speed_mph = rng.random_range(SPEED_RANGE_MPH);
        asset.last_seen = now;
    }
}

/// Handle to the background movement task. The owner must stop it on
/// teardown; a stopped simulator never mutates fleet state again.
pub struct SimulatorHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SimulatorHandle {
    /// Cancels the task and waits for it to exit.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}

pub fn run(fleet: Arc<RwLock<FleetState>>) -> SimulatorHandle {
    run_with_tick(fleet, TICK)
}

/// Spawns the repeating movement task. Each tick is a single synchronous
/// mutation pass, so ticks can never overlap. A panicking tick is caught,
/// logged and stops the loop instead of unwinding into the runtime.
pub fn run_with_tick(
    fleet: Arc<RwLock<FleetState>>,
    tick: Duration,
) -> SimulatorHandle {
    let cancel = CancellationToken::new();
    let guard = cancel.clone();
    let task = tokio::spawn(async move {
        let mut interval = time::interval(tick);
        // the first interval tick completes immediately; burn it so the
        // fleet first moves a full tick after startup
        interval.tick().await;
        let mut rng = SmallRng::from_os_rng();
        log::info!("position simulator started ({}s tick)", tick.as_secs_f32());
        loop {
            tokio::select! {
                _ = guard.cancelled() => break,
                _ = interval.tick() => {}
            }
            let result = AssertUnwindSafe(async {
                let mut fleet = fleet.write().await;
                advance(&mut fleet, &mut rng, Local::now());
            })
            .catch_unwind()
            .await;
            if let Err(why) = result {
                log::error!("simulator tick paniced: {:?}", why);
                break;
            }
        }
        log::info!("position simulator stopped");
    });
    SimulatorHandle { cancel, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::asset::AssetStatus;

    fn seeded_rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn idle_assets_never_move() {
        let mut fleet = FleetState::from_seed();
        let idle_before = fleet
            .assets()
            .filter(|(_, a)| a.is_idle())
            .map(|(id, a)| (id.clone(), a.position, a.speed_mph))
            .collect::<Vec<_>>();
        assert!(!idle_before.is_empty());

        let mut rng = seeded_rng();
        for _ in 0..25 {
            advance(&mut fleet, &mut rng, Local::now());
        }

        for (id, position, speed) in idle_before {
            let asset = fleet.get(&id).unwrap();
            assert_eq!(asset.position, position);
            assert_eq!(asset.speed_mph, speed);
        }
    }

    #[test]
    fn moving_assets_drift_within_bounds() {
        let mut fleet = FleetState::from_seed();
        let before = fleet
            .assets()
            .map(|(id, a)| (id.clone(), a.position))
            .collect::<Vec<_>>();

        let mut rng = seeded_rng();
        advance(&mut fleet, &mut rng, Local::now());

        for (id, position) in before {
            let asset = fleet.get(&id).unwrap();
            if asset.is_idle() {
                continue;
            }
            let dlat = (asset.position.latitude - position.latitude).abs();
            let dlng = (asset.position.longitude - position.longitude).abs();
            // tiny slack for the float rounding of position + drift
            assert!(dlat <= DRIFT_DEGREES + 1e-12, "lat drift {dlat}");
            assert!(dlng <= DRIFT_DEGREES + 1e-12, "lng drift {dlng}");
            assert!(SPEED_RANGE_MPH.contains(&asset.speed_mph));
        }
    }

    #[test]
    fn every_moving_asset_is_perturbed_each_tick() {
        let mut fleet = FleetState::from_seed();
        let now = Local::now();
        let mut rng = seeded_rng();
        advance(&mut fleet, &mut rng, now);

        for (_, asset) in fleet.assets() {
            if asset.status == AssetStatus::Idle {
                continue;
            }
            // last_seen doubles as the per-tick freshness marker
            assert_eq!(asset.last_seen, now);
        }
    }

    #[tokio::test]
    async fn stopped_simulator_mutates_nothing() {
        let fleet = Arc::new(RwLock::new(FleetState::from_seed()));
        let handle =
            run_with_tick(Arc::clone(&fleet), Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(60)).await;
        handle.stop().await;

        let snapshot = fleet.read().await.display_positions(false);
        tokio::time::sleep(Duration::from_millis(60)).await;
        let after = fleet.read().await.display_positions(false);
        assert_eq!(snapshot, after);
    }

    #[tokio::test]
    async fn simulator_moves_the_fleet() {
        let fleet = Arc::new(RwLock::new(FleetState::from_seed()));
        let before = fleet.read().await.display_positions(false);

        let handle =
            run_with_tick(Arc::clone(&fleet), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.stop().await;

        let after = fleet.read().await.display_positions(false);
        assert_ne!(before, after);
    }
}
