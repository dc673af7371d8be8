use std::sync::Arc;

use model::asset::TrackedAsset;
use model::point::GeoPoint;
use oracle::geocode::{self, Place};
use oracle::insight::{self, Insight};
use oracle::{distance, GenerativeOracle};
use tokio::sync::{Mutex, RwLock};
use utility::id::Id;

use crate::ruler::{ClickOutcome, DistanceResult, Ruler};
use crate::sim::{self, SimulatorHandle};
use crate::state::FleetState;
use crate::viewport::Viewport;

/// Top-level owner of all session state. The rendering layer talks to
/// the fleet, ruler and viewport exclusively through this context; the
/// simulator and the oracle are wired in here.
pub struct TrackingContext {
    fleet: Arc<RwLock<FleetState>>,
    ruler: Arc<Mutex<Ruler>>,
    viewport: RwLock<Viewport>,
    oracle: Arc<dyn GenerativeOracle>,
    simulator: Mutex<Option<SimulatorHandle>>,
}

impl TrackingContext {
    pub fn new(oracle: Arc<dyn GenerativeOracle>) -> Self {
        Self {
            fleet: Arc::new(RwLock::new(FleetState::from_seed())),
            ruler: Arc::new(Mutex::new(Ruler::default())),
            viewport: RwLock::new(Viewport::home()),
            oracle,
            simulator: Mutex::new(None),
        }
    }

    /// Shared handle for the rendering layer.
    pub fn fleet(&self) -> Arc<RwLock<FleetState>> {
        Arc::clone(&self.fleet)
    }

    pub async fn start_simulator(&self) {
        let mut simulator = self.simulator.lock().await;
        if simulator.is_none() {
            *simulator = Some(sim::run(Arc::clone(&self.fleet)));
        }
    }

    /// Stops the movement task and waits for it to exit. Idempotent;
    /// must run when the owning view is torn down so nothing mutates
    /// state afterwards.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.simulator.lock().await.take() {
            handle.stop().await;
        }
    }

    /// Map click while the ruler tool is active. The numeric distance is
    /// final synchronously; the narrative refines in the background and
    /// never blocks the caller.
    pub async fn handle_map_click(&self, point: GeoPoint) -> ClickOutcome {
        let outcome = self.ruler.lock().await.record_click(point);
        if let ClickOutcome::Measured {
            seq,
            from,
            to,
            distance_km,
        } = outcome
        {
            let ruler = Arc::clone(&self.ruler);
            let oracle = Arc::clone(&self.oracle);
            tokio::spawn(async move {
                let narrative = distance::distance_narrative(
                    oracle.as_ref(),
                    from,
                    to,
                    distance_km,
                )
                .await;
                if !ruler.lock().await.set_narrative(seq, narrative) {
                    log::debug!("narrative for superseded measurement dropped");
                }
            });
        }
        outcome
    }

    pub async fn reset_ruler(&self) {
        self.ruler.lock().await.reset();
    }

    pub async fn distance_result(&self) -> Option<DistanceResult> {
        self.ruler.lock().await.result().cloned()
    }

    /// Semantic place search. A hit recenters the viewport onto the
    /// place; a miss leaves the viewport untouched.
    pub async fn search(&self, query: &str) -> Option<Place> {
        let place = geocode::geocode(self.oracle.as_ref(), query).await?;
        *self.viewport.write().await = Viewport::focus(place.point());
        Some(place)
    }

    pub async fn insight(&self, context: &str) -> Insight {
        insight::operational_insight(self.oracle.as_ref(), context).await
    }

    pub async fn viewport(&self) -> Viewport {
        *self.viewport.read().await
    }

    pub async fn go_home(&self) {
        *self.viewport.write().await = Viewport::home();
    }

    /// Positions for display/export, privacy mask already applied.
    pub async fn display_positions(
        &self,
        privacy_enabled: bool,
    ) -> Vec<(Id<TrackedAsset>, GeoPoint)> {
        self.fleet.read().await.display_positions(privacy_enabled)
    }
}
