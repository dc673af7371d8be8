use model::point::GeoPoint;

/// Narrative shown between the measurement landing and the oracle
/// answering (or its fallback arriving).
pub const ANALYZING_PLACEHOLDER: &str = "AI analyzing road capacity...";

/// Outcome of a ruler click, telling the owner what to do next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// First point held, waiting for the second.
    Armed,
    /// Second point landed; the distance is final, the narrative is the
    /// placeholder until [`Ruler::set_narrative`] swaps it.
    Measured {
        seq: u64,
        from: GeoPoint,
        to: GeoPoint,
        distance_km: f64,
    },
    /// A third click threw both old points away and restarted with the
    /// new point as the sole one.
    Restarted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceResult {
    pub distance_km: f64,
    pub narrative: String,
    seq: u64,
}

/// Two-slot accumulator behind the map's distance tool.
#[derive(Debug, Default)]
pub struct Ruler {
    points: Vec<GeoPoint>,
    result: Option<DistanceResult>,
    measurements: u64,
}

impl Ruler {
    pub fn record_click(&mut self, point: GeoPoint) -> ClickOutcome {
        if self.points.len() == 2 {
            self.points.clear();
            self.result = None;
            self.points.push(point);
            return ClickOutcome::Restarted;
        }

        self.points.push(point);
        if self.points.len() < 2 {
            return ClickOutcome::Armed;
        }

        let from = self.points[0];
        let to = self.points[1];
        let distance_km = from.distance_km(&to);
        self.measurements += 1;
        let seq = self.measurements;
        self.result = Some(DistanceResult {
            distance_km,
            narrative: ANALYZING_PLACEHOLDER.to_owned(),
            seq,
        });
        ClickOutcome::Measured {
            seq,
            from,
            to,
            distance_km,
        }
    }

    pub fn reset(&mut self) {
        self.points.clear();
        self.result = None;
    }

    /// Swaps the narrative in place. An answer for a superseded
    /// measurement is dropped; returns whether the narrative was taken.
    pub fn set_narrative(&mut self, seq: u64, narrative: String) -> bool {
        match &mut self.result {
            Some(result) if result.seq == seq => {
                result.narrative = narrative;
                true
            }
            _ => false,
        }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn result(&self) -> Option<&DistanceResult> {
        self.result.as_ref()
    }
}
