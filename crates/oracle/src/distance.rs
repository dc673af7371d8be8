use model::point::GeoPoint;

use crate::client::GenerativeOracle;
use crate::model::GenerateRequest;
use crate::OracleError;

pub async fn fetch_distance_narrative<O>(
    oracle: &O,
    from: GeoPoint,
    to: GeoPoint,
    distance_km: f64,
) -> Result<String, OracleError>
where
    O: GenerativeOracle + ?Sized,
{
    let prompt = format!(
        "Estimate travel time between [{:.4}, {:.4}] and [{:.4}, {:.4}] in San \
         Francisco. Straight distance is {:.2}km. Check current traffic/road \
         work via search. Return estimation and 1 reason.",
        from.latitude, from.longitude, to.latitude, to.longitude, distance_km
    );
    let response = oracle
        .generate(
            GenerateRequest::from_prompt(prompt)
                .with_search()
                .with_temperature(0.2),
        )
        .await?;
    response.text().ok_or(OracleError::EmptyResponse)
}

/// Deterministic offline approximation at three minutes per straight-line
/// kilometer, so the ruler always has a narrative to show.
pub fn offline_estimate(distance_km: f64) -> String {
    format!(
        "Estimated {} mins based on typical city flow.",
        (distance_km * 3.0).round() as i64
    )
}

/// Best-effort variant: falls back to [`offline_estimate`] when the
/// oracle is unreachable or answers with nothing.
pub async fn distance_narrative<O>(
    oracle: &O,
    from: GeoPoint,
    to: GeoPoint,
    distance_km: f64,
) -> String
where
    O: GenerativeOracle + ?Sized,
{
    match fetch_distance_narrative(oracle, from, to, distance_km).await {
        Ok(narrative) => narrative,
        Err(why) => {
            log::warn!("distance narrative request failed: {why}");
            offline_estimate(distance_km)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GenerateResponse;
    use crate::testing::{Canned, Unreachable};

    #[test]
    fn offline_estimate_is_three_minutes_per_km() {
        let estimate = offline_estimate(2.0);
        assert!(estimate.contains('6'), "got {estimate}");
        assert_eq!(estimate, "Estimated 6 mins based on typical city flow.");
    }

    #[test]
    fn offline_estimate_rounds_to_whole_minutes() {
        assert_eq!(
            offline_estimate(1.4173),
            "Estimated 4 mins based on typical city flow."
        );
    }

    #[tokio::test]
    async fn unreachable_oracle_yields_offline_estimate() {
        let a = GeoPoint::new(37.7749, -122.4194);
        let b = GeoPoint::new(37.7849, -122.4294);
        let narrative = distance_narrative(&Unreachable, a, b, 2.0).await;
        assert_eq!(narrative, "Estimated 6 mins based on typical city flow.");
    }

    #[tokio::test]
    async fn answer_text_passes_through() {
        let oracle = Canned(GenerateResponse::from_text(
            "About 15 minutes; road work on Van Ness.",
        ));
        let a = GeoPoint::new(37.7749, -122.4194);
        let b = GeoPoint::new(37.7849, -122.4294);
        let narrative = distance_narrative(&oracle, a, b, 1.42).await;
        assert_eq!(narrative, "About 15 minutes; road work on Van Ness.");
    }
}
