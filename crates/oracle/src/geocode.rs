use model::point::GeoPoint;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::client::GenerativeOracle;
use crate::model::GenerateRequest;
use crate::OracleError;

/// The structured shape the oracle is constrained to when geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
}

impl Place {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

pub async fn fetch_place<O>(oracle: &O, query: &str) -> Result<Place, OracleError>
where
    O: GenerativeOracle + ?Sized,
{
    let prompt = format!(
        "Find the precise latitude and longitude for the location: \"{query}\". \
         Return the coordinates for San Francisco area if ambiguous."
    );
    let schema = serde_json::to_value(schema_for!(Place).schema)?;
    let response = oracle
        .generate(GenerateRequest::from_prompt(prompt).with_json_response(schema))
        .await?;
    let text = response.text().ok_or(OracleError::EmptyResponse)?;
    Ok(serde_json::from_str(text.trim())?)
}

/// Best-effort variant: any transport or parse failure reads as "no
/// match". Callers leave the viewport untouched on `None`.
pub async fn geocode<O>(oracle: &O, query: &str) -> Option<Place>
where
    O: GenerativeOracle + ?Sized,
{
    match fetch_place(oracle, query).await {
        Ok(place) => Some(place),
        Err(why) => {
            log::warn!("geocoding '{query}' failed: {why}");
            None
        }
    }
}
