use crate::client::GenerativeOracle;
use crate::model::GenerateRequest;
use crate::OracleError;

/// Shown when the oracle answered but produced no text.
const DEFAULT_TEXT: &str = "Fleet operations normal. Standard trajectory detected.";
/// Shown when the oracle could not be reached at all.
const FALLBACK_TEXT: &str = "Monitoring active. Latency within standard 50ms window.";

/// Free-text operational insight plus the web sources it was grounded on.
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub text: String,
    pub sources: Vec<String>,
}

pub async fn fetch_insight<O>(
    oracle: &O,
    context: &str,
) -> Result<Insight, OracleError>
where
    O: GenerativeOracle + ?Sized,
{
    let prompt = format!(
        "Context: {context}. As a GeoTrack Pro AI analyst, provide a strategic \
         operational insight. Include real-world traffic or weather factors if \
         relevant. Be extremely concise (1-2 sentences)."
    );
    let response = oracle
        .generate(
            GenerateRequest::from_prompt(prompt)
                .with_search()
                .with_temperature(0.5),
        )
        .await?;

    let sources = response.grounding_uris();
    let text = response
        .text()
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TEXT.to_owned());
    Ok(Insight { text, sources })
}

/// Best-effort variant: an unreachable oracle yields the static fallback
/// sentence and an empty source list, never an error.
pub async fn operational_insight<O>(oracle: &O, context: &str) -> Insight
where
    O: GenerativeOracle + ?Sized,
{
    match fetch_insight(oracle, context).await {
        Ok(insight) => insight,
        Err(why) => {
            log::warn!("insight request failed: {why}");
            Insight {
                text: FALLBACK_TEXT.to_owned(),
                sources: Vec::new(),
            }
        }
    }
}
