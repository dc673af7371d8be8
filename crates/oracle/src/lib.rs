use std::error;
use std::fmt;
use std::sync::Arc;

pub mod client;
pub mod distance;
pub mod geocode;
pub mod insight;
pub mod model;

pub use client::{GenAiClient, GenAiCredentials, GenerativeOracle, OfflineOracle};

/// Every way the oracle can fail. Callers of the best-effort wrappers in
/// `insight`, `distance` and `geocode` never see these; the wrappers map
/// them all to their fallback values.
#[derive(Debug, Clone)]
pub enum OracleError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    EmptyResponse,
    MissingApiKey,
}

impl error::Error for OracleError {}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OracleError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            OracleError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            OracleError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, url, text)
                }
                None => write!(f, "Invalid Response ({}) {}", status_code, url),
            },
            OracleError::EmptyResponse => write!(f, "Response contained no text."),
            OracleError::MissingApiKey => write!(f, "No API key configured."),
        }
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(e: reqwest::Error) -> Self {
        OracleError::RequestError(Arc::new(e))
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(e: serde_json::Error) -> Self {
        OracleError::JsonError(Arc::new(e))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;

    use crate::client::GenerativeOracle;
    use crate::model::{GenerateRequest, GenerateResponse};
    use crate::OracleError;

    /// Oracle that always fails, for exercising the fallback paths.
    pub struct Unreachable;

    #[async_trait]
    impl GenerativeOracle for Unreachable {
        async fn generate(
            &self,
            _request: GenerateRequest,
        ) -> Result<GenerateResponse, OracleError> {
            Err(OracleError::MissingApiKey)
        }
    }

    /// Oracle that answers every request with the same response.
    pub struct Canned(pub GenerateResponse);

    #[async_trait]
    impl GenerativeOracle for Canned {
        async fn generate(
            &self,
            _request: GenerateRequest,
        ) -> Result<GenerateResponse, OracleError> {
            Ok(self.0.clone())
        }
    }
}
