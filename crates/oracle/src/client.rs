use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{GenerateRequest, GenerateResponse};
use crate::OracleError;

pub const GENAI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

// A hanging oracle call must never pin the UI.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenAiCredentials {
    pub api_key: String,
    pub model: Option<String>,
    pub proxy: Option<String>,
}

impl GenAiCredentials {
    /// Reads credentials from the environment. A missing key is not an
    /// error; callers run against [`OfflineOracle`] instead.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("GEMINI_API_KEY").ok()?;
        Some(Self {
            api_key,
            model: env::var("GEMINI_MODEL").ok(),
            proxy: env::var("GEMINI_PROXY").ok(),
        })
    }

    fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

/// The oracle boundary: ask a text/JSON generation service and get a
/// best-effort answer. All three adapter operations are generic over
/// this, so tests can substitute stubs and a keyless session can run
/// against [`OfflineOracle`].
#[async_trait]
pub trait GenerativeOracle: Send + Sync {
    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, OracleError>;
}

pub struct GenAiClient {
    credentials: GenAiCredentials,
    http: reqwest::Client,
}

impl GenAiClient {
    pub fn new(credentials: &GenAiCredentials) -> Result<Self, OracleError> {
        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(proxy_url) = &credentials.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }
        Ok(Self {
            credentials: credentials.clone(),
            http: builder.build()?,
        })
    }
}

#[async_trait]
impl GenerativeOracle for GenAiClient {
    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, OracleError> {
        let model = self.credentials.model_name();
        let url = format!("{GENAI_API_URL}/{model}:generateContent");
        log::debug!("requesting oracle model '{model}'");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.credentials.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(response.json().await?),
            other => match response.text().await {
                Ok(val) => Err(OracleError::InvalidResponse {
                    status_code: other,
                    url,
                    response: Some(val),
                }),
                Err(_) => Err(OracleError::InvalidResponse {
                    status_code: other,
                    url,
                    response: None,
                }),
            },
        }
    }
}

/// Stand-in used when no API key is configured. Every call reports the
/// oracle as unavailable, which routes callers onto their fallbacks.
pub struct OfflineOracle;

#[async_trait]
impl GenerativeOracle for OfflineOracle {
    async fn generate(
        &self,
        _request: GenerateRequest,
    ) -> Result<GenerateResponse, OracleError> {
        Err(OracleError::MissingApiKey)
    }
}
