use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::models::api::{
    PrepareRequest, PrepareResponse, SaveResponse, SubmitResponse, VersionRequest,
};
use crate::utils::config::ActionConfig;
use crate::utils::error::ActionError;

/// Action backend client errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("Action request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Action backend returned HTTP {0}")]
    HttpStatus(u16),

    /// Response body was not the expected JSON
    #[error("Failed to parse action response: {0}")]
    ParseError(String),
}

impl From<ClientError> for ActionError {
    fn from(err: ClientError) -> Self {
        Self::NetworkError(err.to_string())
    }
}

/// The three calls the action issues against its backend
#[allow(async_fn_in_trait)]
pub trait ActionBackend {
    async fn prepare_action(&self, request: &PrepareRequest) -> Result<PrepareResponse, ClientError>;

    async fn save_version(&self, request: &VersionRequest) -> Result<SaveResponse, ClientError>;

    async fn submit_version(&self, request: &VersionRequest) -> Result<SubmitResponse, ClientError>;
}

/// HTTP client for the action backend (`{root}/api/...`)
#[derive(Debug, Clone)]
pub struct ActionClient {
    /// HTTP client for backend requests
    client: Client,
    /// Base URL of the backend, without trailing slash
    root_url: String,
    /// User agent string for requests
    user_agent: String,
}

impl ActionClient {
    /// Create a client for the given root URL
    pub fn new(root_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), root_url)
    }

    /// Create a client from the configuration (root URL and timeout)
    pub fn from_config(config: &ActionConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(client, config.root_url.clone()))
    }

    /// Create a client with a custom HTTP client (for testing)
    pub fn with_client(client: Client, root_url: impl Into<String>) -> Self {
        Self {
            client,
            root_url: root_url.into().trim_end_matches('/').to_string(),
            user_agent: format!("fip-version-action/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/{}", self.root_url, name)
    }

    async fn post_json<B, R>(&self, name: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(name);
        debug!(%url, "posting action request");

        let response = self
            .client
            .post(&url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus(status.as_u16()));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))
    }
}

impl ActionBackend for ActionClient {
    async fn prepare_action(&self, request: &PrepareRequest) -> Result<PrepareResponse, ClientError> {
        self.post_json("prepare-action", request).await
    }

    async fn save_version(&self, request: &VersionRequest) -> Result<SaveResponse, ClientError> {
        self.post_json("save-version", request).await
    }

    async fn submit_version(&self, request: &VersionRequest) -> Result<SubmitResponse, ClientError> {
        self.post_json("submit-version", request).await
    }
}
