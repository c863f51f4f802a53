use serde::{Deserialize, Serialize};

/// Client for the companion relay service that performs privileged Azure
/// calls on the deployment host.
#[derive(Clone)]
pub struct RelayClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("relay request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("relay returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
}

#[derive(Debug, Serialize)]
struct RelayDeployRequest<'a> {
    #[serde(rename = "iacCode")]
    iac_code: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct RelayDeployResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "deploymentId", default)]
    pub deployment_id: Option<String>,
    #[serde(default)]
    pub resources: Vec<String>,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// POST the IaC text to the relay's Azure deploy endpoint.
    ///
    /// Transport failures surface as `Request`; a non-2xx response becomes
    /// `Api` carrying the relay's own error message when it sent one.
    pub async fn deploy_azure(&self, iac_code: &str) -> Result<RelayDeployResponse, RelayError> {
        let resp = self
            .http
            .post(format!("{}/api/deploy/azure", self.base_url))
            .json(&RelayDeployRequest { iac_code })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["message"].as_str().map(str::to_string))
                .unwrap_or(body);
            return Err(RelayError::Api { status, message });
        }

        resp.json().await.map_err(RelayError::from)
    }
}
