//! Deployment core: typed credentials, provider classification, IaC
//! resource extraction and the per-provider deployment routines.
//!
//! Errors never cross the dispatch boundary — every routine folds its
//! internal failures into a [`DeploymentResult`], so callers branch on
//! `success` and `mode` instead of catching.

pub mod aws;
pub mod azure;
pub mod classify;
pub mod credentials;
pub mod gcp;
pub mod iac;
pub mod relay;
pub mod types;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use classify::classify;
pub use credentials::{AwsCredentials, AzureCredentials, CredentialStore, GcpCredentials};
pub use iac::extract_resources;
pub use types::{DeploymentMode, DeploymentRequest, DeploymentResult, new_deployment_id};

/// Supported deployment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Gcp => "gcp",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, UnknownProvider> {
        match s {
            "aws" => Ok(Self::Aws),
            "azure" => Ok(Self::Azure),
            "gcp" => Ok(Self::Gcp),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Internal failure kinds inside a deployment routine. Folded into
/// [`DeploymentResult`] before reaching any caller.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("Missing credentials")]
    MissingCredentials,

    #[error("management api unreachable: {0}")]
    Network(String),

    #[error("provider rejected the request: {0}")]
    ProviderRejection(String),

    #[error("{0}")]
    Unknown(String),
}

impl From<azure_arm_api::Error> for DeployError {
    fn from(e: azure_arm_api::Error) -> Self {
        match e {
            azure_arm_api::Error::Request(inner) => DeployError::Network(inner.to_string()),
            azure_arm_api::Error::Api { .. } | azure_arm_api::Error::Auth { .. } => {
                DeployError::ProviderRejection(e.to_string())
            }
        }
    }
}

/// Dispatcher configuration.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Base URL of the relay service; `None` skips the relay attempt.
    pub relay_url: Option<String>,
    /// Pacing between simulated steps. Zero in tests.
    pub step_delay: Duration,
    /// Token endpoint override for the direct Azure path (tests).
    pub azure_login_url: Option<String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            relay_url: None,
            step_delay: Duration::from_millis(800),
            azure_login_url: None,
        }
    }
}

/// Routes a [`DeploymentRequest`] to its provider routine.
///
/// Credential completeness is checked before any network call: a request
/// whose store has no entry for the routed provider fails immediately.
pub struct Dispatcher {
    azure: azure::AzureRoutine,
    aws: aws::AwsRoutine,
    gcp: gcp::GcpRoutine,
}

impl Dispatcher {
    pub fn new(config: DeployConfig) -> Self {
        Self {
            azure: azure::AzureRoutine::new(&config),
            aws: aws::AwsRoutine::new(config.step_delay),
            gcp: gcp::GcpRoutine::new(config.step_delay),
        }
    }

    pub async fn deploy(&self, request: &DeploymentRequest) -> DeploymentResult {
        tracing::info!(provider = %request.provider, "starting deployment");

        match request.provider {
            Provider::Azure => match &request.credentials.azure {
                Some(creds) => self.azure.deploy(&request.iac_code, creds).await,
                None => missing_credentials(
                    Provider::Azure,
                    "Missing required Azure credentials. Configure Client ID, Client Secret, Tenant ID and Subscription ID.",
                ),
            },
            Provider::Aws => match &request.credentials.aws {
                Some(creds) => self.aws.deploy(&request.iac_code, creds).await,
                None => missing_credentials(
                    Provider::Aws,
                    "Missing required AWS credentials. Configure Access Key ID and Secret Access Key.",
                ),
            },
            Provider::Gcp => match &request.credentials.gcp {
                Some(creds) => self.gcp.deploy(&request.iac_code, creds).await,
                None => missing_credentials(
                    Provider::Gcp,
                    "Missing required GCP credentials. Configure Project ID, Client Email and Private Key.",
                ),
            },
        }
    }
}

fn missing_credentials(provider: Provider, message: &str) -> DeploymentResult {
    tracing::warn!(%provider, "deployment refused: incomplete credentials");
    DeploymentResult::failure(provider, message, vec![DeployError::MissingCredentials.to_string()])
}
