use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::CredentialStore;
use crate::Provider;

/// How a result was produced.
///
/// `Simulated` marks the degraded narrative path taken when the management
/// plane is unreachable. It is a distinct status on purpose: a simulated run
/// must never be mistaken for a live deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Live,
    Simulated,
}

/// A single deployment request, constructed fresh per call. Not persisted.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    pub provider: Provider,
    pub iac_code: String,
    pub credentials: CredentialStore,
}

/// Terminal outcome of a deployment attempt. Routines fold every internal
/// error into this shape; callers inspect `success`, they never catch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    pub success: bool,
    pub mode: DeploymentMode,
    pub provider: Provider,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
    pub resources: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl DeploymentResult {
    pub fn live(
        provider: Provider,
        deployment_id: impl Into<String>,
        message: impl Into<String>,
        resources: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            mode: DeploymentMode::Live,
            provider,
            message: message.into(),
            deployment_id: Some(deployment_id.into()),
            resources,
            errors: Vec::new(),
        }
    }

    pub fn simulated(
        provider: Provider,
        deployment_id: impl Into<String>,
        message: impl Into<String>,
        resources: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            mode: DeploymentMode::Simulated,
            provider,
            message: message.into(),
            deployment_id: Some(deployment_id.into()),
            resources,
            errors: Vec::new(),
        }
    }

    pub fn failure(
        provider: Provider,
        message: impl Into<String>,
        errors: Vec<String>,
    ) -> Self {
        Self {
            success: false,
            mode: DeploymentMode::Live,
            provider,
            message: message.into(),
            deployment_id: None,
            resources: Vec::new(),
            errors,
        }
    }
}

/// Client-generated deployment id, e.g. `azure-deploy-1724800000000`.
pub fn new_deployment_id(provider: Provider) -> String {
    format!("{provider}-deploy-{}", Utc::now().timestamp_millis())
}
