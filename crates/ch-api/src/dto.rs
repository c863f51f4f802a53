use ch_ai::{ChatMessage, CodeFlavor};
use ch_deploy::credentials::{AwsCredentials, AzureCredentials, GcpCredentials};
use ch_deploy::{CredentialStore, Provider};
use serde::{Deserialize, Serialize};

// ── Relay endpoint (wire contract fixed by the original service) ────

#[derive(Debug, Deserialize)]
pub struct RelayDeployRequest {
    #[serde(rename = "iacCode")]
    pub iac_code: String,
}

#[derive(Debug, Serialize)]
pub struct RelayDeployResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "deploymentId", skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    pub provider: Provider,
}

impl RelayDeployResponse {
    pub fn success(deployment_id: String, resources: Vec<String>) -> Self {
        Self {
            success: true,
            message: "Azure deployment completed successfully".into(),
            deployment_id: Some(deployment_id),
            resources,
            provider: Provider::Azure,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            deployment_id: None,
            resources: Vec::new(),
            provider: Provider::Azure,
        }
    }
}

// ── Dispatcher endpoint ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DeployRequestBody {
    #[serde(rename = "iacCode")]
    pub iac_code: String,
    /// Explicit target; omitted means classify from the IaC text.
    #[serde(default)]
    pub provider: Option<Provider>,
    #[serde(default)]
    pub credentials: CredentialFields,
}

/// Raw per-provider credential fields as sent by a client. Incomplete
/// records simply produce an absent store entry; the dispatcher then
/// reports the missing-credentials failure.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialFields {
    #[serde(default)]
    pub aws: Option<AwsFields>,
    #[serde(default)]
    pub azure: Option<AzureFields>,
    #[serde(default)]
    pub gcp: Option<GcpFields>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsFields {
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureFields {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub subscription_id: String,
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcpFields {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub private_key: String,
}

impl CredentialFields {
    pub fn into_store(self) -> CredentialStore {
        let aws = self.aws.and_then(|f| {
            AwsCredentials::new(f.access_key_id, f.secret_access_key, f.region)
                .inspect_err(|e| tracing::debug!(error = %e, "skipping incomplete aws credentials"))
                .ok()
        });
        let azure = self.azure.and_then(|f| {
            AzureCredentials::new(
                f.client_id,
                f.client_secret,
                f.tenant_id,
                f.subscription_id,
                f.endpoint,
            )
            .inspect_err(|e| tracing::debug!(error = %e, "skipping incomplete azure credentials"))
            .ok()
        });
        let gcp = self.gcp.and_then(|f| {
            GcpCredentials::new(f.project_id, f.client_email, f.private_key)
                .inspect_err(|e| tracing::debug!(error = %e, "skipping incomplete gcp credentials"))
                .ok()
        });

        CredentialStore { aws, azure, gcp }
    }
}

// ── AI endpoints ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub provider: Option<Provider>,
    #[serde(default)]
    pub flavor: Option<CodeFlavor>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub provider: Provider,
    pub code: String,
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub provider: Option<Provider>,
    #[serde(rename = "errorLogs", default)]
    pub error_logs: Option<String>,
    #[serde(rename = "deploymentId", default)]
    pub deployment_id: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}
