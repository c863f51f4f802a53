use serde::Serialize;

use crate::Provider;

pub const DEFAULT_AWS_REGION: &str = "us-west-2";
pub const DEFAULT_AZURE_ENDPOINT: &str = "https://management.azure.com";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("missing credential field: {0}")]
    MissingField(&'static str),
}

fn required(value: String, field: &'static str) -> Result<String, CredentialError> {
    if value.trim().is_empty() {
        Err(CredentialError::MissingField(field))
    } else {
        Ok(value)
    }
}

/// AWS access-key credentials.
#[derive(Debug, Clone, Serialize)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl AwsCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: Option<String>,
    ) -> Result<Self, CredentialError> {
        Ok(Self {
            access_key_id: required(access_key_id.into(), "access_key_id")?,
            secret_access_key: required(secret_access_key.into(), "secret_access_key")?,
            region: region
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AWS_REGION.into()),
        })
    }
}

/// Azure service-principal credentials.
#[derive(Debug, Clone, Serialize)]
pub struct AzureCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
    pub subscription_id: String,
    pub endpoint: String,
}

impl AzureCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        tenant_id: impl Into<String>,
        subscription_id: impl Into<String>,
        endpoint: Option<String>,
    ) -> Result<Self, CredentialError> {
        Ok(Self {
            client_id: required(client_id.into(), "client_id")?,
            client_secret: required(client_secret.into(), "client_secret")?,
            tenant_id: required(tenant_id.into(), "tenant_id")?,
            subscription_id: required(subscription_id.into(), "subscription_id")?,
            endpoint: endpoint
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AZURE_ENDPOINT.into()),
        })
    }
}

/// GCP service-account credentials.
#[derive(Debug, Clone, Serialize)]
pub struct GcpCredentials {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
}

impl GcpCredentials {
    pub fn new(
        project_id: impl Into<String>,
        client_email: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self, CredentialError> {
        Ok(Self {
            project_id: required(project_id.into(), "project_id")?,
            client_email: required(client_email.into(), "client_email")?,
            private_key: required(private_key.into(), "private_key")?,
        })
    }
}

/// Explicit per-provider credential set passed into the dispatcher.
///
/// A `Some` entry is always complete: the per-provider constructors reject
/// empty fields, so presence doubles as validity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CredentialStore {
    pub aws: Option<AwsCredentials>,
    pub azure: Option<AzureCredentials>,
    pub gcp: Option<GcpCredentials>,
}

impl CredentialStore {
    pub fn has(&self, provider: Provider) -> bool {
        match provider {
            Provider::Aws => self.aws.is_some(),
            Provider::Azure => self.azure.is_some(),
            Provider::Gcp => self.gcp.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_required_field() {
        let err = AwsCredentials::new("AKIA123", "", None).unwrap_err();
        assert!(err.to_string().contains("secret_access_key"));

        let err = AzureCredentials::new("cid", "sec", "  ", "sub", None).unwrap_err();
        assert!(err.to_string().contains("tenant_id"));
    }

    #[test]
    fn fills_in_defaults() {
        let aws = AwsCredentials::new("AKIA123", "shhh", None).unwrap();
        assert_eq!(aws.region, DEFAULT_AWS_REGION);

        let azure = AzureCredentials::new("cid", "sec", "tid", "sub", Some(String::new())).unwrap();
        assert_eq!(azure.endpoint, DEFAULT_AZURE_ENDPOINT);
    }

    #[test]
    fn store_presence_tracks_providers() {
        let store = CredentialStore {
            gcp: Some(GcpCredentials::new("proj", "svc@proj.iam", "-----BEGIN KEY-----").unwrap()),
            ..Default::default()
        };
        assert!(store.has(Provider::Gcp));
        assert!(!store.has(Provider::Aws));
        assert!(!store.has(Provider::Azure));
    }
}
