//! Typed Rust client for the Azure Resource Manager REST API.
//!
//! Covers the subset needed for deployments: client-credentials token
//! acquisition, subscription listing, resource-group create and
//! container-group create. Everything else in ARM is out of scope.

mod types;

pub use types::*;

const MANAGEMENT_URL: &str = "https://management.azure.com";
const LOGIN_URL: &str = "https://login.microsoftonline.com";

const RESOURCE_GROUP_API_VERSION: &str = "2021-04-01";
const SUBSCRIPTION_API_VERSION: &str = "2021-01-01";
const CONTAINER_GROUP_API_VERSION: &str = "2023-05-01";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("arm api request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("arm api {endpoint} returned {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("token acquisition failed: {status}: {body}")]
    Auth {
        status: reqwest::StatusCode,
        body: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Client for the Azure Resource Manager REST API, authenticating with a
/// service-principal client secret.
#[derive(Clone)]
pub struct ArmClient {
    tenant_id: String,
    client_id: String,
    client_secret: String,
    subscription_id: String,
    management_url: String,
    login_url: String,
    http: reqwest::Client,
}

impl ArmClient {
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        subscription_id: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            subscription_id: subscription_id.into(),
            management_url: MANAGEMENT_URL.into(),
            login_url: LOGIN_URL.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Override the management endpoint (sovereign clouds, tests).
    pub fn with_management_url(mut self, url: impl Into<String>) -> Self {
        self.management_url = trim_slash(url.into());
        self
    }

    /// Override the token endpoint base (tests).
    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = trim_slash(url.into());
        self
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    fn url(&self, path: &str, api_version: &str) -> String {
        format!("{}{path}?api-version={api_version}", self.management_url)
    }

    async fn check(resp: reqwest::Response, endpoint: &'static str) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api { endpoint, status, body });
        }
        Ok(resp)
    }

    /// Acquire a management-plane bearer token via the OAuth2
    /// client-credentials grant.
    pub async fn acquire_token(&self) -> Result<TokenResponse> {
        let scope = format!("{}/.default", self.management_url);
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", scope.as_str()),
        ];

        let resp = self
            .http
            .post(format!(
                "{}/{}/oauth2/v2.0/token",
                self.login_url, self.tenant_id
            ))
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Auth { status, body });
        }

        resp.json().await.map_err(Error::from)
    }

    /// List subscriptions visible to the service principal.
    pub async fn list_subscriptions(&self, token: &str) -> Result<SubscriptionList> {
        let resp = self
            .http
            .get(self.url("/subscriptions", SUBSCRIPTION_API_VERSION))
            .bearer_auth(token)
            .send()
            .await?;

        Self::check(resp, "list subscriptions")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    /// Create (or update) a resource group.
    pub async fn create_resource_group(
        &self,
        token: &str,
        name: &str,
        req: &ResourceGroupRequest,
    ) -> Result<ResourceGroup> {
        let path = format!(
            "/subscriptions/{}/resourcegroups/{name}",
            self.subscription_id
        );
        let resp = self
            .http
            .put(self.url(&path, RESOURCE_GROUP_API_VERSION))
            .bearer_auth(token)
            .json(req)
            .send()
            .await?;

        Self::check(resp, "create resource group")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    /// Create (or update) a container group inside a resource group.
    pub async fn create_container_group(
        &self,
        token: &str,
        resource_group: &str,
        name: &str,
        req: &ContainerGroupRequest,
    ) -> Result<ContainerGroup> {
        let path = format!(
            "/subscriptions/{}/resourceGroups/{resource_group}/providers/Microsoft.ContainerInstance/containerGroups/{name}",
            self.subscription_id
        );
        let resp = self
            .http
            .put(self.url(&path, CONTAINER_GROUP_API_VERSION))
            .bearer_auth(token)
            .json(req)
            .send()
            .await?;

        Self::check(resp, "create container group")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
