use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use ch_deploy::credentials::AzureCredentials;
use ch_deploy::DeployConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    /// Companion relay base URL for the dispatcher's Azure chain.
    pub relay_url: Option<String>,
    pub groq_api_key: Option<String>,
    pub step_delay: Duration,
    /// Service-principal credentials used by the relay endpoint itself.
    pub azure_credentials: Option<AzureCredentials>,
    /// Token endpoint override (sovereign clouds, tests).
    pub azure_login_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let azure_credentials = azure_credentials_from_env();
        if azure_credentials.is_none() {
            tracing::warn!("Azure credentials not set; relay endpoint will refuse deployments");
        }

        Self {
            listen_addr: env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3001".into())
                .parse()
                .expect("LISTEN_ADDR must be a valid socket address"),
            relay_url: env::var("RELAY_URL").ok(),
            groq_api_key: env::var("GROQ_API_KEY").ok(),
            step_delay: Duration::from_millis(
                env::var("SIMULATION_STEP_MS")
                    .unwrap_or_else(|_| "800".into())
                    .parse()
                    .expect("SIMULATION_STEP_MS must be a valid u64"),
            ),
            azure_credentials,
            azure_login_url: env::var("AZURE_LOGIN_URL").ok(),
        }
    }

    pub fn deploy_config(&self) -> DeployConfig {
        DeployConfig {
            relay_url: self.relay_url.clone(),
            step_delay: self.step_delay,
            azure_login_url: self.azure_login_url.clone(),
        }
    }
}

/// Build the relay endpoint's own credentials from `AZURE_CLIENT_ID`,
/// `AZURE_CLIENT_SECRET`, `AZURE_TENANT_ID`, `AZURE_SUBSCRIPTION_ID` and
/// optional `AZURE_ENDPOINT`. Any missing required variable yields `None`.
fn azure_credentials_from_env() -> Option<AzureCredentials> {
    AzureCredentials::new(
        env::var("AZURE_CLIENT_ID").ok()?,
        env::var("AZURE_CLIENT_SECRET").ok()?,
        env::var("AZURE_TENANT_ID").ok()?,
        env::var("AZURE_SUBSCRIPTION_ID").ok()?,
        env::var("AZURE_ENDPOINT").ok(),
    )
    .ok()
}
