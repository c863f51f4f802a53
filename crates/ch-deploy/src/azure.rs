use std::collections::HashMap;
use std::time::Duration;

use azure_arm_api::{ArmClient, ContainerGroupRequest, ResourceGroupRequest};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::credentials::AzureCredentials;
use crate::iac::{extract_resources, mentions_container};
use crate::relay::{RelayClient, RelayError};
use crate::types::{DeploymentResult, new_deployment_id};
use crate::{DeployConfig, DeployError, Provider};

const LOCATION: &str = "East US";
const CREATED_BY_TAG: &str = "cloud-horizon-deployer";

/// Azure deployment: relay attempt, then direct ARM calls, then a paced
/// simulated run when the management plane is unreachable.
pub struct AzureRoutine {
    relay: Option<RelayClient>,
    step_delay: Duration,
    login_url: Option<String>,
}

impl AzureRoutine {
    pub fn new(config: &DeployConfig) -> Self {
        Self {
            relay: config.relay_url.as_deref().map(RelayClient::new),
            step_delay: config.step_delay,
            login_url: config.azure_login_url.clone(),
        }
    }

    pub async fn deploy(&self, iac_code: &str, creds: &AzureCredentials) -> DeploymentResult {
        let deployment_id = new_deployment_id(Provider::Azure);

        match &self.relay {
            Some(relay) => match relay.deploy_azure(iac_code).await {
                Ok(resp) if resp.success => {
                    info!(deployment_id = ?resp.deployment_id, "azure: relay deployment succeeded");
                    return DeploymentResult::live(
                        Provider::Azure,
                        resp.deployment_id.unwrap_or(deployment_id),
                        resp.message,
                        resp.resources,
                    );
                }
                Ok(resp) => {
                    return DeploymentResult::failure(
                        Provider::Azure,
                        resp.message,
                        vec![DeployError::ProviderRejection("relay reported failure".into()).to_string()],
                    );
                }
                Err(RelayError::Api { status, message }) => {
                    // The relay's own message is already user-facing.
                    return DeploymentResult::failure(
                        Provider::Azure,
                        message,
                        vec![format!("relay returned {status}")],
                    );
                }
                Err(RelayError::Request(e)) => {
                    warn!(error = %e, "azure: relay unreachable, trying management api directly");
                }
            },
            None => info!("azure: no relay configured, using management api directly"),
        }

        match self.deploy_direct(iac_code, creds, &deployment_id).await {
            Ok(resources) => {
                info!(%deployment_id, "azure: direct deployment succeeded");
                DeploymentResult::live(
                    Provider::Azure,
                    deployment_id,
                    "Azure deployment completed successfully",
                    resources,
                )
            }
            Err(DeployError::Network(e)) => {
                warn!(error = %e, "azure: management api unreachable, falling back to simulated deployment");
                self.simulate(iac_code, deployment_id).await
            }
            Err(e) => DeploymentResult::failure(
                Provider::Azure,
                format!("Azure deployment failed: {e}"),
                vec![e.to_string()],
            ),
        }
    }

    async fn deploy_direct(
        &self,
        iac_code: &str,
        creds: &AzureCredentials,
        deployment_id: &str,
    ) -> Result<Vec<String>, DeployError> {
        let mut client = ArmClient::new(
            &creds.tenant_id,
            &creds.client_id,
            &creds.client_secret,
            &creds.subscription_id,
        )
        .with_management_url(&creds.endpoint);
        if let Some(login) = &self.login_url {
            client = client.with_login_url(login);
        }

        info!(endpoint = %creds.endpoint, %deployment_id, "azure: validating connection");
        let token = client.acquire_token().await?;

        let subscriptions = client.list_subscriptions(&token.access_token).await?;
        let subscription = subscriptions
            .value
            .iter()
            .find(|s| s.subscription_id == creds.subscription_id)
            .ok_or_else(|| {
                DeployError::ProviderRejection(format!(
                    "subscription {} not found or not accessible",
                    creds.subscription_id
                ))
            })?;
        info!(subscription = %subscription.display_name, %deployment_id, "azure: subscription validated");

        let tags = deployment_tags(deployment_id);
        let rg_name = format!("rg-{deployment_id}");

        info!(resource_group = %rg_name, %deployment_id, "azure: creating resource group");
        client
            .create_resource_group(
                &token.access_token,
                &rg_name,
                &ResourceGroupRequest {
                    location: LOCATION.into(),
                    tags: tags.clone(),
                },
            )
            .await?;

        let mut resources = vec![format!("Microsoft.Resources/resourceGroups.{rg_name}")];
        resources.extend(extract_resources(iac_code));

        if mentions_container(iac_code) {
            let cg_name = format!("container-{deployment_id}");
            info!(container_group = %cg_name, %deployment_id, "azure: creating container group");
            client
                .create_container_group(
                    &token.access_token,
                    &rg_name,
                    &cg_name,
                    &ContainerGroupRequest::nginx_default(LOCATION, tags),
                )
                .await?;
            resources.push(format!("Microsoft.ContainerInstance/containerGroups.{cg_name}"));
        }

        Ok(resources)
    }

    async fn simulate(&self, iac_code: &str, deployment_id: String) -> DeploymentResult {
        info!(%deployment_id, "azure(simulated): validating credentials");
        sleep(self.step_delay).await;

        let rg_name = format!("rg-{deployment_id}");
        info!(resource_group = %rg_name, "azure(simulated): creating resource group");
        sleep(self.step_delay).await;

        let mut resources = vec![format!("Microsoft.Resources/resourceGroups.{rg_name}")];

        if mentions_container(iac_code) {
            let cg_name = format!("container-{deployment_id}");
            info!(container_group = %cg_name, "azure(simulated): deploying container");
            sleep(self.step_delay).await;
            resources.push(format!("Microsoft.ContainerInstance/containerGroups.{cg_name}"));
        }

        resources.extend(extract_resources(iac_code));

        DeploymentResult::simulated(
            Provider::Azure,
            deployment_id,
            "Azure deployment simulated: management API unreachable",
            resources,
        )
    }
}

fn deployment_tags(deployment_id: &str) -> HashMap<String, String> {
    HashMap::from([
        ("created-by".to_string(), CREATED_BY_TAG.to_string()),
        ("deployment-id".to_string(), deployment_id.to_string()),
    ])
}
