use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use azure_arm_api::{ArmClient, ContainerGroupRequest, ResourceGroupRequest};
use ch_deploy::credentials::AzureCredentials;
use ch_deploy::iac::mentions_container;
use ch_deploy::{Provider, new_deployment_id};

use crate::dto::{RelayDeployRequest, RelayDeployResponse};
use crate::state::AppState;

const LOCATION: &str = "East US";

/// The relay contract: deploy the posted IaC text to Azure using the
/// service's own environment credentials. Failures are HTTP 500 with the
/// same body shape, matching the original companion process.
pub async fn deploy_azure(
    State(state): State<AppState>,
    Json(req): Json<RelayDeployRequest>,
) -> (StatusCode, Json<RelayDeployResponse>) {
    let Some(creds) = state.config.azure_credentials.clone() else {
        tracing::error!("relay deployment refused: no Azure credentials in environment");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RelayDeployResponse::failure(
                "Azure deployment failed: relay has no Azure credentials configured",
            )),
        );
    };

    match run_deployment(&state, &creds, &req.iac_code).await {
        Ok((deployment_id, resources)) => {
            tracing::info!(%deployment_id, "relay: azure deployment completed");
            (
                StatusCode::OK,
                Json(RelayDeployResponse::success(deployment_id, resources)),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "relay: azure deployment failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RelayDeployResponse::failure(format!(
                    "Azure deployment failed: {e}"
                ))),
            )
        }
    }
}

async fn run_deployment(
    state: &AppState,
    creds: &AzureCredentials,
    iac_code: &str,
) -> azure_arm_api::Result<(String, Vec<String>)> {
    let mut client = ArmClient::new(
        &creds.tenant_id,
        &creds.client_id,
        &creds.client_secret,
        &creds.subscription_id,
    )
    .with_management_url(&creds.endpoint);
    if let Some(login) = &state.config.azure_login_url {
        client = client.with_login_url(login);
    }

    let token = client.acquire_token().await?;

    let deployment_id = new_deployment_id(Provider::Azure);
    let rg_name = format!("rg-{deployment_id}");
    let tags = std::collections::HashMap::from([
        ("created-by".to_string(), "cloud-horizon-deployer".to_string()),
        ("deployment-id".to_string(), deployment_id.clone()),
    ]);

    tracing::info!(resource_group = %rg_name, "relay: creating resource group");
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

    if mentions_container(iac_code) {
        let cg_name = format!("container-{deployment_id}");
        tracing::info!(container_group = %cg_name, "relay: creating container group");
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

    Ok((deployment_id, resources))
}
