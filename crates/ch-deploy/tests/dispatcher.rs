use std::time::Duration;

use ch_deploy::credentials::{AwsCredentials, AzureCredentials};
use ch_deploy::{
    classify, CredentialStore, DeployConfig, DeploymentMode, DeploymentRequest, DeploymentResult,
    Dispatcher, Provider,
};
use wiremock::matchers::{body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Nothing listens here; connections are refused immediately.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn azure_creds(endpoint: &str) -> AzureCredentials {
    AzureCredentials::new("client-1", "s3cret", "tenant-1", "sub-1", Some(endpoint.into())).unwrap()
}

fn config() -> DeployConfig {
    DeployConfig {
        relay_url: None,
        step_delay: Duration::ZERO,
        azure_login_url: None,
    }
}

fn assert_missing_credentials(result: &DeploymentResult) {
    assert!(!result.success);
    assert!(result.errors.iter().any(|e| e == "Missing credentials"));
    assert!(result.resources.is_empty());
}

#[tokio::test]
async fn missing_credentials_fail_without_network_calls() {
    let dispatcher = Dispatcher::new(config());

    for provider in [Provider::Aws, Provider::Azure, Provider::Gcp] {
        let request = DeploymentRequest {
            provider,
            iac_code: "resource \"aws_instance\" \"web\" {}".into(),
            credentials: CredentialStore::default(),
        };
        assert_missing_credentials(&dispatcher.deploy(&request).await);
    }
}

#[tokio::test]
async fn empty_store_fails_regardless_of_iac_text() {
    let dispatcher = Dispatcher::new(config());

    for code in ["", "docker container", "aws s3 gcp google"] {
        let provider = classify(code, &CredentialStore::default());
        let request = DeploymentRequest {
            provider,
            iac_code: code.into(),
            credentials: CredentialStore::default(),
        };
        assert_missing_credentials(&dispatcher.deploy(&request).await);
    }
}

#[tokio::test]
async fn aws_text_routes_to_simulated_aws_deployment() {
    let credentials = CredentialStore {
        aws: Some(AwsCredentials::new("AKIA123", "shhh", None).unwrap()),
        ..Default::default()
    };
    let code = "resource \"aws_instance\" \"web\" { instance_type = \"t3.micro\" }";

    let provider = classify(code, &credentials);
    assert_eq!(provider, Provider::Aws);

    let dispatcher = Dispatcher::new(config());
    let result = dispatcher
        .deploy(&DeploymentRequest {
            provider,
            iac_code: code.into(),
            credentials,
        })
        .await;

    assert!(result.success);
    assert_eq!(result.mode, DeploymentMode::Simulated);
    assert!(result.resources.contains(&"aws_instance.web (Simulated)".to_string()));
    let id = result.deployment_id.unwrap();
    assert!(id.starts_with("aws-deploy-"));
}

#[tokio::test]
async fn azure_falls_back_to_simulation_when_relay_and_arm_are_unreachable() {
    let credentials = CredentialStore {
        azure: Some(azure_creds(UNREACHABLE)),
        ..Default::default()
    };
    let code = "# docker-based web tier\nresource \"azurerm_resource_group\" \"main\" {}";

    let provider = classify(code, &credentials);
    assert_eq!(provider, Provider::Azure);

    let dispatcher = Dispatcher::new(DeployConfig {
        relay_url: Some(UNREACHABLE.into()),
        step_delay: Duration::ZERO,
        azure_login_url: Some(UNREACHABLE.into()),
    });
    let result = dispatcher
        .deploy(&DeploymentRequest {
            provider,
            iac_code: code.into(),
            credentials,
        })
        .await;

    assert!(result.success);
    assert_eq!(result.mode, DeploymentMode::Simulated);
    assert!(
        result
            .resources
            .iter()
            .any(|r| r.starts_with("Microsoft.Resources/resourceGroups.rg-azure-deploy-"))
    );
    assert!(
        result
            .resources
            .iter()
            .any(|r| r.starts_with("Microsoft.ContainerInstance/containerGroups.container-azure-deploy-"))
    );
    assert!(result.resources.contains(&"azurerm_resource_group.main".to_string()));
}

#[tokio::test]
async fn azure_relay_success_is_a_live_result() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deploy/azure"))
        .and(body_string_contains("iacCode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Azure deployment completed successfully",
            "deploymentId": "azure-deploy-42",
            "resources": ["Microsoft.Resources/resourceGroups.rg-azure-deploy-42"],
            "provider": "azure"
        })))
        .expect(1)
        .mount(&relay)
        .await;

    let dispatcher = Dispatcher::new(DeployConfig {
        relay_url: Some(relay.uri()),
        step_delay: Duration::ZERO,
        azure_login_url: None,
    });
    let result = dispatcher
        .deploy(&DeploymentRequest {
            provider: Provider::Azure,
            iac_code: "docker".into(),
            credentials: CredentialStore {
                azure: Some(azure_creds(UNREACHABLE)),
                ..Default::default()
            },
        })
        .await;

    assert!(result.success);
    assert_eq!(result.mode, DeploymentMode::Live);
    assert_eq!(result.deployment_id.as_deref(), Some("azure-deploy-42"));
}

#[tokio::test]
async fn azure_relay_rejection_is_a_failure_not_a_simulation() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deploy/azure"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "success": false,
            "message": "Azure deployment failed: AuthorizationFailed",
            "provider": "azure"
        })))
        .mount(&relay)
        .await;

    let dispatcher = Dispatcher::new(DeployConfig {
        relay_url: Some(relay.uri()),
        step_delay: Duration::ZERO,
        azure_login_url: None,
    });
    let result = dispatcher
        .deploy(&DeploymentRequest {
            provider: Provider::Azure,
            iac_code: "docker".into(),
            credentials: CredentialStore {
                azure: Some(azure_creds(UNREACHABLE)),
                ..Default::default()
            },
        })
        .await;

    assert!(!result.success);
    assert!(result.message.contains("AuthorizationFailed"));
}

#[tokio::test]
async fn azure_direct_path_deploys_via_arm() {
    let arm = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok",
            "expires_in": 3599
        })))
        .mount(&arm)
        .await;
    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": [{ "subscriptionId": "sub-1", "displayName": "Pay-As-You-Go" }]
        })))
        .mount(&arm)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/subscriptions/sub-1/resourcegroups/rg-azure-deploy-\d+$"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "/subscriptions/sub-1/resourceGroups/rg-x",
            "name": "rg-x",
            "location": "eastus"
        })))
        .expect(1)
        .mount(&arm)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"containerGroups/container-azure-deploy-\d+$"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "/subscriptions/sub-1/resourceGroups/rg-x/providers/Microsoft.ContainerInstance/containerGroups/cg-x",
            "name": "cg-x"
        })))
        .expect(1)
        .mount(&arm)
        .await;

    let dispatcher = Dispatcher::new(DeployConfig {
        relay_url: None,
        step_delay: Duration::ZERO,
        azure_login_url: Some(arm.uri()),
    });
    let result = dispatcher
        .deploy(&DeploymentRequest {
            provider: Provider::Azure,
            iac_code: "# docker app\nresource \"azurerm_container_group\" \"app\" {}".into(),
            credentials: CredentialStore {
                azure: Some(azure_creds(&arm.uri())),
                ..Default::default()
            },
        })
        .await;

    assert!(result.success, "direct path failed: {}", result.message);
    assert_eq!(result.mode, DeploymentMode::Live);
    assert!(result.resources.contains(&"azurerm_container_group.app".to_string()));
}

#[tokio::test]
async fn azure_subscription_mismatch_is_a_rejection() {
    let arm = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok",
            "expires_in": 3599
        })))
        .mount(&arm)
        .await;
    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": [{ "subscriptionId": "someone-else", "displayName": "Other" }]
        })))
        .mount(&arm)
        .await;

    let dispatcher = Dispatcher::new(DeployConfig {
        relay_url: None,
        step_delay: Duration::ZERO,
        azure_login_url: Some(arm.uri()),
    });
    let result = dispatcher
        .deploy(&DeploymentRequest {
            provider: Provider::Azure,
            iac_code: "docker".into(),
            credentials: CredentialStore {
                azure: Some(azure_creds(&arm.uri())),
                ..Default::default()
            },
        })
        .await;

    assert!(!result.success);
    assert_eq!(result.mode, DeploymentMode::Live);
    assert!(result.message.contains("sub-1"));
}
