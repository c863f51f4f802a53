use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceGroupRequest {
    pub location: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceGroup {
    pub id: String,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionList {
    pub value: Vec<Subscription>,
}

#[derive(Debug, Deserialize)]
pub struct Subscription {
    #[serde(rename = "subscriptionId")]
    pub subscription_id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
}

// ── Container groups ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ContainerGroupRequest {
    pub location: String,
    pub properties: ContainerGroupProperties,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerGroupProperties {
    pub containers: Vec<Container>,
    pub os_type: String,
    pub restart_policy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<IpAddress>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Container {
    pub name: String,
    pub properties: ContainerProperties,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerProperties {
    pub image: String,
    pub resources: ResourceRequirements,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ContainerPort>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceRequirements {
    pub requests: ResourceRequests,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequests {
    pub cpu: f64,
    pub memory_in_gb: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerPort {
    pub port: u16,
    pub protocol: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAddress {
    pub r#type: String,
    pub ports: Vec<ContainerPort>,
}

#[derive(Debug, Deserialize)]
pub struct ContainerGroup {
    pub id: String,
    pub name: String,
}

impl ContainerGroupRequest {
    /// Single-container nginx group: 1 CPU, 1 GB, public TCP port 80.
    pub fn nginx_default(location: impl Into<String>, tags: HashMap<String, String>) -> Self {
        let port = ContainerPort {
            port: 80,
            protocol: "TCP".into(),
        };
        Self {
            location: location.into(),
            properties: ContainerGroupProperties {
                containers: vec![Container {
                    name: "nginx-container".into(),
                    properties: ContainerProperties {
                        image: "nginx:latest".into(),
                        resources: ResourceRequirements {
                            requests: ResourceRequests {
                                cpu: 1.0,
                                memory_in_gb: 1.0,
                            },
                        },
                        ports: vec![port.clone()],
                    },
                }],
                os_type: "Linux".into(),
                restart_policy: "Always".into(),
                ip_address: Some(IpAddress {
                    r#type: "Public".into(),
                    ports: vec![port],
                }),
            },
            tags,
        }
    }
}
