use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

use crate::credentials::GcpCredentials;
use crate::iac::extract_resources;
use crate::types::{DeploymentResult, new_deployment_id};
use crate::Provider;

/// GCP deployment routine. Always simulated, same shape as the AWS one.
pub struct GcpRoutine {
    step_delay: Duration,
}

impl GcpRoutine {
    pub fn new(step_delay: Duration) -> Self {
        Self { step_delay }
    }

    pub async fn deploy(&self, iac_code: &str, creds: &GcpCredentials) -> DeploymentResult {
        let deployment_id = new_deployment_id(Provider::Gcp);

        info!(project = %creds.project_id, %deployment_id, "gcp(simulated): validating credentials");
        sleep(self.step_delay).await;

        let mut resources = extract_resources(iac_code);
        if resources.is_empty() {
            resources.push("google_compute_instance.app".into());
        }
        let resources: Vec<String> = resources
            .into_iter()
            .map(|r| format!("{r} (Simulated)"))
            .collect();

        info!(count = resources.len(), %deployment_id, "gcp(simulated): provisioning complete");

        DeploymentResult::simulated(
            Provider::Gcp,
            deployment_id,
            "GCP deployment simulated",
            resources,
        )
    }
}
