use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

use crate::credentials::AwsCredentials;
use crate::iac::extract_resources;
use crate::types::{DeploymentResult, new_deployment_id};
use crate::Provider;

const SIMULATED_SUFFIX: &str = " (Simulated)";

/// AWS deployment routine. Always simulated — no AWS management call is
/// made; resources are read out of the IaC text.
pub struct AwsRoutine {
    step_delay: Duration,
}

impl AwsRoutine {
    pub fn new(step_delay: Duration) -> Self {
        Self { step_delay }
    }

    pub async fn deploy(&self, iac_code: &str, creds: &AwsCredentials) -> DeploymentResult {
        let deployment_id = new_deployment_id(Provider::Aws);

        info!(region = %creds.region, %deployment_id, "aws(simulated): validating credentials");
        sleep(self.step_delay).await;

        let mut resources = extract_resources(iac_code);
        if resources.is_empty() {
            resources.push("aws_instance.app".into());
        }
        let resources: Vec<String> = resources
            .into_iter()
            .map(|r| format!("{r}{SIMULATED_SUFFIX}"))
            .collect();

        info!(count = resources.len(), %deployment_id, "aws(simulated): provisioning complete");

        DeploymentResult::simulated(
            Provider::Aws,
            deployment_id,
            "AWS deployment simulated",
            resources,
        )
    }
}
