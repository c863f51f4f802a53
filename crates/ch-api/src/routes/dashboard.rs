use axum::Json;

use crate::fixtures::{self, DeploymentRecord, DomainRecord, HealthSample};

pub async fn deployments() -> Json<Vec<DeploymentRecord>> {
    Json(fixtures::deployment_history())
}

pub async fn health() -> Json<Vec<HealthSample>> {
    Json(fixtures::health_series())
}

pub async fn domains() -> Json<Vec<DomainRecord>> {
    Json(fixtures::domain_records())
}
