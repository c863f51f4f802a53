//! Display fixtures for the dashboard endpoints. Illustrative sample data
//! only — nothing here is written back or persisted.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use ch_deploy::{DeploymentMode, Provider};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub id: Uuid,
    pub name: String,
    pub provider: Provider,
    pub mode: DeploymentMode,
    pub status: String,
    pub finished_at: DateTime<Utc>,
    pub duration_secs: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSample {
    pub timestamp: DateTime<Utc>,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub requests_per_min: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    pub domain: String,
    pub provider: Provider,
    pub status: String,
    pub ssl_enabled: bool,
    pub expires_at: DateTime<Utc>,
}

pub fn deployment_history() -> Vec<DeploymentRecord> {
    let now = Utc::now();
    let entries = [
        ("web-frontend", Provider::Azure, DeploymentMode::Live, "succeeded", 3, 142),
        ("api-gateway", Provider::Aws, DeploymentMode::Simulated, "succeeded", 9, 87),
        ("batch-workers", Provider::Gcp, DeploymentMode::Simulated, "succeeded", 26, 203),
        ("staging-stack", Provider::Azure, DeploymentMode::Live, "failed", 49, 31),
        ("data-pipeline", Provider::Aws, DeploymentMode::Simulated, "succeeded", 74, 156),
    ];

    entries
        .into_iter()
        .map(|(name, provider, mode, status, hours_ago, duration_secs)| DeploymentRecord {
            id: Uuid::new_v4(),
            name: name.into(),
            provider,
            mode,
            status: status.into(),
            finished_at: now - Duration::hours(hours_ago),
            duration_secs,
        })
        .collect()
}

/// 24 hourly samples as a bounded random walk.
pub fn health_series() -> Vec<HealthSample> {
    let mut rng = rand::rng();
    let now = Utc::now();

    let mut cpu: f64 = 35.0;
    let mut mem: f64 = 55.0;

    (0..24)
        .map(|i| {
            cpu = (cpu + rng.random_range(-8.0..8.0)).clamp(5.0, 95.0);
            mem = (mem + rng.random_range(-5.0..5.0)).clamp(20.0, 90.0);
            HealthSample {
                timestamp: now - Duration::hours(23 - i),
                cpu_percent: (cpu * 10.0).round() / 10.0,
                memory_percent: (mem * 10.0).round() / 10.0,
                requests_per_min: rng.random_range(40..400),
            }
        })
        .collect()
}

pub fn domain_records() -> Vec<DomainRecord> {
    let now = Utc::now();
    vec![
        DomainRecord {
            domain: "app.example.com".into(),
            provider: Provider::Azure,
            status: "active".into(),
            ssl_enabled: true,
            expires_at: now + Duration::days(312),
        },
        DomainRecord {
            domain: "api.example.com".into(),
            provider: Provider::Aws,
            status: "active".into(),
            ssl_enabled: true,
            expires_at: now + Duration::days(98),
        },
        DomainRecord {
            domain: "legacy.example.net".into(),
            provider: Provider::Gcp,
            status: "pending-verification".into(),
            ssl_enabled: false,
            expires_at: now + Duration::days(12),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_series_stays_within_bounds() {
        let series = health_series();
        assert_eq!(series.len(), 24);
        for sample in &series {
            assert!((5.0..=95.0).contains(&sample.cpu_percent));
            assert!((20.0..=90.0).contains(&sample.memory_percent));
        }
        // Oldest first.
        assert!(series.first().unwrap().timestamp < series.last().unwrap().timestamp);
    }

    #[test]
    fn fixtures_are_non_empty() {
        assert!(!deployment_history().is_empty());
        assert!(!domain_records().is_empty());
    }
}
