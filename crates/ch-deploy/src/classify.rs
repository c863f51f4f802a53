use crate::CredentialStore;
use crate::Provider;
use crate::iac::mentions_container;

/// Heuristic provider selection from IaC text plus credential presence.
///
/// Priority order: containerized workloads with Azure credentials go to
/// Azure; AWS keywords (without container mentions) go to AWS; GCP keywords
/// go to GCP; everything else defaults to Azure. Pure function — unknown
/// text never errors, it falls through to the default.
pub fn classify(iac_code: &str, credentials: &CredentialStore) -> Provider {
    let text = iac_code.to_lowercase();
    let containerized = mentions_container(iac_code);

    if containerized && credentials.has(Provider::Azure) {
        return Provider::Azure;
    }

    if !containerized && (text.contains("aws") || text.contains("s3") || text.contains("ec2")) {
        return Provider::Aws;
    }

    if text.contains("gcp") || text.contains("google") || text.contains("storage_bucket") {
        return Provider::Gcp;
    }

    Provider::Azure
}
