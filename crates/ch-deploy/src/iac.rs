use std::sync::LazyLock;

use regex::Regex;

static RESOURCE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"resource\s+"([^"]+)"\s+"([^"]+)""#).expect("valid regex"));

/// Scan Terraform-style text for `resource "<type>" "<name>"` blocks and
/// return `"<type>.<name>"` per match, in order, duplicates preserved.
pub fn extract_resources(iac_code: &str) -> Vec<String> {
    RESOURCE_BLOCK
        .captures_iter(iac_code)
        .map(|cap| format!("{}.{}", &cap[1], &cap[2]))
        .collect()
}

/// Whether the text mentions a container workload.
pub fn mentions_container(iac_code: &str) -> bool {
    let text = iac_code.to_lowercase();
    text.contains("docker") || text.contains("container")
}
