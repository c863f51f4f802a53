use axum::Json;
use axum::extract::State;

use ch_deploy::{DeploymentRequest, DeploymentResult, classify};

use crate::dto::DeployRequestBody;
use crate::state::AppState;

/// Full deployment dispatch. The response is always 200: failures are
/// in-band on the result (`success`, `errors`), and simulated runs are
/// marked by `mode`.
pub async fn deploy(
    State(state): State<AppState>,
    Json(body): Json<DeployRequestBody>,
) -> Json<DeploymentResult> {
    let credentials = body.credentials.into_store();
    let provider = body
        .provider
        .unwrap_or_else(|| classify(&body.iac_code, &credentials));

    let request = DeploymentRequest {
        provider,
        iac_code: body.iac_code,
        credentials,
    };

    Json(state.dispatcher.deploy(&request).await)
}
