use axum::Json;
use axum::extract::State;

use ch_ai::{ChatContext, ChatReply, CodeFlavor};
use ch_deploy::Provider;

use crate::dto::{ChatRequest, GenerateRequest, GenerateResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if req.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("prompt must not be empty".into()));
    }

    let provider = req.provider.unwrap_or(Provider::Aws);
    let flavor = req.flavor.unwrap_or(CodeFlavor::Terraform);

    let generated = state
        .ai
        .generate_infrastructure_code(&req.prompt, provider, flavor)
        .await;

    Ok(Json(GenerateResponse {
        provider,
        code: generated.code,
        explanation: generated.explanation,
    }))
}

pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".into()));
    }

    let context = ChatContext {
        user_query: req.message,
        provider: req.provider,
        error_logs: req.error_logs,
        deployment_id: req.deployment_id,
    };

    Ok(Json(state.ai.chat(&context, &req.history).await))
}
