//! Client for an OpenAI-compatible chat-completions endpoint (Groq), with
//! canned Terraform templates as the no-key / failure fallback.

pub mod templates;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use ch_deploy::Provider;
pub use templates::fallback_infrastructure_code;

const BASE_URL: &str = "https://api.groq.com/openai/v1";
const MODEL: &str = "llama3-8b-8192";
const CHAT_HISTORY_LIMIT: usize = 10;

const SYSTEM_PROMPT: &str = "You are an expert cloud infrastructure and DevOps assistant for a \
multi-cloud deployment platform. You help users plan infrastructure, troubleshoot deployments \
across Azure, AWS and GCP, and generate Infrastructure as Code (Terraform, Pulumi, Docker). \
Always provide practical, actionable advice with specific examples. When generating code, \
ensure it is production-ready and follows security best practices.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("completion api returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("completion response had no choices")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Requested IaC dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeFlavor {
    Terraform,
    Pulumi,
}

impl fmt::Display for CodeFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Terraform => "terraform",
            Self::Pulumi => "pulumi",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".into(), content: content.into() }
    }

    fn system(content: impl Into<String>) -> Self {
        Self { role: "system".into(), content: content.into() }
    }
}

/// Prompt context for a chat turn.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatContext {
    pub user_query: String,
    pub provider: Option<Provider>,
    pub error_logs: Option<String>,
    pub deployment_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedCode {
    pub code: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

// ── Wire types ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
    model: &'a str,
    temperature: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Chat-completions client. Without an API key every call takes the
/// fallback path; with one, a single non-streaming completion is issued and
/// any failure still falls back rather than erroring out to the caller.
#[derive(Clone)]
pub struct AiClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    http: reqwest::Client,
}

impl AiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: BASE_URL.into(),
            model: MODEL.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Override the endpoint base (tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate IaC for a prompt. Falls back to canned templates when no
    /// key is configured or the completion request fails.
    pub async fn generate_infrastructure_code(
        &self,
        prompt: &str,
        provider: Provider,
        flavor: CodeFlavor,
    ) -> GeneratedCode {
        if self.api_key.is_none() {
            return fallback_infrastructure_code(prompt, provider, flavor);
        }

        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Generate {flavor} code for {provider} to: {prompt}. \
                 Provide the code and a brief explanation of what it does."
            )),
        ];

        match self.complete(&messages, 0.3, 1500).await {
            Ok(text) => split_code_and_explanation(&text),
            Err(e) => {
                tracing::warn!(error = %e, "code generation failed, using fallback template");
                fallback_infrastructure_code(prompt, provider, flavor)
            }
        }
    }

    /// One chat turn. History is trimmed to the most recent messages.
    pub async fn chat(&self, context: &ChatContext, history: &[ChatMessage]) -> ChatReply {
        if self.api_key.is_none() {
            return fallback_chat_reply(context);
        }

        let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];
        let tail = history.len().saturating_sub(CHAT_HISTORY_LIMIT);
        messages.extend_from_slice(&history[tail..]);
        messages.push(ChatMessage::user(format_user_query(context)));

        match self.complete(&messages, 0.7, 2048).await {
            Ok(text) => {
                let code_snippet = extract_code_block(&text).map(|(_, code)| code);
                ChatReply {
                    message: strip_code_blocks(&text),
                    code_snippet,
                    suggestions: Vec::new(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat completion failed, using fallback reply");
                fallback_chat_reply(context)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String> {
        // has_api_key() is checked by both public entry points
        let key = self.api_key.as_deref().ok_or(Error::EmptyResponse)?;

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(key)
            .json(&CompletionRequest {
                messages,
                model: &self.model,
                temperature,
                max_tokens,
                stream: false,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        let parsed: CompletionResponse = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(Error::EmptyResponse)
    }
}

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(\w*)\n(.*?)\n```").expect("valid regex"));

/// First fenced code block as `(language, code)`, if any.
pub fn extract_code_block(text: &str) -> Option<(String, String)> {
    CODE_FENCE
        .captures(text)
        .map(|cap| (cap[1].to_string(), cap[2].to_string()))
}

fn strip_code_blocks(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

fn split_code_and_explanation(text: &str) -> GeneratedCode {
    match extract_code_block(text) {
        Some((_, code)) => GeneratedCode {
            code,
            explanation: strip_code_blocks(text),
        },
        // No fence: treat the whole response as code, as the original did.
        None => GeneratedCode {
            code: text.to_string(),
            explanation: String::new(),
        },
    }
}

fn format_user_query(context: &ChatContext) -> String {
    let mut query = context.user_query.clone();
    if let Some(provider) = context.provider {
        query.push_str(&format!("\n\nCloud Provider: {provider}"));
    }
    if let Some(id) = &context.deployment_id {
        query.push_str(&format!("\nDeployment ID: {id}"));
    }
    if let Some(logs) = &context.error_logs {
        query.push_str(&format!("\n\nError Logs:\n{logs}"));
    }
    query
}

fn fallback_chat_reply(context: &ChatContext) -> ChatReply {
    let provider = context
        .provider
        .map(|p| p.to_string())
        .unwrap_or_else(|| "cloud".into());
    ChatReply {
        message: format!(
            "I'll help you with your {provider} infrastructure needs. {}",
            context.user_query
        ),
        code_snippet: None,
        suggestions: vec![
            "Configure an API key for enhanced AI assistance".into(),
            "Check your cloud provider credentials".into(),
            "Review the deployment logs for specific errors".into(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_fenced_block() {
        let text = "Here you go:\n```hcl\nresource \"aws_instance\" \"web\" {}\n```\nDone.\n```\nsecond\n```";
        let (lang, code) = extract_code_block(text).unwrap();
        assert_eq!(lang, "hcl");
        assert_eq!(code, "resource \"aws_instance\" \"web\" {}");
    }

    #[test]
    fn splits_explanation_from_code() {
        let text = "Intro.\n```terraform\nprovider \"aws\" {}\n```\nOutro.";
        let out = split_code_and_explanation(text);
        assert_eq!(out.code, "provider \"aws\" {}");
        assert_eq!(out.explanation, "Intro.\n\nOutro.");
    }

    #[test]
    fn unfenced_response_becomes_code() {
        let out = split_code_and_explanation("provider \"aws\" {}");
        assert_eq!(out.code, "provider \"aws\" {}");
        assert!(out.explanation.is_empty());
    }

    #[test]
    fn query_formatting_appends_context() {
        let q = format_user_query(&ChatContext {
            user_query: "why did it fail".into(),
            provider: Some(Provider::Azure),
            error_logs: Some("403 AuthorizationFailed".into()),
            deployment_id: Some("azure-deploy-1".into()),
        });
        assert!(q.starts_with("why did it fail"));
        assert!(q.contains("Cloud Provider: azure"));
        assert!(q.contains("Deployment ID: azure-deploy-1"));
        assert!(q.contains("403 AuthorizationFailed"));
    }

    #[tokio::test]
    async fn keyless_client_uses_fallbacks() {
        let client = AiClient::new(None);
        assert!(!client.has_api_key());

        let code = client
            .generate_infrastructure_code("an s3 bucket", Provider::Aws, CodeFlavor::Terraform)
            .await;
        assert!(code.code.contains("aws_s3_bucket"));

        let reply = client
            .chat(
                &ChatContext { user_query: "help".into(), ..Default::default() },
                &[],
            )
            .await;
        assert!(reply.message.contains("cloud infrastructure needs"));
        assert_eq!(reply.suggestions.len(), 3);
    }
}
