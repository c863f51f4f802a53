use ch_ai::{AiClient, ChatContext, ChatMessage, CodeFlavor};
use ch_deploy::Provider;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

#[tokio::test]
async fn generates_code_from_first_fenced_block() {
    let server = MockServer::start().await;
    let content = "Here is your bucket:\n```hcl\nresource \"aws_s3_bucket\" \"main\" {}\n```\nIt stores things.";

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer key-123"))
        .and(body_string_contains("llama3-8b-8192"))
        .and(body_string_contains("\"stream\":false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .expect(1)
        .mount(&server)
        .await;

    let client = AiClient::new(Some("key-123".into())).with_base_url(server.uri());
    let out = client
        .generate_infrastructure_code("an s3 bucket", Provider::Aws, CodeFlavor::Terraform)
        .await;

    assert_eq!(out.code, "resource \"aws_s3_bucket\" \"main\" {}");
    assert!(out.explanation.contains("It stores things."));
    assert!(!out.explanation.contains("```"));
}

#[tokio::test]
async fn api_failure_falls_back_to_template() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = AiClient::new(Some("key-123".into())).with_base_url(server.uri());
    let out = client
        .generate_infrastructure_code("a web server", Provider::Aws, CodeFlavor::Terraform)
        .await;

    // EC2 keyword template, not an error.
    assert!(out.code.contains("aws_security_group"));
}

#[tokio::test]
async fn chat_returns_message_and_snippet() {
    let server = MockServer::start().await;
    let content = "Add a versioning block.\n```terraform\nversioning { enabled = true }\n```";

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Cloud Provider: azure"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .expect(1)
        .mount(&server)
        .await;

    let client = AiClient::new(Some("key-123".into())).with_base_url(server.uri());
    let reply = client
        .chat(
            &ChatContext {
                user_query: "how do I version my bucket?".into(),
                provider: Some(Provider::Azure),
                ..Default::default()
            },
            &[ChatMessage::user("earlier question"), ChatMessage::assistant("earlier answer")],
        )
        .await;

    assert_eq!(reply.message, "Add a versioning block.");
    assert_eq!(reply.code_snippet.as_deref(), Some("versioning { enabled = true }"));
}
