use serde_json::json;
use wiremock::matchers::{any, body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";

/// Mock server utilities for testing the Nataris client
pub struct NatarisMockServer {
    server: MockServer,
}

impl NatarisMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    fn bearer() -> String {
        format!("Bearer {TEST_API_KEY}")
    }

    /// Mock a successful `/usage` response
    pub async fn mock_usage(&self, balance_usd: f64, total_requests: u64) {
        Mock::given(method("GET"))
            .and(path("/usage"))
            .and(header("authorization", Self::bearer()))
            .and(header_exists("x-request-id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "balance_usd": balance_usd,
                "total_requests": total_requests,
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a `/models` listing with one text and one audio model
    pub async fn mock_models(&self) {
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header("authorization", Self::bearer()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": "qwen2.5-0.5b-instruct-q6_k", "type": "text"},
                    {"id": "whisper-small", "type": "audio"},
                ]
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a 200 `/models` response that lacks the `data` listing
    pub async fn mock_models_missing_data(&self) {
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": []
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a successful `/inference` response for the given prompt
    pub async fn mock_inference(&self, prompt: &str, output: &str) {
        Mock::given(method("POST"))
            .and(path("/inference"))
            .and(header("authorization", Self::bearer()))
            .and(body_partial_json(json!({"prompt": prompt})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "qwen2.5-0.5b-instruct-q6_k",
                "output": output,
                "usage": {
                    "prompt_tokens": 9,
                    "completion_tokens": 21,
                    "total_tokens": 30,
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a `/chat/completions` response with a single direct choice
    pub async fn mock_chat(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", Self::bearer()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama-3.2-1b-instruct-q4_k_m",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop",
                }],
                "usage": {
                    "prompt_tokens": 12,
                    "completion_tokens": 34,
                    "total_tokens": 46,
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock an orchestrated `/chat/completions` response carrying workflow metadata
    pub async fn mock_chat_with_workflow(
        &self,
        workflow_id: &str,
        steps_executed: u32,
        total_cost_usd: f64,
    ) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "orchestration": {"enabled": true}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama-3.2-1b-instruct-q4_k_m",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "workflow summary"},
                    "finish_reason": "stop",
                }],
                "nataris": {
                    "workflow_id": workflow_id,
                    "steps_executed": steps_executed,
                    "total_cost_usd": total_cost_usd,
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a successful `/transcribe` response
    pub async fn mock_transcription(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .and(header("authorization", Self::bearer()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "text": text,
                "model": "whisper-small",
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock every request with a 401 and the service error envelope
    pub async fn mock_unauthorized(&self) {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "invalid api key"}
            })))
            .mount(&self.server)
            .await;
    }
}
