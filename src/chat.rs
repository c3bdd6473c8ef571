use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::inference::TokenUsage;
use crate::{NatarisApi, DEFAULT_CHAT_MODEL};

/// A single role-tagged entry in a conversation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn system(content: &str) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn assistant(content: &str) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    System,
    Assistant,
}

/// Parameters for a chat completion request
#[derive(Serialize, Debug, Clone)]
pub struct ChatParams {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orchestration: Option<Orchestration>,
}

impl ChatParams {
    /// Builds params for the given conversation with the default chat model
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            model: DEFAULT_CHAT_MODEL.to_string(),
            messages,
            max_tokens: None,
            orchestration: None,
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_orchestration(mut self, orchestration: Orchestration) -> Self {
        self.orchestration = Some(orchestration);
        self
    }
}

/**
Directive asking the service to run a multi-step workflow instead of a
single completion

The service interprets the workflow name and enforces the spend ceiling;
the client only carries them.
*/
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Orchestration {
    pub enabled: bool,
    pub workflow: String,
    pub max_cost_usd: f64,
}

impl Orchestration {
    /// Enables the named workflow with a spend ceiling in US dollars
    pub fn workflow(name: &str, max_cost_usd: f64) -> Self {
        Self {
            enabled: true,
            workflow: name.to_string(),
            max_cost_usd,
        }
    }
}

/// Wire shape of a `/chat/completions` response
#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
    #[serde(default)]
    nataris: Option<WorkflowReport>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/**
Metadata reported by the service after an orchestrated workflow run

The service does not commit to any of these fields, so all of them are
best-effort.
*/
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct WorkflowReport {
    #[serde(default)]
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub steps_executed: Option<u32>,
    #[serde(default)]
    pub total_cost_usd: Option<f64>,
}

/// Outcome of a chat completion: a direct reply, workflow metadata, or both
#[derive(Debug, Clone)]
pub struct ChatResult {
    pub model: Option<String>,
    pub content: Option<String>,
    pub usage: Option<TokenUsage>,
    pub workflow: Option<WorkflowReport>,
}

impl ChatResult {
    fn from_response(raw: ChatResponse) -> Result<Self> {
        if raw.choices.is_empty() && raw.nataris.is_none() {
            return Err(Error::Decode(
                "response carried neither choices nor workflow metadata".to_string(),
            ));
        }
        Ok(Self {
            model: raw.model,
            content: raw.choices.into_iter().next().and_then(|c| c.message.content),
            usage: raw.usage,
            workflow: raw.nataris,
        })
    }
}

impl NatarisApi {
    /**
    Sends a chat completion request

    Returns the first message choice and, when orchestration was requested
    and the service reports it, the workflow metadata. A missing workflow
    block is not an error.

    Fails with a validation error before any network call if the message
    list or the model id is empty.
    */
    pub async fn chat_completion(&self, params: ChatParams) -> Result<ChatResult> {
        if params.messages.is_empty() {
            return Err(Error::Validation(
                "message list must not be empty".to_string(),
            ));
        }
        if params.model.trim().is_empty() {
            return Err(Error::Validation("model id must not be empty".to_string()));
        }

        let raw: ChatResponse = self.post_json("/chat/completions", &params).await?;
        ChatResult::from_response(raw)
    }
}
