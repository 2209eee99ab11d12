//! Chat-completion gateway client.
//!
//! Sends one request per plan: a system prompt, the roster prompt and the
//! `generate_campaign_plan` tool with `tool_choice` pinned to it. No retry,
//! no caching. The API key is held as a [`SecretString`] and only exposed
//! when building the `Authorization` header.

use std::time::Duration;

use creator_core::config::PlannerConfig;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::PlannerError;
use crate::prompt::{build_user_prompt, plan_tool, plan_tool_choice, PLAN_FUNCTION_NAME, SYSTEM_PROMPT};
use crate::types::{PlanOutcome, PlanRequest};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    tools: Vec<Value>,
    tool_choice: Value,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    #[serde(default)]
    name: String,
    arguments: String,
}

/// Client for the upstream AI gateway. Cheap to share behind an `Arc`.
pub struct PlannerGateway {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<SecretString>,
}

impl PlannerGateway {
    pub fn new(config: &PlannerConfig) -> Result<Self, PlannerError> {
        let mut builder = Client::builder()
            .user_agent(concat!("creator-studio/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| PlannerError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: config.api_key.clone().map(SecretString::from),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the model for a plan.
    pub async fn generate_plan(&self, request: &PlanRequest) -> Result<PlanOutcome, PlannerError> {
        let api_key = self.api_key.as_ref().ok_or(PlannerError::MissingApiKey)?;

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_user_prompt(request),
                },
            ],
            tools: vec![plan_tool()],
            tool_choice: plan_tool_choice(),
        };

        debug!(members = request.members.len(), model = %self.model, "requesting campaign plan");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| PlannerError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => {
                    warn!("AI gateway rate limited the planner");
                    PlannerError::RateLimited
                }
                StatusCode::PAYMENT_REQUIRED => {
                    warn!("AI gateway requires payment");
                    PlannerError::PaymentRequired
                }
                _ => {
                    error!(status = status.as_u16(), body = %body, "AI gateway error");
                    PlannerError::Upstream {
                        status: status.as_u16(),
                        body,
                    }
                }
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| PlannerError::Transport(e.to_string()))?;
        let completion: ChatCompletion =
            serde_json::from_str(&text).map_err(|e| PlannerError::Decode(e.to_string()))?;

        extract_outcome(completion)
    }
}

/// Pull the plan out of the first choice: the plan function's arguments
/// when the model called it, otherwise the message text.
fn extract_outcome(completion: ChatCompletion) -> Result<PlanOutcome, PlannerError> {
    let message = completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| PlannerError::Decode("response contained no choices".to_string()))?;

    let call = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .find(|call| call.function.name.is_empty() || call.function.name == PLAN_FUNCTION_NAME);

    match call {
        Some(call) => {
            let plan: Value = serde_json::from_str(&call.function.arguments)
                .map_err(|e| PlannerError::MalformedArguments(e.to_string()))?;
            Ok(PlanOutcome::Plan(plan))
        }
        None => {
            debug!("model answered without calling the plan function");
            Ok(PlanOutcome::RawContent(message.content.unwrap_or_default()))
        }
    }
}
