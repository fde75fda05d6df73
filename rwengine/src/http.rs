//! HTTP adapter for a hosted rule-generation service.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::{ChatTurn, EngineError, EngineFuture, RuleEngineClient, RuleEngineRequest};

/// POSTs the JSON request to a configured endpoint and decodes the reply
/// envelope. The service answers with the full transcript (system entries
/// already stripped); the turns appended beyond the prompt prefix are the
/// new assistant replies.
pub struct HttpRuleEngineClient {
    http: reqwest::Client,
    endpoint: String,
    bearer_token: Option<String>,
}

impl HttpRuleEngineClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }
}

impl RuleEngineClient for HttpRuleEngineClient {
    fn generate<'a>(
        &'a self,
        request: RuleEngineRequest,
    ) -> EngineFuture<'a, Result<Vec<ChatTurn>, EngineError>> {
        Box::pin(async move {
            let mut builder = self.http.post(&self.endpoint).json(&request);
            if let Some(token) = &self.bearer_token {
                builder = builder.bearer_auth(token);
            }

            let response = builder.send().await.map_err(map_transport_error)?;
            let status = response.status();
            if !status.is_success() {
                let detail = response.text().await.unwrap_or_default();
                return Err(map_status(status, &detail));
            }

            let envelope: GenerateEnvelope = response
                .json()
                .await
                .map_err(|error| EngineError::decode(format!("invalid reply envelope: {error}")))?;

            extract_replies(&request, envelope)
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateEnvelope {
    chat_history: Vec<ChatTurn>,
}

fn map_transport_error(error: reqwest::Error) -> EngineError {
    if error.is_timeout() {
        EngineError::timeout(format!("rule engine request timed out: {error}"))
    } else {
        EngineError::transport(format!("rule engine request failed: {error}"))
    }
}

fn map_status(status: StatusCode, detail: &str) -> EngineError {
    let message = if detail.trim().is_empty() {
        format!("rule engine returned {status}")
    } else {
        format!("rule engine returned {status}: {}", detail.trim())
    };

    match status.as_u16() {
        401 | 403 => EngineError::authentication(message),
        400 | 422 => EngineError::invalid_request(message),
        408 => EngineError::timeout(message),
        429 => EngineError::rate_limited(message),
        500..=599 => EngineError::unavailable(message),
        _ => EngineError::other(message),
    }
}

fn extract_replies(
    request: &RuleEngineRequest,
    envelope: GenerateEnvelope,
) -> Result<Vec<ChatTurn>, EngineError> {
    // The prompt prefix is the prior history plus the new user turn.
    let prefix_len = request.chat_history.len() + 1;
    let replies: Vec<ChatTurn> = envelope
        .chat_history
        .into_iter()
        .skip(prefix_len)
        .collect();

    if replies.is_empty() {
        return Err(EngineError::decode("rule engine returned no assistant turns"));
    }

    Ok(replies)
}
