//! Wire-level chat turn and rule-generation request types.
//!
//! ```rust
//! use rwengine::{EngineErrorKind, IntegrationId, RuleEngineRequest};
//!
//! let ok = RuleEngineRequest::new_validated(
//!     "Turn the hallway light on above 30 lux",
//!     IntegrationId::new(0),
//! );
//! assert!(ok.is_ok());
//!
//! let err = RuleEngineRequest::new_validated("   ", IntegrationId::new(0))
//!     .err()
//!     .expect("blank prompt should fail");
//! assert_eq!(err.kind, EngineErrorKind::InvalidRequest);
//! ```

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        };

        f.write_str(role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Identifier of the platform integration a rule chain is generated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntegrationId(i64);

impl IntegrationId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl Display for IntegrationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for IntegrationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// One rule-generation round trip. `chat_history` carries the turns that
/// preceded `user_prompt`; the prompt itself is not part of the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEngineRequest {
    pub user_prompt: String,
    pub chat_history: Vec<ChatTurn>,
    pub integration_id: IntegrationId,
    pub is_generated: bool,
}

impl RuleEngineRequest {
    pub fn builder(user_prompt: impl Into<String>) -> RuleEngineRequestBuilder {
        RuleEngineRequestBuilder::new(user_prompt)
    }

    pub fn new(user_prompt: impl Into<String>, integration_id: IntegrationId) -> Self {
        Self {
            user_prompt: user_prompt.into(),
            chat_history: Vec::new(),
            integration_id,
            is_generated: false,
        }
    }

    pub fn new_validated(
        user_prompt: impl Into<String>,
        integration_id: IntegrationId,
    ) -> Result<Self, EngineError> {
        let request = Self::new(user_prompt, integration_id);
        request.validate()?;
        Ok(request)
    }

    pub fn with_chat_history(mut self, chat_history: Vec<ChatTurn>) -> Self {
        self.chat_history = chat_history;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.user_prompt.trim().is_empty() {
            return Err(EngineError::invalid_request("user_prompt must not be blank"));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEngineRequestBuilder {
    user_prompt: String,
    chat_history: Vec<ChatTurn>,
    integration_id: IntegrationId,
    is_generated: bool,
}

impl RuleEngineRequestBuilder {
    pub fn new(user_prompt: impl Into<String>) -> Self {
        Self {
            user_prompt: user_prompt.into(),
            chat_history: Vec::new(),
            integration_id: IntegrationId::new(0),
            is_generated: false,
        }
    }

    pub fn history_turn(mut self, turn: ChatTurn) -> Self {
        self.chat_history.push(turn);
        self
    }

    pub fn chat_history(mut self, chat_history: Vec<ChatTurn>) -> Self {
        self.chat_history.extend(chat_history);
        self
    }

    pub fn integration_id(mut self, integration_id: IntegrationId) -> Self {
        self.integration_id = integration_id;
        self
    }

    pub fn build(self) -> Result<RuleEngineRequest, EngineError> {
        let request = RuleEngineRequest {
            user_prompt: self.user_prompt,
            chat_history: self.chat_history,
            integration_id: self.integration_id,
            is_generated: self.is_generated,
        };

        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatTurn, IntegrationId, Role, RuleEngineRequest};
    use crate::EngineErrorKind;

    #[test]
    fn builder_collects_history_in_order() {
        let request = RuleEngineRequest::builder("and turn it off at night")
            .history_turn(ChatTurn::new(Role::User, "create a light rule"))
            .history_turn(ChatTurn::new(Role::Assistant, "Rule Chain is generated"))
            .integration_id(IntegrationId::new(7))
            .build()
            .expect("request should validate");

        assert_eq!(request.chat_history.len(), 2);
        assert_eq!(request.chat_history[0].role, Role::User);
        assert_eq!(request.chat_history[1].role, Role::Assistant);
        assert_eq!(request.integration_id.value(), 7);
        assert!(!request.is_generated);
    }

    #[test]
    fn validate_rejects_blank_prompt() {
        let error = RuleEngineRequest::new("  \t ", IntegrationId::new(0))
            .validate()
            .expect_err("blank prompt should fail");

        assert_eq!(error.kind, EngineErrorKind::InvalidRequest);
    }

    #[test]
    fn request_serializes_with_wire_field_names_and_lowercase_roles() {
        let request = RuleEngineRequest::new("create a discount rule", IntegrationId::new(0))
            .with_chat_history(vec![ChatTurn::new(Role::Assistant, "How can I help?")]);

        let value = serde_json::to_value(&request).expect("request should serialize");

        assert_eq!(value["user_prompt"], "create a discount rule");
        assert_eq!(value["integration_id"], 0);
        assert_eq!(value["is_generated"], false);
        assert_eq!(value["chat_history"][0]["role"], "assistant");
        assert_eq!(value["chat_history"][0]["content"], "How can I help?");
    }

    #[test]
    fn turn_round_trips_through_json() {
        let turn = ChatTurn::new(Role::User, "hello");
        let json = serde_json::to_string(&turn).expect("turn should serialize");
        let back: ChatTurn = serde_json::from_str(&json).expect("turn should deserialize");

        assert_eq!(back, turn);
    }
}
