//! Small convenience constructors for common types.

use crate::{ChatTurn, IntegrationId, Role, RuleEngineRequest};

pub fn user_turn(content: impl Into<String>) -> ChatTurn {
    ChatTurn::new(Role::User, content)
}

pub fn assistant_turn(content: impl Into<String>) -> ChatTurn {
    ChatTurn::new(Role::Assistant, content)
}

pub fn draft_request(
    user_prompt: impl Into<String>,
    integration_id: IntegrationId,
) -> RuleEngineRequest {
    RuleEngineRequest::new(user_prompt, integration_id)
}

pub fn parse_role(value: &str) -> Option<Role> {
    match value.trim().to_ascii_lowercase().as_str() {
        "user" => Some(Role::User),
        "assistant" | "ai" | "agent" => Some(Role::Assistant),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::{IntegrationId, Role};

    use super::{assistant_turn, draft_request, parse_role, user_turn};

    #[test]
    fn parse_role_supports_aliases() {
        assert_eq!(parse_role("user"), Some(Role::User));
        assert_eq!(parse_role("Assistant"), Some(Role::Assistant));
        assert_eq!(parse_role("agent"), Some(Role::Assistant));
        assert_eq!(parse_role("system"), None);
    }

    #[test]
    fn turn_and_request_helpers_apply_expected_defaults() {
        let turn = user_turn("hello");
        assert_eq!(turn.role, Role::User);

        let reply = assistant_turn("Here is your rule...");
        assert_eq!(reply.role, Role::Assistant);

        let request = draft_request("Create a discount rule", IntegrationId::new(3));
        assert!(request.chat_history.is_empty());
        assert_eq!(request.integration_id, IntegrationId::new(3));
        assert!(!request.is_generated);
    }
}
