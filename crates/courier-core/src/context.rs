//! Runtime turn context.
//!
//! A [`TurnContext`] is the snapshot of one inbound turn that policy
//! predicates match against. It is assembled by the messaging layer,
//! passed to resolution, and discarded. Every attribute is optional:
//! a platform may not know the sender's phone number, a direct chat has
//! no group id, and so on.

use serde::{Deserialize, Serialize};

/// The kind of conversation a turn belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    /// One-on-one conversation.
    Direct,
    /// Multi-member group conversation.
    Group,
    /// Broadcast channel.
    Channel,
}

impl ChatType {
    /// Lowercase wire name, as used in predicate comparison.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Group => "group",
            Self::Channel => "channel",
        }
    }
}

impl std::fmt::Display for ChatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the current turn's runtime metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TurnContext {
    /// Conversation kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_type: Option<ChatType>,
    /// Channel name (e.g. `telegram`, `whatsapp`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Platform-native sender id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    /// Sender phone number in E.164 form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_e164: Option<String>,
    /// Sender username or handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_username: Option<String>,
    /// Group id for group conversations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Channel the group is bound to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_channel: Option<String>,
    /// Whether the sender is the agent's owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_is_owner: Option<bool>,
    /// Whether this turn runs inside a subagent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subagent: Option<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_type_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ChatType::Group).unwrap(), json!("group"));
        assert_eq!(ChatType::Direct.to_string(), "direct");
        assert_eq!(ChatType::Channel.as_str(), "channel");
    }

    #[test]
    fn default_context_is_all_absent() {
        let ctx = TurnContext::default();
        assert_eq!(serde_json::to_value(&ctx).unwrap(), json!({}));
    }

    #[test]
    fn context_serde_camel_case() {
        let ctx = TurnContext {
            chat_type: Some(ChatType::Group),
            sender_e164: Some("+15551234567".into()),
            sender_is_owner: Some(true),
            ..TurnContext::default()
        };
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["chatType"], "group");
        assert_eq!(json["senderE164"], "+15551234567");
        assert_eq!(json["senderIsOwner"], true);
    }

    #[test]
    fn context_deserializes_partial_json() {
        let ctx: TurnContext =
            serde_json::from_value(json!({"channel": "telegram"})).unwrap();
        assert_eq!(ctx.channel.as_deref(), Some("telegram"));
        assert!(ctx.chat_type.is_none());
    }
}
