//! Message types for chat requests

use crate::utils::error::{Result, RouterError};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Message role enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageRole {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(RouterError::validation(format!(
                "invalid message role '{}'",
                other
            ))),
        }
    }
}

/// Chat message
///
/// Immutable once constructed: content is validated to be non-empty and the
/// fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    role: MessageRole,
    content: String,
}

impl ChatMessage {
    /// Create a validated message
    pub fn new(role: MessageRole, content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(RouterError::validation(format!(
                "{} message content must not be empty",
                role
            )));
        }
        Ok(Self { role, content })
    }

    /// Create a message from a role string
    pub fn parse(role: &str, content: impl Into<String>) -> Result<Self> {
        Self::new(role.parse()?, content)
    }

    pub fn system(content: impl Into<String>) -> Result<Self> {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Result<Self> {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Result<Self> {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl<'de> Deserialize<'de> for ChatMessage {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawMessage {
            role: String,
            content: String,
        }

        let raw = RawMessage::deserialize(deserializer)?;
        ChatMessage::parse(&raw.role, raw.content).map_err(serde::de::Error::custom)
    }
}
