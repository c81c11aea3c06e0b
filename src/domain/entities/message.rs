use super::User;
use chrono::{DateTime, Utc};

/// Type of message content as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    Text,
    Command,
}

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Command {
        name: String,
        args: Vec<String>,
        /// Raw text after the command name, ends trimmed but inner
        /// whitespace preserved (`!echo a   b` echoes `a   b`).
        rest: String,
    },
}

impl Content {
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Content::Command { .. })
    }
}

/// An incoming or outgoing chat message.
///
/// `chat_id` is the conversation the message belongs to - for WhatsApp that
/// is the remote JID, and replies go back to the same id.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender: Option<User>,
    pub content: Content,
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, content: Content) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            sender: None,
            content,
            message_type: MessageType::Text,
            timestamp: Utc::now(),
        }
    }

    pub fn from_text(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(chat_id, Content::Text(text.into()))
    }

    pub fn from_command(
        chat_id: impl Into<String>,
        name: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        let rest = args.join(" ");
        let mut msg = Self::new(
            chat_id,
            Content::Command {
                name: name.into(),
                args,
                rest,
            },
        );
        msg.message_type = MessageType::Command;
        msg
    }

    pub fn with_sender_opt(mut self, user: Option<User>) -> Self {
        if let Some(u) = user {
            self.sender = Some(u);
        }
        self
    }

    pub fn with_message_type(mut self, mt: MessageType) -> Self {
        self.message_type = mt;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_command_sets_type() {
        let msg = Message::from_command("123@s.whatsapp.net", "ping", vec![]);
        assert_eq!(msg.message_type, MessageType::Command);
        assert!(msg.content.is_command());
    }

    #[test]
    fn from_command_rebuilds_rest_from_args() {
        let msg = Message::from_command(
            "123@s.whatsapp.net",
            "echo",
            vec!["a".to_string(), "b".to_string()],
        );
        let Content::Command { rest, .. } = &msg.content else {
            panic!("expected command content");
        };
        assert_eq!(rest, "a b");
    }

    #[test]
    fn text_accessor() {
        let msg = Message::from_text("123@s.whatsapp.net", "hello");
        assert_eq!(msg.content.text(), Some("hello"));
        assert!(!msg.content.is_command());
    }
}
