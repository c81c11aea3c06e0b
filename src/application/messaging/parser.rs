//! Message parser - turns raw text into structured messages

use crate::domain::entities::{Content, Message, MessageType, User};

/// Parses incoming text into structured Message objects.
///
/// Command names are lowercased so `!PING` and `!ping` dispatch the same
/// way. The remainder after the name is kept twice: whitespace-split in
/// `args`, and raw in `rest` with only the ends trimmed, so commands like
/// `!echo` can reproduce the payload exactly as typed.
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Parse a text message
    pub fn parse(
        &self,
        chat_id: impl Into<String>,
        text: impl Into<String>,
        sender: Option<User>,
    ) -> Message {
        let text = text.into();
        let chat_id = chat_id.into();

        if text.starts_with(&self.command_prefix) {
            return self.parse_command(chat_id, text, sender);
        }

        Message::new(chat_id, Content::Text(text))
            .with_message_type(MessageType::Text)
            .with_sender_opt(sender)
    }

    /// Parse a command message
    fn parse_command(&self, chat_id: String, text: String, sender: Option<User>) -> Message {
        let cmd_text = text.trim_start_matches(&self.command_prefix);

        // Split off the name at the first whitespace; the remainder keeps
        // its inner spacing.
        let mut parts = cmd_text.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or("").to_lowercase();
        let rest = parts.next().unwrap_or("").trim().to_string();
        let args: Vec<String> = rest.split_whitespace().map(|s| s.to_string()).collect();

        Message::new(chat_id, Content::Command { name, args, rest })
            .with_message_type(MessageType::Command)
            .with_sender_opt(sender)
    }
}
