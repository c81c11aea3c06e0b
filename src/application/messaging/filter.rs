//! Inbound screening - decides which incoming events reach the command layer.
//!
//! The checks run in a fixed order: missing content, status broadcast,
//! own messages, unsupported message types, then the command prefix.
//! Everything that falls through is a command candidate.

/// The status feed pseudo-chat. Messages posted there are never commands.
pub const STATUS_BROADCAST: &str = "status@broadcast";

/// What the platform adapter extracted from a raw message event.
#[derive(Debug, Clone)]
pub struct Inbound {
    /// Chat id (remote JID) the message arrived in.
    pub chat: String,
    /// True when the account's own device sent the message.
    pub from_me: bool,
    pub kind: InboundKind,
}

/// Message payload by wire type. Only the two text-bearing types are
/// processed; everything else is carried as its type name for logging.
#[derive(Debug, Clone)]
pub enum InboundKind {
    Conversation(String),
    ExtendedText(String),
    Unsupported(String),
    Empty,
}

/// Why an inbound event was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoContent,
    StatusBroadcast,
    FromSelf,
    UnsupportedType(String),
    NotACommand,
}

impl SkipReason {
    pub fn as_str(&self) -> &str {
        match self {
            SkipReason::NoContent => "no message content",
            SkipReason::StatusBroadcast => "status message",
            SkipReason::FromSelf => "message from self",
            SkipReason::UnsupportedType(t) => t,
            SkipReason::NotACommand => "not a command",
        }
    }
}

/// Screening outcome: either the command text to dispatch, or a skip reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Process(String),
    Skip(SkipReason),
}

/// Run the screening chain over an inbound event.
pub fn screen(inbound: &Inbound, prefix: &str) -> Verdict {
    let text = match &inbound.kind {
        InboundKind::Empty => return Verdict::Skip(SkipReason::NoContent),
        InboundKind::Unsupported(t) => {
            if inbound.chat == STATUS_BROADCAST {
                return Verdict::Skip(SkipReason::StatusBroadcast);
            }
            if inbound.from_me {
                return Verdict::Skip(SkipReason::FromSelf);
            }
            return Verdict::Skip(SkipReason::UnsupportedType(t.clone()));
        }
        InboundKind::Conversation(t) | InboundKind::ExtendedText(t) => t,
    };

    if inbound.chat == STATUS_BROADCAST {
        return Verdict::Skip(SkipReason::StatusBroadcast);
    }
    if inbound.from_me {
        return Verdict::Skip(SkipReason::FromSelf);
    }
    if text.is_empty() || !text.starts_with(prefix) {
        return Verdict::Skip(SkipReason::NotACommand);
    }

    Verdict::Process(text.clone())
}

impl InboundKind {
    /// Wire type name, for debug logging.
    pub fn type_name(&self) -> &str {
        match self {
            InboundKind::Conversation(_) => "conversation",
            InboundKind::ExtendedText(_) => "extendedTextMessage",
            InboundKind::Unsupported(t) => t,
            InboundKind::Empty => "empty",
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            InboundKind::Conversation(t) | InboundKind::ExtendedText(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound(kind: InboundKind) -> Inbound {
        Inbound {
            chat: "6281234567890@s.whatsapp.net".to_string(),
            from_me: false,
            kind,
        }
    }

    #[test]
    fn command_text_passes() {
        let msg = inbound(InboundKind::Conversation("!ping".to_string()));
        assert_eq!(screen(&msg, "!"), Verdict::Process("!ping".to_string()));
    }

    #[test]
    fn extended_text_passes() {
        let msg = inbound(InboundKind::ExtendedText("!echo hi".to_string()));
        assert_eq!(screen(&msg, "!"), Verdict::Process("!echo hi".to_string()));
    }

    #[test]
    fn plain_text_is_not_a_command() {
        let msg = inbound(InboundKind::Conversation("hello there".to_string()));
        assert_eq!(screen(&msg, "!"), Verdict::Skip(SkipReason::NotACommand));
    }

    #[test]
    fn empty_payload_is_skipped() {
        let msg = inbound(InboundKind::Empty);
        assert_eq!(screen(&msg, "!"), Verdict::Skip(SkipReason::NoContent));
    }

    #[test]
    fn status_broadcast_is_skipped() {
        let mut msg = inbound(InboundKind::Conversation("!ping".to_string()));
        msg.chat = STATUS_BROADCAST.to_string();
        assert_eq!(screen(&msg, "!"), Verdict::Skip(SkipReason::StatusBroadcast));
    }

    #[test]
    fn own_messages_are_skipped() {
        let mut msg = inbound(InboundKind::Conversation("!ping".to_string()));
        msg.from_me = true;
        assert_eq!(screen(&msg, "!"), Verdict::Skip(SkipReason::FromSelf));
    }

    #[test]
    fn unsupported_type_is_skipped_with_its_name() {
        let msg = inbound(InboundKind::Unsupported("imageMessage".to_string()));
        assert_eq!(
            screen(&msg, "!"),
            Verdict::Skip(SkipReason::UnsupportedType("imageMessage".to_string()))
        );
    }

    #[test]
    fn broadcast_wins_over_from_self() {
        let mut msg = inbound(InboundKind::Conversation("!ping".to_string()));
        msg.chat = STATUS_BROADCAST.to_string();
        msg.from_me = true;
        assert_eq!(screen(&msg, "!"), Verdict::Skip(SkipReason::StatusBroadcast));
    }
}
