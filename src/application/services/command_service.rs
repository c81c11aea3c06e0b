use chrono::Local;

use crate::application::errors::CommandError;
use crate::domain::entities::{Command, CommandRegistry, Content, Message};

/// Service for managing and executing commands
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
        }
    }

    pub fn register(&mut self, command: Command) {
        tracing::debug!(
            "Registered command: {}{} - {}",
            self.prefix,
            command.name,
            command.description.as_deref().unwrap_or("")
        );
        self.registry.register(command);
    }

    /// Register the built-in command set: ping, help, time, about, echo.
    pub fn register_defaults(&mut self) {
        let p = self.prefix.clone();

        self.register(
            Command::new("ping")
                .with_description("Check if bot is online")
                .with_handler(|_| Ok(Some("Pong! 🏓".to_string()))),
        );

        let help_text = format!(
            "*Available Commands:*\n\n\
             {p}ping - Check if bot is online\n\
             {p}help - Show this help message\n\
             {p}time - Show current time\n\
             {p}about - About this bot\n\
             {p}echo [text] - Repeat your message"
        );
        self.register(
            Command::new("help")
                .with_description("Show this help message")
                .with_handler(move |_| Ok(Some(help_text.clone()))),
        );

        self.register(
            Command::new("time")
                .with_description("Show current time")
                .with_handler(|_| {
                    let now = Local::now().format("%Y-%m-%d %H:%M:%S");
                    Ok(Some(format!("Current time: {}", now)))
                }),
        );

        self.register(
            Command::new("about")
                .with_description("About this bot")
                .with_handler(|_| {
                    Ok(Some(
                        "*wabot*\nA simple WhatsApp bot written in Rust".to_string(),
                    ))
                }),
        );

        self.register(
            Command::new("echo")
                .with_description("Repeat your message")
                .with_args_allowed()
                .with_handler(|msg| {
                    let Content::Command { rest, .. } = &msg.content else {
                        return Ok(None);
                    };
                    let echoed = rest.trim();
                    if echoed.is_empty() {
                        // Nothing to echo, stay silent.
                        Ok(None)
                    } else {
                        Ok(Some(echoed.to_string()))
                    }
                }),
        );
    }

    /// Dispatch a parsed command message. `Ok(None)` means no reply is due;
    /// an unregistered command name surfaces as `CommandError::NotFound`.
    ///
    /// A known command followed by trailing text is not a match unless the
    /// command accepts a payload, so `!ping extra` gets no reply while
    /// `!echo extra` does.
    pub fn handle(&self, message: &Message) -> Result<Option<String>, CommandError> {
        let Content::Command { name, args, .. } = &message.content else {
            return Ok(None);
        };

        let cmd = self
            .registry
            .find(name)
            .ok_or_else(|| CommandError::NotFound(name.clone()))?;

        if !args.is_empty() && !cmd.accepts_args {
            return Ok(None);
        }

        if let Some(handler) = &cmd.handler {
            handler(message.clone())
        } else {
            Ok(Some(format!("Command {} not implemented", cmd.name)))
        }
    }

    pub fn command_count(&self) -> usize {
        self.registry.all().count()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::messaging::MessageParser;

    fn service() -> CommandService {
        let mut commands = CommandService::new("!");
        commands.register_defaults();
        commands
    }

    fn dispatch(commands: &CommandService, name: &str, args: Vec<&str>) -> Option<String> {
        let msg = Message::from_command(
            "123@s.whatsapp.net",
            name,
            args.into_iter().map(|s| s.to_string()).collect(),
        );
        commands.handle(&msg).unwrap()
    }

    #[test]
    fn registers_the_default_command_set() {
        assert_eq!(service().command_count(), 5);
    }

    #[test]
    fn ping_replies_pong() {
        assert_eq!(dispatch(&service(), "ping", vec![]), Some("Pong! 🏓".to_string()));
    }

    #[test]
    fn ping_with_trailing_text_is_silent() {
        assert_eq!(dispatch(&service(), "ping", vec!["extra"]), None);
    }

    #[test]
    fn help_lists_all_commands() {
        let help = dispatch(&service(), "help", vec![]).unwrap();
        for name in ["!ping", "!help", "!time", "!about", "!echo"] {
            assert!(help.contains(name), "help should mention {}", name);
        }
    }

    #[test]
    fn time_mentions_current_time() {
        let reply = dispatch(&service(), "time", vec![]).unwrap();
        assert!(reply.starts_with("Current time: "));
    }

    #[test]
    fn about_names_the_bot() {
        let reply = dispatch(&service(), "about", vec![]).unwrap();
        assert!(reply.contains("wabot"));
    }

    #[test]
    fn echo_repeats_args_with_case() {
        assert_eq!(
            dispatch(&service(), "echo", vec!["Hello", "World"]),
            Some("Hello World".to_string())
        );
    }

    #[test]
    fn echo_preserves_inner_whitespace() {
        let commands = service();
        let parser = MessageParser::new(commands.prefix());
        let msg = parser.parse("123@s.whatsapp.net", "!echo a   b", None);
        assert_eq!(commands.handle(&msg).unwrap(), Some("a   b".to_string()));
    }

    #[test]
    fn empty_echo_is_silent() {
        assert_eq!(dispatch(&service(), "echo", vec![]), None);
    }

    #[test]
    fn unknown_command_is_not_found() {
        let commands = service();
        let msg = Message::from_command("123@s.whatsapp.net", "frobnicate", vec![]);
        assert!(matches!(
            commands.handle(&msg),
            Err(CommandError::NotFound(name)) if name == "frobnicate"
        ));
    }

    #[test]
    fn non_command_message_yields_no_reply() {
        let commands = service();
        let msg = Message::from_text("123@s.whatsapp.net", "hi");
        assert_eq!(commands.handle(&msg).unwrap(), None);
    }
}
