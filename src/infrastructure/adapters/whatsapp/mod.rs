//! WhatsApp adapter - event-handler glue over `whatsapp-rust`.
//!
//! The wire protocol, Noise handshake, Signal encryption and QR pairing
//! handshake all live in the library. This module registers an event
//! handler, screens inbound messages, dispatches commands and replies.
//! Session credentials are persisted by the library's SQLite backend under
//! the configured session directory.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};
use wacore::types::events::Event;
use wacore::types::message::MessageInfo;
use wacore_binary::jid::Jid;
use whatsapp_rust::bot::Bot as WaBot;
use whatsapp_rust::client::Client;
use whatsapp_rust::store::SqliteStore;
use whatsapp_rust::store::traits::Backend;
use whatsapp_rust_tokio_transport::TokioWebSocketTransportFactory;
use whatsapp_rust_ureq_http_client::UreqHttpClient;

use crate::application::errors::{BotError, CommandError};
use crate::application::messaging::{screen, Inbound, InboundKind, MessageParser, Verdict};
use crate::application::services::CommandService;
use crate::domain::entities::User;
use crate::infrastructure::config::Config;
use crate::infrastructure::qr;

/// Best-effort notice sent when a command handler fails.
const ERROR_NOTICE: &str = "⚠️ Sorry, there was an error processing your command.";

/// WhatsApp bot adapter
pub struct WhatsAppAdapter {
    device_name: String,
    session_dir: PathBuf,
    reconnect_delay: Duration,
    /// Set when the session was invalidated from the phone. Stops reconnects.
    logged_out: Arc<AtomicBool>,
}

impl WhatsAppAdapter {
    pub fn new(config: &Config) -> Self {
        let device_name = config
            .adapters
            .whatsapp
            .as_ref()
            .and_then(|wa| wa.device_name.clone())
            .unwrap_or_else(|| "WA Bot".to_string());

        Self {
            device_name,
            session_dir: config.session.directory.clone(),
            reconnect_delay: Duration::from_secs(config.reconnect.delay_seconds),
            logged_out: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run the bot until Ctrl+C or logout, reconnecting when the
    /// connection closes for any other reason.
    pub async fn run(&self, commands: Arc<CommandService>) -> Result<(), BotError> {
        loop {
            let mut bot = self.build_bot(commands.clone()).await?;
            let handle = bot
                .run()
                .await
                .map_err(|e| BotError::Channel(format!("whatsapp run failed: {e}")))?;

            tokio::select! {
                result = handle => {
                    match result {
                        Ok(()) => info!("Connection closed"),
                        Err(e) => error!("Connection closed due to: {}", e),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl+C, shutting down");
                    return Ok(());
                }
            }

            if self.logged_out.load(Ordering::SeqCst) {
                info!("Session logged out, not reconnecting");
                return Ok(());
            }

            info!("Reconnecting in {}s...", self.reconnect_delay.as_secs());
            tokio::time::sleep(self.reconnect_delay).await;
        }
    }

    /// Build a bot instance with the session backend and the event handler.
    async fn build_bot(&self, commands: Arc<CommandService>) -> Result<WaBot, BotError> {
        std::fs::create_dir_all(&self.session_dir)
            .map_err(|e| BotError::Channel(format!("session dir create failed: {e}")))?;
        let db_path = self.session_dir.join("wabot.db");

        info!("WhatsApp bot building (session: {})...", db_path.display());

        let backend = Arc::new(
            SqliteStore::new(&db_path.to_string_lossy())
                .await
                .map_err(|e| BotError::Channel(format!("session store init failed: {e}")))?,
        ) as Arc<dyn Backend>;

        let parser = Arc::new(MessageParser::new(commands.prefix()));
        let logged_out = self.logged_out.clone();

        let bot = WaBot::builder()
            .with_backend(backend)
            .with_transport_factory(TokioWebSocketTransportFactory::new())
            .with_http_client(UreqHttpClient::new())
            .with_runtime(whatsapp_rust::TokioRuntime)
            .with_device_props(
                Some(self.device_name.clone()),
                None,
                Some(waproto::whatsapp::device_props::PlatformType::Chrome),
            )
            .on_event(move |event, client| {
                let commands = commands.clone();
                let parser = parser.clone();
                let logged_out = logged_out.clone();
                async move {
                    match event {
                        Event::PairingQrCode { code, timeout } => {
                            info!(
                                "Scan QR code below to login (valid for {}s):",
                                timeout.as_secs()
                            );
                            match qr::render_terminal(&code) {
                                Ok(rendered) => println!("\n{rendered}"),
                                Err(e) => {
                                    warn!("Could not render QR: {e}");
                                    println!("\n{code}\n");
                                }
                            }
                        }
                        Event::PairSuccess(_) => {
                            info!("Pairing successful");
                        }
                        Event::Connected(_) => {
                            info!("Bot is now connected and ready!");
                        }
                        Event::Disconnected(_) => {
                            warn!("Disconnected from WhatsApp");
                        }
                        Event::LoggedOut(logout) => {
                            error!("Logged out: {:?}", logout.reason);
                            logged_out.store(true, Ordering::SeqCst);
                        }
                        Event::Message(msg, msg_info) => {
                            handle_message(*msg, msg_info, client, &commands, &parser).await;
                        }
                        other => {
                            debug!("Unhandled event: {:?}", other);
                        }
                    }
                }
            })
            .build()
            .await
            .map_err(|e| BotError::Channel(format!("whatsapp bot build failed: {e}")))?;

        Ok(bot)
    }
}

/// Process one incoming message event: screen, parse, dispatch, reply.
async fn handle_message(
    msg: waproto::whatsapp::Message,
    info: MessageInfo,
    client: Arc<Client>,
    commands: &CommandService,
    parser: &MessageParser,
) {
    let inbound = to_inbound(&msg, &info);

    debug!("===== New Message =====");
    debug!("Type: {}", inbound.kind.type_name());
    debug!("Content: {}", inbound.kind.text().unwrap_or(""));
    debug!("From: {}", inbound.chat);

    let text = match screen(&inbound, commands.prefix()) {
        Verdict::Process(text) => text,
        Verdict::Skip(reason) => {
            debug!("Skipping: {}", reason.as_str());
            return;
        }
    };

    let sender =
        User::new(info.source.sender.user.clone()).with_push_name(info.push_name.clone());
    let message = parser.parse(inbound.chat.clone(), text, Some(sender));

    match commands.handle(&message) {
        Ok(Some(reply)) => match send_text(&client, &inbound.chat, &reply).await {
            Ok(_) => {
                let preview: String = reply.chars().take(80).collect();
                info!("Sent: {}", preview);
            }
            Err(e) => error!("Error sending response: {e}"),
        },
        Ok(None) => {}
        Err(CommandError::NotFound(name)) => {
            debug!("Skipping: unknown command {name}");
        }
        Err(e) => {
            error!("Error handling command: {e}");
            // Ignore errors sending the error notice.
            if let Err(send_err) = send_text(&client, &inbound.chat, ERROR_NOTICE).await {
                debug!("Could not deliver error notice: {send_err}");
            }
        }
    }
}

/// Map a raw protocol message to the platform-neutral inbound shape.
fn to_inbound(msg: &waproto::whatsapp::Message, info: &MessageInfo) -> Inbound {
    Inbound {
        chat: info.source.chat.to_string(),
        from_me: info.source.is_from_me,
        kind: classify(msg),
    }
}

/// Extract the inbound kind from a protocol message.
///
/// Wrapped payloads (device-sent, ephemeral) are unwrapped first so a text
/// sent from the paired phone still dispatches.
fn classify(msg: &waproto::whatsapp::Message) -> InboundKind {
    let inner = msg
        .device_sent_message
        .as_ref()
        .and_then(|d| d.message.as_deref())
        .or_else(|| {
            msg.ephemeral_message
                .as_ref()
                .and_then(|e| e.message.as_deref())
        })
        .unwrap_or(msg);

    if let Some(text) = inner.conversation.as_deref() {
        InboundKind::Conversation(text.to_string())
    } else if let Some(text) = inner
        .extended_text_message
        .as_ref()
        .and_then(|e| e.text.as_deref())
    {
        InboundKind::ExtendedText(text.to_string())
    } else {
        match unsupported_type_name(inner) {
            Some(name) => InboundKind::Unsupported(name.to_string()),
            None => InboundKind::Empty,
        }
    }
}

/// Wire type name of a non-text message, for skip logging.
fn unsupported_type_name(msg: &waproto::whatsapp::Message) -> Option<&'static str> {
    if msg.image_message.is_some() {
        Some("imageMessage")
    } else if msg.video_message.is_some() {
        Some("videoMessage")
    } else if msg.audio_message.is_some() {
        Some("audioMessage")
    } else if msg.document_message.is_some() {
        Some("documentMessage")
    } else if msg.sticker_message.is_some() {
        Some("stickerMessage")
    } else if msg.location_message.is_some() {
        Some("locationMessage")
    } else if msg.contact_message.is_some() {
        Some("contactMessage")
    } else if msg.reaction_message.is_some() {
        Some("reactionMessage")
    } else if msg.protocol_message.is_some() {
        Some("protocolMessage")
    } else {
        None
    }
}

/// Send a plain text message to a JID string (phone@s.whatsapp.net).
async fn send_text(client: &Client, chat: &str, text: &str) -> Result<String, BotError> {
    let jid: Jid = chat
        .parse()
        .map_err(|e| BotError::Channel(format!("invalid JID '{chat}': {e}")))?;

    let outgoing = waproto::whatsapp::Message {
        conversation: Some(text.to_string()),
        ..Default::default()
    };

    client
        .send_message(jid, outgoing)
        .await
        .map_err(|e| BotError::Channel(format!("send failed: {e}")))
}
