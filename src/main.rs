use std::sync::Arc;

use clap::{Parser, Subcommand};

mod application;
mod domain;
mod infrastructure;

use application::messaging::{screen, Inbound, InboundKind, MessageParser, Verdict};
use application::services::CommandService;
use domain::traits::Bot;
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::adapters::whatsapp::WhatsAppAdapter;
use infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "wabot")]
#[command(about = "A minimal WhatsApp command bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.config);
        }
        Commands::Version => {
            println!("wabot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config(&cli.config);
        }
    }
}

fn run_bot(config_path: String) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    tracing::info!("Starting WhatsApp bot: {}", config.bot.name);

    // Initialize command service
    let mut commands = CommandService::new(&config.bot.prefix);
    commands.register_defaults();
    tracing::info!("Command table ready ({} commands)", commands.command_count());
    let commands = Arc::new(commands);

    let console_only = config
        .adapters
        .console
        .as_ref()
        .map(|c| c.enabled)
        .unwrap_or(false);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {}", e);
            return;
        }
    };

    if console_only {
        // Run console bot (dev mode)
        rt.block_on(async {
            run_console_bot(&config, commands).await;
        });
    } else {
        rt.block_on(async {
            let adapter = WhatsAppAdapter::new(&config);
            if let Err(e) = adapter.run(commands).await {
                tracing::error!("Error in main loop: {}", e);
            }
        });
    }
}

async fn run_console_bot(config: &Config, commands: Arc<CommandService>) {
    let bot = ConsoleAdapter::new(&config.bot.name);
    let parser = MessageParser::new(commands.prefix());

    tracing::info!(
        "Console bot started: {} (dev mode), prefix: {}",
        bot.bot_info().name,
        commands.prefix()
    );

    while let Some(line) = bot.read_line("> ") {
        let inbound = Inbound {
            chat: "console".to_string(),
            from_me: false,
            kind: InboundKind::Conversation(line),
        };

        let text = match screen(&inbound, commands.prefix()) {
            Verdict::Process(text) => text,
            Verdict::Skip(reason) => {
                tracing::debug!("Skipping: {}", reason.as_str());
                continue;
            }
        };

        let message = parser.parse("console", text, None);
        match commands.handle(&message) {
            Ok(Some(reply)) => {
                if let Err(e) = bot.send_message("console", &reply).await {
                    tracing::error!("Failed to send message: {}", e);
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!("Skipping: {}", e);
            }
        }
    }

    tracing::info!("Console bot stopped");
}

fn init_config(path: &str) {
    if std::path::Path::new(path).exists() {
        println!("Config already exists: {}", path);
        return;
    }

    match Config::default().save(path) {
        Ok(()) => println!("Generated default config: {}", path),
        Err(e) => eprintln!("Failed to write config: {}", e),
    }
}
