//! Bingo Hall console binary
//!
//! Reads `CHAT_ID USER_ID NAME: TEXT` lines from stdin and prints every
//! reply and round notification to stdout as `[chat] text`.

use bingohall::common::config::ConfigLoader;
use bingohall::messaging::ConsoleMessenger;
use bingohall::{HallFactory, Inbound, Messenger};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "bingohall")]
#[command(about = "Chat bingo hall with a console transport", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Database directory (overrides the configuration)
    #[arg(long)]
    data_dir: Option<String>,

    /// Admin user id (overrides the configuration)
    #[arg(long)]
    admin_id: Option<i64>,

    /// Debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loader = match &args.config {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;
    if let Some(dir) = args.data_dir {
        config.storage.data_directory = dir;
    }
    if let Some(admin_id) = args.admin_id {
        config.bot.admin_id = admin_id;
    }

    let level = if args.verbose {
        "debug"
    } else {
        config.monitoring.log_level.as_filter()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| format!("bingohall={}", level).into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let messenger = Arc::new(ConsoleMessenger);
    let bot = HallFactory::create_bot(config, messenger.clone())?;
    info!("🎱 Bingo hall listening on stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(msg) = Inbound::from_console_line(&line) else {
            warn!(line = %line, "Expected 'CHAT_ID USER_ID NAME: TEXT'");
            continue;
        };
        if let Some(reply) = bot.handle(&msg).await {
            messenger.send(msg.chat, &reply).await?;
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}
