// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chatdesk - terminal client for a conversational support backend.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod history;
mod shell;
mod status;
mod sync;

use std::path::PathBuf;
use std::sync::Arc;

use chatdesk_client::HttpBackend;
use chatdesk_config::model::ChatdeskConfig;
use chatdesk_core::{ChatdeskError, ConversationId};
use clap::{Parser, Subcommand};

/// Chatdesk - terminal client for a conversational support backend.
#[derive(Parser, Debug)]
#[command(name = "chatdesk", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat with the support assistant (default).
    Shell,
    /// Probe the backend health endpoint.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Sync stored conversations to the task board and print the summary.
    Sync {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the backend's stored transcript of a conversation.
    History {
        /// Conversation id returned by the chat endpoint.
        conversation_id: String,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => chatdesk_config::load_and_validate_path(path),
        None => chatdesk_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            chatdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.shell.log_level);

    if let Err(e) = run(cli.command.unwrap_or(Commands::Shell), config).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: ChatdeskConfig) -> Result<(), ChatdeskError> {
    let backend = Arc::new(HttpBackend::new(&config.backend)?);

    match command {
        Commands::Shell => shell::run_shell(config, backend).await,
        Commands::Status { json, plain } => status::run_status(backend.as_ref(), json, plain).await,
        Commands::Sync { json } => sync::run_sync(backend.as_ref(), json).await,
        Commands::History {
            conversation_id,
            json,
        } => {
            history::run_history(
                backend.as_ref(),
                &ConversationId(conversation_id),
                json,
                config.shell.strip_sources,
            )
            .await
        }
    }
}

/// Installs the global subscriber. Logs go to stderr so the chat on stdout stays clean.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chatdesk={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the stats epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["chatdesk"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["chatdesk", "status", "--json", "--config", "/tmp/c.toml"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::Status {
                json: true,
                plain: false
            })
        ));
    }

    #[test]
    fn history_requires_conversation_id() {
        assert!(Cli::try_parse_from(["chatdesk", "history"]).is_err());
        let cli = Cli::try_parse_from(["chatdesk", "history", "abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::History { ref conversation_id, json: false }) if conversation_id == "abc"
        ));
    }
}
