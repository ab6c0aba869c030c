//! CLI command definitions for the `coffeechat` binary.
//!
//! Uses clap derive macros. Every subcommand maps onto one view or action of
//! the chat front-end; `serve` hosts the same views as web pages.

pub mod chat;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use coffeechat_types::chat::ChatId;

/// Keep track of your coffee chats.
#[derive(Parser)]
#[command(name = "coffeechat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a config.toml (defaults to ~/.coffeechat/config.toml).
    #[arg(long, global = true, env = "COFFEECHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all chats.
    #[command(alias = "ls")]
    List,

    /// Show one chat.
    Show {
        /// Chat id.
        id: ChatId,
    },

    /// Record a new chat. Missing fields are prompted for.
    New {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit an existing chat. Missing fields are prompted for, prefilled.
    Edit {
        /// Chat id.
        id: ChatId,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a chat.
    #[command(alias = "rm")]
    Delete {
        /// Chat id.
        id: ChatId,

        /// Skip the confirmation prompt.
        #[arg(long, short)]
        force: bool,
    },

    /// Serve the chat pages over HTTP.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Host address to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Chat fields that may be given up front instead of prompted.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Who the chat was with.
    #[arg(long)]
    pub guest: Option<String>,

    /// Date of the chat (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<String>,

    /// What was talked about.
    #[arg(long)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn delete_alias_and_force() {
        let cli = Cli::try_parse_from(["coffeechat", "rm", "7", "--force"]).unwrap();
        match cli.command {
            Commands::Delete { id, force } => {
                assert_eq!(id, ChatId(7));
                assert!(force);
            }
            _ => panic!("expected delete"),
        }
    }

    #[test]
    fn new_accepts_field_flags() {
        let cli = Cli::try_parse_from([
            "coffeechat", "--json", "new", "--guest", "Ana", "--date", "2024-03-01",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::New { fields } => {
                assert_eq!(fields.guest.as_deref(), Some("Ana"));
                assert_eq!(fields.date.as_deref(), Some("2024-03-01"));
                assert!(fields.notes.is_none());
            }
            _ => panic!("expected new"),
        }
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!(Cli::try_parse_from(["coffeechat", "show", "abc"]).is_err());
    }
}
