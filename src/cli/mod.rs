pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "weam")]
#[command(about = "Weam CLI - operator tools for the editor session gate")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint and inspect session cookies")]
    Session {
        #[command(subcommand)]
        cmd: commands::session::SessionCommands,
    },

    #[command(about = "Run access checks against a running service")]
    Access {
        #[command(subcommand)]
        cmd: commands::access::AccessCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Session { cmd } => commands::session::handle(cmd, output_format).await,
        Commands::Access { cmd } => commands::access::handle(cmd, output_format).await,
    }
}
