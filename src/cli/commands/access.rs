use clap::Subcommand;
use serde_json::json;
use url::Url;

use crate::access::{AccessChecker, ProxyAccessChecker};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum AccessCommands {
    #[command(about = "Ask a running service whether a user may open a page")]
    Check {
        #[arg(long, default_value = "http://localhost:3000", help = "Origin of the running service")]
        origin: String,
        #[arg(long, help = "User id (_id)")]
        user_id: String,
        #[arg(long, help = "Page path, e.g. /chat/123")]
        path: String,
    },
}

pub async fn handle(cmd: AccessCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AccessCommands::Check { origin, user_id, path } => {
            let origin = Url::parse(&origin)?;
            let checker = ProxyAccessChecker::new(&config::config().gate)?;

            // Same decision rule as the page gate: errors deny.
            let (allowed, reason) = match checker.check_access(&origin, &user_id, &path).await {
                Ok(allowed) => (allowed, None),
                Err(e) => (false, Some(e.to_string())),
            };

            let message = if allowed { "Access granted" } else { "Access denied" };
            output_success(
                &output_format,
                message,
                Some(json!({ "user_id": user_id, "path": path, "has_access": allowed, "error": reason })),
            )
        }
    }
}
