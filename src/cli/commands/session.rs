use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config;
use crate::session::{session_cookie, JwtSessionStore, SessionUser};

#[derive(Subcommand)]
pub enum SessionCommands {
    #[command(about = "Sign a session cookie for a user (uses SESSION_SECRET)")]
    Mint {
        #[arg(long, help = "User id (_id)")]
        user_id: String,
        #[arg(long, help = "Role code, e.g. USER or ADMIN")]
        role: Option<String>,
        #[arg(long, help = "Email address")]
        email: Option<String>,
        #[arg(long, help = "Company id")]
        company_id: Option<String>,
    },

    #[command(about = "Verify a session token and print its user")]
    Decode {
        #[arg(help = "Session token (value of the session cookie)")]
        token: String,
    },
}

pub async fn handle(cmd: SessionCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config::config();
    let store = JwtSessionStore::new(config.session.clone());

    match cmd {
        SessionCommands::Mint {
            user_id,
            role,
            email,
            company_id,
        } => {
            let user = SessionUser {
                id: Some(user_id),
                email,
                company_id,
                role_code: role,
            };
            let token = store.issue(user)?;
            let cookie = session_cookie(&token, store.config(), config.security.require_https);

            output_success(
                &output_format,
                "Session minted",
                Some(json!({ "token": token, "set_cookie": cookie.to_string() })),
            )
        }
        SessionCommands::Decode { token } => match store.decode(&token) {
            Ok(session) => output_success(&output_format, "Session is valid", Some(json!({ "user": session.user }))),
            Err(e) => {
                output_error(&output_format, &e.to_string(), Some("INVALID_SESSION"))?;
                anyhow::bail!("session token rejected")
            }
        },
    }
}
