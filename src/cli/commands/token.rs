use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;
use serde_json::json;

use crate::auth;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::config;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Sign a token for a customer id")]
    Issue {
        #[arg(long, help = "Customer id to put in the subject")]
        subject: i64,
        #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        expiry_hours: Option<i64>,
    },

    #[command(about = "Check a token and print the customer id it carries")]
    Verify {
        #[arg(help = "Token to verify")]
        token: String,
    },
}

pub fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config();
    config.validate()?;
    let secret = config.security.jwt_secret.as_bytes();

    match cmd {
        TokenCommands::Issue { subject, expiry_hours } => {
            let expires_at = expiry(expiry_hours, config.token_lifetime())?;
            let token = auth::issue(secret, subject, expires_at)?;

            match output_format {
                OutputFormat::Json => output_success(
                    &output_format,
                    "Token issued",
                    Some(json!({ "token": token, "subject": subject, "expires_at": expires_at })),
                ),
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
        TokenCommands::Verify { token } => {
            let subject = auth::verify(&token, secret)?;
            output_success(
                &output_format,
                &format!("Token is valid for customer {}", subject),
                Some(json!({ "subject": subject })),
            )
        }
    }
}

// An explicit hour count wins over the configured lifetime.
fn expiry(expiry_hours: Option<i64>, configured: Duration) -> Result<DateTime<Utc>, auth::TokenError> {
    match expiry_hours {
        Some(hours) => auth::expires_in_hours(hours),
        None => auth::expires_in(configured),
    }
}
