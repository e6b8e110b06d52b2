pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "customer")]
#[command(about = "Customer CLI - tokens and account lookups against the customer service")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Issue and verify tokens locally with the configured secret")]
    Token {
        #[command(subcommand)]
        cmd: commands::token::TokenCommands,
    },

    #[command(about = "Exchange email and password for a token")]
    Login {
        #[arg(long, help = "Customer email")]
        email: String,
        #[arg(long, help = "Customer password")]
        password: String,
        #[arg(long, help = "Service base URL")]
        url: Option<String>,
    },

    #[command(about = "Show the profile the token belongs to")]
    Whoami {
        #[arg(long, help = "Token returned by login or registration")]
        token: String,
        #[arg(long, help = "Service base URL")]
        url: Option<String>,
    },

    #[command(about = "List the addresses of the token's customer")]
    Addresses {
        #[arg(long, help = "Token returned by login or registration")]
        token: String,
        #[arg(long, help = "Service base URL")]
        url: Option<String>,
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
        Commands::Token { cmd } => commands::token::handle(cmd, output_format),
        Commands::Login { email, password, url } => {
            commands::session::login(&utils::base_url(url), &email, &password, output_format).await
        }
        Commands::Whoami { token, url } => {
            commands::session::whoami(&utils::base_url(url), &token, output_format).await
        }
        Commands::Addresses { token, url } => {
            commands::session::addresses(&utils::base_url(url), &token, output_format).await
        }
    }
}
