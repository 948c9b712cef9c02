pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::HttpApiClient;
use crate::config::AppConfig;
use crate::loading::LoadingTracker;
use crate::session::{FileTokenStore, TokenStore};

#[derive(Parser)]
#[command(name = "projcart")]
#[command(about = "Projcart CLI - browse and manage showcased projects")]
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
    #[command(about = "Login, logout and OAuth session capture")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Browse the public project directory")]
    Projects {
        #[command(subcommand)]
        cmd: commands::projects::ProjectsCommands,
    },

    #[command(about = "Manage your own projects")]
    Dashboard {
        #[command(subcommand)]
        cmd: commands::dashboard::DashboardCommands,
    },

    #[command(about = "Show and edit your profile")]
    Profile {
        #[command(subcommand)]
        cmd: commands::profile::ProfileCommands,
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

/// Shared handles every command needs
pub struct Context {
    pub config: &'static AppConfig,
    pub tokens: Arc<dyn TokenStore>,
    pub api: HttpApiClient,
    pub loading: LoadingTracker,
    pub output: OutputFormat,
}

impl Context {
    pub fn new(output: OutputFormat) -> anyhow::Result<Self> {
        let config = crate::config::config();
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::from_config()?);
        let api = HttpApiClient::from_config(config, Arc::clone(&tokens))?;
        Ok(Self {
            config,
            tokens,
            api,
            loading: LoadingTracker::new(),
            output,
        })
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::new(OutputFormat::from_cli(&cli))?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx).await,
        Commands::Projects { cmd } => commands::projects::handle(cmd, &ctx).await,
        Commands::Dashboard { cmd } => commands::dashboard::handle(cmd, &ctx).await,
        Commands::Profile { cmd } => commands::profile::handle(cmd, &ctx).await,
    }
}
