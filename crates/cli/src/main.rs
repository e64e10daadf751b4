mod app;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use legalguard_core::{CaseType, Settings, Urgency};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::commands::{ChatAction, ThemeAction};

#[derive(Parser)]
#[command(name = "legalguard")]
#[command(about = "Legal-aid assistant with local and cloud case history", long_about = None)]
struct Cli {
    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a legal situation and record the report.
    Analyze {
        /// Case type, e.g. false-case, property, cyber-crime, police, other.
        #[arg(short, long, default_value = "false-case")]
        category: CaseType,
        #[arg(short, long, default_value = "medium")]
        urgency: Urgency,
        description: String,
    },
    /// Show saved reports and chat sessions.
    History,
    DeleteReport {
        id: String,
        /// The report lives in the cloud, not on this device.
        #[arg(long)]
        cloud: bool,
    },
    /// Forget every report stored on this device.
    ClearLocal,
    /// Ask a question in the active chat.
    Ask { question: String },
    Chat {
        #[command(subcommand)]
        action: ChatAction,
    },
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    Signup {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    Logout,
    Whoami,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = App::new(Settings::from_env())?;
    let json = cli.json;

    match cli.command {
        Commands::Analyze { category, urgency, description } => {
            commands::cases::run_analyze(&app, category, urgency, description, json).await?;
        },
        Commands::History => commands::cases::run_history(&app, json).await?,
        Commands::DeleteReport { id, cloud } => {
            commands::cases::run_delete_report(&app, &id, cloud, json).await?;
        },
        Commands::ClearLocal => commands::cases::run_clear_local(&app).await?,
        Commands::Ask { question } => commands::chat::run_ask(&app, &question, json).await?,
        Commands::Chat { action } => commands::chat::run_chat(&app, action, json).await?,
        Commands::Theme { action } => commands::theme::run_theme(&app, action)?,
        Commands::Login { email, password } => {
            commands::account::run_login(&app, &email, &password).await?;
        },
        Commands::Signup { email, password } => {
            commands::account::run_signup(&app, &email, &password).await?;
        },
        Commands::Logout => commands::account::run_logout(&app).await?,
        Commands::Whoami => commands::account::run_whoami(&app, json).await?,
    }

    Ok(())
}
