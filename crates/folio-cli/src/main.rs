mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::projects::{EditProjectArgs, NewProjectArgs};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio content manager with GitHub-backed publishing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List projects, newest first
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Read the local store only (no remote sync); use while editing
        #[arg(short, long)]
        local: bool,
    },
    /// Show a single project in full
    Show {
        /// Project id
        id: String,
    },
    /// Add a new project to the local store
    Add {
        #[command(flatten)]
        args: NewProjectArgs,
    },
    /// Replace fields of an existing project
    Edit {
        /// Project id
        id: String,
        #[command(flatten)]
        args: EditProjectArgs,
    },
    /// Delete a project from the local store
    Delete {
        /// Project id
        id: String,
    },
    /// List the available project categories
    Categories,
    /// Fetch the remote document and replace the local store
    Refresh,
    /// Publish the local store to the configured GitHub repository
    Publish {
        /// Commit message for the update
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Sync configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Chat with the portfolio assistant
    Chat {
        /// Model to answer with
        #[arg(long)]
        model: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Get a configuration value (token, repo, branch)
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List the sync configuration and store status
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { category, local } => {
            commands::projects::handle_list(category.as_deref(), local).await
        }
        Commands::Show { id } => commands::projects::handle_show(&id),
        Commands::Add { args } => commands::projects::handle_add(args),
        Commands::Edit { id, args } => commands::projects::handle_edit(&id, args),
        Commands::Delete { id } => commands::projects::handle_delete(&id),
        Commands::Categories => commands::projects::handle_categories(),
        Commands::Refresh => commands::sync::handle_refresh().await,
        Commands::Publish { message } => commands::sync::handle_publish(message.as_deref()).await,
        Commands::Config { action } => match action {
            ConfigAction::Get { key } => commands::config::handle_get(&key),
            ConfigAction::Set { key, value } => commands::config::handle_set(&key, &value),
            ConfigAction::List => commands::config::handle_list(),
        },
        Commands::Chat { model } => commands::chat::handle_chat(model.as_deref()).await,
    }
}
