mod chat;
mod profile;
mod research;
mod script;
mod style;

use clap::{Parser, Subcommand};
use scriptos_core::Language;
use scriptos_studio::Studio;
use tracing_subscriber::EnvFilter;

use crate::profile::{FlowCommands, ProfileCommands};
use crate::research::ThumbnailCommands;
use crate::script::ScriptCommands;
use crate::style::StyleCommands;

#[derive(Debug, Parser)]
#[command(name = "scriptos")]
#[command(about = "ScriptOS content studio command line interface")]
struct Cli {
    /// Output language for generated content (pt-br or en-us); overrides `SCRIPTOS_LANGUAGE`
    #[arg(long, global = true)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a channel by handle, URL, id or name and show its recent uploads
    Channel { identifier: String },
    /// Show one video by URL or id, with its viral velocity
    Video { reference: String },
    /// Search videos by relevance
    Search { query: String },
    /// Web-grounded trend synthesis plus matching videos
    Trends { query: String },
    /// Style DNA profiles
    Style {
        #[command(subcommand)]
        command: StyleCommands,
    },
    /// Generate title variants for a topic
    Titles { topic: String },
    /// Thumbnail concept and rendering
    Thumbnail {
        #[command(subcommand)]
        command: ThumbnailCommands,
    },
    /// Script wizard and production board
    Script {
        #[command(subcommand)]
        command: ScriptCommands,
    },
    /// Creator profile and channel identity
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Talk to the co-pilot (reads lines from stdin)
    Chat,
    /// Stored automation flows
    Flow {
        #[command(subcommand)]
        command: FlowCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("scriptos ready; run `scriptos --help` for commands");
        return Ok(());
    };

    let config = scriptos_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let studio = Studio::from_config(&config)?
        .with_language(cli.lang.unwrap_or(config.language));

    match command {
        Commands::Channel { identifier } => research::run_channel(&studio, &identifier).await,
        Commands::Video { reference } => research::run_video(&studio, &reference).await,
        Commands::Search { query } => research::run_search(&studio, &query).await,
        Commands::Trends { query } => research::run_trends(&studio, &query).await,
        Commands::Style { command } => style::run(&studio, command).await,
        Commands::Titles { topic } => research::run_titles(&studio, &topic).await,
        Commands::Thumbnail { command } => research::run_thumbnail(&studio, command).await,
        Commands::Script { command } => script::run(&studio, command).await,
        Commands::Profile { command } => {
            let token = config.youtube_access_token.as_deref();
            profile::run_profile(&studio, command, token).await
        }
        Commands::Chat => chat::run_chat(&studio).await,
        Commands::Flow { command } => profile::run_flow(&studio, command),
    }
}

/// Shortens `text` to `max` characters, marking the cut with `...`.
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}
