use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storyline_application::AppContext;
use storyline_infrastructure::StoryPaths;

mod commands;

#[derive(Parser)]
#[command(name = "storyline")]
#[command(about = "Storyline - share and browse stories from the terminal", long_about = None)]
struct Cli {
    /// Directory holding config.toml and session.json (default: ~/.config/storyline)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Client(ClientCommand),
    /// Manage config.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Commands that talk to the story service or the stored session.
#[derive(Subcommand)]
enum ClientCommand {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// List stories (single request, no paging)
    Stories,
    /// Browse the feed page by page
    Feed {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show one story
    Detail { id: String },
    /// Upload a photo story
    Upload {
        photo: PathBuf,
        #[arg(short, long)]
        description: String,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Upload without logging in
        #[arg(long)]
        guest: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "storyline=debug" } else { "storyline=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_context(paths: &StoryPaths, ephemeral: bool) -> Result<AppContext> {
    tracing::debug!(
        "Opening context: data_dir={:?}, ephemeral={}",
        paths.config_dir().ok(),
        ephemeral
    );
    let context = if ephemeral {
        AppContext::ephemeral(paths)?
    } else {
        AppContext::from_paths(paths)?
    };
    Ok(context)
}

async fn run(command: ClientCommand, context: &AppContext) -> Result<()> {
    match command {
        ClientCommand::Register {
            name,
            email,
            password,
        } => commands::account::register(context, &name, &email, &password).await,
        ClientCommand::Login { email, password } => {
            commands::account::login(context, &email, &password).await
        }
        ClientCommand::Logout => commands::account::logout(context).await,
        ClientCommand::Whoami => {
            commands::account::whoami(context).await;
            Ok(())
        }
        ClientCommand::Stories => commands::stories::list(context).await,
        ClientCommand::Feed { pages } => commands::stories::feed(context, pages).await,
        ClientCommand::Detail { id } => commands::stories::detail(context, &id).await,
        ClientCommand::Upload {
            photo,
            description,
            lat,
            lon,
            guest,
        } => commands::stories::upload(context, &photo, description, lat.zip(lon), guest).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = StoryPaths::new(cli.data_dir);

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::config::init(&paths),
            ConfigAction::Show => commands::config::show(&paths),
        },
        Commands::Client(command) => {
            let context = open_context(&paths, cli.ephemeral)?;
            run(command, &context).await
        }
    }
}
