//! Manual testing harness for the data-item API.
//!
//! One-shot subcommands cover each CRUD operation; `shell` opens an
//! interactive session hosting all four forms with the refresh bus and the
//! auto-refresh poller wired up.

mod api;
mod commands;
mod poller;
mod shell;
mod transport;

use clap::{Parser, Subcommand};

use crate::api::Api;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to set up HTTP transport: {0}")]
    Transport(#[from] transport::TransportError),
    #[error("terminal input failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "item-cli", about = "Manual testing harness for the data-item API")]
struct Cli {
    /// API base URL.
    #[arg(long, env = "API_BASE_URL", default_value = "http://localhost:3001/api")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new item.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        value: f64,
    },
    /// List the whole collection.
    List,
    /// Fetch a single item by id.
    Get { id: i64 },
    /// Fetch an item, apply the given edits and submit them.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        value: Option<f64>,
    },
    /// Look an item up, confirm, and delete it.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Interactive session with all four forms.
    Shell,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let api = Api::new(&cli.base_url)?;

    let ok = match cli.command {
        Command::Create {
            name,
            description,
            value,
        } => commands::create(&api, &name, &description, value).await,
        Command::List => commands::list(&api).await,
        Command::Get { id } => commands::get(&api, id).await,
        Command::Update {
            id,
            name,
            description,
            value,
        } => {
            commands::update(
                &api,
                id,
                name.as_deref(),
                description.as_deref(),
                value,
            )
            .await
        }
        Command::Delete { id, yes } => commands::delete(&api, id, yes).await,
        Command::Shell => {
            shell::run(api).await?;
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
