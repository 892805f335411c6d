//! todos - manage a remote todo list from the terminal.
//!
//! Every invocation loads the list, performs one intent through the list
//! controller, and prints the resulting view.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use todos_core::{
    ControllerError, EditOutcome, Filter, HttpTodoApi, TodoApi, TodoClient, TodoController, TodoId,
};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod transport;

use config::Config;
use transport::ReqwestTransport;

/// todos - manage a remote todo list
#[derive(Parser, Debug)]
#[command(name = "todos")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the list
    #[command(alias = "ls")]
    List {
        /// all, active or completed
        #[arg(long, conflicts_with = "route")]
        filter: Option<Filter>,

        /// Filter by location hash, e.g. "#/active"
        #[arg(long)]
        route: Option<String>,
    },

    /// Add a todo
    Add { title: String },

    /// Flip one todo between active and completed
    Toggle { id: TodoId },

    /// Change a todo's title; an empty title deletes it
    Rename { id: TodoId, title: String },

    /// Delete a todo
    #[command(alias = "rm")]
    Delete { id: TodoId },

    /// Complete every active todo, or reopen all if everything is done
    ToggleAll,

    /// Delete every completed todo
    ClearCompleted,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    cli.config.validate()?;

    let transport =
        ReqwestTransport::new(cli.config.timeout()).context("failed to build HTTP client")?;
    let client = TodoClient::new(&cli.config.base_url, cli.config.user_id);
    let controller = TodoController::new(HttpTodoApi::new(client, transport), cli.config.user_id);

    controller.load().await;
    let loaded = controller.view().notification.is_none();

    let result = dispatch(&controller, cli.command).await;
    print!("{}", render::render(&controller.view()));

    match result {
        Ok(()) if loaded => Ok(ExitCode::SUCCESS),
        Ok(()) => Ok(ExitCode::FAILURE),
        Err(err) => {
            eprintln!("error: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn dispatch<A: TodoApi>(
    controller: &TodoController<A>,
    command: Command,
) -> Result<(), ControllerError> {
    match command {
        Command::List { filter, route } => {
            let filter = match (filter, route) {
                (Some(filter), _) => filter,
                (None, Some(route)) => Filter::from_route(&route),
                (None, None) => Filter::All,
            };
            controller.set_filter(filter);
        }
        Command::Add { title } => {
            let todo = controller.add(&title).await?;
            info!(id = todo.id, "added");
        }
        Command::Toggle { id } => {
            controller.toggle(id).await?;
        }
        Command::Rename { id, title } => match controller.rename(id, &title).await? {
            EditOutcome::Unchanged => info!(id, "title unchanged"),
            EditOutcome::Renamed(_) => info!(id, "renamed"),
            EditOutcome::Deleted => info!(id, "empty title, deleted"),
        },
        Command::Delete { id } => {
            controller.delete(id).await?;
        }
        Command::ToggleAll => {
            let report = controller.toggle_all().await;
            info!(updated = report.updated.len(), "toggled");
            if let Some(err) = report.failed.into_iter().next() {
                return Err(err);
            }
        }
        Command::ClearCompleted => {
            controller.clear_completed().await?;
        }
    }
    Ok(())
}
