use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{HttpUserFetcher, ListController, UserFetcher, ViewState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, timeout_from_secs, DEFAULT_CONFIG_PATH};
use render::{parse_input, render_view_state, Input};

/// Browse the user directory from the terminal.
///
/// Type text to filter the list, an empty line to clear the filter,
/// `:reload` to fetch again and `:quit` to leave.
#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the API; `users` is appended.
    #[arg(long)]
    base_url: Option<String>,
    /// Initial search query.
    #[arg(long)]
    query: Option<String>,
    /// Request timeout in seconds; 0 disables it.
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Print the first loaded state and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout = timeout_from_secs(secs);
    }
    info!(base_url = %settings.base_url, timeout = ?settings.request_timeout, "starting user directory");

    let fetcher = match settings.request_timeout {
        Some(timeout) => HttpUserFetcher::with_timeout(&settings.base_url, timeout),
        None => HttpUserFetcher::new(&settings.base_url),
    }
    .context("failed to build users fetcher")?;
    let fetcher: Arc<dyn UserFetcher> = Arc::new(fetcher);

    let controller = ListController::new(fetcher).await;
    if let Some(query) = args.query {
        controller.set_search_query(query).await;
    }

    if args.once {
        return print_first_settled(&controller).await;
    }
    run_interactive(&controller).await
}

async fn print_first_settled(controller: &ListController) -> Result<()> {
    let mut states = controller.subscribe_view_state();
    let state = states
        .wait_for(|state| !state.is_loading())
        .await
        .context("view state channel closed")?
        .clone();

    println!("{}", render_view_state(&state, &controller.search_query()));
    if let ViewState::Error(message) = state {
        bail!("failed to load users: {message}");
    }
    Ok(())
}

async fn run_interactive(controller: &Arc<ListController>) -> Result<()> {
    let mut states = controller.subscribe_view_state();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let initial = states.borrow_and_update().clone();
    println!("{}", render_view_state(&initial, &controller.search_query()));

    loop {
        tokio::select! {
            changed = states.changed() => {
                changed.context("view state channel closed")?;
                let state = states.borrow_and_update().clone();
                println!("{}", render_view_state(&state, &controller.search_query()));
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    debug!("stdin closed");
                    return Ok(());
                };
                match parse_input(&line) {
                    Input::Quit => return Ok(()),
                    Input::Reload if controller.view_state().is_loading() => {
                        println!("Already loading users...");
                    }
                    Input::Reload => controller.reload().await,
                    Input::Search(query) => controller.set_search_query(query).await,
                }
            }
        }
    }
}
