// Main entry point - Dependency injection and terminal loop
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::sync_service;
use crate::infrastructure::config::load_api_config;
use crate::infrastructure::http_repository::HttpProgressRepository;
use crate::presentation::render::render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let api_config = load_api_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpProgressRepository::new(&api_config.api)?);

    // Spawn the sync core (application layer)
    let poll_interval = Duration::from_secs(api_config.api.poll_interval_secs);
    let sync = sync_service::spawn(repository, poll_interval);

    println!("progress dashboard ({})", api_config.api.base_url);
    println!("type a worldId to switch units, q to quit");

    // Render loop: re-render on every state change, read selection
    // commands from stdin.
    let mut state_rx = sync.state();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", render(&state_rx.borrow().clone()));
    loop {
        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                print!("{}", render(&state));
            }

            line = lines.next_line() => match line? {
                Some(line) => {
                    let input = line.trim();
                    if input == "q" {
                        break;
                    }
                    if !input.is_empty() {
                        sync.set_selection(input).await;
                    }
                }
                None => break,
            }
        }
    }

    sync.shutdown().await;
    Ok(())
}
