//! Taskboard server -- minimal task-list backend with flat-file persistence.
//!
//! An axum HTTP server exposing the task API (`GET`/`POST`/`DELETE` on
//! `/tasks`) and serving the browser client's static assets. The task list
//! is persisted as a single JSON file.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:3000
//! cargo run --bin taskboard-server
//!
//! # Run on a custom address with a custom tasks file
//! cargo run --bin taskboard-server -- --bind 127.0.0.1:8080 --tasks-file /tmp/tasks.json
//!
//! # Or via environment variable
//! TASKBOARD_ADDR=127.0.0.1:8080 cargo run --bin taskboard-server
//! ```

use std::sync::Arc;

use clap::Parser;
use taskboard_server::api::{self, ApiState};
use taskboard_server::config::{CliArgs, Config};
use taskboard_server::store::FileStore;

#[tokio::main]
async fn main() {
    let cli = CliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        addr = %config.bind_addr,
        tasks_file = %config.tasks_file.display(),
        static_dir = %config.static_dir.display(),
        "starting taskboard server"
    );

    let store = FileStore::new(&config.tasks_file);
    if let Err(e) = store.ensure_exists().await {
        tracing::error!(error = %e, "failed to prepare tasks file");
        std::process::exit(1);
    }

    let state = Arc::new(ApiState::new(store));
    match api::start_server_with_state(&config.bind_addr, state, &config.static_dir).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "taskboard server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start server");
            std::process::exit(1);
        }
    }
}
