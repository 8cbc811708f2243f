//! Stageroom TUI entry point.
//!
//! Runs the terminal client against an in-process room seeded with demo
//! participants.
//!
//! # Usage
//!
//! ```bash
//! # Default room codes, four demo peers
//! stageroom-tui
//!
//! # Busy room with logging
//! stageroom-tui --demo-peers 12 --churn-secs 3 --log-file stageroom.log
//! ```

use clap::Parser;
use stageroom_store::LocalStore;
use stageroom_tui::{Runtime, TerminalDriver, cli::Args, demo, logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let _log_guard = logging::init(&args.log_level, args.log_file.as_deref())?;

    let store = LocalStore::new(args.store_config());
    let room = store.handle();
    let seeded = demo::seed(&room, args.demo_peers);
    tracing::info!(peers = seeded.len(), "Stageroom client starting");

    let churn = args.churn().map(|period| demo::spawn_churn(room, period));

    let driver = TerminalDriver::new()?;
    let result = Runtime::new(driver, store, &args.client_config()).run().await;

    if let Some(task) = churn {
        task.abort();
    }
    tracing::info!("Stageroom client stopped");
    Ok(result?)
}
