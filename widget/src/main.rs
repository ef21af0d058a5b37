//! Terminal front end for the todo widget.
//!
//! Reads one command per line from stdin and repaints after each. Logs go to
//! stderr, filtered by `RUST_LOG`.

use anyhow::Context;
use std::sync::Arc;
use todo_widget::render::{render_frame, Command, HELP};
use todo_widget::{Reply, TodoApp, TodoConfig, TodoEnvironment};
use todo_widget_core::environment::{SystemClock, TimestampIds};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_widget=info,todo_widget_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Describe store metrics for whatever recorder is installed
    todo_widget_runtime::metrics::register_metrics();

    let config = TodoConfig::from_env().context("invalid widget configuration")?;
    tracing::info!(
        unchanged_removal = %config.unchanged_removal,
        id_collision = %config.id_collision,
        "Starting todo widget"
    );

    let ids = TimestampIds::new(Arc::new(SystemClock));
    let mut app = TodoApp::new(TodoEnvironment::new(Arc::new(ids), config));

    println!("{HELP}\n");
    println!("{}", render_frame(&app.frame()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        match app.handle(Command::parse(&line))? {
            Reply::Frame(frame) => println!("{}", render_frame(&frame)),
            Reply::Json(json) => println!("{json}"),
            Reply::Help(text) => println!("{text}"),
            Reply::NoSuchRow(n) => println!("No row {n}"),
            Reply::Unknown(line) => println!("Unknown command: {line} (try /help)"),
            Reply::Quit => break,
        }
    }

    tracing::info!(
        todos = app.store().state().todos().len(),
        revision = app.store().revision(),
        "Todo widget stopped"
    );
    Ok(())
}
