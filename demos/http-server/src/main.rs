use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use tasklist_api::{HttpApi, MemoryStore, SqliteStore, TaskHandler};
use tasklist_observe::{LogWriter, LoggerConfig, LoggerFormat, logger_init};

/// Task list backend.
#[derive(Parser, Debug)]
#[command(name = "http-server", version)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "TASKLIST_ADDR", default_value = "0.0.0.0:8000")]
    addr: String,

    /// SQLite database file; tasks are kept in memory when omitted.
    #[arg(long, env = "TASKLIST_DB")]
    db: Option<PathBuf>,

    /// Log filter (tracing EnvFilter syntax).
    #[arg(long, env = "TASKLIST_LOG", default_value = "info")]
    log_level: String,

    /// Log format: text, json or journald.
    #[arg(long, default_value = "text")]
    log_format: LoggerFormat,

    /// Log destination: stdout or stderr.
    #[arg(long, default_value = "stdout")]
    log_writer: LogWriter,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 1) Logger
    let cfg = LoggerConfig {
        format: args.log_format,
        level: args.log_level.clone(),
        writer: args.log_writer,
        ..Default::default()
    };
    logger_init(&cfg)?;
    info!("logger initialized");

    // 2) Listener
    let listener = TcpListener::bind(&args.addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    // 3) Store + serve until Ctrl+C
    match &args.db {
        Some(path) => serve(listener, SqliteStore::open(path)?).await,
        None => {
            info!("no --db given, tasks are kept in memory");
            serve(listener, MemoryStore::new()).await
        }
    }
}

async fn serve<H: TaskHandler>(listener: TcpListener, store: H) -> anyhow::Result<()> {
    let app = HttpApi::new(Arc::new(store)).router();
    info!("press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down...");
        })
        .await?;

    Ok(())
}
