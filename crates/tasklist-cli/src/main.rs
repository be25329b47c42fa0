use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use tasklist_client::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_TASKS_PATH, HttpTaskClient, TaskApi,
};
use tasklist_observe::{LogWriter, LoggerConfig, LoggerFormat, logger_init};
use tasklist_view::{Controller, DEFAULT_ERROR_TTL_MS, Render, TextRenderer, ViewConfig};

mod command;
use command::{Command, HELP};

/// Terminal client for a task list REST API.
#[derive(Parser, Debug)]
#[command(name = "tasklist", version)]
struct Args {
    /// Backend base URL.
    #[arg(long, env = "TASKLIST_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Path of the task collection endpoint.
    #[arg(long, env = "TASKLIST_TASKS_PATH", default_value = DEFAULT_TASKS_PATH)]
    tasks_path: String,

    /// Log filter (tracing EnvFilter syntax).
    #[arg(long, env = "TASKLIST_LOG", default_value = "warn")]
    log_level: String,

    /// Log format: text, json or journald.
    #[arg(long, default_value = "text")]
    log_format: LoggerFormat,

    /// Log destination: stderr or stdout.
    #[arg(long, default_value = "stderr")]
    log_writer: LogWriter,

    /// How long error messages stay visible, in milliseconds; 0 keeps them.
    #[arg(long, env = "TASKLIST_ERROR_TTL_MS", default_value_t = DEFAULT_ERROR_TTL_MS)]
    error_ttl_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_cfg = LoggerConfig {
        format: args.log_format,
        level: args.log_level.clone(),
        writer: args.log_writer,
        ..LoggerConfig::stderr()
    };
    logger_init(&log_cfg)?;

    let client_cfg = ClientConfig {
        base_url: args.base_url.clone(),
        tasks_path: args.tasks_path.clone(),
    };
    let api: Arc<dyn TaskApi> =
        Arc::new(HttpTaskClient::new(client_cfg).context("invalid backend address")?);
    info!(base_url = %args.base_url, "client ready");

    let mut ctl = Controller::new(
        api,
        TextRenderer::stdout(),
        ViewConfig::with_error_ttl_ms(args.error_ttl_ms),
    );

    println!("{HELP}");
    ctl.load().await;
    run(&mut ctl).await
}

async fn run<R: Render>(ctl: &mut Controller<R>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt()?;
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            debug!("input closed");
            break;
        };

        let cmd = match command::parse(&line) {
            Ok(cmd) => cmd,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        match cmd {
            Command::Add(title) => {
                ctl.add(&title).await;
            }
            Command::Toggle(row) => {
                ctl.toggle(row).await;
            }
            Command::Delete(row) => {
                ctl.delete(row).await;
            }
            Command::Reload => {
                ctl.load().await;
            }
            Command::Health => match ctl.health().await {
                Some(true) => println!("server is healthy"),
                Some(false) => println!("server reports a problem"),
                None => {}
            },
            Command::Version => {
                if let Some(version) = ctl.version().await {
                    println!("server version {version}");
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Nothing => ctl.render(),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn prompt() -> anyhow::Result<()> {
    let mut out = std::io::stdout();
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}
