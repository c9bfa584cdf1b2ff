mod command;

use std::io::{self, Write};

use anyhow::{bail, Context};
use chess_core::Position;
use command::{parse_command, Command};
use dfs_engine::{DfsEngine, EngineConfig, StopHandle};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinHandle,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// A search in flight: its stop side and the task printing its reports.
struct Running {
    stop: StopHandle,
    printer: JoinHandle<()>,
}

impl Running {
    /// Stops the search and waits until its best move has been printed.
    async fn finish(mut self) {
        self.stop.stop();
        self.printer.await.ok();
    }
}

fn parse_args() -> anyhow::Result<EngineConfig> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => Ok(EngineConfig::default()),
        [flag, path] if flag == "--config" => {
            EngineConfig::load(path).with_context(|| format!("loading config from {path}"))
        }
        _ => bail!("usage: uci_engine [--config <path>]"),
    }
}

fn send(line: &str) {
    // UCI engines communicate via stdin/stdout.
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}").ok();
    stdout.flush().ok();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = parse_args()?;
    info!(?config, "engine configured");
    let mut engine = DfsEngine::from_config(&config);
    let mut running: Option<Running> = None;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                warn!(%line, error = %e, "rejected command");
                continue;
            }
        };
        debug!(?cmd, "command");

        match cmd {
            Command::Uci => {
                send("id name dfs_engine 0.1");
                send("id author ML-chess");
                send(&format!(
                    "option name SelDepth type spin default {} min 1 max 32",
                    config.sel_depth
                ));
                send("uciok");
            }
            Command::IsReady => send("readyok"),
            Command::SetOption { name, value } => {
                if name.eq_ignore_ascii_case("seldepth") {
                    match value.parse::<usize>() {
                        Ok(d) => engine.set_sel_depth(d.clamp(1, 32)),
                        Err(_) => warn!(%value, "SelDepth expects a number"),
                    }
                } else {
                    warn!(%name, "unknown option");
                }
            }
            Command::NewGame => {
                if let Some(search) = running.take() {
                    search.finish().await;
                }
                engine.set_position(&Position::startpos());
            }
            Command::Position(pos) => engine.set_position(&pos),
            Command::Go(params) => {
                if let Some(search) = running.take() {
                    search.finish().await;
                }
                let (stop, mut reports) = engine.start(params.limits(config.limits())).split();
                let printer = tokio::spawn(async move {
                    while let Some(report) = reports.recv().await {
                        send(&report.to_string());
                    }
                });
                running = Some(Running { stop, printer });
            }
            Command::Stop => {
                if let Some(search) = running.take() {
                    search.finish().await;
                }
            }
            Command::Quit => break,
            Command::Unknown(text) => debug!(%text, "ignoring unknown command"),
        }
    }

    if let Some(search) = running.take() {
        search.finish().await;
    }
    Ok(())
}
