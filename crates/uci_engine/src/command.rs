//! Parsing of the UCI commands the engine understands.

use std::time::Duration;

use chess_core::{position_from_uci, ChessError, Position};
use dfs_engine::SearchLimits;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Position(#[from] ChessError),

    #[error("invalid value for {name}: {value:?}")]
    Value { name: String, value: String },

    #[error("missing {0}")]
    Missing(&'static str),
}

/// Search budgets requested by `go`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    pub nodes: Option<u64>,
    pub move_time: Option<Duration>,
    pub infinite: bool,
}

impl GoParams {
    /// Limits for this `go`, falling back to `defaults` for anything not
    /// given on the command line.
    pub fn limits(&self, defaults: SearchLimits) -> SearchLimits {
        if self.infinite {
            return SearchLimits::infinite();
        }
        SearchLimits {
            max_nodes: self.nodes.or(defaults.max_nodes),
            move_time: self.move_time.or(defaults.move_time),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Uci,
    IsReady,
    SetOption { name: String, value: String },
    NewGame,
    Position(Position),
    Go(GoParams),
    Stop,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = parts.split_first() else {
        return Ok(None);
    };

    let cmd = match head {
        "uci" => Command::Uci,
        "isready" => Command::IsReady,
        "ucinewgame" => Command::NewGame,
        "stop" => Command::Stop,
        "quit" => Command::Quit,
        "position" => Command::Position(position_from_uci(rest)?),
        "go" => Command::Go(parse_go(rest)?),
        "setoption" => parse_setoption(rest)?,
        _ => Command::Unknown(line.trim().to_string()),
    };
    Ok(Some(cmd))
}

fn parse_go(args: &[&str]) -> Result<GoParams, CommandError> {
    let mut params = GoParams::default();
    let mut it = args.iter();
    while let Some(&key) = it.next() {
        match key {
            "infinite" => params.infinite = true,
            "nodes" => params.nodes = Some(parse_number(key, it.next())?),
            "movetime" => {
                params.move_time = Some(Duration::from_millis(parse_number(key, it.next())?));
            }
            // Clock-based controls are not used by this engine
            _ => {}
        }
    }
    Ok(params)
}

// setoption name <name...> value <value...>
fn parse_setoption(args: &[&str]) -> Result<Command, CommandError> {
    let name_at = args
        .iter()
        .position(|&a| a == "name")
        .ok_or(CommandError::Missing("option name"))?;
    let value_at = args.iter().position(|&a| a == "value");

    let name_end = value_at.unwrap_or(args.len());
    if name_end <= name_at + 1 {
        return Err(CommandError::Missing("option name"));
    }
    let name = args[name_at + 1..name_end].join(" ");
    let value = value_at.map(|i| args[i + 1..].join(" ")).unwrap_or_default();
    Ok(Command::SetOption { name, value })
}

fn parse_number(name: &str, value: Option<&&str>) -> Result<u64, CommandError> {
    let value = value.ok_or(CommandError::Missing("numeric argument"))?;
    value.parse().map_err(|_| CommandError::Value {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod command_tests;
