//! Parsing of raw UCI input lines into typed commands.

use std::time::Duration;

/// The subset of UCI input commands the engine recognises (spec
/// §6.1). Anything else is a [`UciCommand::Unknown`], which the
/// dispatcher silently ignores per the UCI convention for unknown
/// tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position { fen: Option<String>, moves: Vec<String> },
    Go(GoParams),
    Stop,
    Print,
    Quit,
    Unknown,
}

/// Search limits requested by a `go` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u32>,
    pub movetime_ms: Option<u64>,
    pub infinite: bool,
}

impl GoParams {
    /// `infinite` means depth 1000 and no time budget; a missing
    /// depth defaults to 9 (spec §6.1, `go` row).
    #[must_use]
    pub fn max_depth(self) -> u32 {
        if self.infinite {
            1000
        } else {
            self.depth.unwrap_or(9)
        }
    }

    #[must_use]
    pub fn movetime(self) -> Option<Duration> {
        if self.infinite {
            None
        } else {
            self.movetime_ms.map(Duration::from_millis)
        }
    }
}

/// Splits `line` on whitespace and classifies it as a [`UciCommand`].
/// Returns [`UciCommand::Unknown`] for blank lines and unrecognised
/// tokens alike; the caller treats both as a no-op.
#[must_use]
pub fn parse_command(line: &str) -> UciCommand {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return UciCommand::Unknown;
    };

    match head {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => parse_position(&parts),
        "go" => UciCommand::Go(parse_go(&parts)),
        "stop" => UciCommand::Stop,
        "print" | "d" | "display" => UciCommand::Print,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown,
    }
}

fn parse_position(parts: &[&str]) -> UciCommand {
    let mut i = 1;
    let fen = if parts.get(i) == Some(&"startpos") {
        i += 1;
        None
    } else if parts.get(i) == Some(&"fen") {
        i += 1;
        let start = i;
        while i < parts.len() && parts[i] != "moves" {
            i += 1;
        }
        Some(parts[start..i].join(" "))
    } else {
        return UciCommand::Unknown;
    };

    let mut moves = Vec::new();
    if parts.get(i) == Some(&"moves") {
        i += 1;
        moves.extend(parts[i..].iter().map(|s| (*s).to_string()));
    }

    UciCommand::Position { fen, moves }
}

fn parse_go(parts: &[&str]) -> GoParams {
    let mut params = GoParams { depth: None, movetime_ms: None, infinite: false };
    let mut i = 1;
    while i < parts.len() {
        match parts[i] {
            "depth" => {
                params.depth = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "movetime" => {
                params.movetime_ms = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "infinite" => {
                params.infinite = true;
                i += 1;
            }
            _ => i += 1,
        }
    }
    params
}
