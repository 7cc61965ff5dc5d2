//! The line-oriented UCI protocol loop (spec §6.1): reads commands
//! from stdin, mutates an [`Engine`], and writes `info`/`bestmove`
//! lines to stdout. This is the external collaborator the rest of the
//! crate is specified against, not a rewritten subsystem in its own
//! right — it is deliberately thin.
//!
//! `go` must not block the line-reading loop: a GUI sends `stop` while
//! a search is in flight, and the dispatcher has to still be reading
//! stdin to see it (spec §5). So the worker's `info`/`bestmove` events
//! are drained by a dedicated printer thread, the same shape as the
//! teacher's own `run_uci_loop` printer thread, rather than read back
//! synchronously on the line-reading thread.

mod command;
mod notation;
mod print;

pub use command::{parse_command, GoParams, UciCommand};
pub use notation::parse_move;
pub use print::render_board;

use std::io::{BufRead, Write};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use crate::engine::{Engine, Event};
use crate::position::Position;
use crate::search::{Info, Limits};
use crate::types::Move;

const ENGINE_NAME: &str = "chess_engine";
const ENGINE_AUTHOR: &str = "Claude";

/// Runs the protocol loop over arbitrary input/output streams. `run`
/// itself reads from `stdin` and writes to `stdout`; this entry point
/// exists so the loop can be driven from tests with in-memory buffers.
/// `output` must be `Send + 'static` because it is shared with the
/// background printer thread that drains search progress.
pub fn run<R: BufRead, W: Write + Send + 'static>(input: R, output: W) {
    let mut engine = Engine::new();
    let (tx, rx) = mpsc::channel::<Event>();
    let output = Arc::new(Mutex::new(output));

    let printer_output = Arc::clone(&output);
    let printer = thread::spawn(move || {
        while let Ok(event) = rx.recv() {
            let mut out = printer_output.lock().expect("output mutex poisoned");
            match event {
                Event::Info(info) => {
                    let _ = writeln!(out, "{}", format_info(&info));
                }
                Event::BestMove(best) => {
                    let _ = writeln!(out, "{}", format_bestmove(best));
                }
            }
            let _ = out.flush();
        }
    });

    for line in input.lines() {
        let Ok(line) = line else { break };
        match parse_command(&line) {
            UciCommand::Uci => {
                let mut out = output.lock().expect("output mutex poisoned");
                let _ = writeln!(out, "id name {ENGINE_NAME}");
                let _ = writeln!(out, "id author {ENGINE_AUTHOR}");
                let _ = writeln!(out, "uciok");
            }
            UciCommand::IsReady => {
                let mut out = output.lock().expect("output mutex poisoned");
                let _ = writeln!(out, "readyok");
            }
            UciCommand::UciNewGame => {
                engine.new_game();
            }
            UciCommand::Position { fen, moves } => {
                apply_position(&mut engine, fen.as_deref(), &moves);
            }
            UciCommand::Go(params) => {
                let limits = Limits { max_depth: params.max_depth(), movetime: params.movetime() };
                engine.go(limits, tx.clone());
            }
            UciCommand::Stop => {
                engine.request_stop();
            }
            UciCommand::Print => {
                let mut out = output.lock().expect("output mutex poisoned");
                let _ = write!(out, "{}", render_board(engine.position()));
            }
            UciCommand::Quit => {
                engine.stop_and_join();
                break;
            }
            UciCommand::Unknown => {}
        }
        let mut out = output.lock().expect("output mutex poisoned");
        let _ = out.flush();
    }

    // Drop the last sender so the printer thread's `recv` loop ends
    // once any in-flight search has finished publishing its events,
    // then join it so every queued `info`/`bestmove` line is flushed
    // before `run` returns.
    drop(tx);
    let _ = printer.join();
}

/// Resets to `startpos` or the given FEN, then applies each move in
/// turn. Per spec §7, an illegal move discards the rest of the list
/// but leaves the moves applied so far in place; a malformed FEN
/// leaves the position untouched entirely.
fn apply_position(engine: &mut Engine, fen: Option<&str>, moves: &[String]) {
    let mut pos = match fen {
        None => Position::startpos(),
        Some(fen) => match Position::from_fen(fen) {
            Ok(pos) => pos,
            Err(_err) => {
                #[cfg(feature = "logging")]
                log::warn!("position fen {fen:?} rejected: {_err}");
                return;
            }
        },
    };

    for text in moves {
        match parse_move(&pos, text) {
            Some(mv) => pos.make_move(mv),
            None => {
                #[cfg(feature = "logging")]
                log::warn!("move {text:?} is not legal here, discarding the rest of the list");
                break;
            }
        }
    }

    engine.set_position(pos);
}

fn format_info(info: &Info) -> String {
    use std::fmt::Write as _;

    let mut line = format!("info depth {} nodes {} score cp {}", info.depth, info.nodes, info.score_cp);
    if !info.pv.is_empty() {
        line.push_str(" pv");
        for mv in &info.pv {
            let _ = write!(line, " {mv}");
        }
    }
    let elapsed_secs = info.elapsed.as_secs_f64();
    if elapsed_secs > 0.0 {
        let nps = (info.nodes as f64 / elapsed_secs) as u64;
        let _ = write!(line, " nps {nps}");
    }
    line
}

fn format_bestmove(best: Option<Move>) -> String {
    match best {
        Some(mv) => format!("bestmove {mv}"),
        None => "bestmove 0000".to_string(),
    }
}
