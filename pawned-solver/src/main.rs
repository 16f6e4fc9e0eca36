//! Pawned
//!
//! Console game of pawns racing across the board, with a fixed-depth
//! minimax opponent (alpha-beta pruning unless `--no-prune`).

mod command;
mod config;
mod render;
mod session;
mod solver;
mod stats;

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::command::{Command, HELP};
use crate::config::Args;
use crate::render::{banner, format_moves, render};
use crate::session::{Controller, GameSession, Turn};
use crate::solver::Searcher;

const PROMPT: &str = "Enter a move, format \"piece row col\" Type 'help' for help: ";
const SKIPPED: &str = "No possible moves, skipped Turn";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Args::parse().into_config()?;
    info!(
        rows = config.start.rows(),
        cols = config.start.cols(),
        white = ?config.white,
        black = ?config.black,
        depth = config.depth,
        prune = config.prune,
        "starting game"
    );

    // Ctrl-C stops the game between turns
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl-C handler")?;

    let mut session = GameSession::new(config.start, config.to_move, config.white, config.black);
    let mut searcher = Searcher::new(config.prune);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("{}", render(session.position()));
    if session.skip_if_stuck().is_some() {
        println!("{}", SKIPPED);
    }

    let mut quit = false;
    while !session.is_over() {
        if !running.load(Ordering::SeqCst) {
            println!("\nInterrupted");
            quit = true;
            break;
        }

        let side = session.side_to_move();
        println!("{}'s Turn", side.name());

        match session.controller(side) {
            Controller::Computer => {
                let turn = session.play_computer(&mut searcher, config.depth);
                if let Some(mov) = turn.mov {
                    println!("{}", mov);
                }
                report(&session, &turn);
            }
            Controller::Human => {
                if !human_turn(&mut session, &mut input, &running)? {
                    if !running.load(Ordering::SeqCst) {
                        println!("\nInterrupted");
                    }
                    quit = true;
                    break;
                }
            }
        }
    }

    if let Some(outcome) = session.outcome() {
        println!("{}", banner(outcome));
    }
    println!("Game Over");
    info!(plies = session.plies(), quit, outcome = ?session.outcome(), "game finished");

    if searcher.stats.searches > 0 {
        println!();
        println!(
            "Mode: {}",
            if searcher.prune() { "Alpha-beta pruning" } else { "Plain minimax" }
        );
        searcher.stats.print_summary();
    }

    Ok(())
}

/// Print the board after a move, plus a note when the next side was skipped.
fn report(session: &GameSession, turn: &Turn) {
    debug!(value = ?turn.value, captured = ?turn.captured.map(|p| p.label), "turn over");
    println!("{}", render(session.position()));
    if turn.skipped.is_some() {
        println!("{}", SKIPPED);
    }
}

/// Prompt until the human plays a move or quits.
///
/// Returns false when the player quits, input ends, or Ctrl-C clears
/// `running`. A pending read finishes before the flag is seen.
fn human_turn(
    session: &mut GameSession,
    input: &mut impl BufRead,
    running: &AtomicBool,
) -> Result<bool> {
    loop {
        if !running.load(Ordering::SeqCst) {
            return Ok(false);
        }
        print!("{}", PROMPT);
        io::stdout().flush().context("failed to flush stdout")?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read input")? == 0 {
            println!();
            return Ok(false);
        }
        if !running.load(Ordering::SeqCst) {
            return Ok(false);
        }

        match line.parse::<Command>() {
            Ok(Command::Quit) => return Ok(false),
            Ok(Command::Print) => println!("{}", render(session.position())),
            Ok(Command::ListMoves) => println!("\n{}", format_moves(&session.legal_moves())),
            Ok(Command::Help) => println!("\n{}\n", HELP),
            Ok(Command::Move(mov)) => match session.submit(mov) {
                Ok(turn) => {
                    report(session, &turn);
                    return Ok(true);
                }
                Err(err) => debug!(%err, "move ignored"),
            },
            Err(err) => debug!(%err, input = line.trim(), "input ignored"),
        }
    }
}
