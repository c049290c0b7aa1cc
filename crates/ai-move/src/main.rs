//! ai-move - asks the engine for a move.
//!
//! Two modes:
//! - one-shot: `ai-move --fen <FEN> [--difficulty hard] [--moves e2e4,e7e5]`
//!   prints the chosen move (an empty line when there is none)
//! - `ai-move --stdin` reads one JSON [`MoveRequest`] per line and writes one
//!   JSON [`MoveResponse`] per line
//!
//! Logs go to stderr so stdout only carries answers.

use anyhow::Context;
use chess_ai::protocol::resolve_difficulty;
use chess_ai::{
    apply_move, best_move_for_position, handle_request, AiConfig, MoveRequest, MoveResponse,
};
use chess_engine::Position;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Picks a move for a chess position at a given difficulty.
#[derive(Parser, Debug)]
#[command(name = "ai-move")]
#[command(about = "Picks a move for a chess position at a given difficulty")]
struct Args {
    /// Position to move from, in FEN
    #[arg(long, required_unless_present = "stdin")]
    fen: Option<String>,

    /// Difficulty: easy, medium or hard (defaults to the configured default)
    #[arg(long)]
    difficulty: Option<String>,

    /// Moves to play from the FEN before searching, in UCI form
    #[arg(long, value_delimiter = ',')]
    moves: Vec<String>,

    /// Configuration file
    #[arg(long, default_value = AiConfig::DEFAULT_PATH)]
    config: PathBuf,

    /// Answer JSON requests from stdin, one per line
    #[arg(long, conflicts_with = "fen")]
    stdin: bool,

    /// Log every root move score
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let config = AiConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    tracing::debug!(?config, "configuration loaded");

    if args.stdin {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        return serve(stdin.lock(), stdout.lock(), &config);
    }

    let fen = args.fen.as_deref().unwrap_or_default();
    let mut position = Position::from_fen(fen).context("invalid --fen")?;
    for uci in &args.moves {
        position = apply_move(&position, uci)?;
    }
    let difficulty = resolve_difficulty(args.difficulty.as_deref(), &config)?;

    let mv = best_move_for_position(&position, difficulty, &config)?;
    if mv.is_empty() {
        tracing::info!("no legal moves");
    }
    println!("{mv}");
    Ok(())
}

/// Answers one JSON request line with one JSON response line.
fn respond(line: &str, config: &AiConfig) -> MoveResponse {
    match serde_json::from_str::<MoveRequest>(line) {
        Ok(request) => handle_request(&request, config),
        Err(e) => {
            tracing::warn!("malformed request: {}", e);
            MoveResponse {
                success: false,
                best_move: None,
                error: Some(format!("malformed request: {e}")),
            }
        }
    }
}

/// Request loop: runs until the input is exhausted. Blank lines are skipped.
fn serve<R, W>(input: R, mut output: W, config: &AiConfig) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = respond(&line, config);
        serde_json::to_writer(&mut output, &response)?;
        writeln!(output)?;
        output.flush()?;
    }
    Ok(())
}
