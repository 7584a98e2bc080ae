//! Terminal front-end: renders the board and turns key presses into engine calls.

mod cli;

use anyhow::{bail, Result};
use clap::Parser;
use cli::Args;
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use std::io::{self, Write};
use tile_puzzle::{solver, Direction, Mode, Phase, PuzzleConfig, PuzzleEngine};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = args.puzzle_config()?;
    if args.demo {
        run_demo(&config)
    } else {
        run_interactive(&config)
    }
}

/// Shuffle, solve and print every step of the solution.
#[instrument(skip(config))]
fn run_demo(config: &PuzzleConfig) -> Result<()> {
    if config.mode != Mode::Sliding {
        bail!("the demo solves sliding puzzles only");
    }

    let mut engine = PuzzleEngine::new(config)?;
    engine.initialize(config.grid_size)?;
    if let Some(board) = engine.board() {
        println!("Initial Puzzle:\n{}", board);
    }

    engine.shuffle()?;
    let Some(board) = engine.board() else {
        bail!("puzzle has no board");
    };
    println!("Shuffled Puzzle:\n{}", board);

    let output = solver::solve(board, solver::DEFAULT_NODE_LIMIT)?;
    println!("Found optimal solution with {} moves", output.len());
    info!(moves = output.len(), "Demo solved");

    for item in output {
        engine.move_direction(item)?;
        if let Some(board) = engine.board() {
            println!("{}\n{}", item, board);
        }
    }
    Ok(())
}

fn run_interactive(config: &PuzzleConfig) -> Result<()> {
    let mut engine = PuzzleEngine::start(config)?;

    enable_raw_mode()?;
    let result = play(&mut engine);
    disable_raw_mode()?;
    println!();
    result
}

fn play(engine: &mut PuzzleEngine) -> Result<()> {
    let mut cursor = 0;
    let mut status = String::new();

    loop {
        render(engine, cursor, &status)?;

        let Some(code) = pressed_key(event::read()?) else {
            continue;
        };
        status.clear();

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('r') => engine.reset()?,
            KeyCode::Char('h') => {
                status = match engine.hint() {
                    Ok(Some(dir)) => format!("Hint: {}", dir),
                    Ok(None) => "Already solved".to_string(),
                    Err(e) => e.to_string(),
                };
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                engine.attempt_move(cursor)?;
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                let dir = match code {
                    KeyCode::Up => Direction::Up,
                    KeyCode::Down => Direction::Down,
                    KeyCode::Left => Direction::Left,
                    _ => Direction::Right,
                };
                match engine.mode() {
                    Mode::Sliding => {
                        engine.move_direction(dir)?;
                    }
                    Mode::Swap => cursor = step_cursor(engine, cursor, dir),
                }
            }
            KeyCode::Char('w') => cursor = step_cursor(engine, cursor, Direction::Up),
            KeyCode::Char('s') => cursor = step_cursor(engine, cursor, Direction::Down),
            KeyCode::Char('a') => cursor = step_cursor(engine, cursor, Direction::Left),
            KeyCode::Char('d') => cursor = step_cursor(engine, cursor, Direction::Right),
            _ => {}
        }

        if engine.phase() == Phase::Solved {
            status = format!(
                "You solved it in {} moves! Press r for a new round or q to quit.",
                engine.move_count()
            );
        }
    }
}

/// The key of a press event. Releases and repeats are dropped so one press is one move.
fn pressed_key(event: Event) -> Option<KeyCode> {
    match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => Some(code),
        _ => None,
    }
}

/// Moves the cursor one cell on screen, staying on the board.
fn step_cursor(engine: &PuzzleEngine, cursor: usize, dir: Direction) -> usize {
    let delta = match dir {
        Direction::Up => (-1, 0),
        Direction::Down => (1, 0),
        Direction::Left => (0, -1),
        Direction::Right => (0, 1),
    };
    engine
        .board()
        .and_then(|board| board.offset(cursor, delta))
        .unwrap_or(cursor)
}

fn render(engine: &PuzzleEngine, cursor: usize, status: &str) -> Result<()> {
    let Some(board) = engine.board() else {
        bail!("puzzle has no board");
    };
    let mut out = io::stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let controls = match engine.mode() {
        Mode::Sliding => "Arrows slide | WASD cursor | Enter slide line | h hint | r reset | q quit",
        Mode::Swap => "Arrows/WASD cursor | Enter select/swap | r reset | q quit",
    };
    write!(out, "=== Tile Puzzle ({}) ===\r\n{}\r\n\r\n", engine.mode(), controls)?;

    let width = board.len().to_string().len();
    for (slot, cell) in board.cells().iter().enumerate() {
        let label = match cell {
            Some(tile) => (tile.home() + 1).to_string(),
            None => ".".to_string(),
        };
        let (open, close) = if slot == cursor {
            ('[', ']')
        } else if engine.selected() == Some(slot) {
            ('*', '*')
        } else {
            (' ', ' ')
        };
        write!(out, "{}{:>width$}{}", open, label, close)?;
        if (slot + 1) % board.size() == 0 {
            write!(out, "\r\n")?;
        }
    }

    write!(out, "\r\nMoves: {}\r\n{}\r\n", engine.move_count(), status)?;
    out.flush()?;
    Ok(())
}
