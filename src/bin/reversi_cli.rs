//! Pass-and-play Reversi in the terminal.

use std::io::{self, BufRead, Write};

use clap::Parser;
use reversi::{Cell, Game, IgnoreReason, MoveOutcome, Transition, UiSettings};
use tracing_subscriber::EnvFilter;

/// Two players share one terminal and take turns entering cells.
#[derive(Parser, Debug)]
#[command(name = "reversi-cli")]
#[command(about = "Pass-and-play Reversi", long_about = None)]
#[command(version)]
struct Cli {
    /// Highlight the legal targets of the player to move
    #[arg(long)]
    hints: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log: String,
}

/// A line of input: a pick, or a request to leave.
enum Command {
    Select(Cell),
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
        return Some(Command::Quit);
    }
    if let Ok(cell) = line.parse::<Cell>() {
        return Some(Command::Select(cell));
    }

    let mut parts = line.split_whitespace();
    let x = parts.next()?.parse::<i32>().ok()?;
    let y = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Cell::new(x, y).ok().map(Command::Select)
}

/// Announcement for a forced pass, if `transition` is one.
fn pass_message(transition: Transition) -> Option<String> {
    match transition {
        Transition::Pass { from, to } => {
            Some(format!("{from} has no legal move, {to} plays again."))
        }
        _ => None,
    }
}

fn print_state(game: &Game, settings: &UiSettings) {
    let state = game.snapshot(settings);
    print!("\n{}", game.board());
    println!("Black (X): {}  White (O): {}", state.black_count, state.white_count);
    if let Some(turn) = state.turn {
        println!("{turn} to move.");
    }
    if !state.hints.is_empty() {
        let hints: Vec<String> = state.hints.iter().map(Cell::to_string).collect();
        println!("Legal moves: {}", hints.join(" "));
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log)),
        )
        .with_writer(io::stderr)
        .init();

    let settings = UiSettings {
        show_hints: cli.hints,
        music: false,
    };
    let mut game = Game::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if let Some(message) = pass_message(game.step(None)) {
            println!("{message}");
        }
        if let Some(result) = game.result() {
            print_state(&game, &settings);
            println!(
                "Game over: {} ({} - {}).",
                result.winner, result.black_count, result.white_count
            );
            return Ok(());
        }

        print_state(&game, &settings);
        print!("Enter a cell (e.g. D3 or `3 2`), or 'quit': ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        match parse_command(&line?) {
            Some(Command::Quit) => return Ok(()),
            Some(Command::Select(cell)) => match game.select(cell) {
                MoveOutcome::Applied(applied) => {
                    println!(
                        "{} plays {}, flipping {}.",
                        applied.player,
                        applied.cell,
                        applied.flipped.len()
                    );
                    if let Some(message) = pass_message(applied.transition) {
                        println!("{message}");
                    }
                }
                MoveOutcome::Ignored(IgnoreReason::NotLegal) => {
                    println!("{cell} is not a legal move.");
                }
                MoveOutcome::Ignored(IgnoreReason::GameOver) => {}
            },
            None => println!("Cannot parse that cell."),
        }
    }
}
