use anyhow::Result;
use clap::Parser;

use std::io::{stdin, stdout, Stdin, Write};

use connect4_negamax::{
    board::{Board, Player},
    config::{SearchConfig, DEFAULT_DEPTH},
    rules::{game_state, GameState},
    solver::Solver,
};

/// Play Connect 4 against a negamax search
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Search depth in plies
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Search the top-level columns on all cores
    #[arg(short, long)]
    parallel: bool,

    /// Print search progress and column scores
    #[arg(short, long)]
    verbose: bool,

    /// Starting position as a string of 1-indexed columns, e.g. "4453"
    #[arg(short, long, default_value = "")]
    moves: String,
}

fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.trim().to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SearchConfig {
        depth: cli.depth,
        parallel: cli.parallel,
        verbose: cli.verbose,
    };

    let (mut board, mut player) = Board::from_moves(&cli.moves)?;

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let ai_players = (
        ask_yes_no(&stdin, "Is player 1 AI controlled?")?,
        ask_yes_no(&stdin, "Is player 2 AI controlled?")?,
    );

    // game loop
    loop {
        board.display()?;

        match game_state(&board) {
            GameState::Playing => {
                let ai_controlled = match player {
                    Player::One => ai_players.0,
                    Player::Two => ai_players.1,
                };

                let next_move = if ai_controlled {
                    println!("AI is thinking...");
                    stdout().flush()?;

                    // slow down play if both players are AI
                    if ai_players == (true, true) {
                        std::thread::sleep(std::time::Duration::new(1, 0));
                    }

                    let mut solver = Solver::with_config(board, player, config);
                    match solver.search() {
                        Some(column) => {
                            println!("{} plays column {}", player, column + 1);
                            column
                        }
                        // a position still in play always has a free column
                        None => break,
                    }

                // human player
                } else {
                    print!("{} move input > ", player);
                    stdout().flush()?;
                    let mut input_str = String::new();
                    stdin.read_line(&mut input_str)?;

                    match input_str.trim().parse::<usize>() {
                        Ok(column) if column >= 1 => column - 1,
                        _ => {
                            println!("Invalid number: {}", input_str.trim());
                            continue;
                        }
                    }
                };

                if let Err(err) = board.play(next_move, player) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
                player = -player;
            }

            // end states
            GameState::PlayerOneWin => {
                println!("Player 1 wins!");
                break;
            }
            GameState::PlayerTwoWin => {
                println!("Player 2 wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
