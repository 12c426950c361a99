mod board;
mod clock;
mod config;
mod error;
mod food;
mod game;
mod input;
mod snake;
mod term;

use std::process::exit;

use log::error;

pub type BoardInt = i16;
pub type Coords = (BoardInt, BoardInt);

fn main() {
    env_logger::init();

    let game = game::SnakeGame::new();

    match game.run() {
        Ok(score) => println!("Game Over! Score: {}", score),
        Err(e) => {
            error!("Fatal: {}", e);
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}
