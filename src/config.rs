//! Fixed game parameters. Board size and speed are not meant to be tuned at runtime.

use crate::BoardInt;

/// Board width in cells, walls included.
pub const BOARD_WIDTH: BoardInt = 22;

/// Board height in cells, walls included.
pub const BOARD_HEIGHT: BoardInt = 12;

pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Delay after rendering a frame while moving left or right.
pub const DELAY_HORIZONTAL_MS: u64 = 200;

/// Delay after rendering a frame while moving up or down.
pub const DELAY_VERTICAL_MS: u64 = 300;

/// Random picks tried before the spawner scans the remaining free cells.
pub const MAX_SPAWN_ATTEMPTS: usize = 256;

/// How long the input task waits on the keyboard before checking for cancellation.
pub const INPUT_POLL_INTERVAL_MS: u64 = 50;

pub const SNAKE_BODY_CHAR: char = '*';
pub const FOOD_CHAR: char = '@';
pub const WALL_CHAR: char = '#';
pub const EMPTY_CHAR: char = ' ';
