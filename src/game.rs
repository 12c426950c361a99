use std::{sync::Arc, thread::sleep, time::Duration};

use log::{info, warn};
use rand::Rng;

use crate::Coords;
use crate::board::Board;
use crate::clock::{Clock, format_elapsed};
use crate::config::*;
use crate::error::GameResult;
use crate::food;
use crate::input::{InputChannel, InputTask, KeySource};
use crate::snake::{Snake, Direction::{*, self}, MoveResult::{*, self}, head_char};
use crate::term::{Frame, FrameSink, TermManager, TerminalKeys};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    GameOver,
}

/// Everything a tick reads or changes. Owned by the game loop alone.
pub struct GameState {
    board: Board,
    snake: Snake,
    food: Option<Coords>,
    score: u32,
    direction: Direction,
    state: LoopState,
}

impl GameState {
    pub fn new(board: Board) -> Self {
        let snake = Snake::new(board.center(), INITIAL_SNAKE_LENGTH, Right);
        GameState { board, snake, food: None, score: 0, direction: Right, state: LoopState::Running }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Picks up the latest key, if any. No key means the direction stays.
    pub fn poll_input(&mut self, channel: &InputChannel) {
        if let Some(direction) = channel.try_recv() {
            self.direction = direction;
        }
    }

    pub fn end(&mut self) {
        self.state = LoopState::GameOver;
    }

    /// Spawns food if there is none. A full board simply leaves it unset.
    pub fn ensure_food<R: Rng>(&mut self, rng: &mut R) {
        if self.food.is_none() {
            self.food = food::spawn(rng, &self.board, &self.snake);
        }
    }

    /// Horizontal moves are quicker than vertical ones.
    pub fn tick_delay(&self) -> Duration {
        if self.direction.is_horizontal() {
            Duration::from_millis(DELAY_HORIZONTAL_MS)
        } else {
            Duration::from_millis(DELAY_VERTICAL_MS)
        }
    }

    /// Advances the snake and settles food, score and game over.
    pub fn step(&mut self) -> MoveResult {
        let res = self.snake.advance(self.direction, &self.board, self.food);

        match res {
            HitWall | HitSelf => self.end(),
            Ate => {
                self.score += 1;
                self.food = None;
            }
            Moved => {}
        }

        debug_assert!(!self.is_running() || self.snake.is_self_disjoint());
        res
    }

    pub fn frame(&self, elapsed_secs: u64) -> Frame {
        let (w, h) = (self.board.width(), self.board.height());

        let mut grid: Vec<Vec<char>> = (0..h)
            .map(|y| (0..w).map(|x| if self.board.is_wall((x, y)) {WALL_CHAR} else {EMPTY_CHAR}).collect())
            .collect();

        for pos in self.snake.cells() {
            grid[pos.1 as usize][pos.0 as usize] = SNAKE_BODY_CHAR;
        }

        let head = self.snake.head();
        grid[head.1 as usize][head.0 as usize] = head_char(self.direction);

        if let Some(food) = self.food {
            grid[food.1 as usize][food.0 as usize] = FOOD_CHAR;
        }

        Frame { grid, score: self.score, elapsed: format_elapsed(elapsed_secs) }
    }
}

pub struct SnakeGame<S: FrameSink> {
    sink: S,
}

impl SnakeGame<TermManager> {
    pub fn new() -> Self {
        SnakeGame { sink: TermManager::new() }
    }

    /// Plays one game on the terminal and returns the final score.
    pub fn run(mut self) -> GameResult<u32> {
        self.run_with(TerminalKeys, &mut rand::thread_rng())
    }
}

impl<S: FrameSink> SnakeGame<S> {
    /// Sets up the sink, starts the input and clock tasks, then plays until game over.
    ///
    /// Sink and task setup failures are returned before anything is drawn. Once the
    /// loop runs, render failures are only logged.
    pub fn run_with<K, R>(&mut self, keys: K, rng: &mut R) -> GameResult<u32>
    where
        K: KeySource + 'static,
        R: Rng,
    {
        self.sink.setup()?;

        let channel = Arc::new(InputChannel::new());
        let mut input = InputTask::spawn(keys, Arc::clone(&channel))?;
        let mut clock = Clock::start()?;

        let score = self.play(&channel, &mut input, &mut clock, rng);

        if let Err(e) = self.sink.restore() {
            warn!("Could not restore the terminal: {}", e);
        }

        Ok(score)
    }

    /// Runs ticks until the game is over, then stops both tasks.
    fn play<R: Rng>(&mut self, channel: &InputChannel, input: &mut InputTask, clock: &mut Clock, rng: &mut R) -> u32 {
        let mut state = GameState::new(Board::new(BOARD_WIDTH, BOARD_HEIGHT));

        info!("Game started");

        while state.is_running() {
            if channel.quit_requested() {
                info!("Player quit");
                state.end();
                break;
            }

            state.poll_input(channel);
            state.ensure_food(rng);

            if let Err(e) = self.sink.draw_frame(&state.frame(clock.elapsed_secs())) {
                warn!("Failed to draw frame: {}", e);
            }

            sleep(state.tick_delay());

            let res = state.step();
            if res.is_fatal() {
                info!("Game over ({:?}) with score {}", res, state.score());
            }
        }

        input.stop();
        clock.stop();

        state.score()
    }
}
