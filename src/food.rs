use log::{debug, warn};
use rand::Rng;
use rand::seq::IteratorRandom;

use crate::Coords;
use crate::board::Board;
use crate::config::MAX_SPAWN_ATTEMPTS;
use crate::snake::Snake;

/// Picks a playable cell the snake does not occupy, uniformly at random.
///
/// Random picks are retried up to `MAX_SPAWN_ATTEMPTS` times. Past that the free cells
/// are scanned and one is chosen among them, which keeps the distribution uniform while
/// bounding the work. Returns `None` only when no free cell is left.
pub fn spawn<R: Rng>(rng: &mut R, board: &Board, snake: &Snake) -> Option<Coords> {
    if board.playable_count() == 0 {
        warn!("Board has no playable cells, no food spawned");
        return None;
    }

    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let pos = (
            rng.gen_range(1..board.width() - 1),
            rng.gen_range(1..board.height() - 1),
        );

        if !snake.contains(&pos) {
            debug!("Food spawned at {:?}", pos);
            return Some(pos);
        }
    }

    let res = board.playable_cells().filter(|pos| !snake.contains(pos)).choose(rng);

    match res {
        Some(pos) => debug!("Food spawned at {:?} after scanning free cells", pos),
        None => warn!("Board is full, no food this tick"),
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn food_lands_on_a_free_playable_cell() {
        let board = Board::new(22, 12);
        let snake = Snake::new((11, 6), 3, Direction::Right);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let food = spawn(&mut rng, &board, &snake).expect("board has room");
            assert!(board.is_playable(food));
            assert!(!snake.contains(&food));
        }
    }

    #[test]
    fn nearly_full_board_finds_the_last_cell() {
        let board = Board::new(5, 4);
        // Interior is 3x2; leave only (3, 2) free.
        let snake = Snake::from_cells(&[(1, 1), (2, 1), (3, 1), (1, 2), (2, 2)]);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(spawn(&mut rng, &board, &snake), Some((3, 2)));
    }

    #[test]
    fn full_board_yields_no_food() {
        let board = Board::new(4, 4);
        let snake = Snake::from_cells(&[(1, 1), (2, 1), (2, 2), (1, 2)]);
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(spawn(&mut rng, &board, &snake), None);
    }
}
