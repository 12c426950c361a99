use std::collections::{HashSet, VecDeque};

use crate::Coords;
use crate::board::Board;
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    Ate,
    HitWall,
    HitSelf,
}

impl Direction {
    /// Maps the movement keys to a direction. Anything else is not a direction.
    pub fn from_key(key: char) -> Option<Direction> {
        match key {
            'w' => Some(Up),
            'a' => Some(Left),
            's' => Some(Down),
            'd' => Some(Right),
            _ => None,
        }
    }

    pub fn delta(self) -> (i16, i16) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }
}

impl MoveResult {
    pub fn is_fatal(self) -> bool {
        matches!(self, HitWall | HitSelf)
    }
}

/// The snake's body, head at the front and tail at the back.
pub struct Snake {
    body: VecDeque<Coords>,
}

impl Snake {
    /// Builds a straight snake whose head is at `head`, trailing away from `direction`.
    pub fn new(head: Coords, size: usize, direction: Direction) -> Self {
        let diff = direction.delta();

        let body = (0..size.max(1) as i16)
            .map(|i| (head.0 - diff.0 * i, head.1 - diff.1 * i))
            .collect();
        Snake { body }
    }

    #[cfg(test)]
    pub fn from_cells(cells: &[Coords]) -> Self {
        Snake { body: cells.iter().copied().collect() }
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: &Coords) -> bool {
        self.body.contains(pos)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Coords> {
        self.body.iter()
    }

    /// Moves one cell towards `direction`.
    ///
    /// Collisions are checked against the body as it is before the move, minus the tail,
    /// which is vacated in the same step. Walls are checked first. A crash leaves the
    /// body untouched.
    pub fn advance(&mut self, direction: Direction, board: &Board, food: Option<Coords>) -> MoveResult {
        let old_head = self.head();
        let diff = direction.delta();
        let new_head = (old_head.0 + diff.0, old_head.1 + diff.1);

        if !board.is_playable(new_head) {
            return HitWall;
        }

        let last = self.body.len() - 1;
        if self.body.iter().take(last).any(|pos| *pos == new_head) {
            return HitSelf;
        }

        self.body.push_front(new_head);

        if food == Some(new_head) {
            Ate
        } else {
            self.body.pop_back();
            Moved
        }
    }

    /// True when no cell appears twice in the body.
    pub fn is_self_disjoint(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        self.body.iter().all(|pos| seen.insert(*pos))
    }
}

pub fn head_char(direction: Direction) -> char {
    match direction {
        Up => '^',
        Down => 'v',
        Left => '<',
        Right => '>',
    }
}
