use crate::{BoardInt, Coords};

/// Fixed-size grid whose outermost ring is wall.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: BoardInt,
    height: BoardInt,
}

impl Board {
    pub fn new(width: BoardInt, height: BoardInt) -> Self {
        Board { width, height }
    }

    pub fn width(&self) -> BoardInt {
        self.width
    }

    pub fn height(&self) -> BoardInt {
        self.height
    }

    pub fn center(&self) -> Coords {
        (self.width / 2, self.height / 2)
    }

    pub fn is_wall(&self, pos: Coords) -> bool {
        pos.0 == 0 || pos.1 == 0 || pos.0 == self.width - 1 || pos.1 == self.height - 1
    }

    /// True for cells strictly inside the wall ring.
    pub fn is_playable(&self, pos: Coords) -> bool {
        pos.0 >= 1 && pos.0 <= self.width - 2 && pos.1 >= 1 && pos.1 <= self.height - 2
    }

    pub fn playable_cells(&self) -> impl Iterator<Item = Coords> {
        let (w, h) = (self.width, self.height);
        (1..h - 1).flat_map(move |y| (1..w - 1).map(move |x| (x, y)))
    }

    pub fn playable_count(&self) -> usize {
        ((self.width - 2).max(0) as usize) * ((self.height - 2).max(0) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_ring_is_wall() {
        let board = Board::new(22, 12);

        assert!(board.is_wall((0, 5)));
        assert!(board.is_wall((21, 5)));
        assert!(board.is_wall((7, 0)));
        assert!(board.is_wall((7, 11)));
        assert!(!board.is_wall((1, 1)));
        assert!(!board.is_playable((0, 5)));
        assert!(board.is_playable((20, 10)));
        assert!(!board.is_playable((20, 11)));
    }

    #[test]
    fn playable_cells_cover_the_interior() {
        let board = Board::new(22, 12);
        let cells: Vec<Coords> = board.playable_cells().collect();

        assert_eq!(cells.len(), 20 * 10);
        assert_eq!(cells.len(), board.playable_count());
        assert!(cells.iter().all(|c| board.is_playable(*c)));
        assert_eq!(board.center(), (11, 6));
    }
}
