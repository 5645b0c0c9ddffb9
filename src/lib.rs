
pub mod tile;
pub mod trie;
pub mod dictionary;
pub mod board;
pub mod player;
pub mod bag;
pub mod engine;
pub mod ai;

pub const BOARD_SIZE: usize = 15;
pub const RACK_SIZE: usize = 7;

pub use tile::Tile;
pub use dictionary::Dictionary;
pub use board::{Board, Bonus};
pub use player::Player;
pub use bag::Bag;
pub use engine::Engine;
pub use ai::{AiPlayer, BestMove};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn perp(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl std::ops::Index<Direction> for Position {
    type Output = usize;
    /// The coordinate that changes in that direction
    fn index(&self, dir: Direction) -> &Self::Output {
        match dir {
            Direction::Vertical => &self.row,
            Direction::Horizontal => &self.col,
        }
    }
}

impl std::ops::IndexMut<Direction> for Position {
    /// The coordinate that changes in that direction
    fn index_mut(&mut self, dir: Direction) -> &mut Self::Output {
        match dir {
            Direction::Vertical => &mut self.row,
            Direction::Horizontal => &mut self.col,
        }
    }
}

impl Position {
    /// The neighboring position one step further along `dir`, None past the board edge
    pub fn next(mut self, dir: Direction) -> Option<Position> {
        self[dir] += 1;
        if self[dir] < BOARD_SIZE {
            Some(self)
        } else {
            None
        }
    }

    /// The neighboring position one step back along `dir`, None past the board edge
    pub fn prev(mut self, dir: Direction) -> Option<Position> {
        if self[dir] == 0 {
            return None;
        }
        self[dir] -= 1;
        Some(self)
    }
}

#[test]
fn position_stepping() {
    let p = Position { row: 3, col: 0 };

    assert_eq!(p.next(Direction::Horizontal), Some(Position { row: 3, col: 1 }));
    assert_eq!(p.next(Direction::Vertical), Some(Position { row: 4, col: 0 }));
    assert_eq!(p.prev(Direction::Horizontal), None);
    assert_eq!(p.prev(Direction::Vertical), Some(Position { row: 2, col: 0 }));

    let edge = Position { row: 14, col: 14 };
    assert_eq!(edge.next(Direction::Horizontal), None);
    assert_eq!(edge.next(Direction::Vertical), None);

    // walking an entire lane visits every column exactly once
    let mut seen = 0;
    let mut pos = Some(Position { row: 7, col: 0 });
    while let Some(p) = pos {
        seen += 1;
        pos = p.next(Direction::Horizontal);
    }
    assert_eq!(seen, BOARD_SIZE);
}
