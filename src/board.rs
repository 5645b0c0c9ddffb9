
use std::fmt;

use crate::tile::Tile;
use crate::{Position, BOARD_SIZE};

/// The anchor of the opening move
pub const CENTER: Position = Position { row: 7, col: 7 };

/// A per-cell scoring bonus, consumed the turn the cell is first covered
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Bonus {
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
    /// The (7,7) cell; doubles the opening word like a double-word cell
    Center,
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub tile: Option<Tile>,
    pub bonus: Option<Bonus>,
}

const TRIPLE_WORD: &[(usize, usize)] = &[
    (0, 0), (7, 0), (14, 0), (0, 7), (0, 14), (7, 14), (14, 7), (14, 14),
];

const TRIPLE_LETTER: &[(usize, usize)] = &[
    (5, 1), (9, 1), (1, 5), (5, 5), (9, 5), (13, 5),
    (1, 9), (5, 9), (9, 9), (13, 9), (5, 13), (9, 13),
];

const DOUBLE_WORD: &[(usize, usize)] = &[
    (1, 1), (2, 2), (3, 3), (4, 4), (4, 10), (3, 11), (2, 12), (1, 13),
    (13, 1), (12, 2), (11, 3), (10, 4), (10, 10), (11, 11), (12, 12), (13, 13),
];

const DOUBLE_LETTER: &[(usize, usize)] = &[
    (3, 0), (11, 0), (0, 3), (6, 2), (7, 3), (8, 2), (14, 3),
    (2, 6), (6, 6), (8, 6), (12, 6), (3, 7), (11, 7),
    (2, 8), (6, 8), (8, 8), (12, 8), (0, 11), (7, 11), (14, 11),
    (6, 12), (8, 12), (3, 14), (11, 14),
];

/// The fixed 15x15 grid. Cells are owned in a flat array; neighbor
/// relationships are plain (row, col) arithmetic on [`Position`].
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// An empty board with the standard bonus layout stamped on
    pub fn new() -> Board {
        let mut board = Board {
            cells: vec![
                Cell {
                    tile: None,
                    bonus: None,
                };
                BOARD_SIZE * BOARD_SIZE
            ],
        };
        board.cell_mut(CENTER).bonus = Some(Bonus::Center);
        for &(row, col) in TRIPLE_WORD {
            board.cell_mut(Position { row, col }).bonus = Some(Bonus::TripleWord);
        }
        for &(row, col) in TRIPLE_LETTER {
            board.cell_mut(Position { row, col }).bonus = Some(Bonus::TripleLetter);
        }
        for &(row, col) in DOUBLE_WORD {
            board.cell_mut(Position { row, col }).bonus = Some(Bonus::DoubleWord);
        }
        for &(row, col) in DOUBLE_LETTER {
            board.cell_mut(Position { row, col }).bonus = Some(Bonus::DoubleLetter);
        }
        board
    }

    fn offset(pos: Position) -> usize {
        pos.row * BOARD_SIZE + pos.col
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[Self::offset(pos)]
    }

    fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.cells[Self::offset(pos)]
    }

    pub fn bonus_at(&self, pos: Position) -> Option<Bonus> {
        self.cell(pos).bonus
    }

    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        self.cell(pos).tile
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.cell(pos).tile.is_none()
    }

    pub fn set_tile(&mut self, pos: Position, tile: Tile) {
        self.cell_mut(pos).tile = Some(tile);
    }

    pub fn take_tile(&mut self, pos: Position) -> Option<Tile> {
        self.cell_mut(pos).tile.take()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                match self.tile_at(Position { row, col }) {
                    Some(tile) => write!(f, "{}", tile)?,
                    None => write!(f, ".")?,
                }
            }
            if row + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Presentation hint for a cell's bonus kind
pub fn color_hint(bonus: Option<Bonus>) -> &'static str {
    match bonus {
        None => "#FFFFFF",
        Some(Bonus::DoubleLetter) => "#A5D6A7",
        Some(Bonus::TripleLetter) => "#ADD8E6",
        Some(Bonus::DoubleWord) => "#FFF59D",
        Some(Bonus::TripleWord) => "#EF9A9A",
        Some(Bonus::Center) => "#E57373",
    }
}

#[test]
fn bonus_layout_counts() {
    let board = Board::new();
    let mut counts = std::collections::HashMap::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if let Some(bonus) = board.bonus_at(Position { row, col }) {
                *counts.entry(bonus).or_insert(0) += 1;
            }
        }
    }
    assert_eq!(counts[&Bonus::Center], 1);
    assert_eq!(counts[&Bonus::TripleWord], 8);
    assert_eq!(counts[&Bonus::TripleLetter], 12);
    assert_eq!(counts[&Bonus::DoubleWord], 16);
    assert_eq!(counts[&Bonus::DoubleLetter], 24);
}

#[test]
fn bonus_layout_is_rotation_symmetric() {
    let board = Board::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let here = board.bonus_at(Position { row, col });
            let rotated = board.bonus_at(Position {
                row: BOARD_SIZE - 1 - row,
                col: BOARD_SIZE - 1 - col,
            });
            assert_eq!(here, rotated, "asymmetry at ({}, {})", row, col);
        }
    }
}

#[test]
fn tiles_come_and_go() {
    let mut board = Board::new();
    let pos = Position { row: 4, col: 9 };
    assert!(board.is_empty_at(pos));

    let tile = Tile::with_letter('q').unwrap();
    board.set_tile(pos, tile);
    assert_eq!(board.tile_at(pos), Some(tile));

    assert_eq!(board.take_tile(pos), Some(tile));
    assert!(board.is_empty_at(pos));
    assert_eq!(board.take_tile(pos), None);
}
