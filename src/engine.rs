
use std::collections::HashSet;

use crate::board::{Board, Bonus, CENTER};
use crate::dictionary::Dictionary;
use crate::player::Player;
use crate::tile::Tile;
use crate::{Direction, Position, BOARD_SIZE};

/// Validates and scores one turn at a time.
///
/// Tiles placed since the last confirmed turn live in an ordered log; a
/// successful [`Engine::check_board`] commits them into the set of occupied
/// cells, after which they stop earning bonuses.
pub struct Engine {
    pub(crate) board: Board,
    dict: Dictionary,
    /// Tiles of the current, not yet confirmed turn, in placement order
    pub(crate) turn: Vec<(Position, Tile)>,
    /// Cells confirmed by earlier turns
    pub(crate) committed: HashSet<Position>,
    /// True until the first successful commit; the first word must cover
    /// the center cell
    pub(crate) initial_move: bool,
}

impl Engine {
    pub fn new(board: Board, dict: Dictionary) -> Engine {
        Engine {
            board,
            dict,
            turn: Vec::new(),
            committed: HashSet::new(),
            initial_move: true,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dict
    }

    pub fn is_initial_move(&self) -> bool {
        self.initial_move
    }

    pub fn turn_len(&self) -> usize {
        self.turn.len()
    }

    pub fn is_committed(&self, pos: Position) -> bool {
        self.committed.contains(&pos)
    }

    /// Writes `tile` into an empty cell and records it on the turn log;
    /// false if the cell is occupied.
    pub fn place_tile(&mut self, pos: Position, tile: Tile) -> bool {
        if !self.board.is_empty_at(pos) {
            return false;
        }
        self.board.set_tile(pos, tile);
        self.turn.push((pos, tile));
        true
    }

    /// Takes back the most recently placed tile of the current turn,
    /// returning it to `player`'s rack. No-op when nothing is pending.
    pub fn undo_last_move(&mut self, player: &mut Player) {
        let (pos, tile) = match self.turn.pop() {
            Some(entry) => entry,
            None => {
                log::debug!("nothing to undo");
                return;
            }
        };
        self.board.take_tile(pos);
        player.add_tile(tile);
    }

    /// Takes back every tile of the current turn (rejected submission)
    pub fn rollback_turn(&mut self, player: &mut Player) {
        while !self.turn.is_empty() {
            self.undo_last_move(player);
        }
    }

    /// Validates the tiles placed this turn and, if the move is legal,
    /// awards the score to `player` and commits the turn. On rejection
    /// nothing is mutated; the caller rolls the placement back.
    pub fn check_board(&mut self, player: &mut Player) -> bool {
        // a one-tile opening cannot form a word (only the exactly-1 case
        // is caught here, matching the reference rules)
        if self.initial_move && self.turn.len() == 1 {
            log::debug!("rejected: opening move of a single tile");
            return false;
        }

        let last = match self.turn.last() {
            Some(&(pos, _)) => pos,
            None => {
                log::debug!("rejected: no tiles placed this turn");
                return false;
            }
        };

        if self.board.is_empty_at(CENTER) {
            log::debug!("rejected: center cell is not covered");
            return false;
        }

        let horizontal = self.connected_along(last, Direction::Horizontal);
        let vertical = self.connected_along(last, Direction::Vertical);
        if !horizontal && !vertical {
            log::debug!("rejected: placed tiles are not one contiguous line");
            return false;
        }

        if !self.connected_to_committed() {
            log::debug!("rejected: move does not touch any earlier word");
            return false;
        }

        if !self.words_legal(Direction::Horizontal) || !self.words_legal(Direction::Vertical) {
            return false;
        }

        let score = if horizontal && !vertical {
            let start = self.run_start(last, Direction::Horizontal);
            self.score_word(start, Direction::Horizontal)
                + self.cross_words_score(Direction::Vertical)
        } else if vertical && !horizontal {
            let start = self.run_start(last, Direction::Vertical);
            self.score_word(start, Direction::Vertical)
                + self.cross_words_score(Direction::Horizontal)
        } else {
            // a single tile closing a word in both directions at once
            let h = self.run_start(last, Direction::Horizontal);
            let v = self.run_start(last, Direction::Vertical);
            self.score_word(h, Direction::Horizontal) + self.score_word(v, Direction::Vertical)
        };

        player.add_score(score);
        for (pos, _) in self.turn.drain(..) {
            self.committed.insert(pos);
        }
        self.initial_move = false;
        true
    }

    /// First cell of the contiguous occupied run containing `pos`
    fn run_start(&self, mut pos: Position, dir: Direction) -> Position {
        while let Some(prev) = pos.prev(dir) {
            if self.board.is_empty_at(prev) {
                break;
            }
            pos = prev;
        }
        pos
    }

    fn placed_this_turn(&self, pos: Position) -> bool {
        self.turn.iter().any(|&(p, _)| p == pos)
    }

    /// Whether every placed tile sits on the single occupied run through
    /// the most recently placed cell, along `dir`
    fn connected_along(&self, last: Position, dir: Direction) -> bool {
        let mut count = 0;
        let mut cursor = Some(self.run_start(last, dir));
        while let Some(pos) = cursor {
            if self.board.is_empty_at(pos) {
                break;
            }
            if self.placed_this_turn(pos) {
                count += 1;
            }
            cursor = pos.next(dir);
        }
        count == self.turn.len()
    }

    /// Walks from `start` away along `dir` through occupied cells, looking
    /// for one committed in an earlier turn
    fn reaches_committed(&self, start: Position, dir: Direction, forward: bool) -> bool {
        let mut pos = start;
        loop {
            let next = if forward { pos.next(dir) } else { pos.prev(dir) };
            pos = match next {
                Some(p) if !self.board.is_empty_at(p) => p,
                _ => return false,
            };
            if self.committed.contains(&pos) {
                return true;
            }
        }
    }

    /// A move after the opening one must chain, through occupied cells,
    /// to something played before
    fn connected_to_committed(&self) -> bool {
        if self.committed.is_empty() {
            return true;
        }
        self.turn.iter().any(|&(pos, _)| {
            self.reaches_committed(pos, Direction::Horizontal, false)
                || self.reaches_committed(pos, Direction::Horizontal, true)
                || self.reaches_committed(pos, Direction::Vertical, false)
                || self.reaches_committed(pos, Direction::Vertical, true)
        })
    }

    /// Every run of two or more consecutive tiles along `dir`, across the
    /// whole board, must be a dictionary word
    fn words_legal(&self, dir: Direction) -> bool {
        for lane in 0..BOARD_SIZE {
            let mut word = String::new();
            for offset in 0..BOARD_SIZE {
                let pos = match dir {
                    Direction::Horizontal => Position { row: lane, col: offset },
                    Direction::Vertical => Position { row: offset, col: lane },
                };
                match self.board.tile_at(pos) {
                    Some(tile) => word.push(tile.letter() as char),
                    None => {
                        if word.len() > 1 && !self.dict.verify(&word) {
                            log::debug!("rejected: {:?} is not a word", word);
                            return false;
                        }
                        word.clear();
                    }
                }
            }
            if word.len() > 1 && !self.dict.verify(&word) {
                log::debug!("rejected: {:?} is not a word", word);
                return false;
            }
        }
        true
    }

    /// Word-level bonus contribution of one cell. Additive: the final
    /// multiplier is 1 plus the contributions of every fresh bonus cell,
    /// so two double-word cells in one word give x3.
    fn word_bonus(&self, pos: Position) -> u32 {
        if self.committed.contains(&pos) {
            return 0;
        }
        match self.board.bonus_at(pos) {
            Some(Bonus::TripleWord) => 3,
            Some(Bonus::DoubleWord) | Some(Bonus::Center) => 2,
            _ => 0,
        }
    }

    /// Letter multiplier of one cell; bonuses only count while the cell
    /// is uncommitted
    fn letter_bonus(&self, pos: Position) -> u32 {
        if self.committed.contains(&pos) {
            return 1;
        }
        match self.board.bonus_at(pos) {
            Some(Bonus::TripleLetter) => 3,
            Some(Bonus::DoubleLetter) => 2,
            _ => 1,
        }
    }

    /// Score of the occupied run beginning at `start` along `dir`. A run
    /// of a single cell is a crossing check, not a word, and scores 0.
    pub fn score_word(&self, start: Position, dir: Direction) -> u32 {
        let mut multiplier = 1;
        let mut letters = 0;
        let mut run_len = 0;
        let mut cursor = Some(start);
        while let Some(pos) = cursor {
            let tile = match self.board.tile_at(pos) {
                Some(tile) => tile,
                None => break,
            };
            multiplier += self.word_bonus(pos);
            letters += tile.points() * self.letter_bonus(pos);
            run_len += 1;
            cursor = pos.next(dir);
        }
        if run_len < 2 {
            return 0;
        }
        letters * multiplier
    }

    /// Sum of the words along `cross_dir` running through each tile placed
    /// this turn (tiles with no neighbors in that direction contribute 0)
    fn cross_words_score(&self, cross_dir: Direction) -> u32 {
        self.turn
            .iter()
            .map(|&(pos, _)| self.score_word(self.run_start(pos, cross_dir), cross_dir))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::letter_points;

    fn tile(letter: u8) -> Tile {
        Tile::new(letter, letter_points(letter))
    }

    fn engine_with(words: &[&str]) -> Engine {
        Engine::new(Board::new(), Dictionary::from_words(words.to_vec()))
    }

    fn place_word(engine: &mut Engine, word: &str, start: Position, dir: Direction) {
        let mut pos = Some(start);
        for byte in word.bytes() {
            let p = pos.unwrap();
            if engine.board().is_empty_at(p) {
                assert!(engine.place_tile(p, tile(byte)));
            }
            pos = p.next(dir);
        }
    }

    #[test]
    fn empty_turn_is_rejected() {
        let mut engine = engine_with(&["cat"]);
        let mut player = Player::new();
        assert!(!engine.check_board(&mut player));
    }

    #[test]
    fn opening_move_must_cover_center() {
        let mut engine = engine_with(&["cat"]);
        let mut player = Player::new();
        place_word(&mut engine, "CAT", Position { row: 3, col: 3 }, Direction::Horizontal);
        assert!(!engine.check_board(&mut player));
        assert_eq!(player.score(), 0);
    }

    #[test]
    fn opening_single_tile_is_rejected() {
        let mut engine = engine_with(&["cat"]);
        let mut player = Player::new();
        assert!(engine.place_tile(CENTER, tile(b'C')));
        assert!(!engine.check_board(&mut player));
    }

    #[test]
    fn cat_over_center_scores_fifteen() {
        let mut engine = engine_with(&["cat"]);
        let mut player = Player::new();
        // C(3) A(1) T(1) ending on the center cell, which doubles the word
        place_word(&mut engine, "CAT", Position { row: 7, col: 5 }, Direction::Horizontal);
        assert!(engine.check_board(&mut player));
        assert_eq!(player.score(), 15);
        assert!(!engine.is_initial_move());
        assert_eq!(engine.turn_len(), 0);
        assert!(engine.is_committed(CENTER));
    }

    #[test]
    fn gap_in_placement_fails_connectivity() {
        let mut engine = engine_with(&["cat"]);
        let mut player = Player::new();
        assert!(engine.place_tile(Position { row: 7, col: 7 }, tile(b'C')));
        assert!(engine.place_tile(Position { row: 7, col: 9 }, tile(b'T')));
        assert!(!engine.check_board(&mut player));
        assert_eq!(player.score(), 0);
    }

    #[test]
    fn illegal_word_rejects_whole_turn() {
        let mut engine = engine_with(&["cat"]);
        let mut player = Player::new();
        place_word(&mut engine, "CTA", Position { row: 7, col: 6 }, Direction::Horizontal);
        assert!(!engine.check_board(&mut player));
        assert_eq!(player.score(), 0);
    }

    #[test]
    fn second_move_must_touch_earlier_word() {
        let mut engine = engine_with(&["cat", "dog", "at"]);
        let mut player = Player::new();
        place_word(&mut engine, "CAT", Position { row: 7, col: 6 }, Direction::Horizontal);
        assert!(engine.check_board(&mut player));

        // far away from everything played so far
        place_word(&mut engine, "DOG", Position { row: 0, col: 0 }, Direction::Horizontal);
        assert!(!engine.check_board(&mut player));
        engine.rollback_turn(&mut player);

        // hooking onto the A of CAT works
        place_word(&mut engine, "AT", Position { row: 7, col: 7 }, Direction::Vertical);
        assert!(engine.check_board(&mut player));
    }

    #[test]
    fn crossing_words_are_scored() {
        let mut engine = engine_with(&["cat", "at", "ta"]);
        let mut player = Player::new();
        place_word(&mut engine, "CAT", Position { row: 7, col: 6 }, Direction::Horizontal);
        assert!(engine.check_board(&mut player));
        let after_first = player.score();

        // TA played under CAT's A: the vertical word AT is formed through
        // the committed A, plus nothing else
        assert!(engine.place_tile(Position { row: 8, col: 7 }, tile(b'T')));
        assert!(engine.check_board(&mut player));
        // A (committed, face value 1) + T (fresh, 1); (8,7) carries no bonus
        assert_eq!(player.score(), after_first + 2);
    }

    #[test]
    fn word_multiplier_compounds_additively() {
        let mut engine = engine_with(&[]);
        // row 0 crosses triple-word cells at (0,0) and (0,7) and the
        // double-letter cell at (0,3)
        place_word(&mut engine, "ABCDEFGH", Position { row: 0, col: 0 }, Direction::Horizontal);
        let letters = 1 + 3 + 3 + 2 * 2 + 1 + 4 + 2 + 4;
        // 1 + 3 + 3, not 3 * 3
        assert_eq!(
            engine.score_word(Position { row: 0, col: 0 }, Direction::Horizontal),
            letters * 7
        );
    }

    #[test]
    fn committed_cells_lose_their_bonuses() {
        let mut engine = engine_with(&["cat", "cats"]);
        let mut player = Player::new();
        place_word(&mut engine, "CAT", Position { row: 7, col: 5 }, Direction::Horizontal);
        assert!(engine.check_board(&mut player));
        assert_eq!(player.score(), 15);

        // extending to CATS: the center's word bonus is spent, so the word
        // scores at face value plus the new S
        assert!(engine.place_tile(Position { row: 7, col: 8 }, tile(b'S')));
        assert!(engine.check_board(&mut player));
        assert_eq!(player.score(), 15 + 6);
    }

    #[test]
    fn undo_returns_tile_and_clears_cell() {
        let mut engine = engine_with(&["cat"]);
        let mut player = Player::new();
        let pos = Position { row: 7, col: 7 };
        let placed = tile(b'Q');
        assert!(engine.place_tile(pos, placed));
        assert_eq!(player.rack_len(), 0);

        engine.undo_last_move(&mut player);
        assert!(engine.board().is_empty_at(pos));
        assert_eq!(player.rack()[0], Some(placed));
        assert_eq!(engine.turn_len(), 0);

        // nothing left to undo: a no-op, not a fault
        engine.undo_last_move(&mut player);
        assert_eq!(player.rack_len(), 1);
    }

    #[test]
    fn occupied_cells_cannot_be_replaced() {
        let mut engine = engine_with(&[]);
        let pos = Position { row: 2, col: 2 };
        assert!(engine.place_tile(pos, tile(b'A')));
        assert!(!engine.place_tile(pos, tile(b'B')));
        assert_eq!(engine.turn_len(), 1);
    }
}
