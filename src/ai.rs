
use std::collections::HashSet;

use crate::board::{Board, CENTER};
use crate::dictionary::Dictionary;
use crate::engine::Engine;
use crate::player::Player;
use crate::tile::Tile;
use crate::{Direction, Position, BOARD_SIZE};

/// A concrete placement proposal: the word, where it starts, which way it
/// runs, and what it scored in trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMove {
    pub word: String,
    pub start: Position,
    pub dir: Direction,
    pub score: u32,
}

/// The automated opponent: a rack plus a greedy permutation search.
///
/// Wildcards on its rack stay the literal `-`, which never matches a
/// dictionary word, so the opponent cannot exploit blanks.
#[derive(Debug, Default)]
pub struct AiPlayer {
    pub player: Player,
    /// Words this opponent has already played, never repeated
    used_words: HashSet<String>,
}

impl AiPlayer {
    pub fn new() -> AiPlayer {
        AiPlayer::default()
    }

    /// Searches every candidate word from the rack against every board
    /// position and orientation, scoring each feasible placement through a
    /// trial [`Engine::check_board`]. Returns the highest-scoring placement,
    /// first found winning ties, or None when nothing scores above zero
    /// (the caller passes the turn).
    pub fn find_best_move(&mut self, engine: &mut Engine) -> Option<BestMove> {
        let candidates = candidate_words(&self.player, engine.dictionary());
        if candidates.is_empty() {
            return None;
        }
        log::debug!("{} candidate words from rack {:?}", candidates.len(), self.player.rack_letters());

        let anchors = anchor_cells(engine.board());

        let mut best: Option<BestMove> = None;
        for word in &candidates {
            if self.used_words.contains(word) {
                continue;
            }
            for &dir in &[Direction::Horizontal, Direction::Vertical] {
                if let Some(found) = self.best_placement(word, dir, engine, &anchors) {
                    if found.score > best.as_ref().map_or(0, |b| b.score) {
                        best = Some(found);
                    }
                }
            }
        }

        let best = best?;
        self.used_words.insert(best.word.clone());
        Some(best)
    }

    /// Best trial score for `word` along `dir` over all start offsets
    fn best_placement(
        &mut self,
        word: &str,
        dir: Direction,
        engine: &mut Engine,
        anchors: &HashSet<Position>,
    ) -> Option<BestMove> {
        let len = word.len();
        if len > BOARD_SIZE {
            return None;
        }
        let must_cover_center = engine.is_initial_move();

        let mut best: Option<BestMove> = None;
        for lane in 0..BOARD_SIZE {
            for offset in 0..=(BOARD_SIZE - len) {
                let start = match dir {
                    Direction::Horizontal => Position { row: lane, col: offset },
                    Direction::Vertical => Position { row: offset, col: lane },
                };
                if must_cover_center {
                    // the opening word has to run through (7,7)
                    if lane != CENTER.row || offset > CENTER.col || offset + len <= CENTER.col {
                        continue;
                    }
                }
                if !can_place(engine.board(), start, dir, word) {
                    continue;
                }
                if !must_cover_center && !touches_anchor(start, dir, len, anchors) {
                    continue;
                }
                let score = {
                    let mut trial = Trial::begin(engine, &mut self.player);
                    trial.place(start, dir, word);
                    trial.run()
                };
                if score > best.as_ref().map_or(0, |b| b.score) {
                    best = Some(BestMove {
                        word: word.to_owned(),
                        start,
                        dir,
                        score,
                    });
                }
            }
        }
        best
    }

    /// Plays `best` for real: takes the needed letters from the rack
    /// (minting a standard-valued tile when the rack lacks one, which
    /// happens when a board tile already covers the position of a rack
    /// letter used twice), places them, and submits the turn. On rejection
    /// the placement is rolled back and false returned.
    pub fn apply_move(&mut self, engine: &mut Engine, best: &BestMove) -> bool {
        let mut cursor = Some(best.start);
        for &byte in best.word.as_bytes() {
            let pos = match cursor {
                Some(pos) => pos,
                None => break,
            };
            if engine.board().is_empty_at(pos) {
                let tile = self
                    .player
                    .find_tile(byte)
                    .and_then(|slot| self.player.remove_at(slot))
                    .or_else(|| Tile::with_letter(byte as char));
                let tile = match tile {
                    Some(tile) => tile,
                    None => break,
                };
                engine.place_tile(pos, tile);
            }
            cursor = pos.next(best.dir);
        }
        if engine.check_board(&mut self.player) {
            true
        } else {
            log::warn!("proposed move {:?} was rejected on application", best.word);
            engine.rollback_turn(&mut self.player);
            false
        }
    }
}

/// Every dictionary word formable as a prefix (length >= 2) of a rack-letter
/// permutation. Repeated rack letters are deduplicated per recursion level,
/// so each distinct letter sequence is tried exactly once.
fn candidate_words(player: &Player, dict: &Dictionary) -> Vec<String> {
    let letters: Vec<u8> = player.rack_letters().bytes().collect();
    let mut used = vec![false; letters.len()];
    let mut prefix = Vec::with_capacity(letters.len());
    let mut found = Vec::new();
    permute(&letters, &mut used, &mut prefix, dict, &mut found);
    found
}

fn permute(
    letters: &[u8],
    used: &mut Vec<bool>,
    prefix: &mut Vec<u8>,
    dict: &Dictionary,
    out: &mut Vec<String>,
) {
    if prefix.len() >= 2 {
        let candidate = prefix
            .iter()
            .map(|&b| b.to_ascii_lowercase() as char)
            .collect::<String>();
        if dict.verify(&candidate) {
            out.push(candidate);
        }
    }
    let mut tried = [false; 256];
    for i in 0..letters.len() {
        if used[i] || tried[letters[i] as usize] {
            continue;
        }
        tried[letters[i] as usize] = true;
        used[i] = true;
        prefix.push(letters[i]);
        permute(letters, used, prefix, dict, out);
        prefix.pop();
        used[i] = false;
    }
}

/// Empty cells adjacent (diagonals included) to an occupied cell; the only
/// places a later word may connect through
fn anchor_cells(board: &Board) -> HashSet<Position> {
    let mut anchors = HashSet::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if board.is_empty_at(Position { row, col }) {
                continue;
            }
            for dr in -1i32..=1 {
                for dc in -1i32..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let (r, c) = (row as i32 + dr, col as i32 + dc);
                    if r < 0 || r >= BOARD_SIZE as i32 || c < 0 || c >= BOARD_SIZE as i32 {
                        continue;
                    }
                    let neighbor = Position {
                        row: r as usize,
                        col: c as usize,
                    };
                    if board.is_empty_at(neighbor) {
                        anchors.insert(neighbor);
                    }
                }
            }
        }
    }
    anchors
}

/// Feasible iff every position the word would occupy is empty or already
/// holds the same letter
fn can_place(board: &Board, start: Position, dir: Direction, word: &str) -> bool {
    let mut cursor = Some(start);
    for &byte in word.as_bytes() {
        let pos = match cursor {
            Some(pos) => pos,
            None => return false,
        };
        if let Some(tile) = board.tile_at(pos) {
            if !tile.letter().eq_ignore_ascii_case(&byte) {
                return false;
            }
        }
        cursor = pos.next(dir);
    }
    true
}

fn touches_anchor(start: Position, dir: Direction, len: usize, anchors: &HashSet<Position>) -> bool {
    let mut cursor = Some(start);
    for _ in 0..len {
        let pos = match cursor {
            Some(pos) => pos,
            None => return false,
        };
        if anchors.contains(&pos) {
            return true;
        }
        cursor = pos.next(dir);
    }
    false
}

/// One trial placement against the live board.
///
/// Dropping the trial puts everything back — simulated tiles removed and
/// un-committed, turn log cleared, score and opening-move flag restored —
/// on every exit path, so a trial is invisible once it goes out of scope.
struct Trial<'a> {
    engine: &'a mut Engine,
    player: &'a mut Player,
    placed: Vec<Position>,
    saved_score: u32,
    saved_initial: bool,
}

impl<'a> Trial<'a> {
    fn begin(engine: &'a mut Engine, player: &'a mut Player) -> Trial<'a> {
        let saved_score = player.score();
        let saved_initial = engine.is_initial_move();
        engine.turn.clear();
        Trial {
            engine,
            player,
            placed: Vec::new(),
            saved_score,
            saved_initial,
        }
    }

    /// Writes the tiles the word needs, skipping positions a matching
    /// letter already covers
    fn place(&mut self, start: Position, dir: Direction, word: &str) {
        let mut cursor = Some(start);
        for &byte in word.as_bytes() {
            let pos = match cursor {
                Some(pos) => pos,
                None => break,
            };
            if self.engine.board().is_empty_at(pos) {
                if let Some(tile) = Tile::with_letter(byte as char) {
                    self.engine.place_tile(pos, tile);
                    self.placed.push(pos);
                }
            }
            cursor = pos.next(dir);
        }
    }

    /// The score delta the placement would earn, 0 if the engine rejects it
    fn run(&mut self) -> u32 {
        if self.engine.check_board(self.player) {
            self.player.score() - self.saved_score
        } else {
            0
        }
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        for pos in self.placed.drain(..) {
            self.engine.board.take_tile(pos);
            self.engine.committed.remove(&pos);
        }
        self.engine.turn.clear();
        self.engine.initial_move = self.saved_initial;
        self.player.set_score(self.saved_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::letter_points;

    fn rack_of(player: &mut Player, letters: &str) {
        for byte in letters.bytes() {
            player.add_tile(Tile::new(byte, letter_points(byte)));
        }
    }

    fn engine_with(words: &[&str]) -> Engine {
        Engine::new(Board::new(), Dictionary::from_words(words.to_vec()))
    }

    #[test]
    fn candidates_come_from_permutation_prefixes() {
        let dict = Dictionary::from_words(vec!["cat", "at", "act", "taco", "dog"]);
        let mut player = Player::new();
        rack_of(&mut player, "CAT");

        let mut words = candidate_words(&player, &dict);
        words.sort();
        // taco needs a letter the rack lacks, dog shares none
        assert_eq!(words, vec!["act", "at", "cat"]);
    }

    #[test]
    fn duplicate_rack_letters_yield_each_word_once() {
        let dict = Dictionary::from_words(vec!["aa"]);
        let mut player = Player::new();
        rack_of(&mut player, "AAA");
        assert_eq!(candidate_words(&player, &dict), vec!["aa"]);
    }

    #[test]
    fn hopeless_rack_returns_no_move() {
        let mut engine = engine_with(&["cat", "dog"]);
        let mut ai = AiPlayer::new();
        rack_of(&mut ai.player, "AAAAAAA");
        assert_eq!(ai.find_best_move(&mut engine), None);
    }

    #[test]
    fn empty_rack_returns_no_move() {
        let mut engine = engine_with(&["cat"]);
        let mut ai = AiPlayer::new();
        assert_eq!(ai.find_best_move(&mut engine), None);
    }

    #[test]
    fn wildcards_are_useless_to_the_search() {
        let mut engine = engine_with(&["cat"]);
        let mut ai = AiPlayer::new();
        rack_of(&mut ai.player, "CA");
        ai.player.add_tile(Tile::blank());
        // C, A and a blank: "ca-" prefixes never verify
        assert_eq!(ai.find_best_move(&mut engine), None);
    }

    #[test]
    fn opening_move_covers_center() {
        let mut engine = engine_with(&["cat", "at", "act"]);
        let mut ai = AiPlayer::new();
        rack_of(&mut ai.player, "CATXXXX");

        let best = ai.find_best_move(&mut engine).expect("a move");
        assert!(best.score > 0);
        // the proposal runs through the center lane
        match best.dir {
            Direction::Horizontal => {
                assert_eq!(best.start.row, 7);
                assert!(best.start.col <= 7 && best.start.col + best.word.len() > 7);
            }
            Direction::Vertical => {
                assert_eq!(best.start.col, 7);
                assert!(best.start.row <= 7 && best.start.row + best.word.len() > 7);
            }
        }

        // the search itself must not have touched anything
        assert!(engine.is_initial_move());
        assert_eq!(engine.turn_len(), 0);
        assert_eq!(ai.player.score(), 0);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                assert!(engine.board().is_empty_at(Position { row, col }));
            }
        }
    }

    #[test]
    fn trial_rollback_restores_everything() {
        let mut engine = engine_with(&["cat", "at", "ta", "tat"]);
        let mut human = Player::new();
        // committed prior state: CAT through the center
        for (i, byte) in "CAT".bytes().enumerate() {
            assert!(engine.place_tile(
                Position { row: 7, col: 5 + i },
                Tile::new(byte, letter_points(byte)),
            ));
        }
        assert!(engine.check_board(&mut human));

        let occupancy_before = |engine: &Engine| {
            let mut tiles = Vec::new();
            for row in 0..BOARD_SIZE {
                for col in 0..BOARD_SIZE {
                    tiles.push(engine.board().tile_at(Position { row, col }));
                }
            }
            tiles
        };
        let snapshot = occupancy_before(&engine);

        let mut ai = AiPlayer::new();
        rack_of(&mut ai.player, "TA");
        let best = ai.find_best_move(&mut engine);
        assert!(best.is_some());

        // the search ran trials through the real engine, but nothing leaked
        assert_eq!(occupancy_before(&engine), snapshot);
        assert_eq!(ai.player.score(), 0);
        assert_eq!(engine.turn_len(), 0);
        assert!(!engine.is_initial_move());
        assert!(engine.is_committed(Position { row: 7, col: 5 }));
        assert!(!engine.is_committed(Position { row: 8, col: 7 }));
    }

    #[test]
    fn apply_move_spends_rack_tiles_and_scores() {
        let mut engine = engine_with(&["cat", "at", "act"]);
        let mut ai = AiPlayer::new();
        rack_of(&mut ai.player, "CAT");

        let best = ai.find_best_move(&mut engine).expect("a move");
        let expected = best.score;
        assert!(ai.apply_move(&mut engine, &best));
        assert_eq!(ai.player.score(), expected);
        assert!(!engine.is_initial_move());
        assert!(ai.player.rack_len() < 3);
    }

    #[test]
    fn words_are_not_repeated_across_turns() {
        let mut engine = engine_with(&["cat", "at", "act"]);
        let mut ai = AiPlayer::new();
        rack_of(&mut ai.player, "CAT");

        let first = ai.find_best_move(&mut engine).expect("a move");
        assert!(ai.apply_move(&mut engine, &first));

        rack_of(&mut ai.player, "CAT");
        if let Some(second) = ai.find_best_move(&mut engine) {
            assert_ne!(second.word, first.word);
        }
    }
}
