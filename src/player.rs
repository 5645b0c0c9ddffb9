
use rand::seq::SliceRandom;
use rand::Rng;

use crate::tile::Tile;
use crate::RACK_SIZE;

/// A player's rack of up to seven tiles plus their running score
#[derive(Debug, Clone, Default)]
pub struct Player {
    rack: [Option<Tile>; RACK_SIZE],
    score: u32,
}

impl Player {
    pub fn new() -> Player {
        Player::default()
    }

    /// Puts `tile` in the first free slot; false if the rack is full
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        for slot in self.rack.iter_mut() {
            if slot.is_none() {
                *slot = Some(tile);
                return true;
            }
        }
        false
    }

    /// Takes the tile out of slot `index`, if there is one
    pub fn remove_at(&mut self, index: usize) -> Option<Tile> {
        self.rack.get_mut(index)?.take()
    }

    /// Slot of the first tile carrying `letter` (either case)
    pub fn find_tile(&self, letter: u8) -> Option<usize> {
        self.rack.iter().position(|slot| match slot {
            Some(tile) => tile.letter().eq_ignore_ascii_case(&letter),
            None => false,
        })
    }

    pub fn rack(&self) -> &[Option<Tile>; RACK_SIZE] {
        &self.rack
    }

    /// Number of occupied slots
    pub fn rack_len(&self) -> usize {
        self.rack.iter().filter(|slot| slot.is_some()).count()
    }

    /// The held letters as one string, blanks included as `-`
    pub fn rack_letters(&self) -> String {
        self.rack
            .iter()
            .flatten()
            .map(|tile| tile.letter() as char)
            .collect()
    }

    pub fn shuffle_rack(&mut self, rng: &mut impl Rng) {
        self.rack.shuffle(rng);
    }

    /// Reorders two slots (drag-and-drop style rearrangement)
    pub fn swap_slots(&mut self, a: usize, b: usize) {
        if a < RACK_SIZE && b < RACK_SIZE {
            self.rack.swap(a, b);
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, delta: u32) {
        self.score += delta;
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

#[cfg(test)]
use crate::tile::letter_points;

#[test]
fn rack_fills_up_to_capacity() {
    let mut player = Player::new();
    for i in 0..RACK_SIZE {
        assert_eq!(player.rack_len(), i);
        assert!(player.add_tile(Tile::new(b'A' + i as u8, 1)));
    }
    assert_eq!(player.rack_len(), RACK_SIZE);
    assert!(!player.add_tile(Tile::new(b'Z', 10)));
    assert_eq!(player.rack_letters(), "ABCDEFG");
}

#[test]
fn remove_and_find() {
    let mut player = Player::new();
    player.add_tile(Tile::new(b'C', letter_points(b'C')));
    player.add_tile(Tile::new(b'A', letter_points(b'A')));
    player.add_tile(Tile::blank());

    assert_eq!(player.find_tile(b'a'), Some(1));
    assert_eq!(player.find_tile(b'Q'), None);

    let taken = player.remove_at(1).unwrap();
    assert_eq!(taken.letter(), b'A');
    assert_eq!(player.rack_len(), 2);
    assert_eq!(player.remove_at(1), None);
    assert_eq!(player.remove_at(99), None);

    // freed slot is reused first
    player.add_tile(Tile::new(b'T', 1));
    assert_eq!(player.rack_letters(), "CT-");
}

#[test]
fn score_bookkeeping() {
    let mut player = Player::new();
    player.add_score(15);
    player.add_score(7);
    assert_eq!(player.score(), 22);
    player.set_score(15);
    assert_eq!(player.score(), 15);
}
