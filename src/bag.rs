
use rand::seq::SliceRandom;
use rand::Rng;

use crate::player::Player;
use crate::tile::{Tile, BLANK};
use crate::RACK_SIZE;

/// The standard 100-tile distribution: (letter, points, count).
/// 98 lettered tiles plus 2 blanks.
const DISTRIBUTION: &[(u8, u32, usize)] = &[
    (BLANK, 0, 2),
    (b'E', 1, 12),
    (b'A', 1, 9),
    (b'I', 1, 9),
    (b'O', 1, 8),
    (b'N', 1, 6),
    (b'R', 1, 6),
    (b'T', 1, 6),
    (b'L', 1, 4),
    (b'S', 1, 4),
    (b'U', 1, 4),
    (b'D', 2, 4),
    (b'G', 2, 3),
    (b'B', 3, 2),
    (b'C', 3, 2),
    (b'M', 3, 2),
    (b'P', 3, 2),
    (b'F', 4, 2),
    (b'H', 4, 2),
    (b'V', 4, 2),
    (b'W', 4, 2),
    (b'Y', 4, 2),
    (b'K', 5, 1),
    (b'J', 8, 1),
    (b'X', 8, 1),
    (b'Q', 10, 1),
    (b'Z', 10, 1),
];

/// The shared pool of undrawn tiles. Shuffled once at construction and
/// drawn from the front; never refilled.
pub struct Bag {
    tiles: Vec<Tile>,
}

impl Bag {
    pub fn new(rng: &mut impl Rng) -> Bag {
        let mut tiles = Vec::with_capacity(100);
        for &(letter, points, count) in DISTRIBUTION {
            for _ in 0..count {
                tiles.push(Tile::new(letter, points));
            }
        }
        tiles.shuffle(rng);
        Bag { tiles }
    }

    /// The next tile, or None once the bag has run dry (a normal
    /// end-of-game condition, not a fault)
    pub fn draw(&mut self) -> Option<Tile> {
        if self.tiles.is_empty() {
            None
        } else {
            Some(self.tiles.remove(0))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Draws until the rack holds seven tiles or the bag empties
    pub fn fill_rack(&mut self, player: &mut Player) {
        while player.rack_len() < RACK_SIZE {
            let tile = match self.draw() {
                Some(tile) => tile,
                None => break,
            };
            player.add_tile(tile);
        }
    }
}

#[cfg(test)]
fn seeded_rng() -> impl Rng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(7)
}

#[test]
fn standard_distribution() {
    let bag = Bag::new(&mut seeded_rng());
    assert_eq!(bag.len(), 100);

    let mut counts = [0usize; 256];
    for tile in &bag.tiles {
        counts[tile.letter() as usize] += 1;
    }
    assert_eq!(counts[BLANK as usize], 2);
    assert_eq!(counts[b'E' as usize], 12);
    assert_eq!(counts[b'A' as usize], 9);
    assert_eq!(counts[b'Q' as usize], 1);
    assert_eq!(counts[b'Z' as usize], 1);
}

#[test]
fn draws_to_exhaustion() {
    let mut bag = Bag::new(&mut seeded_rng());
    for _ in 0..100 {
        assert!(bag.draw().is_some());
    }
    assert!(bag.is_empty());
    assert_eq!(bag.draw(), None);
}

#[test]
fn fill_rack_stops_at_capacity() {
    let mut bag = Bag::new(&mut seeded_rng());
    let mut player = Player::new();
    bag.fill_rack(&mut player);
    assert_eq!(player.rack_len(), RACK_SIZE);
    assert_eq!(bag.len(), 100 - RACK_SIZE);

    // topping up an already full rack draws nothing
    bag.fill_rack(&mut player);
    assert_eq!(bag.len(), 100 - RACK_SIZE);
}
