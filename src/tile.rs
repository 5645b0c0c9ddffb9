
use std::fmt;

/// The letter carried by a blank tile before it is given a meaning
pub const BLANK: u8 = b'-';

/// A letter tile. Immutable: a blank that gets assigned a letter is
/// replaced by a fresh tile built with [`Tile::with_letter`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    letter: u8,
    points: u32,
}

impl Tile {
    pub fn new(letter: u8, points: u32) -> Tile {
        Tile {
            letter: letter.to_ascii_uppercase(),
            points,
        }
    }

    /// A zero-point blank tile
    pub fn blank() -> Tile {
        Tile {
            letter: BLANK,
            points: 0,
        }
    }

    /// A tile for `letter` at its standard point value.
    ///
    /// This is how a blank acquires a concrete identity: the caller picks a
    /// letter and swaps the blank for the returned tile. None if `letter` is
    /// not an ASCII letter.
    pub fn with_letter(letter: char) -> Option<Tile> {
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        let letter = (letter as u8).to_ascii_uppercase();
        Some(Tile {
            letter,
            points: letter_points(letter),
        })
    }

    pub fn letter(&self) -> u8 {
        self.letter
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn is_blank(&self) -> bool {
        self.letter == BLANK
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter as char)
    }
}

/// The standard point value of a letter (either case); 0 for the blank marker
pub fn letter_points(letter: u8) -> u32 {
    match letter.to_ascii_lowercase() {
        b'a' | b'e' | b'i' | b'o' | b'n' | b'r' | b't' | b'l' | b's' | b'u' => 1,
        b'd' | b'g' => 2,
        b'b' | b'c' | b'm' | b'p' => 3,
        b'f' | b'h' | b'v' | b'w' | b'y' => 4,
        b'k' => 5,
        b'j' | b'x' => 8,
        b'q' | b'z' => 10,
        BLANK => 0,
        other => {
            log::warn!("unrecognized letter for score {}", other);
            0
        }
    }
}

#[test]
fn standard_points() {
    assert_eq!(letter_points(b'E'), 1);
    assert_eq!(letter_points(b'c'), 3);
    assert_eq!(letter_points(b'Q'), 10);
    assert_eq!(letter_points(BLANK), 0);
}

#[test]
fn blank_substitution() {
    let blank = Tile::blank();
    assert!(blank.is_blank());
    assert_eq!(blank.points(), 0);

    let swapped = Tile::with_letter('z').unwrap();
    assert_eq!(swapped.letter(), b'Z');
    assert_eq!(swapped.points(), 10);
    // the blank itself is untouched
    assert!(blank.is_blank());

    assert_eq!(Tile::with_letter('-'), None);
    assert_eq!(Tile::with_letter('3'), None);
}
