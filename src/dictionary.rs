
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::trie::Trie;

/// The words that can be played, loaded from a line-delimited list into a
/// [`Trie`]. Words already on the board are checked against it too.
pub struct Dictionary {
    trie: Trie,
    /// Backing word list, appended to by [`Dictionary::add_word`]
    path: Option<PathBuf>,
}

impl Dictionary {
    /// Loads a `.txt` word list, one word per line. Lines are trimmed and
    /// lowercased; empty lines are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Dictionary> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);
        let mut trie = Trie::new();
        for line in file.lines() {
            let word = line?.trim().to_lowercase();
            if !word.is_empty() {
                trie.insert(&word);
            }
        }
        log::info!("loaded {} words from {}", trie.len(), path.display());
        Ok(Dictionary {
            trie,
            path: Some(path.to_path_buf()),
        })
    }

    /// An in-memory dictionary with no backing file
    pub fn from_words<I, S>(words: I) -> Dictionary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Trie::new();
        for word in words {
            trie.insert(&word.as_ref().trim().to_lowercase());
        }
        Dictionary { trie, path: None }
    }

    /// Whether `word` is playable. Case-insensitive; the empty string is
    /// never a word.
    pub fn verify(&self, word: &str) -> bool {
        self.trie.contains(&word.to_lowercase())
    }

    /// Adds a new word at runtime. Ok(false) for blank input or a word the
    /// dictionary already knows. The word is appended to the backing file
    /// before the trie is touched, so a failed write leaves the dictionary
    /// exactly as it was.
    pub fn add_word(&mut self, word: &str) -> io::Result<bool> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Ok(false);
        }
        if self.verify(&word) {
            log::debug!("{:?} is already in the dictionary", word);
            return Ok(false);
        }
        if let Some(path) = &self.path {
            let mut file = OpenOptions::new().append(true).create(true).open(path)?;
            writeln!(file, "{}", word)?;
        }
        self.trie.insert(&word);
        Ok(true)
    }

    /// Number of distinct words known
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}

#[cfg(test)]
fn scratch_file(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("wordgrid-{}-{}", std::process::id(), name));
    path
}

#[test]
fn verify_is_case_insensitive() {
    let dict = Dictionary::from_words(vec!["Cat", "dog "]);
    assert!(dict.verify("cat"));
    assert!(dict.verify("CAT"));
    assert!(dict.verify("dog"));
    assert!(!dict.verify("cats"));
    assert!(!dict.verify(""));
}

#[test]
fn add_word_rejects_duplicates() {
    let mut dict = Dictionary::from_words(vec!["cat"]);
    assert_eq!(dict.add_word("dog").unwrap(), true);
    assert_eq!(dict.add_word("cat").unwrap(), false);
    assert_eq!(dict.add_word("DOG").unwrap(), false);
    assert_eq!(dict.add_word("  ").unwrap(), false);
    assert!(dict.verify("dog"));
}

#[test]
fn add_word_persists_to_file() {
    let path = scratch_file("add-word");
    std::fs::write(&path, "cat\ndog\n").unwrap();

    let mut dict = Dictionary::from_file(&path).unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.add_word("Bird").unwrap(), true);
    assert!(dict.verify("bird"));

    // a reload sees the appended word
    let reloaded = Dictionary::from_file(&path).unwrap();
    assert_eq!(reloaded.len(), 3);
    assert!(reloaded.verify("bird"));

    std::fs::remove_file(&path).unwrap();
}
