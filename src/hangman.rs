//! Hangman over a short run of study words.
//!
//! Each word allows six wrong guesses; guessing a word completely moves on
//! to the next one with fresh guesses, and finishing the last word wins.

use std::collections::BTreeSet;

use log::info;
use serde::Serialize;

use crate::error::GenerationError;
use crate::rng::WasmRng;
use crate::types::VocabularyItem;

pub const MAX_WRONG_GUESSES: u32 = 6;
pub const WORDS_PER_GAME: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HangmanPhase {
    Playing,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GuessOutcome {
    /// Not a letter, already guessed, or the game is over.
    Ignored,
    Hit,
    Miss,
    /// The current word is complete; play moved to the next word.
    WordComplete,
    Won,
    Lost,
}

pub struct HangmanGame {
    words: Vec<VocabularyItem>,
    index: usize,
    guesses: BTreeSet<char>,
    wrong: u32,
    hint_shown: bool,
    phase: HangmanPhase,
}

impl HangmanGame {
    /// Shuffle the vocabulary and keep up to ten words. Words without a
    /// single letter cannot be guessed and are skipped.
    pub fn new(vocabulary: &[VocabularyItem], rng: &mut WasmRng) -> Result<Self, GenerationError> {
        let mut words: Vec<VocabularyItem> = vocabulary
            .iter()
            .filter(|item| item.word.chars().any(char::is_alphabetic))
            .cloned()
            .collect();
        if words.is_empty() {
            return Err(GenerationError::InsufficientInput { required: 1, found: 0 });
        }
        rng.shuffle(&mut words);
        words.truncate(WORDS_PER_GAME);

        Ok(Self {
            words,
            index: 0,
            guesses: BTreeSet::new(),
            wrong: 0,
            hint_shown: false,
            phase: HangmanPhase::Playing,
        })
    }

    pub fn phase(&self) -> HangmanPhase {
        self.phase
    }

    pub fn word_index(&self) -> usize {
        self.index
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn wrong_guesses(&self) -> u32 {
        self.wrong
    }

    pub fn guesses(&self) -> impl Iterator<Item = char> + '_ {
        self.guesses.iter().copied()
    }

    fn current(&self) -> &VocabularyItem {
        &self.words[self.index]
    }

    fn answer(&self) -> String {
        self.current().word.trim().to_uppercase()
    }

    /// The current word with unguessed letters as `_`. Characters that are
    /// not letters are always shown.
    pub fn masked(&self) -> String {
        self.answer()
            .chars()
            .map(|c| {
                let revealed = self.phase == HangmanPhase::Lost || self.guesses.contains(&c);
                if !c.is_alphabetic() || revealed {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    pub fn show_hint(&mut self) {
        self.hint_shown = true;
    }

    /// The definition, once the hint has been requested.
    pub fn hint(&self) -> Option<&str> {
        self.hint_shown.then(|| self.current().definition.as_str())
    }

    pub fn guess(&mut self, ch: char) -> GuessOutcome {
        if self.phase != HangmanPhase::Playing || !ch.is_alphabetic() {
            return GuessOutcome::Ignored;
        }
        let letter = ch.to_uppercase().next().unwrap_or(ch);
        if !self.guesses.insert(letter) {
            return GuessOutcome::Ignored;
        }

        let answer = self.answer();
        if !answer.contains(letter) {
            self.wrong += 1;
            if self.wrong >= MAX_WRONG_GUESSES {
                info!("hangman lost on word {}", self.index + 1);
                self.phase = HangmanPhase::Lost;
                return GuessOutcome::Lost;
            }
            return GuessOutcome::Miss;
        }

        let complete = answer
            .chars()
            .all(|c| !c.is_alphabetic() || self.guesses.contains(&c));
        if !complete {
            return GuessOutcome::Hit;
        }

        if self.index + 1 < self.words.len() {
            self.index += 1;
            self.guesses.clear();
            self.wrong = 0;
            self.hint_shown = false;
            GuessOutcome::WordComplete
        } else {
            info!("hangman won");
            self.phase = HangmanPhase::Won;
            GuessOutcome::Won
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(words: &[&str]) -> HangmanGame {
        let items: Vec<VocabularyItem> =
            words.iter().map(|w| VocabularyItem::new(w, &format!("means {}", w))).collect();
        HangmanGame::new(&items, &mut WasmRng::from_seed(1)).unwrap()
    }

    #[test]
    fn test_empty_vocabulary() {
        assert!(HangmanGame::new(&[], &mut WasmRng::from_seed(1)).is_err());
    }

    #[test]
    fn test_words_without_letters_are_skipped() {
        let items = vec![
            VocabularyItem::new("123", "a number"),
            VocabularyItem::new("  ", "blank"),
        ];
        assert!(HangmanGame::new(&items, &mut WasmRng::from_seed(1)).is_err());

        let g = game(&["42", "ox", "--"]);
        assert_eq!(g.word_count(), 1);
        assert_eq!(g.masked(), "__");
    }

    #[test]
    fn test_guessing_reveals_letters() {
        let mut g = game(&["well-read"]);
        assert_eq!(g.masked(), "____-____");
        assert_eq!(g.guess('e'), GuessOutcome::Hit);
        assert_eq!(g.masked(), "_E__-_E__");
        assert_eq!(g.guess('E'), GuessOutcome::Ignored);
        assert_eq!(g.guess('3'), GuessOutcome::Ignored);
        assert_eq!(g.guess('z'), GuessOutcome::Miss);
        assert_eq!(g.wrong_guesses(), 1);
    }

    #[test]
    fn test_six_misses_lose() {
        let mut g = game(&["lucid"]);
        for (i, ch) in "qwertz".chars().enumerate() {
            let outcome = g.guess(ch);
            if i < 5 {
                assert_eq!(outcome, GuessOutcome::Miss);
            } else {
                assert_eq!(outcome, GuessOutcome::Lost);
            }
        }
        assert_eq!(g.phase(), HangmanPhase::Lost);
        assert_eq!(g.masked(), "LUCID");
        assert_eq!(g.guess('l'), GuessOutcome::Ignored);
    }

    #[test]
    fn test_completing_words_advances_then_wins() {
        let mut g = game(&["ox", "ax"]);
        let first = g.masked().len();
        assert_eq!(first, 2);

        for ch in ['o', 'a'] {
            g.guess(ch);
        }
        assert_eq!(g.guess('x'), GuessOutcome::WordComplete);
        assert_eq!(g.word_index(), 1);
        assert_eq!(g.guesses().count(), 0);
        assert_eq!(g.wrong_guesses(), 0);

        g.guess('o');
        g.guess('a');
        assert_eq!(g.guess('x'), GuessOutcome::Won);
        assert_eq!(g.phase(), HangmanPhase::Won);
    }

    #[test]
    fn test_hint_and_word_limit() {
        let words: Vec<String> = (0..15).map(|i| format!("word{}", i)).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let mut g = game(&refs);
        assert_eq!(g.word_count(), WORDS_PER_GAME);
        assert_eq!(g.hint(), None);
        g.show_hint();
        assert!(g.hint().unwrap().starts_with("means word"));
    }
}
