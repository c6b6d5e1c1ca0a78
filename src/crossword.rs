//! Crossword generation: randomized first-fit placement, best of N attempts.
//!
//! Each attempt shuffles the usable words, lays the first one across the
//! middle row and crosses every following word with the first legal
//! intersection it can find. Words with no legal crossing are dropped for
//! that attempt. The attempt that places the most words wins; ties keep the
//! earlier one. Clue numbers are then assigned in row-major order.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::CrosswordConfig;
use crate::error::{ConfigError, GenerationError};
use crate::placement::{find_intersection, place};
use crate::rng::WasmRng;
use crate::types::{Clue, Direction, Grid, PlacedWord, VocabularyItem};

/// Fewer usable words than this cannot form a crossing.
pub const MIN_CROSSWORD_WORDS: usize = 2;

/// A vocabulary word normalized for the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrosswordEntry {
    pub letters: Vec<char>,
    pub clue: String,
}

impl CrosswordEntry {
    pub fn word(&self) -> String {
        self.letters.iter().collect()
    }
}

/// Words that fit the configured length range and contain no whitespace,
/// uppercased. Definitions are kept as clue text.
pub fn qualifying_words(
    vocabulary: &[VocabularyItem],
    config: &CrosswordConfig,
) -> Vec<CrosswordEntry> {
    vocabulary
        .iter()
        .filter_map(|item| {
            let word = item.word.trim();
            if word.chars().any(char::is_whitespace) {
                return None;
            }
            let letters: Vec<char> = word.chars().flat_map(char::to_uppercase).collect();
            if letters.len() < config.min_word_len || letters.len() > config.max_word_len {
                return None;
            }
            Some(CrosswordEntry {
                letters,
                clue: item.definition.clone(),
            })
        })
        .collect()
}

/// A finished layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Crossword {
    #[serde(skip)]
    pub grid: Grid,
    pub size: usize,
    /// Words in the order they were placed.
    pub placed: Vec<PlacedWord>,
    pub clues: Vec<Clue>,
    /// How many attempts were run.
    pub attempts: u32,
    /// Zero-based index of the attempt that was kept.
    pub best_attempt: u32,
}

impl Crossword {
    /// Number of words that made it into the grid.
    pub fn score(&self) -> usize {
        self.placed.len()
    }
}

/// Result of one randomized attempt.
struct Attempt {
    grid: Grid,
    placed: Vec<PlacedWord>,
    clues: Vec<String>,
}

fn run_attempt(entries: &[CrosswordEntry], size: usize, rng: &mut WasmRng) -> Attempt {
    let mut order: Vec<&CrosswordEntry> = entries.iter().collect();
    rng.shuffle(&mut order);

    let mut grid = Grid::new(size);
    let mut placed: Vec<PlacedWord> = Vec::new();
    let mut clues = Vec::new();

    let mut remaining = order.into_iter();

    if let Some(first) = remaining.next() {
        let row = size / 2;
        let col = (size - first.letters.len()) / 2;
        place(&mut grid, &first.letters, row, col, Direction::Across, 0);
        placed.push(PlacedWord { word: first.word(), row, col, direction: Direction::Across });
        clues.push(first.clue.clone());
    }

    for entry in remaining {
        if let Some((row, col, direction)) = find_intersection(&grid, &placed, &entry.letters) {
            place(&mut grid, &entry.letters, row, col, direction, placed.len());
            placed.push(PlacedWord { word: entry.word(), row, col, direction });
            clues.push(entry.clue.clone());
        }
    }

    Attempt { grid, placed, clues }
}

/// Build a crossword from the vocabulary.
///
/// Fails with `InsufficientInput` when fewer than two words qualify, and
/// with `DegenerateLayout` when no attempt manages to cross two words.
pub fn generate_crossword(
    vocabulary: &[VocabularyItem],
    config: &CrosswordConfig,
    rng: &mut WasmRng,
) -> Result<Crossword, GenerationError> {
    config.validate()?;

    let entries = qualifying_words(vocabulary, config);
    if entries.len() < MIN_CROSSWORD_WORDS {
        warn!("crossword: only {} usable word(s)", entries.len());
        return Err(GenerationError::InsufficientInput {
            required: MIN_CROSSWORD_WORDS,
            found: entries.len(),
        });
    }

    let mut best: Option<(u32, Attempt)> = None;

    for attempt_no in 0..config.attempts {
        let attempt = run_attempt(&entries, config.grid_size, rng);
        debug!(
            "crossword attempt {}: placed {}/{}",
            attempt_no,
            attempt.placed.len(),
            entries.len()
        );

        let improved = match &best {
            Some((_, kept)) => attempt.placed.len() > kept.placed.len(),
            None => true,
        };
        if improved {
            best = Some((attempt_no, attempt));
        }
    }

    let Some((best_attempt, Attempt { mut grid, placed, clues })) = best else {
        return Err(ConfigError::NoAttempts.into());
    };

    if placed.len() < MIN_CROSSWORD_WORDS {
        warn!("crossword: best layout placed {} word(s)", placed.len());
        return Err(GenerationError::DegenerateLayout { placed: placed.len() });
    }

    let clues = number_clues(&mut grid, &placed, &clues);

    info!(
        "crossword: placed {}/{} words (attempt {} of {})",
        placed.len(),
        entries.len(),
        best_attempt + 1,
        config.attempts
    );

    Ok(Crossword {
        size: grid.size,
        grid,
        placed,
        clues,
        attempts: config.attempts,
        best_attempt,
    })
}

/// Assign clue numbers by a row-major scan of word starts and write them
/// into the grid. A square that starts both an across and a down word gets
/// a single number shared by both clues.
///
/// `texts[i]` is the clue text for `placed[i]`. Clues come back ordered by
/// number, across before down.
pub fn number_clues(grid: &mut Grid, placed: &[PlacedWord], texts: &[String]) -> Vec<Clue> {
    grid.clear_numbers();

    let mut starts: BTreeMap<(usize, usize), u32> = BTreeMap::new();
    for word in placed {
        starts.insert((word.row, word.col), 0);
    }
    for (number, ((row, col), slot)) in (1u32..).zip(starts.iter_mut()) {
        *slot = number;
        grid.set_number(*row, *col, Some(number));
    }

    let mut clues: Vec<Clue> = placed
        .iter()
        .zip(texts)
        .map(|(word, text)| Clue {
            number: starts[&(word.row, word.col)],
            direction: word.direction,
            text: text.clone(),
            row: word.row,
            col: word.col,
            word: word.word.clone(),
        })
        .collect();

    clues.sort_by_key(|clue| (clue.number, clue.direction == Direction::Down));
    clues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::can_place;

    fn vocab(words: &[&str]) -> Vec<VocabularyItem> {
        words
            .iter()
            .map(|w| VocabularyItem::new(w, &format!("definition of {}", w)))
            .collect()
    }

    fn study_list() -> Vec<VocabularyItem> {
        vocab(&[
            "crane", "reason", "arcane", "ephemeral", "serene", "tenacious", "lucid",
            "candor", "zealous", "benign", "aloof", "pragmatic", "nuance", "resilient",
        ])
    }

    fn letters(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_qualifying_words_filter() {
        let items = vocab(&["ox", "cat", "ice cream", "abcdefghijk", "abcdefghijkl", "Naïve"]);
        let entries = qualifying_words(&items, &CrosswordConfig::default());
        let words: Vec<String> = entries.iter().map(|e| e.word()).collect();
        assert_eq!(words, vec!["CAT", "ABCDEFGHIJK", "NAÏVE"]);
        assert_eq!(entries[0].clue, "definition of cat");
    }

    #[test]
    fn test_insufficient_input() {
        let mut rng = WasmRng::from_seed(1);
        let items = vocab(&["cat", "a b c", "ox"]);
        let err = generate_crossword(&items, &CrosswordConfig::default(), &mut rng).unwrap_err();
        assert_eq!(err, GenerationError::InsufficientInput { required: 2, found: 1 });
    }

    #[test]
    fn test_degenerate_layout() {
        let mut rng = WasmRng::from_seed(1);
        let err = generate_crossword(&vocab(&["cat", "dog"]), &CrosswordConfig::default(), &mut rng)
            .unwrap_err();
        assert_eq!(err, GenerationError::DegenerateLayout { placed: 1 });
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut rng = WasmRng::from_seed(1);
        let cfg = CrosswordConfig { attempts: 0, ..Default::default() };
        assert!(matches!(
            generate_crossword(&study_list(), &cfg, &mut rng),
            Err(GenerationError::InvalidConfig(_))
        ));

        let cfg = CrosswordConfig { grid_size: usize::MAX, ..Default::default() };
        assert!(matches!(
            generate_crossword(&study_list(), &cfg, &mut rng),
            Err(GenerationError::InvalidConfig(ConfigError::GridTooLarge { .. }))
        ));
    }

    #[test]
    fn test_placement_history_is_legal() {
        for seed in 0..25 {
            let mut rng = WasmRng::from_seed(seed);
            let cw = generate_crossword(&study_list(), &CrosswordConfig::default(), &mut rng)
                .unwrap();

            let mut replay = Grid::new(cw.size);
            for (id, word) in cw.placed.iter().enumerate() {
                let w = letters(&word.word);
                assert!(
                    can_place(&replay, &w, word.row as isize, word.col as isize, word.direction),
                    "seed {} word {} illegal at placement time",
                    seed,
                    word.word
                );
                place(&mut replay, &w, word.row, word.col, word.direction, id);
            }
            replay.clear_numbers();
            let mut final_grid = cw.grid.clone();
            final_grid.clear_numbers();
            assert_eq!(replay, final_grid);
        }
    }

    #[test]
    fn test_intersections_agree_and_no_run_ons() {
        for seed in 0..25 {
            let mut rng = WasmRng::from_seed(seed);
            let cw = generate_crossword(&study_list(), &CrosswordConfig::default(), &mut rng)
                .unwrap();

            for (id, word) in cw.placed.iter().enumerate() {
                for ((r, c), ch) in word.cells().zip(word.word.chars()) {
                    let cell = cw.grid.get(r, c);
                    assert_eq!(cell.letter(), Some(ch));
                    assert_eq!(cell.word(word.direction), Some(id));
                }

                let len = word.len() as isize;
                let (br, bc) = word.direction.offset(word.row as isize, word.col as isize, -1);
                let (ar, ac) = word.direction.offset(word.row as isize, word.col as isize, len);
                assert!(!cw.grid.is_occupied_at(br, bc), "seed {} {} runs on", seed, word.word);
                assert!(!cw.grid.is_occupied_at(ar, ac), "seed {} {} runs on", seed, word.word);
            }
        }
    }

    #[test]
    fn test_repeated_and_prefix_words_never_overlap() {
        let items = vocab(&["cat", "cat", "act", "tact", "acta", "tac", "cta", "catcat"]);
        for seed in 0..50 {
            let mut rng = WasmRng::from_seed(seed);
            let cw = generate_crossword(&items, &CrosswordConfig::default(), &mut rng).unwrap();

            for (id, word) in cw.placed.iter().enumerate() {
                for (r, c) in word.cells() {
                    assert_eq!(
                        cw.grid.get(r, c).word(word.direction),
                        Some(id),
                        "seed {} {} lost a square at ({}, {})",
                        seed,
                        word.word,
                        r,
                        c
                    );
                }

                let len = word.len() as isize;
                let (br, bc) = word.direction.offset(word.row as isize, word.col as isize, -1);
                let (ar, ac) = word.direction.offset(word.row as isize, word.col as isize, len);
                assert!(!cw.grid.is_occupied_at(br, bc), "seed {} {} runs on", seed, word.word);
                assert!(!cw.grid.is_occupied_at(ar, ac), "seed {} {} runs on", seed, word.word);
            }
        }
    }

    #[test]
    fn test_first_word_centered_across() {
        let mut rng = WasmRng::from_seed(3);
        let cw = generate_crossword(&study_list(), &CrosswordConfig::default(), &mut rng).unwrap();
        let first = &cw.placed[0];
        assert_eq!(first.direction, Direction::Across);
        assert_eq!(first.row, 6);
        assert_eq!(first.col, (12 - first.len()) / 2);
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let cfg = CrosswordConfig::default();
        let a = generate_crossword(&study_list(), &cfg, &mut WasmRng::from_seed(99)).unwrap();
        let b = generate_crossword(&study_list(), &cfg, &mut WasmRng::from_seed(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_more_attempts_never_lower_score() {
        let mut previous = 0;
        for attempts in 1..=20 {
            let cfg = CrosswordConfig { attempts, ..Default::default() };
            let cw = generate_crossword(&study_list(), &cfg, &mut WasmRng::from_seed(5)).unwrap();
            assert!(cw.score() >= previous, "score dropped at {} attempts", attempts);
            assert!(cw.best_attempt < attempts);
            previous = cw.score();
        }
    }

    #[test]
    fn test_clues_match_placed_words() {
        let mut rng = WasmRng::from_seed(11);
        let items = study_list();
        let cw = generate_crossword(&items, &CrosswordConfig::default(), &mut rng).unwrap();
        assert_eq!(cw.clues.len(), cw.placed.len());
        for clue in &cw.clues {
            assert_eq!(cw.grid.number(clue.row, clue.col), Some(clue.number));
            assert_eq!(clue.text, format!("definition of {}", clue.word.to_lowercase()));
        }
    }

    #[test]
    fn test_number_clues_row_major_and_shared() {
        let mut grid = Grid::new(12);
        let placed = vec![
            PlacedWord { word: "NEAR".into(), row: 5, col: 6, direction: Direction::Down },
            PlacedWord { word: "CRANE".into(), row: 5, col: 3, direction: Direction::Across },
            PlacedWord { word: "CAT".into(), row: 1, col: 1, direction: Direction::Across },
            PlacedWord { word: "COW".into(), row: 1, col: 1, direction: Direction::Down },
        ];
        for (id, w) in placed.iter().enumerate() {
            place(&mut grid, &letters(&w.word), w.row, w.col, w.direction, id);
        }
        let texts: Vec<String> =
            ["near", "crane", "cat", "cow"].iter().map(|s| s.to_string()).collect();

        let clues = number_clues(&mut grid, &placed, &texts);

        let summary: Vec<(u32, Direction, &str)> =
            clues.iter().map(|c| (c.number, c.direction, c.word.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (1, Direction::Across, "CAT"),
                (1, Direction::Down, "COW"),
                (2, Direction::Across, "CRANE"),
                (3, Direction::Down, "NEAR"),
            ]
        );
        assert_eq!(grid.number(1, 1), Some(1));
        assert_eq!(grid.number(5, 3), Some(2));
        assert_eq!(grid.number(5, 6), Some(3));
        assert_eq!(grid.number(5, 4), None);
    }
}
