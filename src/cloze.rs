//! Paragraph cloze: vocabulary marked `**like this**` in a generated
//! paragraph becomes a blank, and the marked words form a shuffled bank to
//! drag back into place.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::rng::WasmRng;

const MARKER: &str = "**";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Segment {
    Text { text: String },
    Blank { index: usize, answer: String },
}

/// Split a paragraph on `**word**` markers. An unmatched `**` or an empty
/// or starred marker is kept as plain text.
pub fn parse_paragraph(paragraph: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut blanks = 0;
    let mut rest = paragraph;

    while let Some(open) = rest.find(MARKER) {
        let after_open = &rest[open + MARKER.len()..];
        let close = after_open
            .find(MARKER)
            .filter(|&end| end > 0 && !after_open[..end].contains('*'));

        match close {
            Some(end) => {
                text.push_str(&rest[..open]);
                if !text.is_empty() {
                    segments.push(Segment::Text { text: std::mem::take(&mut text) });
                }
                segments.push(Segment::Blank {
                    index: blanks,
                    answer: after_open[..end].to_string(),
                });
                blanks += 1;
                rest = &after_open[end + MARKER.len()..];
            }
            None => {
                // Not a marker: keep one '*' and rescan from the next char.
                text.push_str(&rest[..open + 1]);
                rest = &rest[open + 1..];
            }
        }
    }

    text.push_str(rest);
    if !text.is_empty() {
        segments.push(Segment::Text { text });
    }
    segments
}

/// Where a dragged word comes from.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "from", rename_all = "camelCase")]
pub enum DragSource {
    Bank { word: String },
    Blank { index: usize },
}

pub struct ClozeGame {
    segments: Vec<Segment>,
    answers: Vec<String>,
    filled: Vec<Option<String>>,
    bank: Vec<String>,
    show_results: bool,
}

impl ClozeGame {
    pub fn new(paragraph: &str, rng: &mut WasmRng) -> Result<Self, GenerationError> {
        let segments = parse_paragraph(paragraph);
        let answers: Vec<String> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Blank { answer, .. } => Some(answer.clone()),
                Segment::Text { .. } => None,
            })
            .collect();
        if answers.is_empty() {
            return Err(GenerationError::InsufficientInput { required: 1, found: 0 });
        }

        let mut bank = answers.clone();
        rng.shuffle(&mut bank);

        Ok(Self {
            segments,
            filled: vec![None; answers.len()],
            answers,
            bank,
            show_results: false,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn bank(&self) -> &[String] {
        &self.bank
    }

    pub fn blank(&self, index: usize) -> Option<&str> {
        self.filled.get(index).and_then(|w| w.as_deref())
    }

    pub fn showing_results(&self) -> bool {
        self.show_results
    }

    /// Drop a word into a blank. A word already in the target goes back to
    /// the bank. Returns false when the move is not possible.
    pub fn drop_word(&mut self, source: DragSource, target: usize, rng: &mut WasmRng) -> bool {
        if target >= self.filled.len() {
            return false;
        }

        let word = match source {
            DragSource::Bank { word } => {
                let Some(pos) = self.bank.iter().position(|w| *w == word) else {
                    return false;
                };
                self.bank.remove(pos)
            }
            DragSource::Blank { index } => {
                match self.filled.get_mut(index).and_then(Option::take) {
                    Some(word) => word,
                    None => return false,
                }
            }
        };

        if let Some(previous) = self.filled[target].replace(word) {
            self.bank.push(previous);
        }
        rng.shuffle(&mut self.bank);
        self.show_results = false;
        true
    }

    /// Move a blank's word back to the bank.
    pub fn return_to_bank(&mut self, index: usize, rng: &mut WasmRng) -> bool {
        let Some(word) = self.filled.get_mut(index).and_then(Option::take) else {
            return false;
        };
        self.bank.push(word);
        rng.shuffle(&mut self.bank);
        self.show_results = false;
        true
    }

    /// Reveal per-blank results and return how many blanks are correct.
    pub fn check(&mut self) -> usize {
        self.show_results = true;
        self.correct_count()
    }

    fn correct_count(&self) -> usize {
        self.filled
            .iter()
            .zip(&self.answers)
            .filter(|(filled, answer)| filled.as_deref() == Some(answer.as_str()))
            .count()
    }

    /// Per blank: `Some(true/false)` for a filled blank once results are
    /// shown, `None` otherwise.
    pub fn results(&self) -> Vec<Option<bool>> {
        self.filled
            .iter()
            .zip(&self.answers)
            .map(|(filled, answer)| {
                if !self.show_results {
                    return None;
                }
                filled.as_ref().map(|w| w == answer)
            })
            .collect()
    }

    pub fn reset(&mut self, rng: &mut WasmRng) {
        self.filled.iter_mut().for_each(|w| *w = None);
        self.bank = self.answers.clone();
        rng.shuffle(&mut self.bank);
        self.show_results = false;
    }
}

/// Free-text comprehension check: trimmed, case-insensitive equality.
pub fn answer_matches(expected: &str, given: &str) -> bool {
    let given = given.trim();
    !given.is_empty() && given.to_lowercase() == expected.trim().to_lowercase()
}
