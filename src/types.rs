//! Core data types shared by the puzzle generators.
//!
//! The crossword grid uses flat `Vec` storage with row-major layout:
//! `cells[row * size + col]` maps to the JS equivalent `grid[row][col]`.

use serde::{Deserialize, Serialize};

/// Index of a word in a crossword's placed-word list.
pub type WordId = usize;

/// One entry of the user's study list. Read-only to every generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub word: String,
    #[serde(default)]
    pub definition: String,
}

impl VocabularyItem {
    pub fn new(word: &str, definition: &str) -> Self {
        Self {
            word: word.to_string(),
            definition: definition.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// Perpendicular axis, used when crossing an already placed word.
    #[inline(always)]
    pub fn perpendicular(self) -> Self {
        self.toggled()
    }

    /// One step along this axis as `(d_row, d_col)`.
    #[inline(always)]
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    /// Position of the `i`-th letter of a word starting at `(row, col)`.
    #[inline(always)]
    pub fn offset(self, row: isize, col: isize, i: isize) -> (isize, isize) {
        let (dr, dc) = self.step();
        (row + dr * i, col + dc * i)
    }
}

/// Contents of one crossword square.
///
/// An occupied cell always carries a letter and belongs to at least one
/// word; an intersection belongs to exactly one across and one down word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    Occupied {
        letter: char,
        across: Option<WordId>,
        down: Option<WordId>,
    },
}

impl CellState {
    #[inline(always)]
    pub fn is_occupied(&self) -> bool {
        matches!(self, CellState::Occupied { .. })
    }

    #[inline(always)]
    pub fn letter(&self) -> Option<char> {
        match *self {
            CellState::Occupied { letter, .. } => Some(letter),
            CellState::Empty => None,
        }
    }

    pub fn word(&self, direction: Direction) -> Option<WordId> {
        match *self {
            CellState::Occupied { across, down, .. } => match direction {
                Direction::Across => across,
                Direction::Down => down,
            },
            CellState::Empty => None,
        }
    }
}

/// Square crossword grid. Cloning produces an independent copy, so an
/// attempt never aliases the best layout kept so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub size: usize,
    cells: Vec<CellState>,
    numbers: Vec<Option<u32>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![CellState::Empty; size * size],
            numbers: vec![None; size * size],
        }
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> CellState {
        self.cells[row * self.size + col]
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, cell: CellState) {
        self.cells[row * self.size + col] = cell;
    }

    #[inline(always)]
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Bounds-checked lookup for signed coordinates.
    #[inline(always)]
    pub fn cell_at(&self, row: isize, col: isize) -> Option<CellState> {
        if self.in_bounds(row, col) {
            Some(self.get(row as usize, col as usize))
        } else {
            None
        }
    }

    /// False for out-of-bounds positions.
    #[inline(always)]
    pub fn is_occupied_at(&self, row: isize, col: isize) -> bool {
        self.cell_at(row, col).is_some_and(|cell| cell.is_occupied())
    }

    pub fn number(&self, row: usize, col: usize) -> Option<u32> {
        self.numbers[row * self.size + col]
    }

    pub fn set_number(&mut self, row: usize, col: usize, number: Option<u32>) {
        self.numbers[row * self.size + col] = number;
    }

    pub fn clear_numbers(&mut self) {
        self.numbers.iter_mut().for_each(|n| *n = None);
    }

    /// Count occupied cells on the grid.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.letter().map(|letter| (i / self.size, i % self.size, letter))
        })
    }
}

/// A word the placement engine has written into a grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl PlacedWord {
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Grid positions covered by this word, first letter first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dr, dc) = self.direction.step();
        (0..self.len()).map(move |i| {
            (
                self.row + dr as usize * i,
                self.col + dc as usize * i,
            )
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub number: u32,
    pub direction: Direction,
    pub text: String,
    pub row: usize,
    pub col: usize,
    pub word: String,
}
