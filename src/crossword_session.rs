//! Play state for a generated crossword: cursor, typing direction, the
//! user's letters and solution checking.
//!
//! Every event is total. Events that make no sense in the current state
//! (typing with nothing selected, clicking a black square, keys after the
//! puzzle is solved) leave the session unchanged.

use log::info;
use serde::Serialize;

use crate::crossword::Crossword;
use crate::types::{Clue, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrosswordPhase {
    Selecting,
    Solved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    fn step(self) -> (isize, isize) {
        match self {
            Arrow::Up => (-1, 0),
            Arrow::Down => (1, 0),
            Arrow::Left => (0, -1),
            Arrow::Right => (0, 1),
        }
    }

    fn direction(self) -> Direction {
        match self {
            Arrow::Up | Arrow::Down => Direction::Down,
            Arrow::Left | Arrow::Right => Direction::Across,
        }
    }
}

/// What the board shows for one white square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub number: Option<u32>,
    pub input: Option<char>,
    /// Only filled in once the puzzle is solved.
    pub letter: Option<char>,
    pub selected: bool,
}

pub struct CrosswordSession {
    puzzle: Crossword,
    inputs: Vec<Option<char>>,
    selected: Option<(usize, usize)>,
    direction: Direction,
    phase: CrosswordPhase,
}

impl CrosswordSession {
    pub fn new(puzzle: Crossword) -> Self {
        let size = puzzle.grid.size;
        Self {
            puzzle,
            inputs: vec![None; size * size],
            selected: None,
            direction: Direction::Across,
            phase: CrosswordPhase::Selecting,
        }
    }

    pub fn puzzle(&self) -> &Crossword {
        &self.puzzle
    }

    pub fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phase(&self) -> CrosswordPhase {
        self.phase
    }

    pub fn input(&self, row: usize, col: usize) -> Option<char> {
        self.inputs[row * self.puzzle.grid.size + col]
    }

    fn set_input(&mut self, row: usize, col: usize, value: Option<char>) {
        let size = self.puzzle.grid.size;
        self.inputs[row * size + col] = value;
    }

    /// Select a square; clicking the selected square flips direction.
    pub fn click(&mut self, row: usize, col: usize) {
        if !self.puzzle.grid.is_occupied_at(row as isize, col as isize) {
            return;
        }
        if self.selected == Some((row, col)) {
            self.direction = self.direction.toggled();
        } else {
            self.selected = Some((row, col));
        }
    }

    /// Jump to the start of a clue and type along it.
    pub fn select_clue(&mut self, number: u32, direction: Direction) {
        let start = self
            .puzzle
            .clues
            .iter()
            .find(|clue| clue.number == number && clue.direction == direction)
            .map(|clue| (clue.row, clue.col));

        if let Some(start) = start {
            self.selected = Some(start);
            self.direction = direction;
        }
    }

    /// Move to the nearest white square in the arrow's direction, skipping
    /// black squares. Does not wrap; stays put if there is none.
    pub fn arrow(&mut self, arrow: Arrow) {
        if self.phase == CrosswordPhase::Solved {
            return;
        }
        let Some((row, col)) = self.selected else {
            return;
        };

        self.direction = arrow.direction();

        let (dr, dc) = arrow.step();
        let (mut r, mut c) = (row as isize + dr, col as isize + dc);
        while self.puzzle.grid.in_bounds(r, c) {
            if self.puzzle.grid.is_occupied_at(r, c) {
                self.selected = Some((r as usize, c as usize));
                return;
            }
            r += dr;
            c += dc;
        }
    }

    /// Write a letter into the selected square and step forward if the next
    /// square along the current direction is white.
    pub fn type_letter(&mut self, ch: char) {
        if self.phase == CrosswordPhase::Solved || !ch.is_alphabetic() {
            return;
        }
        let Some((row, col)) = self.selected else {
            return;
        };

        let letter = ch.to_uppercase().next().unwrap_or(ch);
        self.set_input(row, col, Some(letter));
        self.step_selection(1);
    }

    /// Clear the selected square and step back if the previous square along
    /// the current direction is white.
    pub fn backspace(&mut self) {
        if self.phase == CrosswordPhase::Solved {
            return;
        }
        let Some((row, col)) = self.selected else {
            return;
        };

        self.set_input(row, col, None);
        self.step_selection(-1);
    }

    fn step_selection(&mut self, sign: isize) {
        let Some((row, col)) = self.selected else {
            return;
        };
        let (r, c) = self.direction.offset(row as isize, col as isize, sign);
        if self.puzzle.grid.is_occupied_at(r, c) {
            self.selected = Some((r as usize, c as usize));
        }
    }

    /// Compare every white square against the solution. Moves to `Solved`
    /// only when all of them match; there is no per-square feedback.
    pub fn check(&mut self) -> CrosswordPhase {
        if self.phase == CrosswordPhase::Solved {
            return self.phase;
        }

        let size = self.puzzle.grid.size;
        let all_correct = self
            .puzzle
            .grid
            .occupied()
            .all(|(row, col, letter)| self.inputs[row * size + col] == Some(letter));

        if all_correct {
            info!("crossword solved");
            self.phase = CrosswordPhase::Solved;
        }
        self.phase
    }

    /// The clue running through the selected square in the current direction.
    pub fn active_clue(&self) -> Option<&Clue> {
        let (row, col) = self.selected?;
        let id = self.puzzle.grid.get(row, col).word(self.direction)?;
        let word = self.puzzle.placed.get(id)?;
        self.puzzle.clues.iter().find(|clue| {
            clue.row == word.row && clue.col == word.col && clue.direction == word.direction
        })
    }

    /// Solution letter for a square, available once the puzzle is solved.
    pub fn reveal(&self, row: usize, col: usize) -> Option<char> {
        if self.phase != CrosswordPhase::Solved {
            return None;
        }
        self.puzzle.grid.cell_at(row as isize, col as isize)?.letter()
    }

    /// Board contents for rendering, white squares only, row-major.
    pub fn cells(&self) -> Vec<CellView> {
        let solved = self.phase == CrosswordPhase::Solved;
        self.puzzle
            .grid
            .occupied()
            .map(|(row, col, letter)| CellView {
                row,
                col,
                number: self.puzzle.grid.number(row, col),
                input: self.input(row, col),
                letter: solved.then_some(letter),
                selected: self.selected == Some((row, col)),
            })
            .collect()
    }
}
