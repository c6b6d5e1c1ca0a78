//! Word placement: legality checks and grid mutation for the crossword.
//!
//! Coordinates are signed because a crossing computed from an intersection
//! may start before the grid edge; `can_place` rejects such positions.

use crate::types::{CellState, Direction, Grid, PlacedWord, WordId};

/// Whether `word` may be written starting at `(row, col)` along `direction`.
///
/// Rules, all of which must hold:
/// 1. the whole word lies inside the grid;
/// 2. the squares just before the first letter and just after the last are
///    empty or off the grid (no run-on words);
/// 3. every occupied square along the word already holds the same letter
///    and is not yet part of a word running in `direction`;
/// 4. every square the word newly fills has empty perpendicular neighbors.
pub fn can_place(grid: &Grid, word: &[char], row: isize, col: isize, direction: Direction) -> bool {
    let len = word.len() as isize;
    if len == 0 {
        return false;
    }

    let (end_row, end_col) = direction.offset(row, col, len - 1);
    if !grid.in_bounds(row, col) || !grid.in_bounds(end_row, end_col) {
        return false;
    }

    let (before_row, before_col) = direction.offset(row, col, -1);
    let (after_row, after_col) = direction.offset(row, col, len);
    if grid.is_occupied_at(before_row, before_col) || grid.is_occupied_at(after_row, after_col) {
        return false;
    }

    let (side_dr, side_dc) = direction.perpendicular().step();

    for (i, &ch) in word.iter().enumerate() {
        let (r, c) = direction.offset(row, col, i as isize);
        let cell = grid.get(r as usize, c as usize);
        match cell {
            CellState::Occupied { letter, .. } => {
                if letter != ch || cell.word(direction).is_some() {
                    return false;
                }
            }
            CellState::Empty => {
                if grid.is_occupied_at(r - side_dr, c - side_dc)
                    || grid.is_occupied_at(r + side_dr, c + side_dc)
                {
                    return false;
                }
            }
        }
    }

    true
}

/// Write `word` into the grid, recording `id` as the owning word for
/// `direction` in every square it covers.
///
/// Performs no validation: callers must have checked `can_place` first.
pub fn place(
    grid: &mut Grid,
    word: &[char],
    row: usize,
    col: usize,
    direction: Direction,
    id: WordId,
) {
    let (dr, dc) = direction.step();
    for (i, &ch) in word.iter().enumerate() {
        let r = row + dr as usize * i;
        let c = col + dc as usize * i;
        let (across, down) = match grid.get(r, c) {
            CellState::Occupied { across, down, .. } => (across, down),
            CellState::Empty => (None, None),
        };
        let cell = match direction {
            Direction::Across => CellState::Occupied { letter: ch, across: Some(id), down },
            Direction::Down => CellState::Occupied { letter: ch, across, down: Some(id) },
        };
        grid.set(r, c, cell);
    }
}

/// First legal crossing of `word` with an already placed word.
///
/// Scans placed words in placement order, then the candidate's letters in
/// order, then the placed word's letters in order, and returns the first
/// start position that passes `can_place`. The crossing always runs
/// perpendicular to the word it intersects.
pub fn find_intersection(
    grid: &Grid,
    placed: &[PlacedWord],
    word: &[char],
) -> Option<(usize, usize, Direction)> {
    for existing in placed {
        let existing_letters: Vec<char> = existing.word.chars().collect();
        let direction = existing.direction.perpendicular();

        for (j, &ch) in word.iter().enumerate() {
            for (k, &other) in existing_letters.iter().enumerate() {
                if ch != other {
                    continue;
                }

                let (cross_row, cross_col) = existing.direction.offset(
                    existing.row as isize,
                    existing.col as isize,
                    k as isize,
                );
                let (row, col) = direction.offset(cross_row, cross_col, -(j as isize));

                if can_place(grid, word, row, col, direction) {
                    return Some((row as usize, col as usize, direction));
                }
            }
        }
    }
    None
}
