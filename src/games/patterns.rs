//! Marking and pattern matching
//!
//! Marks are a 25-bit set, bit `row * 5 + col`. A pattern is a list of
//! alternative cell masks; it is satisfied when any alternative is fully
//! covered by the marks.

use crate::games::types::{Card, Cell, GameType, PatternName, GRID};
use std::collections::HashSet;

/// Set of marked `(row, col)` positions on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkedCells(u32);

const fn bit(row: usize, col: usize) -> u32 {
    1 << (row * GRID + col)
}

const fn mask_of(cells: &[(usize, usize)]) -> u32 {
    let mut mask = 0;
    let mut i = 0;
    while i < cells.len() {
        mask |= bit(cells[i].0, cells[i].1);
        i += 1;
    }
    mask
}

impl MarkedCells {
    pub const ALL: MarkedCells = MarkedCells((1 << (GRID * GRID)) - 1);

    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, row: usize, col: usize) {
        self.0 |= bit(row, col);
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.0 & bit(row, col) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    fn covers(&self, mask: u32) -> bool {
        self.0 & mask == mask
    }
}

impl FromIterator<(usize, usize)> for MarkedCells {
    fn from_iter<T: IntoIterator<Item = (usize, usize)>>(iter: T) -> Self {
        let mut marks = MarkedCells::empty();
        for (row, col) in iter {
            marks.insert(row, col);
        }
        marks
    }
}

/// Whether one cell counts as marked given the called numbers
pub fn is_cell_marked(cell: Cell, called: &HashSet<u8>, game_type: GameType) -> bool {
    match (cell, game_type) {
        (Cell::Free, _) => true,
        (Cell::Single { value }, GameType::Classic) => called.contains(&value),
        (Cell::Pair { first, second }, GameType::DualAction) => {
            called.contains(&first) || called.contains(&second)
        }
        // A cell whose shape disagrees with the card type never marks
        _ => false,
    }
}

/// Marked positions of `card` for the given called numbers
pub fn marked_cells(card: &Card, called: &HashSet<u8>, game_type: GameType) -> MarkedCells {
    card.cells()
        .filter(|(_, cell)| is_cell_marked(*cell, called, game_type))
        .map(|(pos, _)| pos)
        .collect()
}

const SINGLE_LINE: [u32; 12] = [
    // rows
    mask_of(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]),
    mask_of(&[(1, 0), (1, 1), (1, 2), (1, 3), (1, 4)]),
    mask_of(&[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)]),
    mask_of(&[(3, 0), (3, 1), (3, 2), (3, 3), (3, 4)]),
    mask_of(&[(4, 0), (4, 1), (4, 2), (4, 3), (4, 4)]),
    // columns
    mask_of(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]),
    mask_of(&[(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)]),
    mask_of(&[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]),
    mask_of(&[(0, 3), (1, 3), (2, 3), (3, 3), (4, 3)]),
    mask_of(&[(0, 4), (1, 4), (2, 4), (3, 4), (4, 4)]),
    // diagonals
    mask_of(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]),
    mask_of(&[(0, 4), (1, 3), (2, 2), (3, 1), (4, 0)]),
];

const FOUR_CORNERS: [u32; 1] = [mask_of(&[(0, 0), (0, 4), (4, 0), (4, 4)])];

const BLACKOUT: [u32; 1] = [MarkedCells::ALL.0];

const LETTER_X: [u32; 1] = [mask_of(&[
    (0, 0),
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (0, 4),
    (1, 3),
    (3, 1),
    (4, 0),
])];

const POSTAGE_STAMP: [u32; 4] = [
    mask_of(&[(0, 0), (0, 1), (1, 0), (1, 1)]),
    mask_of(&[(0, 3), (0, 4), (1, 3), (1, 4)]),
    mask_of(&[(3, 0), (3, 1), (4, 0), (4, 1)]),
    mask_of(&[(3, 3), (3, 4), (4, 3), (4, 4)]),
];

impl PatternName {
    /// Alternative cell masks making up this pattern
    fn alternatives(&self) -> &'static [u32] {
        match self {
            PatternName::SingleLine => &SINGLE_LINE,
            PatternName::FourCorners => &FOUR_CORNERS,
            PatternName::Blackout => &BLACKOUT,
            PatternName::LetterX => &LETTER_X,
            PatternName::PostageStamp => &POSTAGE_STAMP,
        }
    }

    /// Number of alternative shapes that satisfy this pattern
    pub fn alternative_count(&self) -> usize {
        self.alternatives().len()
    }

    /// Coordinates of each alternative, row-major
    pub fn coordinates(&self) -> Vec<Vec<(usize, usize)>> {
        self.alternatives()
            .iter()
            .map(|mask| {
                (0..GRID * GRID)
                    .filter(|&i| mask & (1u32 << i) != 0)
                    .map(|i| (i / GRID, i % GRID))
                    .collect()
            })
            .collect()
    }
}

/// True when any alternative of `pattern` is fully marked
pub fn satisfied(marked: MarkedCells, pattern: PatternName) -> bool {
    pattern.alternatives().iter().any(|mask| marked.covers(*mask))
}

/// Mark a card and check it against `pattern` in one step
pub fn card_wins(card: &Card, called: &HashSet<u8>, pattern: PatternName) -> bool {
    satisfied(marked_cells(card, called, card.game_type()), pattern)
}
