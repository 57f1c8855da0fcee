//! Text rendering of cards, call boards and progress

use crate::games::patterns::MarkedCells;
use crate::games::types::{column_range, Card, Cell, Letter, GRID, MAX_NUMBER};
use std::collections::HashSet;
use std::fmt::Write;

const CELL_WIDTH: usize = 9;
const BAR_SEGMENTS: usize = 10;

fn cell_label(cell: Cell) -> String {
    match cell {
        Cell::Free => "FREE".to_string(),
        Cell::Single { value } => value.to_string(),
        Cell::Pair { first, second } => format!("{}/{}", first, second),
    }
}

/// 5x5 grid under a `B I N G O` header; marked cells are bracketed
pub fn render_card(card: &Card, marked: MarkedCells) -> String {
    let mut out = String::new();

    for letter in [Letter::B, Letter::I, Letter::N, Letter::G, Letter::O] {
        let _ = write!(out, "{:^width$}", letter.to_string(), width = CELL_WIDTH);
    }
    out.push('\n');

    for (r, row) in card.rows().iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let label = cell_label(*cell);
            let label = if marked.contains(r, c) {
                format!("[{}]", label)
            } else {
                label
            };
            let _ = write!(out, "{:^width$}", label, width = CELL_WIDTH);
        }
        out.push('\n');
    }

    out
}

/// Call board of 1..=75, one line per letter; uncalled numbers show as dots
pub fn render_board(called: &[u8]) -> String {
    let called: HashSet<u8> = called.iter().copied().collect();
    let mut out = String::new();

    for col in 0..GRID {
        let range = column_range(col);
        let _ = write!(out, "{} |", Letter::of(*range.start()));
        for number in range {
            if called.contains(&number) {
                let _ = write!(out, " {:>2}", number);
            } else {
                out.push_str("  ·");
            }
        }
        out.push('\n');
    }

    out
}

/// Ten-segment bar with the share of numbers called
pub fn progress_bar(called_count: usize) -> String {
    let called_count = called_count.min(MAX_NUMBER as usize);
    let filled = called_count * BAR_SEGMENTS / MAX_NUMBER as usize;
    let percent = called_count * 100 / MAX_NUMBER as usize;
    format!(
        "{}{} {}%",
        "▓".repeat(filled),
        "░".repeat(BAR_SEGMENTS - filled),
        percent
    )
}
