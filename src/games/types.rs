use crate::errors::Rejection;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Cards are 5x5
pub const GRID: usize = 5;

/// Highest number that can be called
pub const MAX_NUMBER: u8 = 75;

/// Numbers per column band
pub const COLUMN_SPAN: u8 = 15;

/// Row and column of the free centre cell
pub const FREE_CELL: (usize, usize) = (2, 2);

/// Card shape of a round
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    /// One number per cell
    #[default]
    Classic,
    /// Two numbers per cell, either one marks it
    DualAction,
}

impl GameType {
    pub const ALL: [GameType; 2] = [GameType::Classic, GameType::DualAction];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Classic => "classic",
            GameType::DualAction => "dual_action",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Rejection::UnknownGameType(s.to_string()))
    }
}

/// Named winning shapes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PatternName {
    #[serde(rename = "single_line")]
    SingleLine,
    #[serde(rename = "four_corners")]
    FourCorners,
    #[serde(rename = "blackout")]
    Blackout,
    #[serde(rename = "letter_X")]
    LetterX,
    #[serde(rename = "postage_stamp")]
    PostageStamp,
}

impl PatternName {
    pub const ALL: [PatternName; 5] = [
        PatternName::SingleLine,
        PatternName::FourCorners,
        PatternName::Blackout,
        PatternName::LetterX,
        PatternName::PostageStamp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternName::SingleLine => "single_line",
            PatternName::FourCorners => "four_corners",
            PatternName::Blackout => "blackout",
            PatternName::LetterX => "letter_X",
            PatternName::PostageStamp => "postage_stamp",
        }
    }

    /// Human readable name, e.g. "Four Corners"
    pub fn title(&self) -> &'static str {
        match self {
            PatternName::SingleLine => "Single Line",
            PatternName::FourCorners => "Four Corners",
            PatternName::Blackout => "Blackout",
            PatternName::LetterX => "Letter X",
            PatternName::PostageStamp => "Postage Stamp",
        }
    }
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternName {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternName::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Rejection::UnknownPattern(s.to_string()))
    }
}

/// Column letter of a called number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Letter {
    B,
    I,
    N,
    G,
    O,
    /// Outside 1..=75
    Unknown,
}

impl Letter {
    /// Letter band of `number`; never guesses for out-of-range values
    pub fn of(number: u8) -> Letter {
        match number {
            1..=15 => Letter::B,
            16..=30 => Letter::I,
            31..=45 => Letter::N,
            46..=60 => Letter::G,
            61..=75 => Letter::O,
            _ => Letter::Unknown,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Letter::B => "B",
            Letter::I => "I",
            Letter::N => "N",
            Letter::G => "G",
            Letter::O => "O",
            Letter::Unknown => "?",
        };
        f.write_str(s)
    }
}

/// Inclusive number range of column `col` (0 = B .. 4 = O)
pub fn column_range(col: usize) -> std::ops::RangeInclusive<u8> {
    let low = col as u8 * COLUMN_SPAN + 1;
    low..=low + COLUMN_SPAN - 1
}

/// One square of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Free,
    Single { value: u8 },
    Pair { first: u8, second: u8 },
}

impl Cell {
    /// Numbers printed in this cell
    pub fn values(&self) -> impl Iterator<Item = u8> {
        let (a, b) = match *self {
            Cell::Free => (None, None),
            Cell::Single { value } => (Some(value), None),
            Cell::Pair { first, second } => (Some(first), Some(second)),
        };
        a.into_iter().chain(b)
    }
}

/// A player's 5x5 card.
///
/// Immutable once built; construct through the generator or
/// [`Card::from_rows`], which enforces the column invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    game_type: GameType,
    rows: [[Cell; GRID]; GRID],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("centre cell must be free")]
    CentreNotFree,

    #[error("cell ({row}, {col}) is free but only the centre may be")]
    UnexpectedFree { row: usize, col: usize },

    #[error("cell ({row}, {col}) does not match a {game_type} card")]
    WrongShape { row: usize, col: usize, game_type: GameType },

    #[error("value {value} is outside column {col}")]
    OutOfRange { col: usize, value: u8 },

    #[error("value {value} repeats in column {col}")]
    Duplicate { col: usize, value: u8 },
}

impl Card {
    /// Build a card from explicit rows, validating every invariant
    pub fn from_rows(game_type: GameType, rows: [[Cell; GRID]; GRID]) -> Result<Self, CardError> {
        if rows[FREE_CELL.0][FREE_CELL.1] != Cell::Free {
            return Err(CardError::CentreNotFree);
        }

        for col in 0..GRID {
            let range = column_range(col);
            let mut seen = Vec::with_capacity(GRID * 2);
            for (row, cells) in rows.iter().enumerate() {
                let cell = cells[col];
                match (cell, game_type) {
                    (Cell::Free, _) if (row, col) == FREE_CELL => continue,
                    (Cell::Free, _) => return Err(CardError::UnexpectedFree { row, col }),
                    (Cell::Single { .. }, GameType::Classic) | (Cell::Pair { .. }, GameType::DualAction) => {}
                    _ => return Err(CardError::WrongShape { row, col, game_type }),
                }
                for value in cell.values() {
                    if !range.contains(&value) {
                        return Err(CardError::OutOfRange { col, value });
                    }
                    if seen.contains(&value) {
                        return Err(CardError::Duplicate { col, value });
                    }
                    seen.push(value);
                }
            }
        }

        Ok(Self { game_type, rows })
    }

    /// Generator path; invariants are upheld by construction
    pub(crate) fn from_generated(game_type: GameType, rows: [[Cell; GRID]; GRID]) -> Self {
        Self { game_type, rows }
    }

    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows[row][col]
    }

    pub fn rows(&self) -> &[[Cell; GRID]; GRID] {
        &self.rows
    }

    /// All cells with their coordinates, row-major
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Cell)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| ((r, c), *cell)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_bands() {
        let cases = [
            (1, Letter::B),
            (15, Letter::B),
            (16, Letter::I),
            (30, Letter::I),
            (31, Letter::N),
            (45, Letter::N),
            (46, Letter::G),
            (60, Letter::G),
            (61, Letter::O),
            (75, Letter::O),
        ];
        for (n, letter) in cases {
            assert_eq!(Letter::of(n), letter, "number {}", n);
        }
        assert_eq!(Letter::of(0), Letter::Unknown);
        assert_eq!(Letter::of(76), Letter::Unknown);
        assert_eq!(Letter::of(76).to_string(), "?");
    }

    #[test]
    fn test_column_ranges() {
        assert_eq!(column_range(0), 1..=15);
        assert_eq!(column_range(2), 31..=45);
        assert_eq!(column_range(4), 61..=75);
    }

    #[test]
    fn test_names_parse() {
        assert_eq!("dual_action".parse::<GameType>().unwrap(), GameType::DualAction);
        assert_eq!("letter_X".parse::<PatternName>().unwrap(), PatternName::LetterX);
        assert_eq!(
            "letter_x".parse::<PatternName>(),
            Err(Rejection::UnknownPattern("letter_x".to_string()))
        );
        assert!("bingo".parse::<GameType>().is_err());
        assert_eq!(PatternName::PostageStamp.title(), "Postage Stamp");
    }

    #[test]
    fn test_pattern_serde_uses_wire_names() {
        let json = serde_json::to_string(&PatternName::LetterX).unwrap();
        assert_eq!(json, "\"letter_X\"");
        let json = serde_json::to_string(&GameType::DualAction).unwrap();
        assert_eq!(json, "\"dual_action\"");
    }

    fn classic_rows() -> [[Cell; GRID]; GRID] {
        let mut rows = [[Cell::Free; GRID]; GRID];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = Cell::Single { value: (c as u8) * 15 + 1 + r as u8 };
            }
        }
        rows[2][2] = Cell::Free;
        rows
    }

    #[test]
    fn test_from_rows_accepts_valid_card() {
        let card = Card::from_rows(GameType::Classic, classic_rows()).unwrap();
        assert_eq!(card.cell(0, 0), Cell::Single { value: 1 });
        assert_eq!(card.cell(2, 2), Cell::Free);
        assert_eq!(card.cells().count(), 25);
    }

    #[test]
    fn test_from_rows_rejects_broken_cards() {
        let mut rows = classic_rows();
        rows[2][2] = Cell::Single { value: 33 };
        assert_eq!(Card::from_rows(GameType::Classic, rows), Err(CardError::CentreNotFree));

        let mut rows = classic_rows();
        rows[1][0] = Cell::Single { value: 1 };
        assert_eq!(
            Card::from_rows(GameType::Classic, rows),
            Err(CardError::Duplicate { col: 0, value: 1 })
        );

        let mut rows = classic_rows();
        rows[0][1] = Cell::Single { value: 3 };
        assert_eq!(
            Card::from_rows(GameType::Classic, rows),
            Err(CardError::OutOfRange { col: 1, value: 3 })
        );

        assert!(matches!(
            Card::from_rows(GameType::DualAction, classic_rows()),
            Err(CardError::WrongShape { .. })
        ));
    }
}
