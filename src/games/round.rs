//! Round state shared by chat games and tournaments
//!
//! `RoundState` is plain data plus the transitions of the idle/active
//! machine. It holds no lock itself: sessions wrap it in one mutex so a
//! start, a registration, a claim and a loop draw never interleave.

use crate::common::types::PlayerKey;
use crate::config::{JackpotConfig, RoundDefaults, WinDetection};
use crate::errors::Rejection;
use crate::games::card;
use crate::games::patterns::{marked_cells, satisfied, MarkedCells};
use crate::games::types::{Card, GameType, Letter, PatternName, MAX_NUMBER};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// How many trailing numbers a status snapshot shows
pub const RECENT_NUMBERS: usize = 5;

/// Type and pattern requested for a new round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOptions {
    pub game_type: GameType,
    pub pattern: PatternName,
}

impl RoundOptions {
    /// Parse `[type] [pattern]` command arguments.
    ///
    /// Missing or unrecognised values fall back to `defaults`.
    pub fn from_args(args: &[&str], defaults: RoundDefaults) -> Self {
        let game_type = args
            .first()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.game_type);
        let pattern = args
            .get(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.pattern);
        Self { game_type, pattern }
    }
}

impl From<RoundDefaults> for RoundOptions {
    fn from(defaults: RoundDefaults) -> Self {
        Self {
            game_type: defaults.game_type,
            pattern: defaults.pattern,
        }
    }
}

/// Facts about a freshly started round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInfo {
    pub ordinal: u64,
    pub game_type: GameType,
    pub pattern: PatternName,
    pub jackpot: u64,
}

/// A registered player and their card
#[derive(Debug, Clone)]
pub struct PlayerEntry {
    pub key: PlayerKey,
    pub name: String,
    pub card: Card,
}

/// Everything needed to persist and announce a win
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRecord {
    pub ordinal: u64,
    pub winner: PlayerKey,
    pub winner_name: String,
    pub game_type: GameType,
    pub pattern: PatternName,
    pub jackpot: u64,
    pub called: Vec<u8>,
}

/// Result of a claim by a registered player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    Won(WinRecord),
    NotYet { marked: usize },
}

/// A player's card together with its current marks
#[derive(Debug, Clone)]
pub struct CardView {
    pub ordinal: u64,
    pub card: Card,
    pub marked: MarkedCells,
    pub pattern: PatternName,
    /// The card satisfies the pattern and the round is still open
    pub winning: bool,
}

/// Read-only snapshot, valid whether or not a round is active
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundStatus {
    pub active: bool,
    pub ordinal: u64,
    pub game_type: GameType,
    pub pattern: PatternName,
    pub called_count: usize,
    pub last_number: Option<u8>,
    pub recent: Vec<u8>,
    pub jackpot: u64,
    pub player_count: usize,
}

/// One number drawn by the call loop
#[derive(Debug, Clone)]
pub struct Draw {
    pub ordinal: u64,
    pub number: u8,
    pub letter: Letter,
    pub called_count: usize,
    /// Snapshot of the called sequence including `number`
    pub called: Vec<u8>,
    pub jackpot: u64,
    /// This draw triggered a jackpot bonus
    pub hot: bool,
    /// Players whose cards currently satisfy the pattern
    pub ready: usize,
    /// Set when the loop itself ended the round
    pub winner: Option<WinRecord>,
}

/// What one call-loop iteration did
#[derive(Debug, Clone)]
pub enum Step {
    /// Round is idle or has been replaced by a newer one
    Halted,
    /// All numbers were called without a winner; the round is now idle
    Exhausted { ordinal: u64, called: Vec<u8> },
    Drawn(Draw),
}

/// Mutable state of one session
#[derive(Debug)]
pub struct RoundState {
    active: bool,
    ordinal: u64,
    game_type: GameType,
    pattern: PatternName,
    jackpot: u64,
    called: Vec<u8>,
    called_set: HashSet<u8>,
    players: Vec<PlayerEntry>,
    index: HashMap<PlayerKey, usize>,
}

impl RoundState {
    /// Idle state before the first round
    pub fn new(defaults: RoundDefaults, jackpot: u64) -> Self {
        Self {
            active: false,
            ordinal: 0,
            game_type: defaults.game_type,
            pattern: defaults.pattern,
            jackpot,
            called: Vec::new(),
            called_set: HashSet::new(),
            players: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    pub fn called(&self) -> &[u8] {
        &self.called
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Reset for a new round and go active
    pub fn begin(&mut self, options: RoundOptions, jackpot: &JackpotConfig) -> Result<RoundInfo, Rejection> {
        if self.active {
            return Err(Rejection::AlreadyActive);
        }

        self.called.clear();
        self.called_set.clear();
        self.players.clear();
        self.index.clear();
        self.ordinal += 1;
        self.jackpot = jackpot.opening(self.jackpot, self.ordinal);
        self.game_type = options.game_type;
        self.pattern = options.pattern;
        self.active = true;

        Ok(RoundInfo {
            ordinal: self.ordinal,
            game_type: self.game_type,
            pattern: self.pattern,
            jackpot: self.jackpot,
        })
    }

    /// Give `key` a card for this round
    pub fn register(&mut self, key: PlayerKey, name: &str) -> Result<Card, Rejection> {
        if !self.active {
            return Err(Rejection::NotActive);
        }
        if self.index.contains_key(&key) {
            return Err(Rejection::AlreadyRegistered);
        }

        let card = card::generate(self.game_type);
        self.index.insert(key, self.players.len());
        self.players.push(PlayerEntry {
            key,
            name: name.to_string(),
            card: card.clone(),
        });
        Ok(card)
    }

    fn entry(&self, key: &PlayerKey) -> Option<&PlayerEntry> {
        self.index.get(key).map(|&i| &self.players[i])
    }

    fn marks_of(&self, entry: &PlayerEntry) -> MarkedCells {
        marked_cells(&entry.card, &self.called_set, entry.card.game_type())
    }

    fn win_record(&self, entry: &PlayerEntry) -> WinRecord {
        WinRecord {
            ordinal: self.ordinal,
            winner: entry.key,
            winner_name: entry.name.clone(),
            game_type: self.game_type,
            pattern: self.pattern,
            jackpot: self.jackpot,
            called: self.called.clone(),
        }
    }

    /// Verify a claim; a valid one closes the round
    pub fn claim(&mut self, key: PlayerKey) -> Result<ClaimOutcome, Rejection> {
        if !self.active {
            return Err(Rejection::NotActive);
        }
        let entry = self.entry(&key).ok_or(Rejection::NotRegistered)?;
        let marked = self.marks_of(entry);

        if satisfied(marked, self.pattern) {
            let record = self.win_record(entry);
            self.active = false;
            Ok(ClaimOutcome::Won(record))
        } else {
            Ok(ClaimOutcome::NotYet {
                marked: marked.len(),
            })
        }
    }

    /// Current card and marks for a registered player
    pub fn card_view(&self, key: PlayerKey) -> Result<CardView, Rejection> {
        let entry = self.entry(&key).ok_or(Rejection::NotRegistered)?;
        let marked = self.marks_of(entry);
        Ok(CardView {
            ordinal: self.ordinal,
            card: entry.card.clone(),
            marked,
            pattern: self.pattern,
            winning: self.active && satisfied(marked, self.pattern),
        })
    }

    /// Players satisfying the pattern, in registration order
    fn matching_players(&self) -> Vec<&PlayerEntry> {
        self.players
            .iter()
            .filter(|entry| satisfied(self.marks_of(entry), self.pattern))
            .collect()
    }

    /// One call-loop iteration for the round numbered `ordinal`
    pub fn step(&mut self, ordinal: u64, jackpot: &JackpotConfig, detection: WinDetection) -> Step {
        if !self.active || self.ordinal != ordinal {
            return Step::Halted;
        }

        if self.called.len() >= MAX_NUMBER as usize {
            self.active = false;
            return Step::Exhausted {
                ordinal,
                called: self.called.clone(),
            };
        }

        let number = draw_number(&self.called_set);
        self.called.push(number);
        self.called_set.insert(number);

        let hot = jackpot.is_hot(self.called.len());
        if hot {
            self.jackpot += jackpot.hot_bonus;
        }

        let matching = self.matching_players();
        let ready = matching.len();
        let winner = match (matching.first(), detection) {
            (Some(entry), WinDetection::Automatic) => Some(self.win_record(entry)),
            (Some(entry), WinDetection::ClaimGated) => {
                debug!(ordinal, player = %entry.key, ready, "Winning pattern on card, waiting for claim");
                None
            }
            (None, _) => None,
        };
        if winner.is_some() {
            self.active = false;
        }

        Step::Drawn(Draw {
            ordinal,
            number,
            letter: Letter::of(number),
            called_count: self.called.len(),
            called: self.called.clone(),
            jackpot: self.jackpot,
            hot,
            ready,
            winner,
        })
    }

    pub fn status(&self) -> RoundStatus {
        let recent_from = self.called.len().saturating_sub(RECENT_NUMBERS);
        RoundStatus {
            active: self.active,
            ordinal: self.ordinal,
            game_type: self.game_type,
            pattern: self.pattern,
            called_count: self.called.len(),
            last_number: self.called.last().copied(),
            recent: self.called[recent_from..].to_vec(),
            jackpot: self.jackpot,
            player_count: self.players.len(),
        }
    }
}

/// Uniform draw from 1..=75, resampling numbers already called.
///
/// Callers guarantee at least one number is still free.
fn draw_number(called: &HashSet<u8>) -> u8 {
    let mut rng = rand::thread_rng();
    loop {
        let number = rng.gen_range(1..=MAX_NUMBER);
        if !called.contains(&number) {
            return number;
        }
    }
}
