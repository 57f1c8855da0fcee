//! Configuration management with validation and defaults
//!
//! Every section has a `Default`, so a partial TOML file only needs to
//! name the values it changes.

use crate::errors::ConfigurationError;
use crate::games::types::{GameType, PatternName};
use serde::{Deserialize, Serialize};

/// Complete hall configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HallConfig {
    pub game: GameConfig,
    pub tournament: TournamentConfig,
    pub storage: StorageConfig,
    pub monitoring: MonitoringConfig,
    pub bot: BotConfig,
}

/// How a round's winner is decided
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WinDetection {
    /// Only an explicit player claim ends a round; the call loop's scan is advisory
    #[default]
    ClaimGated,
    /// The call loop declares the first matching player the winner
    Automatic,
}

/// Jackpot growth rules for one kind of session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JackpotConfig {
    /// Seed value for non carrying sessions
    pub base: u64,
    /// Added on every start (carry over) or multiplied by the ordinal (seeded)
    pub per_round: u64,
    /// Keep the previous round's jackpot and add `per_round`
    pub carry_over: bool,
    /// Added every `hot_every` draws
    pub hot_bonus: u64,
    pub hot_every: usize,
}

impl JackpotConfig {
    /// Jackpot at the start of round `ordinal` given the previous value
    pub fn opening(&self, previous: u64, ordinal: u64) -> u64 {
        if self.carry_over {
            previous + self.per_round
        } else {
            self.base + self.per_round * ordinal
        }
    }

    /// Whether the draw count triggers a hot-numbers bonus
    pub fn is_hot(&self, called_count: usize) -> bool {
        self.hot_every > 0 && called_count > 0 && called_count % self.hot_every == 0
    }
}

/// Defaults applied when a start command names no (or an unknown) type/pattern
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundDefaults {
    pub game_type: GameType,
    pub pattern: PatternName,
}

/// Single-chat games
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub call_interval_ms: u64,
    pub win_detection: WinDetection,
    pub defaults: RoundDefaults,
    pub jackpot: JackpotConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            call_interval_ms: 3_000,
            defaults: RoundDefaults {
                game_type: GameType::Classic,
                pattern: PatternName::SingleLine,
            },
            jackpot: JackpotConfig {
                base: 0,
                per_round: 10,
                carry_over: true,
                hot_bonus: 5,
                hot_every: 10,
            },
            win_detection: WinDetection::ClaimGated,
        }
    }
}

/// Multi-chat tournaments
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub call_interval_ms: u64,
    pub win_detection: WinDetection,
    pub defaults: RoundDefaults,
    pub jackpot: JackpotConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            call_interval_ms: 5_000, // slower pace across many chats
            defaults: RoundDefaults {
                game_type: GameType::Classic,
                pattern: PatternName::Blackout,
            },
            jackpot: JackpotConfig {
                base: 100,
                per_round: 10,
                carry_over: false,
                hot_bonus: 10,
                hot_every: 10,
            },
            win_detection: WinDetection::ClaimGated,
        }
    }
}

/// Storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_directory: String,
    pub message_log_directory: String,
    /// Whether to clear the database on startup (testing only!)
    pub clear_on_start: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_directory: "./DB/bingo_data".to_string(),
            message_log_directory: "./player_data".to_string(),
            clear_on_start: false,
        }
    }
}

/// Logging configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
        }
    }
}

/// Command layer configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// The one user allowed to run admin commands
    pub admin_id: i64,
    /// Points granted to a new player profile
    pub starting_points: i64,
    pub max_entry_cost: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            admin_id: 0,
            starting_points: 100,
            max_entry_cost: 1_000,
        }
    }
}

impl HallConfig {
    /// Short intervals for tests and local demos
    pub fn fast_testing() -> Self {
        Self {
            game: GameConfig {
                call_interval_ms: 10,
                ..Default::default()
            },
            tournament: TournamentConfig {
                call_interval_ms: 20,
                ..Default::default()
            },
            storage: StorageConfig {
                clear_on_start: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.game.call_interval_ms == 0 {
            return Err(ConfigurationError::ValidationFailed(
                "game.call_interval_ms must be > 0".to_string(),
            ));
        }

        if self.tournament.call_interval_ms == 0 {
            return Err(ConfigurationError::ValidationFailed(
                "tournament.call_interval_ms must be > 0".to_string(),
            ));
        }

        for (name, jackpot) in [("game", &self.game.jackpot), ("tournament", &self.tournament.jackpot)] {
            if jackpot.hot_bonus > 0 && jackpot.hot_every == 0 {
                return Err(ConfigurationError::InvalidValue {
                    field: format!("{}.jackpot.hot_every", name),
                    value: "0".to_string(),
                    reason: "hot_bonus needs a draw interval".to_string(),
                });
            }
        }

        if self.bot.max_entry_cost == 0 {
            return Err(ConfigurationError::ValidationFailed(
                "bot.max_entry_cost must be > 0".to_string(),
            ));
        }

        if self.storage.data_directory.trim().is_empty() {
            return Err(ConfigurationError::ValidationFailed(
                "storage.data_directory is required".to_string(),
            ));
        }

        Ok(())
    }
}
