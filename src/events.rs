//! Notifications produced by running rounds
//!
//! Events are data; `render` turns them into the text a chat receives.

use crate::games::render::{progress_bar, render_board};
use crate::games::round::{RoundInfo, WinRecord};
use crate::games::types::Letter;
use serde::Serialize;
use std::fmt;

/// Which kind of session an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Chat,
    Tournament,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Chat => f.write_str("chat"),
            Scope::Tournament => f.write_str("tournament"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStarted {
        scope: Scope,
        info: RoundInfo,
    },
    NumberCalled {
        scope: Scope,
        ordinal: u64,
        number: u8,
        letter: Letter,
        called: Vec<u8>,
    },
    HotNumbers {
        scope: Scope,
        ordinal: u64,
        jackpot: u64,
    },
    Winner {
        scope: Scope,
        record: WinRecord,
        chat_title: Option<String>,
    },
    NoWinner {
        scope: Scope,
        ordinal: u64,
    },
}

fn heading(scope: Scope, ordinal: u64) -> String {
    match scope {
        Scope::Chat => format!("Game #{}", ordinal),
        Scope::Tournament => format!("Tournament #{}", ordinal),
    }
}

impl GameEvent {
    pub fn scope(&self) -> Scope {
        match self {
            GameEvent::RoundStarted { scope, .. }
            | GameEvent::NumberCalled { scope, .. }
            | GameEvent::HotNumbers { scope, .. }
            | GameEvent::Winner { scope, .. }
            | GameEvent::NoWinner { scope, .. } => *scope,
        }
    }

    /// Message text for chats receiving this event
    pub fn render(&self) -> String {
        match self {
            GameEvent::RoundStarted { scope, info } => {
                let join = match scope {
                    Scope::Chat => "/getcard",
                    Scope::Tournament => "/jointournament",
                };
                format!(
                    "🎉 {} started!\nType: {}\nPattern: {}\nJackpot: {} points\nUse {} to get your card.",
                    heading(*scope, info.ordinal),
                    info.game_type,
                    info.pattern.title(),
                    info.jackpot,
                    join
                )
            }
            GameEvent::NumberCalled {
                scope,
                ordinal,
                number,
                letter,
                called,
            } => format!(
                "{}: {}-{}\n{} ({}/75)\n{}",
                heading(*scope, *ordinal),
                letter,
                number,
                progress_bar(called.len()),
                called.len(),
                render_board(called)
            ),
            GameEvent::HotNumbers {
                scope,
                ordinal,
                jackpot,
            } => format!(
                "🔥 HOT NUMBERS! {} jackpot is now {} points",
                heading(*scope, *ordinal),
                jackpot
            ),
            GameEvent::Winner {
                scope,
                record,
                chat_title,
            } => {
                let mut text = format!(
                    "🏆 BINGO! {} wins {}\nPattern: {}\nNumbers called: {}\nJackpot: {} points",
                    record.winner_name,
                    heading(*scope, record.ordinal),
                    record.pattern.title(),
                    record.called.len(),
                    record.jackpot
                );
                if let Some(title) = chat_title {
                    text.push_str(&format!("\nFrom: {}", title));
                }
                text
            }
            GameEvent::NoWinner { scope, ordinal } => format!(
                "All 75 numbers have been called. {} ends with no winner.",
                heading(*scope, *ordinal)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{ChatId, PlayerKey, UserId};
    use crate::games::types::{GameType, PatternName};

    fn record() -> WinRecord {
        WinRecord {
            ordinal: 4,
            winner: PlayerKey::new(ChatId(-5), UserId(9)),
            winner_name: "dana".to_string(),
            game_type: GameType::Classic,
            pattern: PatternName::FourCorners,
            jackpot: 140,
            called: vec![1, 5, 61, 65],
        }
    }

    #[test]
    fn test_round_started_mentions_join_command() {
        let info = RoundInfo {
            ordinal: 2,
            game_type: GameType::DualAction,
            pattern: PatternName::LetterX,
            jackpot: 120,
        };
        let chat = GameEvent::RoundStarted { scope: Scope::Chat, info: info.clone() }.render();
        assert!(chat.contains("Game #2"));
        assert!(chat.contains("dual_action"));
        assert!(chat.contains("Letter X"));
        assert!(chat.contains("/getcard"));

        let tournament = GameEvent::RoundStarted { scope: Scope::Tournament, info }.render();
        assert!(tournament.contains("Tournament #2"));
        assert!(tournament.contains("/jointournament"));
    }

    #[test]
    fn test_number_called_includes_board() {
        let text = GameEvent::NumberCalled {
            scope: Scope::Chat,
            ordinal: 1,
            number: 33,
            letter: Letter::N,
            called: vec![12, 33],
        }
        .render();
        assert!(text.starts_with("Game #1: N-33"));
        assert!(text.contains("(2/75)"));
        assert!(text.contains("N |"));
    }

    #[test]
    fn test_winner_from_tournament_chat() {
        let text = GameEvent::Winner {
            scope: Scope::Tournament,
            record: record(),
            chat_title: Some("Night Owls".to_string()),
        }
        .render();
        assert!(text.contains("dana wins Tournament #4"));
        assert!(text.contains("Four Corners"));
        assert!(text.contains("From: Night Owls"));
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_value(GameEvent::NoWinner { scope: Scope::Chat, ordinal: 3 }).unwrap();
        assert_eq!(json["event"], "no_winner");
        assert_eq!(json["scope"], "chat");
    }
}
