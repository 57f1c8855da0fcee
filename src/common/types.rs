//! Identity types shared across the bingo hall
//!
//! Chats and users are plain integer identities handed to us by the
//! messaging transport. Wrapping them keeps a chat id from ever being
//! passed where a user id is expected.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A chat (group or direct conversation) that games are played in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

/// A player identity as reported by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Chat-scoped player key.
///
/// Chat games only ever hold keys for their own chat; tournaments mix
/// keys from every participating chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerKey {
    pub chat: ChatId,
    pub user: UserId,
}

impl PlayerKey {
    pub fn new(chat: ChatId, user: UserId) -> Self {
        Self { chat, user }
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.chat, self.user)
    }
}

impl FromStr for ChatId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ChatId)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(UserId)
    }
}

/// Current wall-clock time as unix milliseconds
pub fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_parse_and_display() {
        let chat: ChatId = "-100123".parse().unwrap();
        assert_eq!(chat, ChatId(-100123));
        assert_eq!(chat.to_string(), "-100123");

        let user: UserId = " 42 ".parse().unwrap();
        assert_eq!(user, UserId(42));
        assert!("abc".parse::<UserId>().is_err());
    }

    #[test]
    fn test_player_key_display() {
        let key = PlayerKey::new(ChatId(-5), UserId(7));
        assert_eq!(key.to_string(), "-5/7");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&ChatId(9)).unwrap();
        assert_eq!(json, "9");
    }
}
