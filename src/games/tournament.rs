//! Hall-wide tournament spanning many chats
//!
//! Players are keyed by (chat, user), so the same user may hold one card
//! per chat. The participating chat set grows on first registration from a
//! chat and is cleared when a new tournament starts.

use crate::common::types::{ChatId, PlayerKey, UserId};
use crate::config::TournamentConfig;
use crate::errors::Rejection;
use crate::events::Scope;
use crate::games::call_loop::CallTarget;
use crate::games::round::{CardView, ClaimOutcome, RoundInfo, RoundOptions, RoundState, RoundStatus, Step};
use crate::games::types::Card;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug)]
struct TournamentState {
    round: RoundState,
    /// Participating chats in order of first registration
    chats: Vec<ChatId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentStatus {
    pub round: RoundStatus,
    pub chat_count: usize,
}

#[derive(Debug)]
pub struct TournamentSession {
    config: TournamentConfig,
    state: Mutex<TournamentState>,
}

impl TournamentSession {
    pub fn new(config: TournamentConfig) -> Self {
        let round = RoundState::new(config.defaults, config.jackpot.base);
        Self {
            config,
            state: Mutex::new(TournamentState {
                round,
                chats: Vec::new(),
            }),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.config.call_interval_ms)
    }

    pub async fn start(&self, options: RoundOptions) -> Result<RoundInfo, Rejection> {
        let mut state = self.state.lock().await;
        let info = state.round.begin(options, &self.config.jackpot)?;
        state.chats.clear();
        info!(
            ordinal = info.ordinal,
            game_type = %info.game_type,
            pattern = %info.pattern,
            jackpot = info.jackpot,
            "Tournament started"
        );
        Ok(info)
    }

    pub async fn register_player(&self, chat: ChatId, user: UserId, name: &str) -> Result<Card, Rejection> {
        let mut state = self.state.lock().await;
        let card = state.round.register(PlayerKey::new(chat, user), name)?;
        if !state.chats.contains(&chat) {
            state.chats.push(chat);
            info!(chat_id = %chat, chats = state.chats.len(), "Chat joined tournament");
        }
        debug!(chat_id = %chat, user_id = %user, "Tournament card issued");
        Ok(card)
    }

    pub async fn check_claim(&self, chat: ChatId, user: UserId) -> Result<ClaimOutcome, Rejection> {
        let outcome = self.state.lock().await.round.claim(PlayerKey::new(chat, user))?;
        if let ClaimOutcome::Won(record) = &outcome {
            info!(chat_id = %chat, user_id = %user, ordinal = record.ordinal, "Tournament claim accepted");
        }
        Ok(outcome)
    }

    /// Card view while the tournament is running
    pub async fn card_view(&self, chat: ChatId, user: UserId) -> Result<CardView, Rejection> {
        let state = self.state.lock().await;
        if !state.round.is_active() {
            return Err(Rejection::NotActive);
        }
        state.round.card_view(PlayerKey::new(chat, user))
    }

    pub async fn status(&self) -> TournamentStatus {
        let state = self.state.lock().await;
        TournamentStatus {
            round: state.round.status(),
            chat_count: state.chats.len(),
        }
    }

    /// Snapshot of participating chats
    pub async fn participating_chats(&self) -> Vec<ChatId> {
        self.state.lock().await.chats.clone()
    }
}

#[async_trait]
impl CallTarget for TournamentSession {
    fn scope(&self) -> Scope {
        Scope::Tournament
    }

    async fn step(&self, ordinal: u64) -> Step {
        self.state
            .lock()
            .await
            .round
            .step(ordinal, &self.config.jackpot, self.config.win_detection)
    }

    async fn recipients(&self) -> Vec<ChatId> {
        self.participating_chats().await
    }
}
