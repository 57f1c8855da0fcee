//! Single-chat game session

use crate::common::types::{ChatId, PlayerKey, UserId};
use crate::config::GameConfig;
use crate::errors::Rejection;
use crate::events::Scope;
use crate::games::call_loop::CallTarget;
use crate::games::round::{CardView, ClaimOutcome, RoundInfo, RoundOptions, RoundState, RoundStatus, Step};
use crate::games::types::Card;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// One chat's game. All state changes go through the session lock.
#[derive(Debug)]
pub struct GameSession {
    chat: ChatId,
    config: GameConfig,
    state: Mutex<RoundState>,
}

impl GameSession {
    pub fn new(chat: ChatId, config: GameConfig) -> Self {
        let state = RoundState::new(config.defaults, config.jackpot.base);
        Self {
            chat,
            config,
            state: Mutex::new(state),
        }
    }

    pub fn chat(&self) -> ChatId {
        self.chat
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.config.call_interval_ms)
    }

    /// Open a new round. The caller spawns the call loop for the returned ordinal.
    pub async fn start(&self, options: RoundOptions) -> Result<RoundInfo, Rejection> {
        let info = self.state.lock().await.begin(options, &self.config.jackpot)?;
        info!(
            chat_id = %self.chat,
            ordinal = info.ordinal,
            game_type = %info.game_type,
            pattern = %info.pattern,
            jackpot = info.jackpot,
            "Game started"
        );
        Ok(info)
    }

    pub async fn register_player(&self, user: UserId, name: &str) -> Result<Card, Rejection> {
        let card = self
            .state
            .lock()
            .await
            .register(PlayerKey::new(self.chat, user), name)?;
        debug!(chat_id = %self.chat, user_id = %user, "Card issued");
        Ok(card)
    }

    pub async fn check_claim(&self, user: UserId) -> Result<ClaimOutcome, Rejection> {
        let outcome = self.state.lock().await.claim(PlayerKey::new(self.chat, user))?;
        match &outcome {
            ClaimOutcome::Won(record) => {
                info!(chat_id = %self.chat, user_id = %user, ordinal = record.ordinal, "Claim accepted")
            }
            ClaimOutcome::NotYet { marked } => {
                debug!(chat_id = %self.chat, user_id = %user, marked, "Claim too early")
            }
        }
        Ok(outcome)
    }

    pub async fn card_view(&self, user: UserId) -> Result<CardView, Rejection> {
        self.state.lock().await.card_view(PlayerKey::new(self.chat, user))
    }

    pub async fn status(&self) -> RoundStatus {
        self.state.lock().await.status()
    }

    pub async fn is_active(&self) -> bool {
        self.state.lock().await.is_active()
    }
}

#[async_trait]
impl CallTarget for GameSession {
    fn scope(&self) -> Scope {
        Scope::Chat
    }

    async fn step(&self, ordinal: u64) -> Step {
        self.state
            .lock()
            .await
            .step(ordinal, &self.config.jackpot, self.config.win_detection)
    }

    async fn recipients(&self) -> Vec<ChatId> {
        vec![self.chat]
    }
}
