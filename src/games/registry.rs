//! Live sessions of the hall
//!
//! Chat sessions are created lazily on first use and live for the process
//! lifetime. Starting a round announces it and then spawns its call loop,
//! so the announcement always precedes the first number.

use crate::common::traits::Messenger;
use crate::common::types::ChatId;
use crate::config::HallConfig;
use crate::errors::Rejection;
use crate::events::{GameEvent, Scope};
use crate::games::call_loop::{self, LoopSummary};
use crate::games::round::{RoundInfo, RoundOptions};
use crate::games::session::GameSession;
use crate::games::tournament::TournamentSession;
use crate::messaging::broadcast;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A round that was opened and whose call loop is running
#[derive(Debug)]
pub struct StartedRound {
    pub info: RoundInfo,
    /// Chats that received the start announcement
    pub announced: usize,
    pub handle: JoinHandle<LoopSummary>,
}

pub struct SessionRegistry {
    config: HallConfig,
    chats: DashMap<ChatId, Arc<GameSession>>,
    tournament: Arc<TournamentSession>,
    messenger: Arc<dyn Messenger>,
}

impl SessionRegistry {
    pub fn new(config: HallConfig, messenger: Arc<dyn Messenger>) -> Self {
        let tournament = Arc::new(TournamentSession::new(config.tournament.clone()));
        Self {
            config,
            chats: DashMap::new(),
            tournament,
            messenger,
        }
    }

    /// Session for `chat`, created on first access
    pub fn session(&self, chat: ChatId) -> Arc<GameSession> {
        self.chats
            .entry(chat)
            .or_insert_with(|| Arc::new(GameSession::new(chat, self.config.game.clone())))
            .clone()
    }

    /// Session for `chat` only if one was ever created
    pub fn existing(&self, chat: ChatId) -> Option<Arc<GameSession>> {
        self.chats.get(&chat).map(|entry| entry.clone())
    }

    pub fn tournament(&self) -> Arc<TournamentSession> {
        self.tournament.clone()
    }

    pub fn messenger(&self) -> Arc<dyn Messenger> {
        self.messenger.clone()
    }

    pub fn session_count(&self) -> usize {
        self.chats.len()
    }

    /// Open a chat round, announce it and start calling numbers
    pub async fn start_game(&self, chat: ChatId, options: RoundOptions) -> Result<StartedRound, Rejection> {
        let session = self.session(chat);
        let info = session.start(options).await?;

        let event = GameEvent::RoundStarted {
            scope: Scope::Chat,
            info: info.clone(),
        };
        let announced = broadcast(self.messenger.as_ref(), &[chat], &event.render()).await;

        let interval = session.interval();
        let handle = call_loop::spawn(session, info.ordinal, self.messenger.clone(), interval);
        Ok(StartedRound { info, announced, handle })
    }

    /// Open a tournament, announce it to `announce_to` and start calling numbers
    pub async fn start_tournament(
        &self,
        options: RoundOptions,
        announce_to: &[ChatId],
    ) -> Result<StartedRound, Rejection> {
        let info = self.tournament.start(options).await?;

        let event = GameEvent::RoundStarted {
            scope: Scope::Tournament,
            info: info.clone(),
        };
        let announced = broadcast(self.messenger.as_ref(), announce_to, &event.render()).await;

        let handle = call_loop::spawn(
            self.tournament.clone(),
            info.ordinal,
            self.messenger.clone(),
            self.tournament.interval(),
        );
        Ok(StartedRound { info, announced, handle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::UserId;
    use crate::messaging::RecordingMessenger;
    use std::time::Duration;

    fn registry(messenger: Arc<RecordingMessenger>) -> SessionRegistry {
        SessionRegistry::new(HallConfig::default(), messenger)
    }

    #[tokio::test]
    async fn test_sessions_are_created_once() {
        let registry = registry(Arc::new(RecordingMessenger::new()));
        assert!(registry.existing(ChatId(1)).is_none());

        let a = registry.session(ChatId(1));
        let b = registry.session(ChatId(1));
        assert!(Arc::ptr_eq(&a, &b));
        registry.session(ChatId(2));
        assert_eq!(registry.session_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_announces_before_first_number() {
        let messenger = Arc::new(RecordingMessenger::new());
        let registry = registry(messenger.clone());

        let started = registry
            .start_game(ChatId(5), RoundOptions::from(HallConfig::default().game.defaults))
            .await
            .unwrap();
        assert_eq!(started.announced, 1);
        tokio::time::sleep(Duration::from_millis(10)).await;

        let sent = messenger.sent_to(ChatId(5));
        assert!(sent[0].contains("Game #1 started"));
        assert!(sent[1].starts_with("Game #1:"));
        started.handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_games_are_independent() {
        let messenger = Arc::new(RecordingMessenger::new());
        let registry = registry(messenger.clone());
        let opts = RoundOptions::from(HallConfig::default().game.defaults);

        let one = registry.start_game(ChatId(1), opts).await.unwrap();
        let two = registry.start_game(ChatId(2), opts).await.unwrap();
        registry.session(ChatId(1)).register_player(UserId(1), "ann").await.unwrap();

        assert!(matches!(
            registry.start_game(ChatId(1), opts).await,
            Err(Rejection::AlreadyActive)
        ));
        assert_eq!(registry.session(ChatId(2)).status().await.player_count, 0);

        one.handle.abort();
        two.handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_tournament_announced_to_given_chats() {
        let messenger = Arc::new(RecordingMessenger::new());
        let registry = registry(messenger.clone());

        let started = registry
            .start_tournament(
                RoundOptions::from(HallConfig::default().tournament.defaults),
                &[ChatId(1), ChatId(2)],
            )
            .await
            .unwrap();
        assert_eq!(started.announced, 2);
        assert_eq!(started.info.jackpot, 110);
        assert_eq!(messenger.count_containing(ChatId(2), "Tournament #1 started"), 1);
        started.handle.abort();
    }
}
