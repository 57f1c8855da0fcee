//! Hall initialization
//!
//! Wires storage, the message log, the session registry and the command
//! layer from one validated configuration.

use crate::{
    bot::BingoBot,
    common::traits::Messenger,
    config::HallConfig,
    dm_log::MessageLog,
    errors::HallResult,
    game_store::GameStore,
    games::SessionRegistry,
    storage::OptimizedStorage,
};
use std::sync::Arc;
use tracing::info;

pub struct HallFactory;

impl HallFactory {
    /// Build a ready-to-use bot delivering through `messenger`
    pub fn create_bot(config: HallConfig, messenger: Arc<dyn Messenger>) -> HallResult<BingoBot> {
        config.validate()?;

        let storage = OptimizedStorage::new_with_config(&config.storage)?;
        let store = Arc::new(GameStore::new(storage, config.bot.starting_points));
        let log = Arc::new(MessageLog::new(&config.storage.message_log_directory)?);
        let registry = Arc::new(SessionRegistry::new(config.clone(), messenger));

        info!(
            data_dir = %config.storage.data_directory,
            message_log_dir = %config.storage.message_log_directory,
            admin_id = config.bot.admin_id,
            win_detection = ?config.game.win_detection,
            "Bingo hall ready"
        );

        Ok(BingoBot::new(config, registry, store, log))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::RecordingMessenger;
    use tempfile::TempDir;

    #[test]
    fn test_create_bot_with_temp_dirs() {
        let dir = TempDir::new().unwrap();
        let mut config = HallConfig::fast_testing();
        config.storage.data_directory = dir.path().join("db").to_string_lossy().to_string();
        config.storage.message_log_directory = dir.path().join("log").to_string_lossy().to_string();

        let bot = HallFactory::create_bot(config, Arc::new(RecordingMessenger::new())).unwrap();
        assert!(bot.store().approved_chats().unwrap().is_empty());
        assert!(dir.path().join("log").exists());
    }

    #[test]
    fn test_invalid_config_is_refused() {
        let mut config = HallConfig::fast_testing();
        config.game.call_interval_ms = 0;
        assert!(HallFactory::create_bot(config, Arc::new(RecordingMessenger::new())).is_err());
    }
}
