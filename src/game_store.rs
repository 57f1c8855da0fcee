//! Persistent hall records stored in RocksDB.
//!
//! Values are JSON. Listing indexes use an inverted big-endian id so a
//! prefix scan returns the newest entries first.

use crate::{
    common::types::{now_millis, ChatId, UserId},
    errors::{HallResult, Rejection, StorageError},
    games::types::{GameType, PatternName},
    storage::OptimizedStorage,
};
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

const APPROVED_CHAT_PREFIX: &str = "chat:approved:";
const GAME_RECORD_PREFIX: &[u8] = b"game:record:";
const TOURNAMENT_WIN_PREFIX: &[u8] = b"tournament:win:";
const PLAYER_PREFIX: &str = "player:profile:";
const SCHEDULED_GAME_PREFIX: &str = "schedule:game:";
const REGISTRATION_PREFIX: &str = "registration:";
const COUNTER_PREFIX: &str = "counter:";

pub const SCHEDULE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedChat {
    pub chat_id: ChatId,
    pub title: String,
    pub approved_by: UserId,
    pub approved_at: u64,
}

/// A completed chat round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: u64,
    pub chat_id: ChatId,
    pub ordinal: u64,
    pub numbers: Vec<u8>,
    pub winner_id: UserId,
    pub winner_name: String,
    pub game_type: GameType,
    pub pattern: PatternName,
    pub jackpot: u64,
    pub completed_at: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentWin {
    pub id: u64,
    pub tournament_id: u64,
    pub chat_id: ChatId,
    pub winner_user_id: UserId,
    pub winner_name: String,
    pub prize: u64,
    pub completed_at: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub user_id: UserId,
    pub username: String,
    pub points: i64,
    pub cards_owned: u32,
    pub joined_at: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Scheduled,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub id: u64,
    pub game_date: String,
    pub game_time: String,
    pub game_type: GameType,
    pub pattern: PatternName,
    pub max_players: u32,
    pub entry_cost: u32,
    pub status: ScheduleStatus,
    pub created_at: u64,
}

/// Parameters of `/schedulegame`
#[derive(Clone, Debug)]
pub struct NewScheduledGame {
    pub game_date: String,
    pub game_time: String,
    pub game_type: GameType,
    pub pattern: PatternName,
    pub max_players: u32,
    pub entry_cost: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: u64,
    pub game_id: u64,
    pub user_id: UserId,
    pub username: String,
    pub cards_requested: u32,
    pub points_paid: i64,
    pub status: RegistrationStatus,
    pub admin_approved: ApprovalStatus,
    pub registered_at: u64,
}

fn text_key(prefix: &str, id: impl std::fmt::Display) -> Vec<u8> {
    format!("{}{}", prefix, id).into_bytes()
}

fn padded_key(prefix: &str, id: u64) -> Vec<u8> {
    format!("{}{:020}", prefix, id).into_bytes()
}

fn newest_first_key(prefix: &[u8], id: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + 8);
    key.extend_from_slice(prefix);
    key.extend_from_slice(&(u64::MAX - id).to_be_bytes());
    key
}

/// Hall records over a shared RocksDB handle
pub struct GameStore {
    storage: OptimizedStorage,
    starting_points: i64,
    /// Serialises read-modify-write sequences (counters, points)
    write_lock: Mutex<()>,
}

impl GameStore {
    pub fn new(storage: OptimizedStorage, starting_points: i64) -> Self {
        Self {
            storage,
            starting_points,
            write_lock: Mutex::new(()),
        }
    }

    fn load<T: DeserializeOwned>(&self, key: &[u8]) -> HallResult<Option<T>> {
        let Some(bytes) = self.storage.get(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::CorruptedData(format!(
                "Failed to decode {}: {}",
                String::from_utf8_lossy(key),
                e
            ))
        })?;
        Ok(Some(value))
    }

    fn save<T: Serialize>(&self, key: &[u8], value: &T) -> HallResult<()> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| StorageError::WriteFailed(format!("Failed to encode record: {}", e)))?;
        self.storage.put(key, &bytes)?;
        Ok(())
    }

    fn scan<T: DeserializeOwned>(&self, prefix: &[u8], limit: usize) -> HallResult<Vec<T>> {
        let mut values = Vec::new();
        for (key, bytes) in self.storage.scan_prefix(prefix, limit)? {
            match serde_json::from_slice(&bytes) {
                Ok(value) => values.push(value),
                Err(e) => tracing::warn!("Skipping undecodable row {}: {}", String::from_utf8_lossy(&key), e),
            }
        }
        Ok(values)
    }

    /// Next id from a named counter; callers hold `write_lock`
    fn next_id(&self, counter: &str) -> HallResult<u64> {
        let key = text_key(COUNTER_PREFIX, counter);
        let current = match self.storage.get(&key)? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    StorageError::CorruptedData(format!("Counter {} has {} bytes", counter, bytes.len()))
                })?;
                u64::from_be_bytes(raw)
            }
            None => 0,
        };
        let next = current + 1;
        self.storage.put(&key, &next.to_be_bytes())?;
        Ok(next)
    }

    // ----- approved chats -----

    pub fn approve_chat(&self, chat_id: ChatId, title: &str, approved_by: UserId) -> HallResult<ApprovedChat> {
        let entry = ApprovedChat {
            chat_id,
            title: title.to_string(),
            approved_by,
            approved_at: now_millis(),
        };
        self.save(&text_key(APPROVED_CHAT_PREFIX, chat_id), &entry)?;
        tracing::info!(chat_id = %chat_id, title, "Chat approved");
        Ok(entry)
    }

    /// Returns whether the chat had been approved
    pub fn unapprove_chat(&self, chat_id: ChatId) -> HallResult<bool> {
        let key = text_key(APPROVED_CHAT_PREFIX, chat_id);
        let existed = self.storage.get(&key)?.is_some();
        self.storage.delete(&key)?;
        tracing::info!(chat_id = %chat_id, existed, "Chat unapproved");
        Ok(existed)
    }

    pub fn is_chat_approved(&self, chat_id: ChatId) -> HallResult<bool> {
        Ok(self.storage.get(&text_key(APPROVED_CHAT_PREFIX, chat_id))?.is_some())
    }

    pub fn approved_chats(&self) -> HallResult<Vec<ApprovedChat>> {
        self.scan(APPROVED_CHAT_PREFIX.as_bytes(), usize::MAX)
    }

    // ----- completed rounds -----

    /// Persist a finished chat round; `id` and `completed_at` are assigned here
    pub fn record_game(&self, mut record: GameRecord) -> HallResult<GameRecord> {
        let _guard = self.write_lock.lock();
        record.id = self.next_id("game")?;
        record.completed_at = now_millis();
        self.save(&newest_first_key(GAME_RECORD_PREFIX, record.id), &record)?;
        tracing::info!(
            chat_id = %record.chat_id,
            ordinal = record.ordinal,
            winner = %record.winner_name,
            "Game recorded"
        );
        Ok(record)
    }

    /// Most recent first
    pub fn recent_games(&self, limit: usize) -> HallResult<Vec<GameRecord>> {
        self.scan(GAME_RECORD_PREFIX, limit)
    }

    pub fn record_tournament_win(&self, mut win: TournamentWin) -> HallResult<TournamentWin> {
        let _guard = self.write_lock.lock();
        win.id = self.next_id("tournament")?;
        win.completed_at = now_millis();
        self.save(&newest_first_key(TOURNAMENT_WIN_PREFIX, win.id), &win)?;
        tracing::info!(
            tournament_id = win.tournament_id,
            chat_id = %win.chat_id,
            winner = %win.winner_name,
            prize = win.prize,
            "Tournament win recorded"
        );
        Ok(win)
    }

    /// Most recent first
    pub fn tournament_history(&self, limit: usize) -> HallResult<Vec<TournamentWin>> {
        self.scan(TOURNAMENT_WIN_PREFIX, limit)
    }

    // ----- player profiles -----

    pub fn profile(&self, user_id: UserId) -> HallResult<Option<PlayerProfile>> {
        self.load(&text_key(PLAYER_PREFIX, user_id))
    }

    fn get_or_create_locked(&self, user_id: UserId, username: &str) -> HallResult<PlayerProfile> {
        if let Some(profile) = self.profile(user_id)? {
            return Ok(profile);
        }
        let profile = PlayerProfile {
            user_id,
            username: username.to_string(),
            points: self.starting_points,
            cards_owned: 0,
            joined_at: now_millis(),
        };
        self.save(&text_key(PLAYER_PREFIX, user_id), &profile)?;
        tracing::debug!(user_id = %user_id, "Player profile created");
        Ok(profile)
    }

    pub fn get_or_create_player(&self, user_id: UserId, username: &str) -> HallResult<PlayerProfile> {
        let _guard = self.write_lock.lock();
        self.get_or_create_locked(user_id, username)
    }

    /// Add `delta` (possibly negative) to a player's points
    pub fn adjust_points(&self, user_id: UserId, delta: i64) -> HallResult<PlayerProfile> {
        let _guard = self.write_lock.lock();
        let mut profile = self
            .profile(user_id)?
            .ok_or_else(|| Rejection::NotFound(format!("player {}", user_id)))?;
        profile.points += delta;
        self.save(&text_key(PLAYER_PREFIX, user_id), &profile)?;
        Ok(profile)
    }

    // ----- scheduled games -----

    /// Validate and store a new scheduled game. The slot must parse as
    /// `YYYY-MM-DD HH:MM` and must not be before `now`.
    pub fn create_scheduled_game(&self, request: NewScheduledGame, now: NaiveDateTime) -> HallResult<ScheduledGame> {
        let slot = format!("{} {}", request.game_date, request.game_time);
        let at = NaiveDateTime::parse_from_str(&slot, SCHEDULE_FORMAT)
            .map_err(|_| Rejection::InvalidArgument(format!("'{}' is not YYYY-MM-DD HH:MM", slot)))?;
        if at < now {
            return Err(Rejection::InvalidArgument(format!("{} is in the past", slot)).into());
        }

        let _guard = self.write_lock.lock();
        let game = ScheduledGame {
            id: self.next_id("schedule")?,
            game_date: request.game_date,
            game_time: request.game_time,
            game_type: request.game_type,
            pattern: request.pattern,
            max_players: request.max_players,
            entry_cost: request.entry_cost,
            status: ScheduleStatus::Scheduled,
            created_at: now_millis(),
        };
        self.save(&padded_key(SCHEDULED_GAME_PREFIX, game.id), &game)?;
        tracing::info!(game_id = game.id, slot = %slot, "Game scheduled");
        Ok(game)
    }

    pub fn scheduled_game(&self, game_id: u64) -> HallResult<Option<ScheduledGame>> {
        self.load(&padded_key(SCHEDULED_GAME_PREFIX, game_id))
    }

    /// Games still in `scheduled` status, earliest slot first
    pub fn scheduled_games(&self) -> HallResult<Vec<ScheduledGame>> {
        let mut games: Vec<ScheduledGame> = self
            .scan::<ScheduledGame>(SCHEDULED_GAME_PREFIX.as_bytes(), usize::MAX)?
            .into_iter()
            .filter(|g| g.status == ScheduleStatus::Scheduled)
            .collect();
        games.sort_by(|a, b| (&a.game_date, &a.game_time).cmp(&(&b.game_date, &b.game_time)));
        Ok(games)
    }

    /// Withdraw a game from the schedule; it no longer takes registrations
    pub fn cancel_scheduled_game(&self, game_id: u64) -> HallResult<ScheduledGame> {
        let _guard = self.write_lock.lock();
        let mut game = self
            .scheduled_game(game_id)?
            .ok_or_else(|| Rejection::NotFound(format!("game #{}", game_id)))?;
        if game.status == ScheduleStatus::Cancelled {
            return Err(Rejection::InvalidArgument(format!("game #{} is already cancelled", game_id)).into());
        }
        game.status = ScheduleStatus::Cancelled;
        self.save(&padded_key(SCHEDULED_GAME_PREFIX, game.id), &game)?;
        tracing::info!(game_id, "Scheduled game cancelled");
        Ok(game)
    }

    // ----- registrations -----

    /// Pending registration costing `entry_cost * cards`
    pub fn register_for_game(
        &self,
        game_id: u64,
        user_id: UserId,
        username: &str,
        cards_requested: u32,
    ) -> HallResult<Registration> {
        let game = self
            .scheduled_game(game_id)?
            .ok_or_else(|| Rejection::NotFound(format!("game #{}", game_id)))?;
        if game.status != ScheduleStatus::Scheduled {
            return Err(Rejection::InvalidArgument(format!("game #{} is not open for registration", game_id)).into());
        }

        let _guard = self.write_lock.lock();
        let registration = Registration {
            id: self.next_id("registration")?,
            game_id,
            user_id,
            username: username.to_string(),
            cards_requested,
            points_paid: i64::from(game.entry_cost) * i64::from(cards_requested),
            status: RegistrationStatus::Pending,
            admin_approved: ApprovalStatus::Pending,
            registered_at: now_millis(),
        };
        self.save(&padded_key(REGISTRATION_PREFIX, registration.id), &registration)?;
        tracing::info!(
            registration_id = registration.id,
            game_id,
            user_id = %user_id,
            cards = cards_requested,
            "Registration created"
        );
        Ok(registration)
    }

    pub fn registration(&self, registration_id: u64) -> HallResult<Option<Registration>> {
        self.load(&padded_key(REGISTRATION_PREFIX, registration_id))
    }

    fn pending_registration(&self, registration_id: u64) -> HallResult<Registration> {
        let registration = self
            .registration(registration_id)?
            .ok_or_else(|| Rejection::NotFound(format!("registration #{}", registration_id)))?;
        if registration.admin_approved != ApprovalStatus::Pending {
            return Err(Rejection::InvalidArgument(format!(
                "registration #{} was already decided",
                registration_id
            ))
            .into());
        }
        Ok(registration)
    }

    /// Confirm a registration and charge the player
    pub fn approve_registration(&self, registration_id: u64) -> HallResult<Registration> {
        let _guard = self.write_lock.lock();
        let mut registration = self.pending_registration(registration_id)?;

        let mut profile = self.get_or_create_locked(registration.user_id, &registration.username)?;
        profile.points -= registration.points_paid;
        profile.cards_owned += registration.cards_requested;

        registration.status = RegistrationStatus::Confirmed;
        registration.admin_approved = ApprovalStatus::Approved;

        let profile_bytes = serde_json::to_vec(&profile)?;
        let registration_bytes = serde_json::to_vec(&registration)?;
        self.storage.batch_write(&[
            (text_key(PLAYER_PREFIX, profile.user_id), profile_bytes),
            (padded_key(REGISTRATION_PREFIX, registration.id), registration_bytes),
        ])?;

        tracing::info!(
            registration_id,
            user_id = %registration.user_id,
            points = registration.points_paid,
            "Registration approved"
        );
        Ok(registration)
    }

    /// Reject a registration; no points move
    pub fn reject_registration(&self, registration_id: u64) -> HallResult<Registration> {
        let _guard = self.write_lock.lock();
        let mut registration = self.pending_registration(registration_id)?;
        registration.status = RegistrationStatus::Rejected;
        registration.admin_approved = ApprovalStatus::Rejected;
        self.save(&padded_key(REGISTRATION_PREFIX, registration.id), &registration)?;
        tracing::info!(registration_id, "Registration rejected");
        Ok(registration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::HallError;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store() -> (TempDir, GameStore) {
        let dir = TempDir::new().unwrap();
        let storage = OptimizedStorage::new(dir.path()).unwrap();
        (dir, GameStore::new(storage, 100))
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn request(date: &str, time: &str, entry_cost: u32) -> NewScheduledGame {
        NewScheduledGame {
            game_date: date.to_string(),
            game_time: time.to_string(),
            game_type: GameType::Classic,
            pattern: PatternName::SingleLine,
            max_players: 50,
            entry_cost,
        }
    }

    fn record(chat: i64, ordinal: u64) -> GameRecord {
        GameRecord {
            id: 0,
            chat_id: ChatId(chat),
            ordinal,
            numbers: vec![1, 16, 31, 46, 61],
            winner_id: UserId(7),
            winner_name: "ann".to_string(),
            game_type: GameType::Classic,
            pattern: PatternName::SingleLine,
            jackpot: 10,
            completed_at: 0,
        }
    }

    #[test]
    fn test_chat_approval_lifecycle() {
        let (_dir, store) = store();
        assert!(!store.is_chat_approved(ChatId(-1)).unwrap());

        store.approve_chat(ChatId(-1), "Night Owls", UserId(1)).unwrap();
        store.approve_chat(ChatId(-2), "Early Birds", UserId(1)).unwrap();
        assert!(store.is_chat_approved(ChatId(-1)).unwrap());
        assert_eq!(store.approved_chats().unwrap().len(), 2);

        assert!(store.unapprove_chat(ChatId(-1)).unwrap());
        assert!(!store.unapprove_chat(ChatId(-1)).unwrap());
        assert!(!store.is_chat_approved(ChatId(-1)).unwrap());
    }

    #[test]
    fn test_recent_games_newest_first() {
        let (_dir, store) = store();
        for ordinal in 1..=3 {
            store.record_game(record(-1, ordinal)).unwrap();
        }

        let recent = store.recent_games(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].ordinal, 3);
        assert_eq!(recent[1].ordinal, 2);
        assert!(recent[0].id > recent[1].id);
    }

    #[test]
    fn test_tournament_history() {
        let (_dir, store) = store();
        let win = store
            .record_tournament_win(TournamentWin {
                id: 0,
                tournament_id: 4,
                chat_id: ChatId(-9),
                winner_user_id: UserId(3),
                winner_name: "cy".to_string(),
                prize: 140,
                completed_at: 0,
            })
            .unwrap();
        assert_eq!(win.id, 1);
        assert_eq!(store.tournament_history(10).unwrap(), vec![win]);
    }

    #[test]
    fn test_new_player_gets_starting_points() {
        let (_dir, store) = store();
        let profile = store.get_or_create_player(UserId(5), "eve").unwrap();
        assert_eq!(profile.points, 100);
        assert_eq!(profile.cards_owned, 0);

        store.adjust_points(UserId(5), -30).unwrap();
        let again = store.get_or_create_player(UserId(5), "renamed").unwrap();
        assert_eq!(again.points, 70);
        assert_eq!(again.username, "eve");
    }

    #[test]
    fn test_adjust_unknown_player_is_rejected() {
        let (_dir, store) = store();
        let err = store.adjust_points(UserId(404), 5).unwrap_err();
        assert!(matches!(err, HallError::Rejected(Rejection::NotFound(_))));
    }

    #[test]
    fn test_schedule_validation() {
        let (_dir, store) = store();
        assert!(store.create_scheduled_game(request("2026-13-01", "18:00", 10), now()).is_err());
        assert!(store.create_scheduled_game(request("2026-03-01", "25:00", 10), now()).is_err());
        assert!(store.create_scheduled_game(request("2026-02-28", "18:00", 10), now()).is_err());

        let game = store.create_scheduled_game(request("2026-03-01", "12:00", 10), now()).unwrap();
        assert_eq!(game.status, ScheduleStatus::Scheduled);
    }

    #[test]
    fn test_scheduled_games_in_slot_order() {
        let (_dir, store) = store();
        store.create_scheduled_game(request("2026-03-05", "18:00", 10), now()).unwrap();
        store.create_scheduled_game(request("2026-03-02", "20:00", 10), now()).unwrap();
        store.create_scheduled_game(request("2026-03-02", "09:30", 10), now()).unwrap();

        let slots: Vec<(String, String)> = store
            .scheduled_games()
            .unwrap()
            .into_iter()
            .map(|g| (g.game_date, g.game_time))
            .collect();
        assert_eq!(
            slots,
            vec![
                ("2026-03-02".to_string(), "09:30".to_string()),
                ("2026-03-02".to_string(), "20:00".to_string()),
                ("2026-03-05".to_string(), "18:00".to_string()),
            ]
        );
    }

    #[test]
    fn test_registration_approval_charges_points() {
        let (_dir, store) = store();
        let game = store.create_scheduled_game(request("2026-03-02", "18:00", 15), now()).unwrap();
        store.get_or_create_player(UserId(8), "fay").unwrap();

        let registration = store.register_for_game(game.id, UserId(8), "fay", 3).unwrap();
        assert_eq!(registration.points_paid, 45);
        assert_eq!(registration.status, RegistrationStatus::Pending);
        assert_eq!(registration.admin_approved, ApprovalStatus::Pending);

        let approved = store.approve_registration(registration.id).unwrap();
        assert_eq!(approved.status, RegistrationStatus::Confirmed);
        assert_eq!(approved.admin_approved, ApprovalStatus::Approved);

        let profile = store.profile(UserId(8)).unwrap().unwrap();
        assert_eq!(profile.points, 55);
        assert_eq!(profile.cards_owned, 3);

        // a decided registration cannot be decided again
        assert!(store.approve_registration(registration.id).is_err());
        assert!(store.reject_registration(registration.id).is_err());
        assert_eq!(store.profile(UserId(8)).unwrap().unwrap().points, 55);
    }

    #[test]
    fn test_registration_rejection_keeps_points() {
        let (_dir, store) = store();
        let game = store.create_scheduled_game(request("2026-03-02", "18:00", 10), now()).unwrap();
        let registration = store.register_for_game(game.id, UserId(9), "gus", 2).unwrap();

        let rejected = store.reject_registration(registration.id).unwrap();
        assert_eq!(rejected.status, RegistrationStatus::Rejected);
        assert_eq!(rejected.admin_approved, ApprovalStatus::Rejected);
        assert!(store.profile(UserId(9)).unwrap().is_none());
    }

    #[test]
    fn test_cancelled_game_leaves_schedule() {
        let (_dir, store) = store();
        let kept = store.create_scheduled_game(request("2026-03-02", "18:00", 10), now()).unwrap();
        let dropped = store.create_scheduled_game(request("2026-03-03", "18:00", 10), now()).unwrap();

        let cancelled = store.cancel_scheduled_game(dropped.id).unwrap();
        assert_eq!(cancelled.status, ScheduleStatus::Cancelled);
        assert_eq!(store.scheduled_game(dropped.id).unwrap().unwrap().status, ScheduleStatus::Cancelled);

        let open: Vec<u64> = store.scheduled_games().unwrap().into_iter().map(|g| g.id).collect();
        assert_eq!(open, vec![kept.id]);

        assert!(store.cancel_scheduled_game(dropped.id).is_err());
        let err = store.register_for_game(dropped.id, UserId(3), "cy", 1).unwrap_err();
        assert!(matches!(err, HallError::Rejected(Rejection::InvalidArgument(_))));
        assert!(matches!(
            store.cancel_scheduled_game(77).unwrap_err(),
            HallError::Rejected(Rejection::NotFound(_))
        ));
    }

    #[test]
    fn test_register_for_missing_game() {
        let (_dir, store) = store();
        let err = store.register_for_game(99, UserId(1), "x", 1).unwrap_err();
        assert!(matches!(err, HallError::Rejected(Rejection::NotFound(_))));
        assert!(store.registration(1).unwrap().is_none());
    }
}
