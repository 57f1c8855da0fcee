//! File-backed audit trail of registration conversations
//!
//! One JSON file per (user, registration) holds the exchanged messages and
//! one file per user holds snapshots of their registrations. Game logic
//! never reads these back.

use crate::common::types::UserId;
use crate::errors::HallResult;
use crate::game_store::{Registration, RegistrationStatus, ScheduledGame};
use crate::games::types::{GameType, PatternName};
use chrono::Utc;
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedMessage {
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrationThread {
    pub user_id: UserId,
    pub registration_id: u64,
    pub created_at: String,
    #[serde(default)]
    pub last_updated: Option<String>,
    pub messages: Vec<LoggedMessage>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrationSnapshot {
    pub timestamp: String,
    pub registration_id: u64,
    pub game_id: u64,
    pub cards_requested: u32,
    pub points_paid: i64,
    pub status: RegistrationStatus,
    pub game_date: String,
    pub game_time: String,
    pub game_type: GameType,
    pub pattern: PatternName,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub user_id: UserId,
    pub username: String,
    pub created_at: String,
    #[serde(default)]
    pub last_updated: Option<String>,
    pub registrations: Vec<RegistrationSnapshot>,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

pub struct MessageLog {
    dir: PathBuf,
    /// Serialises read-modify-write of the JSON files
    append_lock: Mutex<()>,
}

impl MessageLog {
    /// Use `dir`, creating it if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> HallResult<Self> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
            append_lock: Mutex::new(()),
        })
    }

    fn thread_path(&self, user: UserId, registration_id: u64) -> PathBuf {
        self.dir.join(format!("player_{}_reg_{}.json", user, registration_id))
    }

    fn profile_path(&self, user: UserId) -> PathBuf {
        self.dir.join(format!("player_{}_profile.json", user))
    }

    fn read<T: DeserializeOwned>(path: &Path) -> HallResult<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write<T: Serialize>(path: &Path, value: &T) -> HallResult<()> {
        fs::write(path, serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    /// Append one message to a registration's thread
    pub fn append_message(
        &self,
        user: UserId,
        registration_id: u64,
        kind: &str,
        data: serde_json::Value,
    ) -> HallResult<PathBuf> {
        let path = self.thread_path(user, registration_id);
        let _guard = self.append_lock.lock();
        let mut thread = Self::read::<RegistrationThread>(&path)?.unwrap_or_else(|| RegistrationThread {
            user_id: user,
            registration_id,
            created_at: timestamp(),
            last_updated: None,
            messages: Vec::new(),
        });

        thread.messages.push(LoggedMessage {
            timestamp: timestamp(),
            kind: kind.to_string(),
            data,
        });
        thread.last_updated = Some(timestamp());

        Self::write(&path, &thread)?;
        debug!(user_id = %user, registration_id, kind, "Message logged");
        Ok(path)
    }

    pub fn thread(&self, user: UserId, registration_id: u64) -> HallResult<Option<RegistrationThread>> {
        Self::read(&self.thread_path(user, registration_id))
    }

    /// Append a snapshot of `registration` to the user's profile file
    pub fn append_profile_snapshot(
        &self,
        username: &str,
        registration: &Registration,
        game: &ScheduledGame,
    ) -> HallResult<PathBuf> {
        let user = registration.user_id;
        let path = self.profile_path(user);
        let _guard = self.append_lock.lock();
        let mut profile = Self::read::<ProfileSnapshot>(&path)?.unwrap_or_else(|| ProfileSnapshot {
            user_id: user,
            username: username.to_string(),
            created_at: timestamp(),
            last_updated: None,
            registrations: Vec::new(),
        });

        profile.registrations.push(RegistrationSnapshot {
            timestamp: timestamp(),
            registration_id: registration.id,
            game_id: registration.game_id,
            cards_requested: registration.cards_requested,
            points_paid: registration.points_paid,
            status: registration.status,
            game_date: game.game_date.clone(),
            game_time: game.game_time.clone(),
            game_type: game.game_type,
            pattern: game.pattern,
        });
        profile.last_updated = Some(timestamp());

        Self::write(&path, &profile)?;
        Ok(path)
    }

    pub fn profile_snapshot(&self, user: UserId) -> HallResult<Option<ProfileSnapshot>> {
        Self::read(&self.profile_path(user))
    }

    /// All log files, or only those of `user`, sorted by name
    pub fn list_files(&self, user: Option<UserId>) -> HallResult<Vec<PathBuf>> {
        let owner_prefix = user.map(|u| format!("player_{}_", u));
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".json") {
                continue;
            }
            if let Some(prefix) = &owner_prefix {
                if !name.starts_with(prefix.as_str()) {
                    continue;
                }
            }
            files.push(path);
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_store::{ApprovalStatus, ScheduleStatus};
    use serde_json::json;
    use tempfile::TempDir;

    fn registration(user: i64, id: u64) -> Registration {
        Registration {
            id,
            game_id: 3,
            user_id: UserId(user),
            username: "ann".to_string(),
            cards_requested: 2,
            points_paid: 20,
            status: RegistrationStatus::Pending,
            admin_approved: ApprovalStatus::Pending,
            registered_at: 0,
        }
    }

    fn game() -> ScheduledGame {
        ScheduledGame {
            id: 3,
            game_date: "2026-03-02".to_string(),
            game_time: "18:00".to_string(),
            game_type: GameType::Classic,
            pattern: PatternName::Blackout,
            max_players: 50,
            entry_cost: 10,
            status: ScheduleStatus::Scheduled,
            created_at: 0,
        }
    }

    #[test]
    fn test_thread_appends_in_order() {
        let dir = TempDir::new().unwrap();
        let log = MessageLog::new(dir.path()).unwrap();

        let path = log.append_message(UserId(1), 4, "request", json!({"cards": 2})).unwrap();
        log.append_message(UserId(1), 4, "approved", json!({"points": 20})).unwrap();
        assert!(path.ends_with("player_1_reg_4.json"));

        let thread = log.thread(UserId(1), 4).unwrap().unwrap();
        assert_eq!(thread.messages.len(), 2);
        assert_eq!(thread.messages[0].kind, "request");
        assert_eq!(thread.messages[1].data["points"], 20);
        assert!(thread.last_updated.is_some());

        // stored with the "type" key
        let raw = fs::read_to_string(path).unwrap();
        assert!(raw.contains("\"type\": \"request\""));
    }

    #[test]
    fn test_concurrent_appends_keep_every_message() {
        let dir = TempDir::new().unwrap();
        let log = std::sync::Arc::new(MessageLog::new(dir.path()).unwrap());

        let writers: Vec<_> = (0..8)
            .map(|i| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for j in 0..5 {
                        log.append_message(UserId(2), 7, "note", json!({ "writer": i, "seq": j }))
                            .unwrap();
                        log.append_profile_snapshot("bo", &registration(2, i * 5 + j), &game())
                            .unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        assert_eq!(log.thread(UserId(2), 7).unwrap().unwrap().messages.len(), 40);
        assert_eq!(log.profile_snapshot(UserId(2)).unwrap().unwrap().registrations.len(), 40);
    }

    #[test]
    fn test_profile_snapshots_accumulate() {
        let dir = TempDir::new().unwrap();
        let log = MessageLog::new(dir.path()).unwrap();

        log.append_profile_snapshot("ann", &registration(1, 4), &game()).unwrap();
        log.append_profile_snapshot("ann", &registration(1, 5), &game()).unwrap();

        let profile = log.profile_snapshot(UserId(1)).unwrap().unwrap();
        assert_eq!(profile.registrations.len(), 2);
        assert_eq!(profile.registrations[1].registration_id, 5);
        assert_eq!(profile.registrations[0].pattern, PatternName::Blackout);
    }

    #[test]
    fn test_list_files_filters_by_user() {
        let dir = TempDir::new().unwrap();
        let log = MessageLog::new(dir.path()).unwrap();

        log.append_message(UserId(1), 1, "request", json!(null)).unwrap();
        log.append_message(UserId(12), 2, "request", json!(null)).unwrap();
        log.append_profile_snapshot("ann", &registration(1, 1), &game()).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(log.list_files(None).unwrap().len(), 3);
        let mine = log.list_files(Some(UserId(1))).unwrap();
        assert_eq!(mine.len(), 2);
        assert!(log.thread(UserId(2), 9).unwrap().is_none());
    }
}
