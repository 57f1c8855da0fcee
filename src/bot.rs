//! Command layer
//!
//! Transport-agnostic dispatcher: an inbound chat message goes in, an
//! optional reply for the same chat comes out. Broadcasts (round events,
//! winner announcements, direct notices) go through the registry's
//! messenger instead.

use crate::common::types::{ChatId, UserId};
use crate::config::HallConfig;
use crate::dm_log::MessageLog;
use crate::errors::{HallError, HallResult, Rejection};
use crate::events::{GameEvent, Scope};
use crate::game_store::{GameRecord, GameStore, NewScheduledGame, TournamentWin};
use crate::games::call_loop::{LoopOutcome, LoopSummary};
use crate::games::render::{progress_bar, render_card};
use crate::games::round::{CardView, ClaimOutcome, RoundOptions, RoundStatus, WinRecord};
use crate::games::types::{Letter, PatternName};
use crate::games::SessionRegistry;
use crate::messaging::broadcast;
use serde_json::json;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Most cards one registration may request
pub const MAX_CARDS_PER_REGISTRATION: u32 = 6;
const DEFAULT_MAX_PLAYERS: u32 = 50;
const DEFAULT_ENTRY_COST: u32 = 10;
const HISTORY_LIMIT: usize = 10;

/// One message received from a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub chat: ChatId,
    pub chat_title: Option<String>,
    pub user: UserId,
    pub user_name: String,
    pub text: String,
}

impl Inbound {
    pub fn new(chat: ChatId, user: UserId, user_name: &str, text: &str) -> Self {
        Self {
            chat,
            chat_title: None,
            user,
            user_name: user_name.to_string(),
            text: text.to_string(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.chat_title = Some(title.to_string());
        self
    }

    /// Parse a console line `CHAT_ID USER_ID NAME: TEXT`
    pub fn from_console_line(line: &str) -> Option<Self> {
        let (head, text) = line.split_once(':')?;
        let mut parts = head.split_whitespace();
        let chat = parts.next()?.parse().ok()?;
        let user = parts.next()?.parse().ok()?;
        let name = parts.collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            return None;
        }
        Some(Self::new(chat, user, &name, text.trim()))
    }

    fn title(&self) -> String {
        self.chat_title
            .clone()
            .unwrap_or_else(|| format!("Chat {}", self.chat))
    }
}

fn help_text() -> String {
    [
        "🎱 Bingo Hall commands",
        "/getcard - get a card for this chat's game",
        "/mycard - show your card",
        "/status - game status",
        "/jointournament - join the running tournament",
        "/tournamentcard - show your tournament card",
        "/tournamentstatus - tournament status",
        "/profile - your points and cards",
        "/schedule - upcoming scheduled games",
        "/register GAME_ID CARDS - request cards for a scheduled game",
        "Say BINGO to claim a chat game, TOURNAMENT BINGO to claim the tournament.",
        "",
        "Admin: /startgame [type] [pattern], /starttournament [type] [pattern],",
        "/approvegroup, /unapprovegroup, /listgroups,",
        "/schedulegame DATE TIME TYPE PATTERN [cost], /cancelgame GAME_ID,",
        "/approve REG_ID, /reject REG_ID",
    ]
    .join("\n")
}

fn recent_with_letters(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{}-{}", Letter::of(*n), n))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_view(heading: &str, view: &CardView, claim_phrase: &str) -> String {
    let mut text = format!(
        "{} (Game #{})\n\n{}\n📊 Marked: {}/25\nPattern: {}",
        heading,
        view.ordinal,
        render_card(&view.card, view.marked),
        view.marked.len(),
        view.pattern.title()
    );
    if view.winning {
        text.push_str(&format!("\n\n🎉 YOU HAVE A WINNING PATTERN! Type '{}' to claim!", claim_phrase));
    }
    text
}

fn render_status(heading: &str, status: &RoundStatus) -> String {
    let mut text = format!(
        "{} #{} ACTIVE\n\n🎲 Type: {}\n🏆 Pattern: {}\n📊 Called: {}/75\n📈 Progress: {}\n",
        heading,
        status.ordinal,
        status.game_type,
        status.pattern.title(),
        status.called_count,
        progress_bar(status.called_count)
    );
    if let Some(last) = status.last_number {
        text.push_str(&format!("🎱 Last Called: {}-{}\n", Letter::of(last), last));
    }
    text.push_str(&format!("💰 Jackpot: {}\n👥 Players: {}", status.jackpot, status.player_count));
    if !status.recent.is_empty() {
        text.push_str(&format!("\n🔢 Recent: {}", recent_with_letters(&status.recent)));
    }
    text
}

fn parse_id(arg: Option<&&str>, what: &str) -> Result<u64, Rejection> {
    arg.and_then(|s| s.trim_start_matches('#').parse().ok())
        .ok_or_else(|| Rejection::InvalidArgument(format!("{} must be a number", what)))
}

/// Persist a round that ended with a winner
fn persist_win(store: &GameStore, scope: Scope, record: &WinRecord) -> HallResult<()> {
    match scope {
        Scope::Chat => {
            store.record_game(GameRecord {
                id: 0,
                chat_id: record.winner.chat,
                ordinal: record.ordinal,
                numbers: record.called.clone(),
                winner_id: record.winner.user,
                winner_name: record.winner_name.clone(),
                game_type: record.game_type,
                pattern: record.pattern,
                jackpot: record.jackpot,
                completed_at: 0,
            })?;
        }
        Scope::Tournament => {
            store.record_tournament_win(TournamentWin {
                id: 0,
                tournament_id: record.ordinal,
                chat_id: record.winner.chat,
                winner_user_id: record.winner.user,
                winner_name: record.winner_name.clone(),
                prize: record.jackpot,
                completed_at: 0,
            })?;
        }
    }
    Ok(())
}

/// Persist a win that was already announced; failures are only logged
fn record_win(store: &GameStore, scope: Scope, record: &WinRecord) {
    if let Err(e) = persist_win(store, scope, record) {
        error!(%scope, ordinal = record.ordinal, winner = %record.winner, error = %e, "Failed to persist win");
    }
}

pub struct BingoBot {
    config: HallConfig,
    registry: Arc<SessionRegistry>,
    store: Arc<GameStore>,
    log: Arc<MessageLog>,
}

impl BingoBot {
    pub fn new(config: HallConfig, registry: Arc<SessionRegistry>, store: Arc<GameStore>, log: Arc<MessageLog>) -> Self {
        Self {
            config,
            registry,
            store,
            log,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn store(&self) -> &Arc<GameStore> {
        &self.store
    }

    fn admin(&self) -> UserId {
        UserId(self.config.bot.admin_id)
    }

    fn require_admin(&self, msg: &Inbound) -> Result<(), Rejection> {
        if msg.user == self.admin() {
            Ok(())
        } else {
            Err(Rejection::NotAdmin)
        }
    }

    fn require_approved(&self, chat: ChatId) -> HallResult<()> {
        if self.store.is_chat_approved(chat)? {
            Ok(())
        } else {
            Err(Rejection::ChatNotApproved(chat).into())
        }
    }

    /// Handle one inbound message, returning the reply for its chat
    pub async fn handle(&self, msg: &Inbound) -> Option<String> {
        match self.dispatch(msg).await {
            Ok(reply) => reply,
            Err(HallError::Rejected(rejection)) => {
                debug!(chat_id = %msg.chat, user_id = %msg.user, %rejection, "Command rejected");
                Some(format!("❌ {}", rejection_text(&rejection)))
            }
            Err(e) => {
                error!(chat_id = %msg.chat, user_id = %msg.user, error = %e, "Command failed");
                Some("❌ Something went wrong, please try again later.".to_string())
            }
        }
    }

    async fn dispatch(&self, msg: &Inbound) -> HallResult<Option<String>> {
        let text = msg.text.trim();
        if !text.starts_with('/') {
            return self.free_text(msg).await;
        }

        let mut tokens = text.split_whitespace();
        let command = tokens
            .next()
            .unwrap_or_default()
            .split('@')
            .next()
            .unwrap_or_default()
            .to_lowercase();
        let args: Vec<&str> = tokens.collect();

        let reply = match command.as_str() {
            "/start" | "/help" => help_text(),
            "/startgame" => return self.start_game(msg, &args).await,
            "/getcard" => self.get_card(msg).await?,
            "/mycard" => self.my_card(msg).await?,
            "/status" => self.status(msg).await?,
            "/starttournament" => self.start_tournament(msg, &args).await?,
            "/jointournament" => self.join_tournament(msg).await?,
            "/tournamentcard" => self.tournament_card(msg).await?,
            "/tournamentstatus" => self.tournament_status().await,
            "/approvegroup" => self.approve_group(msg)?,
            "/unapprovegroup" => self.unapprove_group(msg)?,
            "/listgroups" => self.list_groups(msg)?,
            "/profile" => self.profile(msg)?,
            "/schedule" => self.schedule()?,
            "/schedulegame" => self.schedule_game(msg, &args)?,
            "/cancelgame" => self.cancel_game(msg, &args)?,
            "/register" => self.register(msg, &args).await?,
            "/approve" => self.decide(msg, &args, true).await?,
            "/reject" => self.decide(msg, &args, false).await?,
            _ => return Ok(None),
        };
        Ok(Some(reply))
    }

    // ----- chat games -----

    async fn start_game(&self, msg: &Inbound, args: &[&str]) -> HallResult<Option<String>> {
        self.require_admin(msg)?;
        self.require_approved(msg.chat)?;

        let options = RoundOptions::from_args(args, self.config.game.defaults);
        let started = self.registry.start_game(msg.chat, options).await?;
        self.watch_loop(Scope::Chat, started.handle);
        // the start announcement already went to the chat
        Ok(None)
    }

    async fn get_card(&self, msg: &Inbound) -> HallResult<String> {
        let session = self.registry.session(msg.chat);
        session.register_player(msg.user, &msg.user_name).await?;
        let view = session.card_view(msg.user).await?;
        Ok(render_view("🎰 Your Bingo Card", &view, "BINGO"))
    }

    async fn my_card(&self, msg: &Inbound) -> HallResult<String> {
        let view = self.registry.session(msg.chat).card_view(msg.user).await?;
        Ok(render_view("🎰 Your Bingo Card", &view, "BINGO"))
    }

    async fn status(&self, msg: &Inbound) -> HallResult<String> {
        let status = self.registry.session(msg.chat).status().await;
        if status.active {
            return Ok(render_status("🎯 GAME", &status));
        }

        let mut text = "❌ No Active Game\n\n".to_string();
        if status.ordinal > 0 {
            text.push_str(&format!("📊 Last Game: #{}\n", status.ordinal));
        }
        text.push_str(&format!("💰 Current Jackpot: {}\n", status.jackpot));
        if self.store.is_chat_approved(msg.chat)? {
            text.push_str("\n✅ This group is approved for games!");
        } else {
            text.push_str("\n❌ This group is not approved for games.");
        }
        Ok(text)
    }

    async fn claim_game(&self, msg: &Inbound) -> HallResult<Option<String>> {
        match self.registry.session(msg.chat).check_claim(msg.user).await? {
            ClaimOutcome::Won(record) => {
                // the round is already closed; announce even if the record cannot be stored
                let text = GameEvent::Winner {
                    scope: Scope::Chat,
                    record: record.clone(),
                    chat_title: None,
                }
                .render();
                broadcast(self.registry.messenger().as_ref(), &[msg.chat], &text).await;
                record_win(&self.store, Scope::Chat, &record);
                Ok(None)
            }
            ClaimOutcome::NotYet { .. } => Ok(Some("❌ Sorry, you don't have the winning pattern yet!".to_string())),
        }
    }

    // ----- tournaments -----

    async fn start_tournament(&self, msg: &Inbound, args: &[&str]) -> HallResult<String> {
        self.require_admin(msg)?;

        let chats: Vec<ChatId> = self.store.approved_chats()?.into_iter().map(|c| c.chat_id).collect();
        let options = RoundOptions::from_args(args, self.config.tournament.defaults);
        let started = self.registry.start_tournament(options, &chats).await?;
        self.watch_loop(Scope::Tournament, started.handle);

        Ok(format!(
            "✅ Tournament #{} started! Broadcasting to {} groups.",
            started.info.ordinal,
            chats.len()
        ))
    }

    async fn join_tournament(&self, msg: &Inbound) -> HallResult<String> {
        let tournament = self.registry.tournament();
        if !tournament.status().await.round.active {
            return Err(Rejection::NotActive.into());
        }
        self.require_approved(msg.chat)?;

        tournament.register_player(msg.chat, msg.user, &msg.user_name).await?;
        let view = tournament.card_view(msg.chat, msg.user).await?;
        Ok(render_view("🏆 Tournament Card", &view, "TOURNAMENT BINGO"))
    }

    async fn tournament_card(&self, msg: &Inbound) -> HallResult<String> {
        let view = self.registry.tournament().card_view(msg.chat, msg.user).await?;
        Ok(render_view("🏆 Your Tournament Card", &view, "TOURNAMENT BINGO"))
    }

    async fn tournament_status(&self) -> String {
        let status = self.registry.tournament().status().await;
        if status.round.active {
            return format!("{}\n🌐 Groups: {}", render_status("🏆 TOURNAMENT", &status.round), status.chat_count);
        }

        let mut text = "❌ No Active Tournament\n\n".to_string();
        if status.round.ordinal > 0 {
            text.push_str(&format!("📊 Last Tournament: #{}\n", status.round.ordinal));
        }
        text.push_str(&format!("💰 Last Jackpot: {}", status.round.jackpot));
        text
    }

    async fn claim_tournament(&self, msg: &Inbound) -> HallResult<Option<String>> {
        let tournament = self.registry.tournament();
        match tournament.check_claim(msg.chat, msg.user).await? {
            ClaimOutcome::Won(record) => {
                let chats = tournament.participating_chats().await;
                let text = GameEvent::Winner {
                    scope: Scope::Tournament,
                    record: record.clone(),
                    chat_title: Some(msg.title()),
                }
                .render();
                let delivered = broadcast(self.registry.messenger().as_ref(), &chats, &text).await;
                info!(chats = chats.len(), delivered, "Tournament winner announced");
                record_win(&self.store, Scope::Tournament, &record);
                Ok(None)
            }
            ClaimOutcome::NotYet { .. } => Ok(Some("❌ Sorry, you don't have the winning pattern yet!".to_string())),
        }
    }

    async fn free_text(&self, msg: &Inbound) -> HallResult<Option<String>> {
        let lowered = msg.text.to_lowercase();
        if lowered.contains("tournament") && lowered.contains("bingo") {
            self.claim_tournament(msg).await
        } else if lowered.contains("bingo") {
            self.claim_game(msg).await
        } else {
            Ok(None)
        }
    }

    /// Persist wins the call loop declares on its own
    fn watch_loop(&self, scope: Scope, handle: JoinHandle<LoopSummary>) {
        let store = self.store.clone();
        tokio::spawn(async move {
            match handle.await {
                Ok(LoopSummary {
                    outcome: LoopOutcome::Won(record),
                    ..
                }) => record_win(&store, scope, &record),
                Ok(summary) => debug!(%scope, ordinal = summary.ordinal, outcome = ?summary.outcome, "Round closed"),
                Err(e) => warn!(%scope, error = %e, "Call loop task ended abnormally"),
            }
        });
    }

    // ----- chat approval -----

    fn approve_group(&self, msg: &Inbound) -> HallResult<String> {
        self.require_admin(msg)?;
        let title = msg.title();
        self.store.approve_chat(msg.chat, &title, msg.user)?;
        Ok(format!("✅ {} is now approved for bingo games!", title))
    }

    fn unapprove_group(&self, msg: &Inbound) -> HallResult<String> {
        self.require_admin(msg)?;
        self.store.unapprove_chat(msg.chat)?;
        Ok("❌ This group is no longer approved for games.".to_string())
    }

    fn list_groups(&self, msg: &Inbound) -> HallResult<String> {
        self.require_admin(msg)?;
        let chats = self.store.approved_chats()?;
        if chats.is_empty() {
            return Ok("📋 No approved groups yet.".to_string());
        }
        let mut text = format!("📋 Approved Groups ({})\n", chats.len());
        for chat in chats {
            text.push_str(&format!("\n• {} ({})", chat.title, chat.chat_id));
        }
        Ok(text)
    }

    // ----- profiles and scheduled games -----

    fn profile(&self, msg: &Inbound) -> HallResult<String> {
        let profile = self.store.get_or_create_player(msg.user, &msg.user_name)?;
        Ok(format!(
            "👤 Your Profile\n\n🎭 Name: {}\n💎 Points: {}\n🎴 Cards Owned: {}\n🆔 ID: {}",
            profile.username, profile.points, profile.cards_owned, profile.user_id
        ))
    }

    fn schedule(&self) -> HallResult<String> {
        let games = self.store.scheduled_games()?;
        if games.is_empty() {
            return Ok("📅 No games scheduled at the moment.".to_string());
        }
        let mut text = "📅 Upcoming Games\n".to_string();
        for game in games {
            text.push_str(&format!(
                "\nGame #{}\n📆 {} at {}\n🎮 {} - {}\n💎 {} points/card\n",
                game.id,
                game.game_date,
                game.game_time,
                game.game_type,
                game.pattern.title(),
                game.entry_cost
            ));
        }
        Ok(text)
    }

    fn schedule_game(&self, msg: &Inbound, args: &[&str]) -> HallResult<String> {
        self.require_admin(msg)?;
        if args.len() < 4 {
            return Ok(
                "📅 Usage: /schedulegame <date> <time> <type> <pattern> [cost]\nExample: /schedulegame 2026-02-10 18:00 classic single_line 10"
                    .to_string(),
            );
        }

        let game_type = args[2].parse()?;
        let pattern: PatternName = args[3].parse()?;
        let entry_cost = match args.get(4) {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|cost| (1..=self.config.bot.max_entry_cost).contains(cost))
                .ok_or_else(|| {
                    Rejection::InvalidArgument(format!(
                        "entry cost must be between 1 and {}",
                        self.config.bot.max_entry_cost
                    ))
                })?,
            None => DEFAULT_ENTRY_COST,
        };

        let game = self.store.create_scheduled_game(
            NewScheduledGame {
                game_date: args[0].to_string(),
                game_time: args[1].to_string(),
                game_type,
                pattern,
                max_players: DEFAULT_MAX_PLAYERS,
                entry_cost,
            },
            chrono::Local::now().naive_local(),
        )?;

        Ok(format!(
            "✅ Game Scheduled!\n\nGame ID: #{}\n📆 Date: {}\n🕐 Time: {}\n🎮 Type: {}\n🏆 Pattern: {}\n💎 Entry Cost: {} points per card",
            game.id,
            game.game_date,
            game.game_time,
            game.game_type,
            game.pattern.title(),
            game.entry_cost
        ))
    }

    fn cancel_game(&self, msg: &Inbound, args: &[&str]) -> HallResult<String> {
        self.require_admin(msg)?;
        let game_id = parse_id(args.first(), "game id")?;
        let game = self.store.cancel_scheduled_game(game_id)?;
        Ok(format!(
            "🚫 Game #{} on {} at {} was cancelled.",
            game.id, game.game_date, game.game_time
        ))
    }

    async fn register(&self, msg: &Inbound, args: &[&str]) -> HallResult<String> {
        let game_id = parse_id(args.first(), "game id")?;
        let cards = args
            .get(1)
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|n| (1..=MAX_CARDS_PER_REGISTRATION).contains(n))
            .ok_or_else(|| {
                Rejection::InvalidArgument(format!("cards must be between 1 and {}", MAX_CARDS_PER_REGISTRATION))
            })?;

        let game = self
            .store
            .scheduled_game(game_id)?
            .ok_or_else(|| Rejection::NotFound(format!("game #{}", game_id)))?;
        let profile = self.store.get_or_create_player(msg.user, &msg.user_name)?;
        let cost = i64::from(game.entry_cost) * i64::from(cards);
        if cost > profile.points {
            return Err(Rejection::InvalidArgument(format!(
                "insufficient points: {} needed, you have {}",
                cost, profile.points
            ))
            .into());
        }

        let registration = self.store.register_for_game(game_id, msg.user, &msg.user_name, cards)?;
        self.log.append_message(
            msg.user,
            registration.id,
            "registration_request",
            json!({ "game_id": game_id, "cards_requested": cards, "points": cost, "text": msg.text }),
        )?;
        self.log.append_profile_snapshot(&msg.user_name, &registration, &game)?;

        let notice = format!(
            "🔔 New Registration Request\n\n👤 Player: {} (ID: {})\n🎮 Game #{}\n📆 {} {}\n🎴 Cards: {}\n💎 Points: {}\n\n/approve {} or /reject {}",
            msg.user_name,
            msg.user,
            game_id,
            game.game_date,
            game.game_time,
            cards,
            cost,
            registration.id,
            registration.id
        );
        broadcast(self.registry.messenger().as_ref(), &[ChatId(self.admin().0)], &notice).await;

        Ok(format!(
            "✅ Request Submitted!\n\nRegistration ID: #{}\nGame ID: #{}\nCards: {}\n\n⏳ Please wait for admin approval.",
            registration.id, game_id, cards
        ))
    }

    /// `/approve` and `/reject`
    async fn decide(&self, msg: &Inbound, args: &[&str], approve: bool) -> HallResult<String> {
        self.require_admin(msg)?;
        let registration_id = parse_id(args.first(), "registration id")?;

        let registration = if approve {
            self.store.approve_registration(registration_id)?
        } else {
            self.store.reject_registration(registration_id)?
        };
        let kind = if approve { "admin_approved" } else { "admin_rejected" };
        self.log.append_message(
            registration.user_id,
            registration.id,
            kind,
            json!({ "admin_id": msg.user, "points": registration.points_paid }),
        )?;
        if let Some(game) = self.store.scheduled_game(registration.game_id)? {
            self.log.append_profile_snapshot(&registration.username, &registration, &game)?;
        }

        let (reply, notice) = if approve {
            (
                format!("✅ Registration #{} approved", registration.id),
                format!(
                    "🎉 Registration Approved!\n\nGame #{}\nCards: {}\nPoints Deducted: {}",
                    registration.game_id, registration.cards_requested, registration.points_paid
                ),
            )
        } else {
            (
                format!("❌ Registration #{} rejected", registration.id),
                format!(
                    "❌ Registration Rejected\n\nGame #{}\nNo points were deducted.",
                    registration.game_id
                ),
            )
        };
        broadcast(
            self.registry.messenger().as_ref(),
            &[ChatId(registration.user_id.0)],
            &notice,
        )
        .await;
        Ok(reply)
    }
}

/// Player-facing wording for a rejection
fn rejection_text(rejection: &Rejection) -> String {
    match rejection {
        Rejection::AlreadyActive => "A game is already active!".to_string(),
        Rejection::NotActive => "No active game right now.".to_string(),
        Rejection::AlreadyRegistered => "You already have a card! Use /mycard to view it.".to_string(),
        Rejection::NotRegistered => "You don't have a card yet! Use /getcard or /jointournament first.".to_string(),
        Rejection::ChatNotApproved(_) => {
            "This group is not approved for bingo games! An admin can use /approvegroup.".to_string()
        }
        Rejection::NotAdmin => "Admin only".to_string(),
        other => {
            let text = other.to_string();
            let mut chars = text.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => text,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_line_parsing() {
        let msg = Inbound::from_console_line("-100 42 Ann Lee: /getcard").unwrap();
        assert_eq!(msg.chat, ChatId(-100));
        assert_eq!(msg.user, UserId(42));
        assert_eq!(msg.user_name, "Ann Lee");
        assert_eq!(msg.text, "/getcard");

        let claim = Inbound::from_console_line("1 2 bob: tournament bingo: yes").unwrap();
        assert_eq!(claim.text, "tournament bingo: yes");

        assert!(Inbound::from_console_line("no colon here").is_none());
        assert!(Inbound::from_console_line("x 2 bob: hi").is_none());
        assert!(Inbound::from_console_line("1 2: hi").is_none());
    }

    #[test]
    fn test_rejection_wording() {
        assert_eq!(rejection_text(&Rejection::NotAdmin), "Admin only");
        assert_eq!(
            rejection_text(&Rejection::UnknownPattern("zigzag".to_string())),
            "Unknown pattern 'zigzag'"
        );
    }

    #[test]
    fn test_parse_id_accepts_hash_prefix() {
        assert_eq!(parse_id(Some(&"#12"), "id").unwrap(), 12);
        assert!(parse_id(Some(&"twelve"), "id").is_err());
        assert!(parse_id(None, "id").is_err());
    }
}
