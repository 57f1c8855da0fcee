//! Background number caller
//!
//! One loop task runs per active round. Each iteration takes the session
//! lock once (through `CallTarget::step`), then broadcasts outside the lock
//! and sleeps. The loop is bound to the round ordinal it was spawned for;
//! it halts as soon as the session is idle or has moved to another round.

use crate::common::traits::Messenger;
use crate::common::types::ChatId;
use crate::events::{GameEvent, Scope};
use crate::games::round::{Step, WinRecord};
use crate::messaging::broadcast;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A session the call loop can drive
#[async_trait]
pub trait CallTarget: Send + Sync + 'static {
    fn scope(&self) -> Scope;

    /// Draw the next number for round `ordinal` under the session lock
    async fn step(&self, ordinal: u64) -> Step;

    /// Chats that receive this round's announcements
    async fn recipients(&self) -> Vec<ChatId>;
}

/// How a loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The loop itself declared this winner
    Won(WinRecord),
    /// All 75 numbers were called and nobody claimed
    Exhausted,
    /// A claim closed the round or a newer round replaced it
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopSummary {
    pub ordinal: u64,
    pub draws: usize,
    pub outcome: LoopOutcome,
}

async fn announce<T: CallTarget + ?Sized>(target: &T, messenger: &dyn Messenger, event: GameEvent) {
    let recipients = target.recipients().await;
    let delivered = broadcast(messenger, &recipients, &event.render()).await;
    debug!(scope = %event.scope(), recipients = recipients.len(), delivered, "Event broadcast");
}

/// Drive round `ordinal` of `target` until it ends
pub async fn run<T: CallTarget + ?Sized>(
    target: Arc<T>,
    ordinal: u64,
    messenger: Arc<dyn Messenger>,
    interval: Duration,
) -> LoopSummary {
    let scope = target.scope();
    info!(%scope, ordinal, interval_ms = interval.as_millis() as u64, "Call loop started");

    let mut draws = 0;
    let outcome = loop {
        match target.step(ordinal).await {
            Step::Halted => break LoopOutcome::Stopped,
            Step::Exhausted { .. } => {
                announce(target.as_ref(), messenger.as_ref(), GameEvent::NoWinner { scope, ordinal }).await;
                break LoopOutcome::Exhausted;
            }
            Step::Drawn(draw) => {
                draws += 1;
                debug!(%scope, ordinal, number = draw.number, called = draw.called_count, "Number called");

                let called_event = GameEvent::NumberCalled {
                    scope,
                    ordinal,
                    number: draw.number,
                    letter: draw.letter,
                    called: draw.called,
                };
                announce(target.as_ref(), messenger.as_ref(), called_event).await;

                if draw.hot {
                    let hot = GameEvent::HotNumbers {
                        scope,
                        ordinal,
                        jackpot: draw.jackpot,
                    };
                    announce(target.as_ref(), messenger.as_ref(), hot).await;
                }

                if let Some(record) = draw.winner {
                    let winner = GameEvent::Winner {
                        scope,
                        record: record.clone(),
                        chat_title: None,
                    };
                    announce(target.as_ref(), messenger.as_ref(), winner).await;
                    break LoopOutcome::Won(record);
                }
            }
        }

        tokio::time::sleep(interval).await;
    };

    info!(%scope, ordinal, draws, outcome = ?outcome, "Call loop finished");
    LoopSummary { ordinal, draws, outcome }
}

/// Run the loop on its own task
pub fn spawn<T: CallTarget + ?Sized>(
    target: Arc<T>,
    ordinal: u64,
    messenger: Arc<dyn Messenger>,
    interval: Duration,
) -> JoinHandle<LoopSummary> {
    tokio::spawn(run(target, ordinal, messenger, interval))
}
