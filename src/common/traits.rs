//! Shared traits and interfaces
//!
//! The game engine only talks to the outside world through these, so the
//! console transport and the test recorder are interchangeable.

use crate::common::types::ChatId;
use crate::errors::DeliveryError;
use async_trait::async_trait;

/// Outbound text delivery to a chat
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Deliver `text` to one chat
    async fn send(&self, chat: ChatId, text: &str) -> Result<(), DeliveryError>;
}
