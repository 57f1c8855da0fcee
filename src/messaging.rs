//! Message delivery helpers and transports
//!
//! `broadcast` fans one text out to many chats. A failing recipient is
//! logged and skipped; the others still receive the message.

use crate::common::traits::Messenger;
use crate::common::types::ChatId;
use crate::errors::DeliveryError;
use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::HashSet;
use tracing::warn;

/// Send `text` to every chat concurrently, returning how many succeeded
pub async fn broadcast(messenger: &dyn Messenger, chats: &[ChatId], text: &str) -> usize {
    let sends = chats.iter().map(|&chat| async move { (chat, messenger.send(chat, text).await) });

    let mut delivered = 0;
    for (chat, result) in join_all(sends).await {
        match result {
            Ok(()) => delivered += 1,
            Err(e) => warn!(chat_id = %chat, error = %e, "Delivery failed"),
        }
    }
    delivered
}

/// Writes every message to stdout, prefixed with the chat id
#[derive(Debug, Default)]
pub struct ConsoleMessenger;

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send(&self, chat: ChatId, text: &str) -> Result<(), DeliveryError> {
        for line in text.lines() {
            println!("[{}] {}", chat, line);
        }
        Ok(())
    }
}

/// In-memory transport that keeps every delivered message
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(ChatId, String)>>,
    unreachable: Mutex<HashSet<ChatId>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future send to `chat` fail
    pub fn fail_chat(&self, chat: ChatId) {
        self.unreachable.lock().insert(chat);
    }

    pub fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().clone()
    }

    /// Messages delivered to one chat, in order
    pub fn sent_to(&self, chat: ChatId) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter(|(to, _)| *to == chat)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn count_containing(&self, chat: ChatId, needle: &str) -> usize {
        self.sent_to(chat).iter().filter(|text| text.contains(needle)).count()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, chat: ChatId, text: &str) -> Result<(), DeliveryError> {
        if self.unreachable.lock().contains(&chat) {
            return Err(DeliveryError::Unreachable(chat));
        }
        self.sent.lock().push((chat, text.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_broadcast_isolates_failures() {
        let messenger = RecordingMessenger::new();
        messenger.fail_chat(ChatId(2));

        let delivered = broadcast(&messenger, &[ChatId(1), ChatId(2), ChatId(3)], "B-7").await;

        assert_eq!(delivered, 2);
        assert_eq!(messenger.sent_to(ChatId(1)), vec!["B-7".to_string()]);
        assert!(messenger.sent_to(ChatId(2)).is_empty());
        assert_eq!(messenger.sent_to(ChatId(3)).len(), 1);
    }

    #[tokio::test]
    async fn test_broadcast_to_nobody() {
        let messenger = RecordingMessenger::new();
        assert_eq!(broadcast(&messenger, &[], "hello").await, 0);
        assert!(messenger.sent().is_empty());
    }
}
