//! Home-buying assistant conversation.
//!
//! The backend answers one message at a time and keeps no history, so the
//! transcript lives here. The user's line is recorded before the request goes
//! out; a failed request still gets a bot line so the conversation reads in
//! order.

use crate::{
    errors::{Error, Result},
    models::ChatMessage,
    services::ChatService,
};
use std::sync::Arc;
use tracing::{debug, error};

/// Bot line recorded when the assistant cannot be reached
pub const CHAT_FAILED: &str = "Something went wrong. Please try again.";

/// A conversation with the assistant plus the last failure, if any.
pub struct ChatSession {
    service: Arc<dyn ChatService>,
    transcript: Vec<ChatMessage>,
    last_error: Option<String>,
}

impl ChatSession {
    #[must_use]
    pub fn new(service: Arc<dyn ChatService>) -> Self {
        Self {
            service,
            transcript: Vec::new(),
            last_error: None,
        }
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Sends `message` and returns the assistant's reply.
    ///
    /// Blank messages are rejected without touching the transcript.
    pub async fn send(&mut self, message: &str) -> Result<&str> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::invalid("message", "cannot be empty"));
        }

        self.transcript.push(ChatMessage::user(message));
        match self.service.send_message(message).await {
            Ok(reply) => {
                debug!("Assistant replied with {} chars", reply.len());
                self.transcript.push(ChatMessage::bot(reply));
                self.last_error = None;
                Ok(self.last_text())
            }
            Err(e) => {
                error!("Chat request failed: {e}");
                self.transcript.push(ChatMessage::bot(CHAT_FAILED));
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    fn last_text(&self) -> &str {
        self.transcript.last().map_or("", |m| m.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::ChatSender;
    use crate::test_utils::FakeChat;

    #[tokio::test]
    async fn test_conversation_alternates_speakers() -> Result<()> {
        let fake = Arc::new(FakeChat::with_replies(&["Around 20%.", "Yes, usually."]));
        let mut session = ChatSession::new(fake.clone());

        assert_eq!(session.send("  How much down payment?  ").await?, "Around 20%.");
        session.send("Can I negotiate closing costs?").await?;

        let senders: Vec<ChatSender> = session.transcript().iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            [ChatSender::User, ChatSender::Bot, ChatSender::User, ChatSender::Bot]
        );
        assert_eq!(session.transcript()[0].text, "How much down payment?");
        assert_eq!(
            fake.received.lock().unwrap()[0],
            "How much down payment?"
        );
        assert!(session.last_error().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_message_is_not_sent() {
        let fake = Arc::new(FakeChat::with_replies(&["unused"]));
        let mut session = ChatSession::new(fake.clone());

        let result = session.send(" \n ").await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
        assert!(session.transcript().is_empty());
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_records_bot_apology() {
        // No replies queued: the fake answers 503
        let fake = Arc::new(FakeChat::default());
        let mut session = ChatSession::new(fake);

        assert!(session.send("Hello?").await.is_err());
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0], ChatMessage::user("Hello?"));
        assert_eq!(transcript[1], ChatMessage::bot(CHAT_FAILED));
        assert!(session.last_error().unwrap().contains("503"));
    }
}
