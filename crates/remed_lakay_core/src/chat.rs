//! crates/remed_lakay_core/src/chat.rs
//!
//! State of the advisory chat: an append-only message log and the count of
//! replies still outstanding.
//!
//! Requests are not serialized. Replies are appended in the order they
//! complete, which can differ from the order the questions were sent.

use crate::domain::ChatMessage;
use crate::ports::{PortError, PortResult};

/// Appended when the gateway fails or answers with nothing.
pub const CHAT_FALLBACK_REPLY: &str = "M pa t ka jwenn yon repons kounye a.";

/// Appended when no AI credentials are configured.
pub const CHAT_MISSING_KEY_REPLY: &str =
    "Tanpri konfigire yon API Key pou w ka pale ak Doktè Fèy AI.";

/// Shown while the log is still empty.
pub const CHAT_GREETING: &str = "Bonjou! Mwen se Doktè Fèy AI. Ki maladi k ap kale w oswa sou ki plant ou ta renmen konnen plis?";

/// A question accepted by [`ChatSession::submit`], to be sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub id: u64,
    pub query: String,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    outstanding: usize,
    next_request_id: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while at least one reply has not come back yet.
    pub fn awaiting_reply(&self) -> bool {
        self.outstanding > 0
    }

    /// Logs the user's question and returns the request to issue.
    /// Blank input is ignored and returns `None` without touching any state.
    pub fn submit(&mut self, text: &str) -> Option<ChatRequest> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(query));
        self.outstanding += 1;
        self.next_request_id += 1;

        Some(ChatRequest {
            id: self.next_request_id,
            query: query.to_string(),
        })
    }

    /// Appends the bot reply for a finished request.
    pub fn complete(&mut self, outcome: PortResult<String>) -> &ChatMessage {
        self.outstanding = self.outstanding.saturating_sub(1);
        self.messages.push(ChatMessage::bot(reply_text(outcome)));
        &self.messages[self.messages.len() - 1]
    }
}

/// Maps a gateway outcome to the text shown to the user.
pub fn reply_text(outcome: PortResult<String>) -> String {
    match outcome {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => CHAT_FALLBACK_REPLY.to_string(),
        Err(PortError::NotConfigured) => CHAT_MISSING_KEY_REPLY.to_string(),
        Err(_) => CHAT_FALLBACK_REPLY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChatRole;
    use std::time::Duration;

    #[test]
    fn submit_logs_the_question_before_any_reply() {
        let mut chat = ChatSession::new();
        let request = chat.submit("  Ki sa m ka bwè pou grip?  ").unwrap();

        assert_eq!(request.query, "Ki sa m ka bwè pou grip?");
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, ChatRole::User);
        assert!(chat.awaiting_reply());
    }

    #[test]
    fn blank_input_changes_nothing() {
        let mut chat = ChatSession::new();
        for input in ["", "   ", "\n\t"] {
            assert!(chat.submit(input).is_none());
        }
        assert!(chat.messages().is_empty());
        assert!(!chat.awaiting_reply());
    }

    #[test]
    fn failures_and_empty_replies_use_the_fallback() {
        let outcomes = [
            Err(PortError::Unexpected("quota".into())),
            Err(PortError::Timeout(Duration::from_secs(30))),
            Ok(String::new()),
            Ok("   ".to_string()),
        ];
        for outcome in outcomes {
            let mut chat = ChatSession::new();
            chat.submit("kesyon").unwrap();
            let reply = chat.complete(outcome);
            assert_eq!(reply.role, ChatRole::Bot);
            assert_eq!(reply.text, CHAT_FALLBACK_REPLY);
            assert!(!chat.awaiting_reply());
        }
    }

    #[test]
    fn missing_credentials_explain_themselves() {
        let mut chat = ChatSession::new();
        chat.submit("kesyon").unwrap();
        assert_eq!(chat.complete(Err(PortError::NotConfigured)).text, CHAT_MISSING_KEY_REPLY);
    }

    #[test]
    fn overlapping_requests_append_in_completion_order() {
        let mut chat = ChatSession::new();
        let first = chat.submit("premye").unwrap();
        let second = chat.submit("dezyèm").unwrap();
        assert_ne!(first.id, second.id);

        chat.complete(Ok("repons dezyèm".into()));
        assert!(chat.awaiting_reply());
        chat.complete(Ok("repons premye".into()));
        assert!(!chat.awaiting_reply());

        let texts: Vec<_> = chat.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["premye", "dezyèm", "repons dezyèm", "repons premye"]);
    }
}
