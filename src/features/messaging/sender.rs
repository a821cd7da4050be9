use async_trait::async_trait;

/// Transport that delivers a message payload to a conversation
///
/// The delivery queue owns retries; implementations make a single attempt.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, conversation_id: &str, content: &str) -> Result<(), SendError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("Transient send failure: {0}")]
    Transient(String),

    #[error("Send attempt timed out after {0}ms")]
    Timeout(u64),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Message rejected: {0}")]
    Rejected(String),
}

impl SendError {
    /// Classify a transport status code
    ///
    /// 429 and 5xx are retryable, any other status is treated as a rejection.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            429 => SendError::RateLimited(message),
            500..=599 => SendError::Transient(message),
            _ => SendError::Rejected(format!("HTTP {} - {}", status, message)),
        }
    }

    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SendError::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    struct EchoSender;

    #[async_trait]
    impl MessageSender for EchoSender {
        async fn send(&self, conversation_id: &str, content: &str) -> Result<(), SendError> {
            if content.is_empty() {
                return Err(SendError::from_status(400, "empty message"));
            }
            if conversation_id.is_empty() {
                return Err(SendError::from_status(503, "no conversation"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_from_status_classification() {
        assert_eq!(
            SendError::from_status(429, "slow down"),
            SendError::RateLimited("slow down".to_string())
        );
        assert_eq!(
            SendError::from_status(502, "bad gateway"),
            SendError::Transient("bad gateway".to_string())
        );
        assert_eq!(
            SendError::from_status(404, "conversation missing"),
            SendError::Rejected("HTTP 404 - conversation missing".to_string())
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(SendError::Transient("network".to_string()).is_retryable());
        assert!(SendError::Timeout(5000).is_retryable());
        assert!(SendError::RateLimited("429".to_string()).is_retryable());
        assert!(!SendError::Rejected("invalid".to_string()).is_retryable());
    }

    #[tokio::test]
    async fn test_sender_through_trait_object() {
        let sender: Box<dyn MessageSender> = Box::new(EchoSender);

        assert_ok!(sender.send("conv-1", "Halo").await);

        let rejected = assert_err!(sender.send("conv-1", "").await);
        assert!(!rejected.is_retryable());

        let transient = assert_err!(sender.send("", "Halo").await);
        assert!(transient.is_retryable());
    }
}
