//! Outbound notification seam
//!
//! Mail delivery is best-effort everywhere: callers spawn sends and log
//! failures, they never let a failed send fail the parent operation.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Sender of account notification emails
#[async_trait]
pub trait Mailer: Send + Sync + Debug {
    /// Welcome message carrying the freshly issued API key
    async fn send_welcome(&self, to: &str, name: &str, api_key: &str) -> Result<(), DomainError>;

    /// Recovery message re-sending the existing API key
    async fn send_key_recovery(
        &self,
        to: &str,
        name: &str,
        api_key: &str,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Records sent messages; optionally fails every send.
    #[derive(Debug, Default)]
    pub struct MockMailer {
        pub sent: Arc<RwLock<Vec<(String, String, String)>>>,
        fail: Arc<RwLock<bool>>,
    }

    impl MockMailer {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn set_fail(&self, fail: bool) {
            *self.fail.write().await = fail;
        }

        pub async fn sent_count(&self) -> usize {
            self.sent.read().await.len()
        }

        async fn record(&self, kind: &str, to: &str, api_key: &str) -> Result<(), DomainError> {
            if *self.fail.read().await {
                return Err(DomainError::mail("mock mailer configured to fail"));
            }
            self.sent
                .write()
                .await
                .push((kind.to_string(), to.to_string(), api_key.to_string()));
            Ok(())
        }
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send_welcome(
            &self,
            to: &str,
            _name: &str,
            api_key: &str,
        ) -> Result<(), DomainError> {
            self.record("welcome", to, api_key).await
        }

        async fn send_key_recovery(
            &self,
            to: &str,
            _name: &str,
            api_key: &str,
        ) -> Result<(), DomainError> {
            self.record("recovery", to, api_key).await
        }
    }
}
