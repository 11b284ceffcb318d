//! Outbound mail adapters

mod smtp;
pub mod templates;

pub use smtp::SmtpMailer;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{DomainError, Mailer};

/// Fallback mailer used when SMTP is not configured.
///
/// Logs what would have been sent so local registration still works.
#[derive(Debug, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_welcome(&self, to: &str, _name: &str, _api_key: &str) -> Result<(), DomainError> {
        info!(to, "SMTP not configured; skipping welcome email");
        Ok(())
    }

    async fn send_key_recovery(
        &self,
        to: &str,
        _name: &str,
        _api_key: &str,
    ) -> Result<(), DomainError> {
        info!(to, "SMTP not configured; skipping key recovery email");
        Ok(())
    }
}
