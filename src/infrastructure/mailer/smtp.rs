//! SMTP mailer (STARTTLS relay, HTML messages)

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::domain::{DomainError, Mailer};

use super::templates;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer").field("from", &self.from).finish()
    }
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, DomainError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| DomainError::configuration(format!("invalid SMTP relay: {}", e)))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let from = config
            .username
            .parse()
            .map_err(|e| DomainError::configuration(format!("invalid sender address: {}", e)))?;

        Ok(Self { transport, from })
    }

    async fn send_html(&self, to: &str, subject: &str, body: String) -> Result<(), DomainError> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| DomainError::mail(format!("invalid recipient '{}': {}", to, e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| DomainError::mail(format!("failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DomainError::mail(format!("SMTP send failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_welcome(&self, to: &str, name: &str, api_key: &str) -> Result<(), DomainError> {
        self.send_html(
            to,
            &templates::welcome_subject(name),
            templates::welcome_body(name, api_key),
        )
        .await
    }

    async fn send_key_recovery(
        &self,
        to: &str,
        name: &str,
        api_key: &str,
    ) -> Result<(), DomainError> {
        self.send_html(
            to,
            templates::RECOVERY_SUBJECT,
            templates::recovery_body(name, api_key),
        )
        .await
    }
}
