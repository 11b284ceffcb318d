//! Registration service
//!
//! Validates input, prevents duplicate accounts, issues keys and triggers
//! the welcome notification. Duplicate protection is check-then-insert
//! against the store; a true race between concurrent registrations with
//! the same email is accepted (see DESIGN.md).

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::user::{NewUser, UserRepository};
use crate::domain::{DomainError, Mailer};
use crate::infrastructure::api_key::ApiKeyService;

#[derive(Debug)]
pub struct RegistrationService {
    users: Arc<dyn UserRepository>,
    api_keys: Arc<ApiKeyService>,
    mailer: Arc<dyn Mailer>,
}

impl RegistrationService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        api_keys: Arc<ApiKeyService>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            users,
            api_keys,
            mailer,
        }
    }

    /// Register a new account and return its API key.
    ///
    /// The welcome email carrying the key is sent fire-and-forget: a
    /// failed send is logged and never affects the registration result.
    pub async fn register(
        &self,
        nome: &str,
        email: &str,
        uso: Option<String>,
    ) -> Result<String, DomainError> {
        if nome.is_empty() || email.is_empty() {
            return Err(DomainError::validation("Nome e email são obrigatórios!"));
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(DomainError::conflict("Email já cadastrado!"));
        }

        let api_key = self.api_keys.generate_unique_key().await?;

        self.users
            .insert(NewUser {
                name: nome.to_string(),
                email: email.to_string(),
                usualidade: uso,
                api_key: api_key.clone(),
            })
            .await?;

        info!(email, "Account registered");

        let mailer = Arc::clone(&self.mailer);
        let (to, name, key) = (email.to_string(), nome.to_string(), api_key.clone());
        tokio::spawn(async move {
            if let Err(e) = mailer.send_welcome(&to, &name, &key).await {
                warn!(email = to, "Failed to send welcome email: {}", e);
            }
        });

        Ok(api_key)
    }

    /// Re-send the existing key for an already registered email.
    ///
    /// Recovery path kept for alternate entry points; not reachable from
    /// the current HTTP surface.
    pub async fn resend_key(&self, email: &str) -> Result<(), DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::validation("Email não cadastrado!"))?;

        self.mailer
            .send_key_recovery(&user.email, &user.name, &user.api_key)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mailer::mock::MockMailer;
    use crate::domain::user::mock::MockUserRepository;

    struct Fixture {
        users: Arc<MockUserRepository>,
        mailer: Arc<MockMailer>,
        service: RegistrationService,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MockUserRepository::new());
        let mailer = Arc::new(MockMailer::new());
        let api_keys = Arc::new(ApiKeyService::new(
            users.clone() as Arc<dyn UserRepository>
        ));
        let service = RegistrationService::new(
            users.clone() as Arc<dyn UserRepository>,
            api_keys,
            mailer.clone() as Arc<dyn Mailer>,
        );
        Fixture {
            users,
            mailer,
            service,
        }
    }

    #[tokio::test]
    async fn test_register_issues_key_and_persists_account() {
        let f = fixture();

        let key = f
            .service
            .register("Maria", "maria@example.com", Some("pesquisa".to_string()))
            .await
            .unwrap();

        assert_eq!(key.len(), 43);

        let user = f.users.find_by_api_key(&key).await.unwrap().unwrap();
        assert_eq!(user.email, "maria@example.com");
        assert_eq!(user.usualidade.as_deref(), Some("pesquisa"));
    }

    #[tokio::test]
    async fn test_register_sends_welcome_with_key() {
        let f = fixture();

        let key = f
            .service
            .register("Maria", "maria@example.com", None)
            .await
            .unwrap();

        // The send runs in a spawned task.
        tokio::task::yield_now().await;

        let sent = f.mailer.sent.read().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "welcome");
        assert_eq!(sent[0].1, "maria@example.com");
        assert_eq!(sent[0].2, key);
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let f = fixture();

        let err = f.service.register("", "maria@example.com", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));

        let err = f.service.register("Maria", "", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));

        assert_eq!(f.users.user_count().await, 0);
        assert_eq!(f.mailer.sent_count().await, 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let f = fixture();

        f.service
            .register("Maria", "maria@example.com", None)
            .await
            .unwrap();

        let err = f
            .service
            .register("Maria Again", "maria@example.com", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));

        // Still exactly one account for that email.
        assert_eq!(f.users.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_register_succeeds_when_mail_fails() {
        let f = fixture();
        f.mailer.set_fail(true).await;

        let result = f.service.register("Maria", "maria@example.com", None).await;
        assert!(result.is_ok());

        tokio::task::yield_now().await;
        assert_eq!(f.mailer.sent_count().await, 0);
        assert_eq!(f.users.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_resend_key_for_existing_email() {
        let f = fixture();
        let key = f
            .service
            .register("Maria", "maria@example.com", None)
            .await
            .unwrap();

        f.service.resend_key("maria@example.com").await.unwrap();

        let sent = f.mailer.sent.read().await;
        let recovery: Vec<_> = sent.iter().filter(|(kind, _, _)| kind == "recovery").collect();
        assert_eq!(recovery.len(), 1);
        assert_eq!(recovery[0].2, key);
    }

    #[tokio::test]
    async fn test_resend_key_unknown_email() {
        let f = fixture();

        let err = f.service.resend_key("nobody@example.com").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
