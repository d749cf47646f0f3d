//! Outbound email delivery for access codes.
//!
//! DESIGN
//! ======
//! Routes depend on the `Mailer` trait so tests can swap in a recorder and
//! deployments without a provider simply run with `AppState::mailer = None`.

use std::sync::Arc;

use async_trait::async_trait;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;

use super::email_auth::render_email_auth_template;
use crate::config::ResendConfig;

const ACCESS_CODE_SUBJECT: &str = "Tu código de acceso a InmoGestion";

#[derive(Debug, thiserror::Error)]
#[error("email delivery failed: {0}")]
pub struct DeliveryError(pub String);

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a freshly generated access code to `to_email`.
    async fn send_access_code(&self, to_email: &str, code: &str) -> Result<(), DeliveryError>;
}

/// Resend-backed mailer.
pub struct ResendMailer {
    client: Resend,
    from: String,
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_access_code(&self, to_email: &str, code: &str) -> Result<(), DeliveryError> {
        let html = render_email_auth_template(to_email, code);
        let email = CreateEmailBaseOptions::new(&self.from, [to_email], ACCESS_CODE_SUBJECT).with_html(&html);
        self.client
            .emails
            .send(email)
            .await
            .map_err(|e| DeliveryError(e.to_string()))?;
        Ok(())
    }
}

/// Build a Resend mailer from configuration.
#[must_use]
pub fn resend(config: ResendConfig) -> Arc<dyn Mailer> {
    Arc::new(ResendMailer { client: Resend::new(&config.api_key), from: config.from })
}
