//! Outgoing email
//!
//! The mailer is a trait so handlers and services never depend on a live
//! SMTP server; when email is disabled in configuration, messages are
//! logged instead of sent.

use crate::{config::EmailConfig, error::AppError};
use async_trait::async_trait;
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use secrecy::ExposeSecret;
use std::sync::Arc;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}

/// SMTP-backed mailer
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &EmailConfig) -> Result<Self, AppError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| AppError::Config(format!("SMTP relay setup failed: {}", e)))?
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.expose_secret().clone(),
            ))
            .build();

        let from = config
            .from_address
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid from address: {}", e)))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|e| AppError::Internal(format!("Invalid recipient address: {}", e)))?)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        self.transport.send(message).await.map_err(|e| {
            tracing::error!("Failed to send email: {}", e);
            AppError::Internal(format!("Failed to send email: {}", e))
        })?;

        tracing::info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}

/// Mailer used when email delivery is disabled
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        tracing::info!(to = %to, subject = %subject, "Email delivery disabled, logging instead");
        tracing::debug!(body = %body, "Email body");
        Ok(())
    }
}

/// Pick the mailer implementation from configuration
pub fn mailer_from_config(config: &EmailConfig) -> Result<Arc<dyn Mailer>, AppError> {
    if config.enabled {
        Ok(Arc::new(SmtpMailer::from_config(config)?))
    } else {
        Ok(Arc::new(LogMailer))
    }
}
