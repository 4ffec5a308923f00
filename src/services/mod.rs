//! Application services

pub mod auth_service;
pub mod email_service;

pub use auth_service::AuthService;
pub use email_service::{mailer_from_config, LogMailer, Mailer, SmtpMailer};
