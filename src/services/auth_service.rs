//! Authentication service: registration, login, password reset

use crate::{
    auth::jwt::{TokenPurpose, TokenService},
    auth::password::PasswordHasher,
    config::AppConfig,
    error::AppError,
    models::auth::*,
    models::user::{Role, UserResponse},
    repository::{NewUser, UserStore},
    services::email_service::Mailer,
};
use chrono::Duration;
use std::sync::Arc;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    token_service: Arc<TokenService>,
    hasher: Arc<PasswordHasher>,
    mailer: Arc<dyn Mailer>,
    config: Arc<AppConfig>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        token_service: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
        mailer: Arc<dyn Mailer>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self { users, token_service, hasher, mailer, config }
    }

    /// Register a new account. The email must not be in use; the password
    /// is hashed before anything is persisted.
    pub async fn register(&self, req: RegisterRequest) -> Result<RegisterResponse, AppError> {
        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::Conflict("Email is already in use".to_string()));
        }

        let role = req.role.as_deref().map(Role::from).unwrap_or(Role::Gestionnaire);
        let password_hash = self.hasher.hash(&req.password)?;

        let user = self
            .users
            .create(NewUser { email: req.email, password_hash, role })
            .await
            .map_err(|e| match e {
                // The store enforces uniqueness atomically; a concurrent
                // registration can still lose the race here.
                crate::repository::StoreError::Conflict(_) => {
                    AppError::Conflict("Email is already in use".to_string())
                }
                other => other.into(),
            })?;

        // Welcome email is best-effort; registration already succeeded
        if let Err(e) = self
            .mailer
            .send(
                &user.email,
                "Welcome to Our Service!",
                "Hello,\n\nThank you for registering on our platform. \
                 We are excited to have you with us!",
            )
            .await
        {
            tracing::warn!(error = %e, "Failed to send welcome email");
        }

        tracing::info!(user_id = user.id, "User registered");

        Ok(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        })
    }

    /// Log in with email and password, returning a signed access token.
    /// Unknown email and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.hasher.verify(&req.password, &user.password_hash) {
            tracing::debug!(user_id = user.id, "Password verification failed");
            return Err(AppError::InvalidCredentials);
        }

        let role = Role::from(user.role.as_str());
        let ttl = Duration::seconds(self.config.security.access_token_exp_secs as i64);
        let token = self.token_service.issue(user.id, role, TokenPurpose::Access, ttl)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            token,
            role,
            user: UserResponse::from(user),
        })
    }

    /// Email a reset link carrying a short-lived reset token
    pub async fn forgot_password(&self, req: ForgotPasswordRequest) -> Result<(), AppError> {
        let user = self.users.find_by_email(&req.email).await?.ok_or(AppError::NotFound)?;

        let role = Role::from(user.role.as_str());
        let ttl = Duration::seconds(self.config.security.reset_token_exp_secs as i64);
        let token = self.token_service.issue(user.id, role, TokenPurpose::Reset, ttl)?;

        let reset_link =
            format!("{}/{}", self.config.email.reset_link_base.trim_end_matches('/'), token);

        self.mailer
            .send(
                &user.email,
                "Password Reset",
                &format!("Click the link to reset your password: {}", reset_link),
            )
            .await?;

        tracing::info!(user_id = user.id, "Password reset link sent");
        Ok(())
    }

    /// Consume a reset token and store the new password hash
    pub async fn reset_password(
        &self,
        token: &str,
        req: ResetPasswordRequest,
    ) -> Result<(), AppError> {
        let claims = self.token_service.verify_reset(token).map_err(|rejection| {
            tracing::debug!(reason = %rejection, "Password reset token rejected");
            AppError::BadRequest("Invalid or expired token".to_string())
        })?;

        let user_id = claims
            .subject_id()
            .map_err(|_| AppError::BadRequest("Invalid or expired token".to_string()))?;

        let user = self.users.find_by_id(user_id).await?.ok_or(AppError::NotFound)?;

        let password_hash = self.hasher.hash(&req.password)?;
        self.users.update_password(user.id, &password_hash).await?;

        tracing::info!(user_id = user.id, "Password updated");
        Ok(())
    }
}
