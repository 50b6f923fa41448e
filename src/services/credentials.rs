// ABOUTME: Registration and login business logic with bcrypt password hashing
// ABOUTME: Issues session tokens through the token service on successful login
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::AuthManager;
use crate::database::UserStore;
use crate::logging::AppLogger;
use chrono::{DateTime, Utc};
use nutrition_core::constants::auth::MIN_PASSWORD_LENGTH;
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::User;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Well-formed bcrypt hash matching no password, at the given cost
///
/// Verified against on unknown emails so both login failures cost one
/// bcrypt run.
fn dummy_password_hash(cost: u32) -> String {
    format!("$2b${cost:02}${}", ".".repeat(53))
}

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Email, the login identity
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Optional display name
    #[serde(default)]
    pub display_name: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Bearer token
    pub token: String,
    /// Token expiry
    pub expires_at: DateTime<Utc>,
    /// Logged-in user
    pub user: User,
}

/// Registration and login
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    auth_manager: Arc<AuthManager>,
    bcrypt_cost: u32,
}

impl AuthService {
    /// Create the service
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, auth_manager: Arc<AuthManager>, bcrypt_cost: u32) -> Self {
        Self {
            users,
            auth_manager,
            bcrypt_cost,
        }
    }

    /// Register a new user with an empty profile
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed email or short password,
    /// `ResourceAlreadyExists` if the email is taken, or a storage error
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        let email = normalize_email(&request.email);
        tracing::info!(user.email = %email, "User registration attempt");

        if !is_valid_email(&email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if !is_valid_password(&request.password) {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "Email {email} is already registered"
            )));
        }

        let password = request.password;
        let cost = self.bcrypt_cost;
        let password_hash = task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))?;

        let user = self
            .users
            .create(&User::new(email, password_hash, request.display_name))
            .await?;

        AppLogger::log_auth_event(&user.email, "register", true, None);
        Ok(user)
    }

    /// Verify credentials and issue a session token
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` with the same message for an unknown email and
    /// a wrong password
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let email = normalize_email(&request.email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            let password = request.password;
            let dummy_hash = dummy_password_hash(self.bcrypt_cost);
            // timing only, the outcome is discarded
            let _ = task::spawn_blocking(move || bcrypt::verify(password, &dummy_hash)).await;
            AppLogger::log_auth_event(&email, "login", false, Some("unknown email"));
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        };

        let password = request.password;
        let password_hash = user.password_hash.clone();
        let is_valid = task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            AppLogger::log_auth_event(&email, "login", false, Some("wrong password"));
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        }

        let issued = self.auth_manager.issue_token(&user.email)?;
        AppLogger::log_auth_event(&user.email, "login", true, None);

        Ok(LoginResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }
}

/// Emails are compared case-insensitively and without surrounding whitespace
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal structural email check
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() <= 5 {
        return false;
    }
    let Some(at_pos) = email.find('@') else {
        return false;
    };
    if at_pos == 0 || at_pos == email.len() - 1 {
        return false;
    }
    email[at_pos + 1..].contains('.')
}

/// Password strength check
#[must_use]
pub const fn is_valid_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LENGTH
}
