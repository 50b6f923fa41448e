// ABOUTME: Access guard that authenticates every request outside the public allow-list
// ABOUTME: Verifies bearer tokens, resolves the user and injects the caller identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Access Guard
//!
//! Requests whose path is on the allow-list pass through untouched. Every
//! other request must carry `Authorization: Bearer <token>`; the token is
//! verified, the embedded identity is resolved to a user, and the identity
//! is attached to the request as [`AuthenticatedUser`]. All failures are
//! rejected with 403.

use crate::auth::AuthManager;
use crate::database::UserStore;
use crate::logging::AppLogger;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use nutrition_core::constants::auth::{BEARER_PREFIX, PUBLIC_EXACT_PATHS, PUBLIC_PATH_PREFIXES};
use nutrition_core::errors::{AppError, AppResult};
use std::sync::Arc;
use tracing::{debug, Span};

/// Identity established by the access guard for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Email of the caller
    pub email: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(AppError::auth_required)
    }
}

/// Collaborators the guard needs
#[derive(Clone)]
pub struct AccessGuard {
    auth_manager: Arc<AuthManager>,
    users: Arc<dyn UserStore>,
}

impl AccessGuard {
    /// Create a guard over the token service and user store
    #[must_use]
    pub fn new(auth_manager: Arc<AuthManager>, users: Arc<dyn UserStore>) -> Self {
        Self {
            auth_manager,
            users,
        }
    }

    /// Authenticate a request by its headers
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no bearer token is present, an auth error
    /// when verification fails, or `IdentityNotFound` when the token names a
    /// user that does not exist
    pub async fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthenticatedUser> {
        let token = bearer_token(headers).ok_or_else(AppError::auth_required)?;

        let email = self.auth_manager.verify(token)?;

        if self.users.find_by_email(&email).await?.is_none() {
            return Err(AppError::identity_not_found(&email));
        }

        Ok(AuthenticatedUser { email })
    }
}

/// Axum middleware enforcing authentication outside the public allow-list
pub async fn require_auth(
    State(guard): State<AccessGuard>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path();
    if is_public_path(path) {
        debug!(path = %path, "Public path, skipping authentication");
        return next.run(req).await;
    }

    match guard.authenticate(req.headers()).await {
        Ok(user) => {
            Span::current().record("user_email", user.email.as_str());
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(error) => {
            AppLogger::log_security_event(
                "request_rejected",
                &format!("{} {}: {}", req.method(), req.uri().path(), error.message),
                None,
            );
            error.into_response()
        }
    }
}

/// Whether `path` bypasses authentication
///
/// A prefix `/x/` matches `/x` itself and everything below it.
#[must_use]
pub fn is_public_path(path: &str) -> bool {
    if PUBLIC_EXACT_PATHS.contains(&path) {
        return true;
    }
    PUBLIC_PATH_PREFIXES.iter().any(|prefix| {
        path.starts_with(prefix) || prefix.strip_suffix('/').is_some_and(|bare| path == bare)
    })
}

/// Token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/"));
        assert!(is_public_path("/error"));
        assert!(is_public_path("/api/auth/login"));
        assert!(is_public_path("/api/foods/"));
        assert!(is_public_path("/api/foods"));
        assert!(is_public_path("/health"));
        assert!(is_public_path("/swagger-ui/index.html"));

        assert!(!is_public_path("/api/meals"));
        assert!(!is_public_path("/api/foodsX"));
        assert!(!is_public_path("/api/users/me"));
        assert!(!is_public_path("/errors"));
    }

    #[test]
    fn test_bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }
}
