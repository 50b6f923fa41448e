// ABOUTME: Route module organization for the nutrition tracker HTTP endpoints
// ABOUTME: Domain route groups plus shared path and query parsing helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the service layer. Authentication is enforced by the access
//! guard layered over the whole router, so handlers only extract
//! [`crate::middleware::AuthenticatedUser`].

/// Registration and login
pub mod auth;
/// Public food catalog reads
pub mod foods;
/// Weight goals
pub mod goals;
/// Health and readiness probes
pub mod health;
/// Meal ledger
pub mod meals;
/// Current user profile
pub mod users;

pub use auth::AuthRoutes;
pub use foods::FoodRoutes;
pub use goals::GoalRoutes;
pub use health::HealthRoutes;
pub use meals::MealRoutes;
pub use users::UserRoutes;

use chrono::NaiveDate;
use nutrition_core::errors::{AppError, AppResult};
use serde::Deserialize;
use uuid::Uuid;

/// Optional `?date=YYYY-MM-DD` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    /// Requested date, defaults to today
    #[serde(default)]
    pub date: Option<String>,
}

/// Parse a resource id from the path
pub(crate) fn parse_id(raw: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::invalid_input(format!("Invalid {resource} id: {raw}")))
}

/// Parse an optional date, falling back to `today`
pub(crate) fn parse_date_or(raw: Option<&str>, today: NaiveDate) -> AppResult<NaiveDate> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(today),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::invalid_input(format!("Invalid date '{s}', expected YYYY-MM-DD"))),
    }
}
