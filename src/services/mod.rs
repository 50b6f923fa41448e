// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Services take the caller's identity and depend only on store traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they extract the authenticated identity and the
//! request body, then delegate here. Services are built over the store traits
//! in [`crate::database::repositories`] so they can run against any backing
//! store.

/// Source of the current date
pub mod clock;

/// Registration and login
pub mod credentials;

/// Weight goals
pub mod goals;

/// Meal ledger and daily aggregation
pub mod meal_ledger;

/// Profile management and calorie target recomputation
pub mod profile;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{AuthService, LoginRequest, LoginResponse, RegisterRequest};
pub use goals::GoalService;
pub use meal_ledger::MealLedger;
pub use profile::ProfileService;
