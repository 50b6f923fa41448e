// ABOUTME: Centralized resource container for dependency injection into route handlers
// ABOUTME: Builds the services once over a shared database handle and token service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! All services are constructed here, once, over the same [`Database`] and
//! [`AuthManager`]. Route modules receive `Arc<ServerResources>` as state.

use crate::auth::AuthManager;
use crate::database::{Database, FoodCatalog, GoalStore, MealStore, UserStore};
use crate::middleware::AccessGuard;
use crate::services::{AuthService, Clock, GoalService, MealLedger, ProfileService, SystemClock};
use std::sync::Arc;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Database handle
    pub database: Arc<Database>,
    /// Token service
    pub auth_manager: Arc<AuthManager>,
    /// Access guard for protected routes
    pub access_guard: AccessGuard,
    /// Registration and login
    pub auth_service: AuthService,
    /// Profile and calorie target
    pub profile_service: ProfileService,
    /// Meal ledger
    pub meal_ledger: MealLedger,
    /// Weight goals
    pub goal_service: GoalService,
}

impl ServerResources {
    /// Create resources using the system clock
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, bcrypt_cost: u32) -> Self {
        Self::with_clock(database, auth_manager, bcrypt_cost, Arc::new(SystemClock))
    }

    /// Create resources with an explicit source of "today"
    #[must_use]
    pub fn with_clock(
        database: Database,
        auth_manager: AuthManager,
        bcrypt_cost: u32,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let database = Arc::new(database);
        let auth_manager = Arc::new(auth_manager);

        let users: Arc<dyn UserStore> = database.clone();
        let foods: Arc<dyn FoodCatalog> = database.clone();
        let meals: Arc<dyn MealStore> = database.clone();
        let goals: Arc<dyn GoalStore> = database.clone();

        Self {
            access_guard: AccessGuard::new(auth_manager.clone(), users.clone()),
            auth_service: AuthService::new(users.clone(), auth_manager.clone(), bcrypt_cost),
            profile_service: ProfileService::new(users.clone()),
            meal_ledger: MealLedger::new(users.clone(), foods, meals, clock.clone()),
            goal_service: GoalService::new(users, goals, clock),
            database,
            auth_manager,
        }
    }
}
