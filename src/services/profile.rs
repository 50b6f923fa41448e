// ABOUTME: Profile management that keeps the daily calorie target in sync with body metrics
// ABOUTME: Current-user lookup, profile replacement with recomputation, and explicit target requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::UserStore;
use crate::intelligence::calorie_target::{
    calculate_calorie_breakdown, CalorieProfile, CalorieTargetBreakdown,
};
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{ProfileUpdate, User};
use std::sync::Arc;
use tracing::info;

/// Profile reads and updates for the authenticated user
#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserStore>,
}

impl ProfileService {
    /// Create the service
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// The user bound to `identity`
    ///
    /// # Errors
    ///
    /// Returns `IdentityNotFound` if no user has that email
    pub async fn current_user(&self, identity: &str) -> AppResult<User> {
        self.users
            .find_by_email(identity)
            .await?
            .ok_or_else(|| AppError::identity_not_found(identity))
    }

    /// Replace the profile and recompute the daily calorie target
    ///
    /// The target is never accepted from the client. An update that leaves
    /// weight, height or age unset is rejected and nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientProfileData` or `InvalidInput` from the
    /// calculator, `IdentityNotFound`, or a storage error
    pub async fn update_profile(&self, identity: &str, update: ProfileUpdate) -> AppResult<User> {
        let mut user = self.current_user(identity).await?;

        user.display_name = update.display_name.or(user.display_name);
        user.age = update.age;
        user.weight_kg = update.weight_kg;
        user.height_cm = update.height_cm;
        user.gender = update.gender;
        user.activity_level = update.activity_level;
        user.goal = update.goal;

        let breakdown = calculate_calorie_breakdown(&CalorieProfile::from(&user))?;
        user.daily_calorie_target = Some(breakdown.daily_calorie_target);

        let saved = self.users.save(&user).await?;
        info!(
            user.email = %identity,
            daily_calorie_target = breakdown.daily_calorie_target,
            "Profile updated"
        );
        Ok(saved)
    }

    /// Compute the target from the stored profile without persisting it
    ///
    /// # Errors
    ///
    /// Returns `InsufficientProfileData` if metrics are missing, or
    /// `IdentityNotFound`
    pub async fn calorie_target(&self, identity: &str) -> AppResult<CalorieTargetBreakdown> {
        let user = self.current_user(identity).await?;
        calculate_calorie_breakdown(&CalorieProfile::from(&user))
    }
}
