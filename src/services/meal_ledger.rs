// ABOUTME: Meal ledger owning owner-scoped meal creation, update, deletion and listings
// ABOUTME: Daily aggregation of nutrients compared against the owner's calorie target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Meal Ledger
//!
//! Every operation takes the caller's identity (their email, as established
//! by the access guard) and resolves it to a user record. Ownership of new
//! entries comes only from that identity, never from request input.
//!
//! Mutations distinguish a missing entry (`ResourceNotFound`) from an entry
//! owned by someone else (`PermissionDenied`). Reads are filtered by owner
//! in the query itself, so no other user's entries are ever loaded.

use super::clock::Clock;
use crate::database::{FoodCatalog, MealStore, UserStore};
use crate::intelligence::nutrient_scaling::{meal_nutrients, validate_profile, validate_quantity};
use crate::logging::AppLogger;
use chrono::NaiveDate;
use nutrition_core::constants::nutrition::DEFAULT_DAILY_CALORIE_TARGET;
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{
    DailyNutritionSummary, FoodItem, MealAdded, MealEntry, MealRequest, NutrientProfile, User,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Owner-scoped meal operations and daily aggregation
#[derive(Clone)]
pub struct MealLedger {
    users: Arc<dyn UserStore>,
    foods: Arc<dyn FoodCatalog>,
    meals: Arc<dyn MealStore>,
    clock: Arc<dyn Clock>,
}

impl MealLedger {
    /// Create a ledger over the given stores
    #[must_use]
    pub fn new(
        users: Arc<dyn UserStore>,
        foods: Arc<dyn FoodCatalog>,
        meals: Arc<dyn MealStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            foods,
            meals,
            clock,
        }
    }

    /// Today's date according to the ledger's clock
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Record a meal for `owner` and report today's progress
    ///
    /// The progress message always reflects today, even when the entry is
    /// backdated to another date.
    ///
    /// # Errors
    ///
    /// Returns `IdentityNotFound` for an unknown owner, `InvalidInput` for a
    /// non-positive quantity or negative manual nutrients, or a storage error
    pub async fn add_meal(&self, owner: &str, request: MealRequest) -> AppResult<MealAdded> {
        let user = self.resolve_owner(owner).await?;
        let quantity_g = validate_quantity(request.quantity_g)?;
        if let Some(manual) = &request.manual_nutrients {
            validate_profile(manual)?;
        }

        let food = self.resolve_food(request.food_id).await?;
        let meal = MealEntry {
            id: Uuid::new_v4(),
            user_id: user.id,
            food_id: food.as_ref().map(|f| f.id),
            food_name: food
                .as_ref()
                .map(|f| f.name.clone())
                .or(request.food_name),
            meal_type: request.meal_type,
            quantity_g,
            nutrients: meal_nutrients(food.as_ref(), quantity_g, request.manual_nutrients),
            meal_date: request.meal_date.unwrap_or_else(|| self.clock.today()),
            created_at: self.clock.now(),
        };

        let meal = self.meals.create(&meal).await?;
        info!(
            user.email = %owner,
            meal.id = %meal.id,
            meal.calories = meal.nutrients.calories,
            "Meal added"
        );

        let message = self.progress_message(&user, meal.nutrients.calories).await?;
        Ok(MealAdded { meal, message })
    }

    /// Replace the mutable fields of an entry and recompute its nutrients
    ///
    /// Applying the same request twice stores the same snapshot both times.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the entry does not exist,
    /// `PermissionDenied` if `owner` does not own it, or a validation or
    /// storage error
    pub async fn update_meal(
        &self,
        meal_id: Uuid,
        owner: &str,
        request: MealRequest,
    ) -> AppResult<MealEntry> {
        let user = self.resolve_owner(owner).await?;
        let existing = self.owned_meal(meal_id, &user, "update").await?;

        let quantity_g = validate_quantity(request.quantity_g)?;
        if let Some(manual) = &request.manual_nutrients {
            validate_profile(manual)?;
        }
        let food = self.resolve_food(request.food_id).await?;

        let updated = MealEntry {
            food_id: food.as_ref().map(|f| f.id),
            food_name: food
                .as_ref()
                .map(|f| f.name.clone())
                .or(request.food_name),
            meal_type: request.meal_type,
            quantity_g,
            nutrients: meal_nutrients(food.as_ref(), quantity_g, request.manual_nutrients),
            meal_date: request.meal_date.unwrap_or_else(|| self.clock.today()),
            ..existing
        };

        let updated = self.meals.update(&updated).await?;
        info!(user.email = %owner, meal.id = %meal_id, "Meal updated");
        Ok(updated)
    }

    /// Permanently delete an entry
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the entry does not exist,
    /// `PermissionDenied` if `owner` does not own it, or a storage error
    pub async fn delete_meal(&self, meal_id: Uuid, owner: &str) -> AppResult<()> {
        let user = self.resolve_owner(owner).await?;
        self.owned_meal(meal_id, &user, "delete").await?;

        if !self.meals.delete(meal_id, user.id).await? {
            return Err(AppError::not_found("Meal").with_resource_id(meal_id.to_string()));
        }
        info!(user.email = %owner, meal.id = %meal_id, "Meal deleted");
        Ok(())
    }

    /// Entries of `owner` on `date`, in creation order
    ///
    /// # Errors
    ///
    /// Returns `IdentityNotFound` for an unknown owner, or a storage error
    pub async fn list_for_date(&self, owner: &str, date: NaiveDate) -> AppResult<Vec<MealEntry>> {
        let user = self.resolve_owner(owner).await?;
        self.meals.list_for_user_on_date(user.id, date).await
    }

    /// All entries of `owner`, in creation order
    ///
    /// # Errors
    ///
    /// Returns `IdentityNotFound` for an unknown owner, or a storage error
    pub async fn list_all(&self, owner: &str) -> AppResult<Vec<MealEntry>> {
        let user = self.resolve_owner(owner).await?;
        self.meals.list_for_user(user.id).await
    }

    /// Summed nutrients for `owner` on `date` against their calorie target
    ///
    /// A user who never had a target computed is compared against the
    /// default display target and the summary says so.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientProfileData` if the stored target is zero or
    /// negative, `IdentityNotFound` for an unknown owner, or a storage error
    pub async fn daily_nutrition(
        &self,
        owner: &str,
        date: NaiveDate,
    ) -> AppResult<DailyNutritionSummary> {
        let user = self.resolve_owner(owner).await?;
        let meals = self.meals.list_for_user_on_date(user.id, date).await?;
        summarize_day(date, &meals, user.daily_calorie_target)
    }

    async fn resolve_owner(&self, owner: &str) -> AppResult<User> {
        self.users
            .find_by_email(owner)
            .await?
            .ok_or_else(|| AppError::identity_not_found(owner))
    }

    /// Resolve an optional food reference, tolerating a missing food
    async fn resolve_food(&self, food_id: Option<Uuid>) -> AppResult<Option<FoodItem>> {
        let Some(food_id) = food_id else {
            return Ok(None);
        };
        let food = self.foods.find_by_id(food_id).await?;
        if food.is_none() {
            warn!(food.id = %food_id, "Referenced food not found, using manual nutrients");
        }
        Ok(food)
    }

    /// Load an entry and check that `user` owns it
    async fn owned_meal(&self, meal_id: Uuid, user: &User, action: &str) -> AppResult<MealEntry> {
        let meal = self
            .meals
            .find_by_id(meal_id)
            .await?
            .ok_or_else(|| AppError::not_found("Meal").with_resource_id(meal_id.to_string()))?;

        if meal.user_id != user.id {
            AppLogger::log_security_event(
                "meal_ownership_violation",
                &format!("attempted {action} of meal {meal_id}"),
                Some(&user.email),
            );
            return Err(
                AppError::permission_denied(format!("Unauthorized to {action} this meal"))
                    .with_resource_id(meal_id.to_string()),
            );
        }
        Ok(meal)
    }

    async fn progress_message(&self, user: &User, entry_calories: f64) -> AppResult<String> {
        let today = self.clock.today();
        let total_today: f64 = self
            .meals
            .list_for_user_on_date(user.id, today)
            .await?
            .iter()
            .map(|m| m.nutrients.calories)
            .sum();
        let target = user
            .daily_calorie_target
            .unwrap_or(DEFAULT_DAILY_CALORIE_TARGET);

        Ok(format_progress_message(entry_calories, total_today, target))
    }
}

/// Human-readable status after adding a meal
#[must_use]
pub fn format_progress_message(entry_calories: f64, total_today: f64, target: i64) -> String {
    let target_f = target as f64;
    let mut message = format!(
        "Meal added successfully! Calories: {entry_calories:.1} cal | Total today: {total_today:.1}/{target} cal"
    );
    if total_today > target_f {
        message.push_str(" | You've exceeded your daily target!");
    } else {
        message.push_str(&format!(" | Remaining: {:.1} cal", target_f - total_today));
    }
    message
}

/// Aggregate one day of entries against a calorie target
///
/// # Errors
///
/// Returns `InsufficientProfileData` if `target` is zero or negative
pub fn summarize_day(
    date: NaiveDate,
    meals: &[MealEntry],
    target: Option<i64>,
) -> AppResult<DailyNutritionSummary> {
    let (calorie_target, target_is_default) = match target {
        Some(t) if t > 0 => (t, false),
        Some(_) => return Err(AppError::insufficient_profile_data(&["daily_calorie_target"])),
        None => (DEFAULT_DAILY_CALORIE_TARGET, true),
    };

    let totals: NutrientProfile = meals.iter().map(|m| m.nutrients).sum();
    let target_f = calorie_target as f64;

    Ok(DailyNutritionSummary {
        date,
        meal_count: meals.len(),
        totals,
        calorie_target,
        target_is_default,
        remaining_calories: (target_f - totals.calories).max(0.0),
        progress_percent: totals.calories / target_f * 100.0,
    })
}
