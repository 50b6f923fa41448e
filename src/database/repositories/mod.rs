// ABOUTME: Store traits for users, catalog foods, meals and goals
// ABOUTME: Implemented by Database so services can be tested against any backing store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Repository traits
//!
//! These are the collaborator contracts the services consume. Every listing
//! returns rows in creation order.

use super::Database;
use async_trait::async_trait;
use chrono::NaiveDate;
use nutrition_core::errors::AppResult;
use nutrition_core::models::{FoodItem, Goal, MealEntry, User};
use uuid::Uuid;

/// User accounts keyed by unique email
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert a new user, failing with `ResourceAlreadyExists` on email collision
    async fn create(&self, user: &User) -> AppResult<User>;

    /// Persist profile fields and the derived target of an existing user
    async fn save(&self, user: &User) -> AppResult<User>;
}

/// Read-only view of the food catalog
#[async_trait]
pub trait FoodCatalog: Send + Sync {
    /// Find a food by id, including soft-deleted ones
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FoodItem>>;
}

/// Meal entries
#[async_trait]
pub trait MealStore: Send + Sync {
    /// Insert an entry
    async fn create(&self, meal: &MealEntry) -> AppResult<MealEntry>;

    /// Find an entry by id regardless of owner
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MealEntry>>;

    /// Replace an entry, matching on both id and owner
    async fn update(&self, meal: &MealEntry) -> AppResult<MealEntry>;

    /// Delete an entry, matching on both id and owner
    async fn delete(&self, id: Uuid, owner: Uuid) -> AppResult<bool>;

    /// All entries of `owner` on `date`
    async fn list_for_user_on_date(&self, owner: Uuid, date: NaiveDate)
        -> AppResult<Vec<MealEntry>>;

    /// All entries of `owner`
    async fn list_for_user(&self, owner: Uuid) -> AppResult<Vec<MealEntry>>;
}

/// Weight goals
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Insert a goal
    async fn create(&self, goal: &Goal) -> AppResult<Goal>;

    /// Find a goal by id regardless of owner
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Goal>>;

    /// All goals of `owner`
    async fn list_for_user(&self, owner: Uuid) -> AppResult<Vec<Goal>>;

    /// Delete a goal, matching on both id and owner
    async fn delete(&self, id: Uuid, owner: Uuid) -> AppResult<bool>;
}

#[async_trait]
impl UserStore for Database {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users().get_by_email(email).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.users().get(id).await
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        self.users().create(user).await
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        self.users().save(user).await
    }
}

#[async_trait]
impl FoodCatalog for Database {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FoodItem>> {
        self.foods().get(id).await
    }
}

#[async_trait]
impl MealStore for Database {
    async fn create(&self, meal: &MealEntry) -> AppResult<MealEntry> {
        self.meals().create(meal).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MealEntry>> {
        self.meals().get(id).await
    }

    async fn update(&self, meal: &MealEntry) -> AppResult<MealEntry> {
        self.meals().update(meal).await
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> AppResult<bool> {
        self.meals().delete(id, owner).await
    }

    async fn list_for_user_on_date(
        &self,
        owner: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<MealEntry>> {
        self.meals().list_for_user_on_date(owner, date).await
    }

    async fn list_for_user(&self, owner: Uuid) -> AppResult<Vec<MealEntry>> {
        self.meals().list_for_user(owner).await
    }
}

#[async_trait]
impl GoalStore for Database {
    async fn create(&self, goal: &Goal) -> AppResult<Goal> {
        self.goals().create(goal).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Goal>> {
        self.goals().get(id).await
    }

    async fn list_for_user(&self, owner: Uuid) -> AppResult<Vec<Goal>> {
        self.goals().list_for_user(owner).await
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> AppResult<bool> {
        self.goals().delete(id, owner).await
    }
}
