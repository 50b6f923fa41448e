// ABOUTME: Weight goal tracking scoped to the authenticated user
// ABOUTME: Create, list and delete goals with ownership checks on removal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::clock::Clock;
use crate::database::{GoalStore, UserStore};
use crate::logging::AppLogger;
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{Goal, GoalRequest, User};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Owner-scoped weight goals
#[derive(Clone)]
pub struct GoalService {
    users: Arc<dyn UserStore>,
    goals: Arc<dyn GoalStore>,
    clock: Arc<dyn Clock>,
}

impl GoalService {
    /// Create the service
    #[must_use]
    pub fn new(
        users: Arc<dyn UserStore>,
        goals: Arc<dyn GoalStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            goals,
            clock,
        }
    }

    /// Add a goal for `owner`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty description or a non-positive
    /// target weight, `IdentityNotFound`, or a storage error
    pub async fn add_goal(&self, owner: &str, request: GoalRequest) -> AppResult<Goal> {
        let user = self.resolve_owner(owner).await?;

        let description = request.description.trim();
        if description.is_empty() {
            return Err(AppError::invalid_input("Goal description must not be empty"));
        }
        if let Some(weight) = request.target_weight_kg {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(AppError::invalid_input(
                    "Target weight must be a positive number",
                ));
            }
        }

        let goal = Goal {
            id: Uuid::new_v4(),
            user_id: user.id,
            description: description.to_owned(),
            target_weight_kg: request.target_weight_kg,
            target_date: request.target_date,
            goal_type: request.goal_type,
            created_at: self.clock.now(),
        };
        let goal = self.goals.create(&goal).await?;
        info!(user.email = %owner, goal.id = %goal.id, "Goal added");
        Ok(goal)
    }

    /// Goals of `owner`, in creation order
    ///
    /// # Errors
    ///
    /// Returns `IdentityNotFound`, or a storage error
    pub async fn list_goals(&self, owner: &str) -> AppResult<Vec<Goal>> {
        let user = self.resolve_owner(owner).await?;
        self.goals.list_for_user(user.id).await
    }

    /// Delete a goal owned by `owner`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the goal does not exist,
    /// `PermissionDenied` if someone else owns it, or a storage error
    pub async fn delete_goal(&self, goal_id: Uuid, owner: &str) -> AppResult<()> {
        let user = self.resolve_owner(owner).await?;
        let goal = self
            .goals
            .find_by_id(goal_id)
            .await?
            .ok_or_else(|| AppError::not_found("Goal").with_resource_id(goal_id.to_string()))?;

        if goal.user_id != user.id {
            AppLogger::log_security_event(
                "goal_ownership_violation",
                &format!("attempted delete of goal {goal_id}"),
                Some(owner),
            );
            return Err(AppError::permission_denied("Unauthorized to delete this goal")
                .with_resource_id(goal_id.to_string()));
        }

        if !self.goals.delete(goal_id, user.id).await? {
            return Err(AppError::not_found("Goal").with_resource_id(goal_id.to_string()));
        }
        info!(user.email = %owner, goal.id = %goal_id, "Goal deleted");
        Ok(())
    }

    async fn resolve_owner(&self, owner: &str) -> AppResult<User> {
        self.users
            .find_by_email(owner)
            .await?
            .ok_or_else(|| AppError::identity_not_found(owner))
    }
}
