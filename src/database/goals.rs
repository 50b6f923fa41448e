// ABOUTME: Database operations for user weight goals
// ABOUTME: Create, fetch, list per owner in creation order, and owner-scoped delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_date, parse_timestamp, parse_uuid, DATE_FORMAT};
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{Goal, GoalType};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

const GOAL_COLUMNS: &str =
    "id, user_id, description, target_weight_kg, target_date, goal_type, created_at";

/// Goal table manager
pub struct GoalsManager {
    pool: SqlitePool,
}

impl GoalsManager {
    /// Create a new goals manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a goal
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create(&self, goal: &Goal) -> AppResult<Goal> {
        sqlx::query(
            r"
            INSERT INTO goals (
                id, user_id, description, target_weight_kg, target_date, goal_type, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(goal.id.to_string())
        .bind(goal.user_id.to_string())
        .bind(&goal.description)
        .bind(goal.target_weight_kg)
        .bind(goal.target_date.map(|d| d.format(DATE_FORMAT).to_string()))
        .bind(goal.goal_type.as_str())
        .bind(goal.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create goal: {e}")))?;

        Ok(goal.clone())
    }

    /// Get a goal by id regardless of owner
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, goal_id: Uuid) -> AppResult<Option<Goal>> {
        let query = format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id = $1");
        sqlx::query(&query)
            .bind(goal_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get goal: {e}")))?
            .as_ref()
            .map(row_to_goal)
            .transpose()
    }

    /// Goals of a user in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Goal>> {
        let query = format!("SELECT {GOAL_COLUMNS} FROM goals WHERE user_id = $1 ORDER BY rowid");
        sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list goals: {e}")))?
            .iter()
            .map(row_to_goal)
            .collect()
    }

    /// Delete a goal owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, goal_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND user_id = $2")
            .bind(goal_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete goal: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_goal(row: &SqliteRow) -> AppResult<Goal> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let target_date: Option<String> = row.get("target_date");
    let goal_type: String = row.get("goal_type");
    let created_at: String = row.get("created_at");

    Ok(Goal {
        id: parse_uuid(&id_str)?,
        user_id: parse_uuid(&user_id_str)?,
        description: row.get("description"),
        target_weight_kg: row.get("target_weight_kg"),
        target_date: target_date.as_deref().map(parse_date).transpose()?,
        goal_type: GoalType::parse(&goal_type).unwrap_or(GoalType::Maintain),
        created_at: parse_timestamp(&created_at)?,
    })
}
