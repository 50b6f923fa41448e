// ABOUTME: Database operations for user accounts and body profiles
// ABOUTME: Creation with unique-email enforcement, lookup by email or id, and profile saves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_timestamp, parse_uuid};
use chrono::Utc;
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{ActivityLevel, Gender, GoalType, User};
use sqlx::{sqlite::SqliteRow, Error as SqlxError, Row, SqlitePool};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, display_name, password_hash, age, weight_kg, height_cm, \
     gender, activity_level, goal, daily_calorie_target, created_at, updated_at";

/// User table manager
pub struct UsersManager {
    pool: SqlitePool,
}

impl UsersManager {
    /// Create a new users manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the email is taken, or a database
    /// error otherwise
    pub async fn create(&self, user: &User) -> AppResult<User> {
        sqlx::query(
            r"
            INSERT INTO users (
                id, email, display_name, password_hash, age, weight_kg, height_cm,
                gender, activity_level, goal, daily_calorie_target, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(user.age.map(i64::from))
        .bind(user.weight_kg)
        .bind(user.height_cm)
        .bind(user.gender.map(|g| g.as_str()))
        .bind(user.activity_level.map(|a| a.as_str()))
        .bind(user.goal.map(|g| g.as_str()))
        .bind(user.daily_calorie_target)
        .bind(user.created_at.to_rfc3339())
        .bind(user.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            SqlxError::Database(db_err) if db_err.is_unique_violation() => {
                AppError::already_exists(format!("Email {} is already registered", user.email))
            }
            _ => AppError::database(format!("Failed to create user: {e}")),
        })?;

        Ok(user.clone())
    }

    /// Find a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?
            .as_ref()
            .map(row_to_user)
            .transpose()
    }

    /// Find a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?
            .as_ref()
            .map(row_to_user)
            .transpose()
    }

    /// Persist the profile fields and derived target of an existing user
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist, or a database
    /// error otherwise
    pub async fn save(&self, user: &User) -> AppResult<User> {
        let now = Utc::now();
        let result = sqlx::query(
            r"
            UPDATE users SET
                display_name = $1, age = $2, weight_kg = $3, height_cm = $4, gender = $5,
                activity_level = $6, goal = $7, daily_calorie_target = $8, updated_at = $9
            WHERE id = $10
            ",
        )
        .bind(&user.display_name)
        .bind(user.age.map(i64::from))
        .bind(user.weight_kg)
        .bind(user.height_cm)
        .bind(user.gender.map(|g| g.as_str()))
        .bind(user.activity_level.map(|a| a.as_str()))
        .bind(user.goal.map(|g| g.as_str()))
        .bind(user.daily_calorie_target)
        .bind(now.to_rfc3339())
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save user: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User").with_resource_id(user.id.to_string()));
        }

        let mut saved = user.clone();
        saved.updated_at = now;
        Ok(saved)
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id_str: String = row.get("id");
    let age: Option<i64> = row.get("age");
    let gender: Option<String> = row.get("gender");
    let activity_level: Option<String> = row.get("activity_level");
    let goal: Option<String> = row.get("goal");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(User {
        id: parse_uuid(&id_str)?,
        email: row.get("email"),
        display_name: row.get("display_name"),
        password_hash: row.get("password_hash"),
        age: age.and_then(|a| u32::try_from(a).ok()),
        weight_kg: row.get("weight_kg"),
        height_cm: row.get("height_cm"),
        gender: gender.as_deref().and_then(Gender::parse),
        activity_level: activity_level.as_deref().and_then(ActivityLevel::parse),
        goal: goal.as_deref().and_then(GoalType::parse),
        daily_calorie_target: row.get("daily_calorie_target"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
