// ABOUTME: Database operations for meal entries with stored absolute nutrient snapshots
// ABOUTME: CRUD plus per-user and per-user-per-date listings in creation order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_date, parse_timestamp, parse_uuid, DATE_FORMAT};
use chrono::NaiveDate;
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{MealEntry, MealType, NutrientProfile};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

const MEAL_COLUMNS: &str = "id, user_id, food_id, food_name, meal_type, quantity_g, calories, \
     protein_g, carbs_g, fat_g, fiber_g, meal_date, created_at";

/// Meal table manager
///
/// Listings are ordered by insertion (`rowid`), which is creation order.
pub struct MealsManager {
    pool: SqlitePool,
}

impl MealsManager {
    /// Create a new meals manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a meal entry
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create(&self, meal: &MealEntry) -> AppResult<MealEntry> {
        let n = &meal.nutrients;
        sqlx::query(
            r"
            INSERT INTO meals (
                id, user_id, food_id, food_name, meal_type, quantity_g, calories,
                protein_g, carbs_g, fat_g, fiber_g, meal_date, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(meal.id.to_string())
        .bind(meal.user_id.to_string())
        .bind(meal.food_id.map(|id| id.to_string()))
        .bind(&meal.food_name)
        .bind(meal.meal_type.as_str())
        .bind(meal.quantity_g)
        .bind(n.calories)
        .bind(n.protein_g)
        .bind(n.carbs_g)
        .bind(n.fat_g)
        .bind(n.fiber_g)
        .bind(meal.meal_date.format(DATE_FORMAT).to_string())
        .bind(meal.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create meal: {e}")))?;

        Ok(meal.clone())
    }

    /// Get a meal by id regardless of owner
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, meal_id: Uuid) -> AppResult<Option<MealEntry>> {
        let query = format!("SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1");
        sqlx::query(&query)
            .bind(meal_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get meal: {e}")))?
            .as_ref()
            .map(row_to_meal)
            .transpose()
    }

    /// Replace the mutable fields of a meal owned by `meal.user_id`
    ///
    /// The owner appears in the WHERE clause, so a concurrent caller that
    /// is not the owner can never overwrite the row.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no row matched, or a database error
    pub async fn update(&self, meal: &MealEntry) -> AppResult<MealEntry> {
        let n = &meal.nutrients;
        let result = sqlx::query(
            r"
            UPDATE meals SET
                food_id = $1, food_name = $2, meal_type = $3, quantity_g = $4, calories = $5,
                protein_g = $6, carbs_g = $7, fat_g = $8, fiber_g = $9, meal_date = $10
            WHERE id = $11 AND user_id = $12
            ",
        )
        .bind(meal.food_id.map(|id| id.to_string()))
        .bind(&meal.food_name)
        .bind(meal.meal_type.as_str())
        .bind(meal.quantity_g)
        .bind(n.calories)
        .bind(n.protein_g)
        .bind(n.carbs_g)
        .bind(n.fat_g)
        .bind(n.fiber_g)
        .bind(meal.meal_date.format(DATE_FORMAT).to_string())
        .bind(meal.id.to_string())
        .bind(meal.user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update meal: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Meal").with_resource_id(meal.id.to_string()));
        }
        Ok(meal.clone())
    }

    /// Delete a meal owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, meal_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
            .bind(meal_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete meal: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// All meals of a user on one date, in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_for_user_on_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<MealEntry>> {
        let query = format!(
            "SELECT {MEAL_COLUMNS} FROM meals WHERE user_id = $1 AND meal_date = $2 ORDER BY rowid"
        );
        sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(date.format(DATE_FORMAT).to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list meals for date: {e}")))?
            .iter()
            .map(row_to_meal)
            .collect()
    }

    /// All meals of a user, in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<MealEntry>> {
        let query = format!("SELECT {MEAL_COLUMNS} FROM meals WHERE user_id = $1 ORDER BY rowid");
        sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list meals: {e}")))?
            .iter()
            .map(row_to_meal)
            .collect()
    }
}

fn row_to_meal(row: &SqliteRow) -> AppResult<MealEntry> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let food_id_str: Option<String> = row.get("food_id");
    let meal_type: String = row.get("meal_type");
    let meal_date: String = row.get("meal_date");
    let created_at: String = row.get("created_at");

    Ok(MealEntry {
        id: parse_uuid(&id_str)?,
        user_id: parse_uuid(&user_id_str)?,
        food_id: food_id_str.as_deref().map(parse_uuid).transpose()?,
        food_name: row.get("food_name"),
        meal_type: MealType::from_str_lossy(&meal_type),
        quantity_g: row.get("quantity_g"),
        nutrients: NutrientProfile {
            calories: row.get("calories"),
            protein_g: row.get("protein_g"),
            carbs_g: row.get("carbs_g"),
            fat_g: row.get("fat_g"),
            fiber_g: row.get("fiber_g"),
        },
        meal_date: parse_date(&meal_date)?,
        created_at: parse_timestamp(&created_at)?,
    })
}
