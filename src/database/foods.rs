// ABOUTME: Database operations for the food catalog with per-100g nutrient profiles
// ABOUTME: Catalog reads (active list, name search, category, thresholds) plus soft and hard deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_timestamp, parse_uuid};
use chrono::Utc;
use nutrition_core::constants::nutrition::{
    HIGH_PROTEIN_THRESHOLD_G, LOSS_RECOMMENDATION_MAX_KCAL,
};
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{FoodCategory, FoodItem, GoalType, NewFood, NutrientProfile};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Error as SqlxError, Row, Sqlite, SqlitePool};
use uuid::Uuid;

const FOOD_COLUMNS: &str = "id, name, calories, protein_g, carbs_g, fat_g, fiber_g, \
     description, image_url, category, is_active, created_at";

/// Food catalog table manager
pub struct FoodsManager {
    pool: SqlitePool,
}

impl FoodsManager {
    /// Create a new foods manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a catalog food
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for negative amounts, `ResourceAlreadyExists`
    /// if the name is taken, or a database error otherwise
    pub async fn create(&self, food: &NewFood) -> AppResult<FoodItem> {
        if !food.nutrients_per_100g.is_valid() {
            return Err(AppError::invalid_input(
                "Nutrient amounts must be finite and non-negative",
            ));
        }

        let item = FoodItem {
            id: Uuid::new_v4(),
            name: food.name.clone(),
            nutrients_per_100g: food.nutrients_per_100g,
            description: food.description.clone(),
            image_url: food.image_url.clone(),
            category: food.category,
            is_active: true,
            created_at: Utc::now(),
        };
        let n = &item.nutrients_per_100g;

        sqlx::query(
            r"
            INSERT INTO foods (
                id, name, calories, protein_g, carbs_g, fat_g, fiber_g,
                description, image_url, category, is_active, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(item.id.to_string())
        .bind(&item.name)
        .bind(n.calories)
        .bind(n.protein_g)
        .bind(n.carbs_g)
        .bind(n.fat_g)
        .bind(n.fiber_g)
        .bind(&item.description)
        .bind(&item.image_url)
        .bind(item.category.as_str())
        .bind(true)
        .bind(item.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            SqlxError::Database(db_err) if db_err.is_unique_violation() => {
                AppError::already_exists(format!("Food {} already exists", item.name))
            }
            _ => AppError::database(format!("Failed to create food: {e}")),
        })?;

        Ok(item)
    }

    /// Get a food by id, active or not
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, food_id: Uuid) -> AppResult<Option<FoodItem>> {
        let query = format!("SELECT {FOOD_COLUMNS} FROM foods WHERE id = $1");
        sqlx::query(&query)
            .bind(food_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get food: {e}")))?
            .as_ref()
            .map(row_to_food)
            .transpose()
    }

    /// List active foods ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_active(&self) -> AppResult<Vec<FoodItem>> {
        let query = format!("SELECT {FOOD_COLUMNS} FROM foods WHERE is_active = 1 ORDER BY name");
        self.fetch_all(sqlx::query(&query)).await
    }

    /// Case-insensitive substring search over active food names
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn search(&self, name: &str) -> AppResult<Vec<FoodItem>> {
        let pattern = format!("%{}%", escape_like(&name.to_lowercase()));
        let query = format!(
            "SELECT {FOOD_COLUMNS} FROM foods \
             WHERE is_active = 1 AND lower(name) LIKE $1 ESCAPE '\\' ORDER BY name"
        );
        self.fetch_all(sqlx::query(&query).bind(pattern)).await
    }

    /// Active foods in a category
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_by_category(&self, category: FoodCategory) -> AppResult<Vec<FoodItem>> {
        let query = format!(
            "SELECT {FOOD_COLUMNS} FROM foods WHERE is_active = 1 AND category = $1 ORDER BY name"
        );
        self.fetch_all(sqlx::query(&query).bind(category.as_str()))
            .await
    }

    /// Active foods with at least `min_protein_g` protein per 100 g, richest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_high_protein(&self, min_protein_g: f64) -> AppResult<Vec<FoodItem>> {
        let query = format!(
            "SELECT {FOOD_COLUMNS} FROM foods \
             WHERE is_active = 1 AND protein_g >= $1 ORDER BY protein_g DESC, name"
        );
        self.fetch_all(sqlx::query(&query).bind(min_protein_g))
            .await
    }

    /// Active foods with at most `max_calories` per 100 g, leanest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_low_calorie(&self, max_calories: f64) -> AppResult<Vec<FoodItem>> {
        let query = format!(
            "SELECT {FOOD_COLUMNS} FROM foods \
             WHERE is_active = 1 AND calories <= $1 ORDER BY calories, name"
        );
        self.fetch_all(sqlx::query(&query).bind(max_calories))
            .await
    }

    /// Active foods suited to a weight goal
    ///
    /// Loss favors lean foods, gain favors protein-rich foods, maintain
    /// returns the whole active catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_recommended(&self, goal: GoalType) -> AppResult<Vec<FoodItem>> {
        match goal {
            GoalType::Loss => self.list_low_calorie(LOSS_RECOMMENDATION_MAX_KCAL).await,
            GoalType::Gain => self.list_high_protein(HIGH_PROTEIN_THRESHOLD_G).await,
            GoalType::Maintain => self.list_active().await,
        }
    }

    /// Soft-delete: hide from catalog reads but keep resolvable by id
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn deactivate(&self, food_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("UPDATE foods SET is_active = 0 WHERE id = $1")
            .bind(food_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to deactivate food: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard delete; meals referencing the food are detached, not removed
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, food_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM foods WHERE id = $1")
            .bind(food_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete food: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch_all<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> AppResult<Vec<FoodItem>> {
        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list foods: {e}")))?
            .iter()
            .map(row_to_food)
            .collect()
    }
}

/// Escape LIKE wildcards in user input
fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn row_to_food(row: &SqliteRow) -> AppResult<FoodItem> {
    let id_str: String = row.get("id");
    let category: String = row.get("category");
    let is_active: i64 = row.get("is_active");
    let created_at: String = row.get("created_at");

    Ok(FoodItem {
        id: parse_uuid(&id_str)?,
        name: row.get("name"),
        nutrients_per_100g: NutrientProfile {
            calories: row.get("calories"),
            protein_g: row.get("protein_g"),
            carbs_g: row.get("carbs_g"),
            fat_g: row.get("fat_g"),
            fiber_g: row.get("fiber_g"),
        },
        description: row.get("description"),
        image_url: row.get("image_url"),
        category: FoodCategory::parse(&category).unwrap_or_default(),
        is_active: is_active == 1,
        created_at: parse_timestamp(&created_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("apple"), "apple");
    }
}
