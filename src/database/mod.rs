// ABOUTME: SQLite database connection, schema migrations and per-table managers
// ABOUTME: Database is the shared handle implementing every store trait the services consume
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! One [`Database`] wraps the sqlx pool. Table access goes through small
//! managers (`UsersManager`, `FoodsManager`, `MealsManager`,
//! `GoalsManager`); the store traits in [`repositories`] are what the
//! services depend on.

mod foods;
mod goals;
mod meals;
/// Store traits consumed by the services
pub mod repositories;
mod users;

pub use foods::FoodsManager;
pub use goals::GoalsManager;
pub use meals::MealsManager;
pub use repositories::{FoodCatalog, GoalStore, MealStore, UserStore};
pub use users::UsersManager;

use chrono::{DateTime, NaiveDate, Utc};
use nutrition_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

/// Database handle shared across requests
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and run migrations
    ///
    /// In-memory URLs are pinned to a single long-lived connection so every
    /// query sees the same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a
    /// migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid DATABASE_URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let is_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let pool_options = if is_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(10)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database_url = %database_url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// User table access
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Food catalog table access
    #[must_use]
    pub fn foods(&self) -> FoodsManager {
        FoodsManager::new(self.pool.clone())
    }

    /// Meal table access
    #[must_use]
    pub fn meals(&self) -> MealsManager {
        MealsManager::new(self.pool.clone())
    }

    /// Goal table access
    #[must_use]
    pub fn goals(&self) -> GoalsManager {
        GoalsManager::new(self.pool.clone())
    }

    /// Verify the database answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the probe query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        for &statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        }
        Ok(())
    }
}

/// Idempotent schema statements, applied in order
const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        display_name TEXT,
        password_hash TEXT NOT NULL,
        age INTEGER,
        weight_kg REAL,
        height_cm REAL,
        gender TEXT,
        activity_level TEXT,
        goal TEXT,
        daily_calorie_target INTEGER,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS foods (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        calories REAL NOT NULL CHECK (calories >= 0),
        protein_g REAL NOT NULL CHECK (protein_g >= 0),
        carbs_g REAL NOT NULL CHECK (carbs_g >= 0),
        fat_g REAL NOT NULL CHECK (fat_g >= 0),
        fiber_g REAL NOT NULL CHECK (fiber_g >= 0),
        description TEXT,
        image_url TEXT,
        category TEXT NOT NULL DEFAULT 'OTHER',
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS meals (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        food_id TEXT REFERENCES foods(id) ON DELETE SET NULL,
        food_name TEXT,
        meal_type TEXT NOT NULL,
        quantity_g REAL NOT NULL,
        calories REAL NOT NULL,
        protein_g REAL NOT NULL,
        carbs_g REAL NOT NULL,
        fat_g REAL NOT NULL,
        fiber_g REAL NOT NULL,
        meal_date TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_meals_user_date ON meals(user_id, meal_date)",
    r"
    CREATE TABLE IF NOT EXISTS goals (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        description TEXT NOT NULL,
        target_weight_kg REAL,
        target_date TEXT,
        goal_type TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_goals_user ON goals(user_id)",
];

/// Parse a stored UUID column
pub(crate) fn parse_uuid(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))
}

/// Parse a stored RFC 3339 timestamp column
pub(crate) fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid timestamp: {e}")))
}

/// Parse a stored `YYYY-MM-DD` date column
pub(crate) fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| AppError::internal(format!("Invalid date: {e}")))
}

/// Storage format of calendar dates
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
