// ABOUTME: Meal ledger models for recorded food intake
// ABOUTME: MealEntry, MealType, MealRequest and the daily nutrition summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::food::NutrientProfile;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "BREAKFAST",
            Self::Lunch => "LUNCH",
            Self::Dinner => "DINNER",
            Self::Snack => "SNACK",
        }
    }

    /// Parse meal type from string, falling back to `Snack`
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "BREAKFAST" => Self::Breakfast,
            "LUNCH" => Self::Lunch,
            "DINNER" => Self::Dinner,
            _ => Self::Snack,
        }
    }
}

/// Recorded meal owned by exactly one user
///
/// `nutrients` is the absolute snapshot computed when the entry was last
/// written. It is never recomputed on read, so it survives changes to or
/// removal of the referenced food.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Catalog food, detached when the food is deleted
    pub food_id: Option<Uuid>,
    /// Food name at the time of writing
    pub food_name: Option<String>,
    /// Meal type
    pub meal_type: MealType,
    /// Quantity in grams
    pub quantity_g: f64,
    /// Absolute nutrient amounts
    pub nutrients: NutrientProfile,
    /// Calendar date the meal belongs to
    pub meal_date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Fields submitted when adding or replacing a meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRequest {
    /// Catalog food reference
    #[serde(default)]
    pub food_id: Option<Uuid>,
    /// Name used when no catalog food resolves
    #[serde(default)]
    pub food_name: Option<String>,
    /// Meal type
    pub meal_type: MealType,
    /// Quantity in grams
    pub quantity_g: f64,
    /// Date, defaults to today
    #[serde(default)]
    pub meal_date: Option<NaiveDate>,
    /// Absolute nutrients for entries without a catalog food
    #[serde(default)]
    pub manual_nutrients: Option<NutrientProfile>,
}

/// Result of adding a meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealAdded {
    /// Stored entry
    pub meal: MealEntry,
    /// Progress message for today
    pub message: String,
}

/// Aggregated intake for one user on one date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyNutritionSummary {
    /// Date summarized
    pub date: NaiveDate,
    /// Number of entries on the date
    pub meal_count: usize,
    /// Summed nutrients
    pub totals: NutrientProfile,
    /// Target used for the comparison
    pub calorie_target: i64,
    /// True when the user has no computed target and the default was used
    pub target_is_default: bool,
    /// `max(0, target - total calories)`
    pub remaining_calories: f64,
    /// `total / target * 100`
    pub progress_percent: f64,
}
