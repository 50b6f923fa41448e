// ABOUTME: Food catalog models with per-100g nutrient profiles
// ABOUTME: FoodItem, FoodCategory, NewFood and the NutrientProfile value type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use uuid::Uuid;

/// Five tracked nutrient amounts
///
/// Used both for per-100g catalog profiles and for the absolute amounts
/// stored on a meal entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
    /// Dietary fiber in grams
    pub fiber_g: f64,
}

impl NutrientProfile {
    /// All-zero profile
    pub const ZERO: Self = Self {
        calories: 0.0,
        protein_g: 0.0,
        carbs_g: 0.0,
        fat_g: 0.0,
        fiber_g: 0.0,
    };

    /// Construct a profile from its five amounts
    #[must_use]
    pub const fn new(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64, fiber_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
            fiber_g,
        }
    }

    /// True when every amount is finite and non-negative
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [
            self.calories,
            self.protein_g,
            self.carbs_g,
            self.fat_g,
            self.fiber_g,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl Add for NutrientProfile {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein_g: self.protein_g + rhs.protein_g,
            carbs_g: self.carbs_g + rhs.carbs_g,
            fat_g: self.fat_g + rhs.fat_g,
            fiber_g: self.fiber_g + rhs.fiber_g,
        }
    }
}

impl AddAssign for NutrientProfile {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutrientProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Catalog grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FoodCategory {
    /// Fruits
    Fruits,
    /// Vegetables
    Vegetables,
    /// Grains and cereals
    Grains,
    /// Meat, fish, eggs and legumes
    Protein,
    /// Milk products
    Dairy,
    /// Nuts and seeds
    NutsSeeds,
    /// Drinks
    Beverages,
    /// Snacks
    Snacks,
    /// Anything else
    #[default]
    Other,
}

impl FoodCategory {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fruits => "FRUITS",
            Self::Vegetables => "VEGETABLES",
            Self::Grains => "GRAINS",
            Self::Protein => "PROTEIN",
            Self::Dairy => "DAIRY",
            Self::NutsSeeds => "NUTS_SEEDS",
            Self::Beverages => "BEVERAGES",
            Self::Snacks => "SNACKS",
            Self::Other => "OTHER",
        }
    }

    /// Parse from database or path representation (case-insensitive)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "FRUITS" => Some(Self::Fruits),
            "VEGETABLES" => Some(Self::Vegetables),
            "GRAINS" => Some(Self::Grains),
            "PROTEIN" => Some(Self::Protein),
            "DAIRY" => Some(Self::Dairy),
            "NUTS_SEEDS" => Some(Self::NutsSeeds),
            "BEVERAGES" => Some(Self::Beverages),
            "SNACKS" => Some(Self::Snacks),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Catalog food with nutrients normalized per 100 g
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    /// Unique identifier
    pub id: Uuid,
    /// Unique name
    pub name: String,
    /// Nutrients per 100 g
    pub nutrients_per_100g: NutrientProfile,
    /// Free-form description
    pub description: Option<String>,
    /// Image URL
    pub image_url: Option<String>,
    /// Category
    pub category: FoodCategory,
    /// Soft-delete flag
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Catalog entry to insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFood {
    /// Unique name
    pub name: String,
    /// Nutrients per 100 g
    pub nutrients_per_100g: NutrientProfile,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Image URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Category
    #[serde(default)]
    pub category: FoodCategory,
}
