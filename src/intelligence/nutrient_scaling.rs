// ABOUTME: Scales per-100g catalog nutrient profiles to the absolute amounts of a meal
// ABOUTME: Pure functions plus the quantity validation applied at the ledger boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrition_core::constants::nutrition::REFERENCE_QUANTITY_G;
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{FoodItem, NutrientProfile};

/// Scale a per-100g profile to `quantity_g` grams
///
/// Each field is `value * quantity / 100`, kept as a float with no
/// clamping. Inputs are assumed already validated.
#[must_use]
pub fn scale_nutrients(per_100g: &NutrientProfile, quantity_g: f64) -> NutrientProfile {
    let scale = |value: f64| value * quantity_g / REFERENCE_QUANTITY_G;

    NutrientProfile {
        calories: scale(per_100g.calories),
        protein_g: scale(per_100g.protein_g),
        carbs_g: scale(per_100g.carbs_g),
        fat_g: scale(per_100g.fat_g),
        fiber_g: scale(per_100g.fiber_g),
    }
}

/// Absolute nutrients for a meal entry
///
/// A resolved catalog food is scaled; without one the caller-supplied manual
/// amounts are used, or zero when none were given.
#[must_use]
pub fn meal_nutrients(
    food: Option<&FoodItem>,
    quantity_g: f64,
    manual: Option<NutrientProfile>,
) -> NutrientProfile {
    food.map_or_else(
        || manual.unwrap_or(NutrientProfile::ZERO),
        |item| scale_nutrients(&item.nutrients_per_100g, quantity_g),
    )
}

/// Validate a meal quantity
///
/// # Errors
///
/// Returns `InvalidInput` unless the quantity is finite and strictly positive
pub fn validate_quantity(quantity_g: f64) -> AppResult<f64> {
    if quantity_g.is_finite() && quantity_g > 0.0 {
        Ok(quantity_g)
    } else {
        Err(AppError::invalid_input(format!(
            "Quantity must be a positive number of grams, got {quantity_g}"
        )))
    }
}

/// Validate manually supplied nutrient amounts
///
/// # Errors
///
/// Returns `InvalidInput` if any amount is negative or not finite
pub fn validate_profile(profile: &NutrientProfile) -> AppResult<()> {
    if profile.is_valid() {
        Ok(())
    } else {
        Err(AppError::invalid_input(
            "Nutrient amounts must be finite and non-negative",
        ))
    }
}
