// ABOUTME: Nutrition computation modules for calorie targets and nutrient scaling
// ABOUTME: Pure, stateless calculations consumed by the profile and meal services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Daily calorie target from body metrics
pub mod calorie_target;
/// Per-100g to absolute nutrient scaling
pub mod nutrient_scaling;

pub use calorie_target::{
    calculate_calorie_breakdown, compute_daily_calorie_target, CalorieProfile,
    CalorieTargetBreakdown,
};
pub use nutrient_scaling::{meal_nutrients, scale_nutrients, validate_quantity};
