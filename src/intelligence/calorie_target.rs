// ABOUTME: Daily calorie target calculation from body metrics, activity level and goal
// ABOUTME: Mifflin-St Jeor BMR, activity-factor TDEE, fixed goal adjustment, rounded result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calorie Target Calculator
//!
//! Stateless: callers persist the returned target on the user record.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! # Rounding
//!
//! The final target is rounded to the nearest integer with halves rounded
//! away from zero (`f64::round`). Targets are positive in practice, so this
//! is round-half-up.

use nutrition_core::constants::{activity_factors, bmr, goal_adjustments};
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{ActivityLevel, Gender, GoalType, User};
use serde::{Deserialize, Serialize};

/// Inputs to the calorie target computation
///
/// Weight, height and age are required; the three categorical inputs fall
/// back to male, sedentary and no adjustment when unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalorieProfile {
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Age in years
    pub age: Option<u32>,
    /// Gender
    pub gender: Option<Gender>,
    /// Activity level
    pub activity_level: Option<ActivityLevel>,
    /// Weight goal
    pub goal: Option<GoalType>,
}

impl From<&User> for CalorieProfile {
    fn from(user: &User) -> Self {
        Self {
            weight_kg: user.weight_kg,
            height_cm: user.height_cm,
            age: user.age,
            gender: user.gender,
            activity_level: user.activity_level,
            goal: user.goal,
        }
    }
}

/// Intermediate values of a target computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieTargetBreakdown {
    /// Basal metabolic rate (kcal/day)
    pub bmr: f64,
    /// Activity factor applied to BMR
    pub activity_multiplier: f64,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: f64,
    /// Goal adjustment added to TDEE (kcal/day)
    pub goal_adjustment: f64,
    /// Rounded daily target (kcal/day)
    pub daily_calorie_target: i64,
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// `BMR = 10 * weight + 6.25 * height - 5 * age + s` where `s` is +5 for
/// men (and unspecified gender) and -161 for women. No floor is applied.
#[must_use]
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Option<Gender>,
) -> f64 {
    let gender_constant = match gender {
        Some(Gender::Female) => bmr::FEMALE_CONSTANT,
        Some(Gender::Male) | None => bmr::MALE_CONSTANT,
    };

    bmr::WEIGHT_COEF * weight_kg + bmr::HEIGHT_COEF * height_cm - bmr::AGE_COEF * f64::from(age)
        + gender_constant
}

/// Activity factor for TDEE
#[must_use]
pub const fn activity_multiplier(level: Option<ActivityLevel>) -> f64 {
    match level {
        Some(ActivityLevel::Sedentary) | None => activity_factors::SEDENTARY,
        Some(ActivityLevel::Light) => activity_factors::LIGHT,
        Some(ActivityLevel::Moderate) => activity_factors::MODERATE,
        Some(ActivityLevel::Active) => activity_factors::ACTIVE,
    }
}

/// Calorie adjustment for the weight goal
#[must_use]
pub const fn goal_adjustment(goal: Option<GoalType>) -> f64 {
    match goal {
        Some(GoalType::Loss) => -goal_adjustments::LOSS_DEFICIT,
        Some(GoalType::Gain) => goal_adjustments::GAIN_SURPLUS,
        Some(GoalType::Maintain) | None => 0.0,
    }
}

/// Compute the full breakdown for a profile
///
/// # Errors
///
/// Returns `InsufficientProfileData` listing every missing metric, or
/// `InvalidInput` when a metric is present but not a positive number
pub fn calculate_calorie_breakdown(profile: &CalorieProfile) -> AppResult<CalorieTargetBreakdown> {
    let (weight_kg, height_cm, age) = required_metrics(profile)?;

    let bmr = calculate_mifflin_st_jeor(weight_kg, height_cm, age, profile.gender);
    let activity_multiplier = activity_multiplier(profile.activity_level);
    let tdee = bmr * activity_multiplier;
    let goal_adjustment = goal_adjustment(profile.goal);

    Ok(CalorieTargetBreakdown {
        bmr,
        activity_multiplier,
        tdee,
        goal_adjustment,
        daily_calorie_target: (tdee + goal_adjustment).round() as i64,
    })
}

/// Compute the rounded daily calorie target for a profile
///
/// # Errors
///
/// See [`calculate_calorie_breakdown`]
pub fn compute_daily_calorie_target(profile: &CalorieProfile) -> AppResult<i64> {
    calculate_calorie_breakdown(profile).map(|b| b.daily_calorie_target)
}

fn required_metrics(profile: &CalorieProfile) -> AppResult<(f64, f64, u32)> {
    let mut missing = Vec::new();
    if profile.weight_kg.is_none() {
        missing.push("weight_kg");
    }
    if profile.height_cm.is_none() {
        missing.push("height_cm");
    }
    if profile.age.is_none() {
        missing.push("age");
    }

    match (profile.weight_kg, profile.height_cm, profile.age) {
        (Some(weight), Some(height), Some(age)) => {
            if !(weight.is_finite() && weight > 0.0) {
                return Err(AppError::invalid_input("Weight must be a positive number"));
            }
            if !(height.is_finite() && height > 0.0) {
                return Err(AppError::invalid_input("Height must be a positive number"));
            }
            if age == 0 {
                return Err(AppError::invalid_input("Age must be at least one year"));
            }
            Ok((weight, height, age))
        }
        _ => Err(AppError::insufficient_profile_data(&missing)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_unset_categories() {
        assert!((activity_multiplier(None) - 1.2).abs() < f64::EPSILON);
        assert!(goal_adjustment(None).abs() < f64::EPSILON);
        let male = calculate_mifflin_st_jeor(70.0, 175.0, 25, Some(Gender::Male));
        let unset = calculate_mifflin_st_jeor(70.0, 175.0, 25, None);
        assert!((male - unset).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let err = compute_daily_calorie_target(&CalorieProfile {
            height_cm: Some(170.0),
            ..CalorieProfile::default()
        })
        .unwrap_err();
        assert!(err.message.contains("weight_kg"));
        assert!(err.message.contains("age"));
        assert!(!err.message.contains("height_cm"));
    }
}
