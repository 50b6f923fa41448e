// ABOUTME: User account and body-profile models
// ABOUTME: Gender, activity level and goal enums feeding the calorie target calculator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Biological sex used by the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// Male constant (+5)
    Male,
    /// Female constant (-161)
    Female,
}

impl Gender {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MALE" => Some(Self::Male),
            "FEMALE" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
}

impl ActivityLevel {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "SEDENTARY",
            Self::Light => "LIGHT",
            Self::Moderate => "MODERATE",
            Self::Active => "ACTIVE",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SEDENTARY" => Some(Self::Sedentary),
            "LIGHT" => Some(Self::Light),
            "MODERATE" => Some(Self::Moderate),
            "ACTIVE" => Some(Self::Active),
            _ => None,
        }
    }
}

/// Weight goal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    /// Lose weight (-500 kcal)
    Loss,
    /// Gain weight (+500 kcal)
    Gain,
    /// Keep current weight
    Maintain,
}

impl GoalType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loss => "LOSS",
            Self::Gain => "GAIN",
            Self::Maintain => "MAINTAIN",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LOSS" => Some(Self::Loss),
            "GAIN" => Some(Self::Gain),
            "MAINTAIN" => Some(Self::Maintain),
            _ => None,
        }
    }
}

/// Registered user with body profile
///
/// `daily_calorie_target` is derived from the profile and only ever written
/// by the profile service after a recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Unique email, the identity bound into session tokens
    pub email: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Age in years
    pub age: Option<u32>,
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Gender used by the BMR formula
    pub gender: Option<Gender>,
    /// Activity level
    pub activity_level: Option<ActivityLevel>,
    /// Weight goal
    pub goal: Option<GoalType>,
    /// Computed daily calorie target
    pub daily_calorie_target: Option<i64>,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
    /// Last profile update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a freshly registered user with an empty profile
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            age: None,
            weight_kg: None,
            height_cm: None,
            gender: None,
            activity_level: None,
            goal: None,
            daily_calorie_target: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Replacement profile submitted by the owner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Display name
    pub display_name: Option<String>,
    /// Age in years
    pub age: Option<u32>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Gender
    pub gender: Option<Gender>,
    /// Activity level
    pub activity_level: Option<ActivityLevel>,
    /// Weight goal
    pub goal: Option<GoalType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"FEMALE\"");
        assert_eq!(
            serde_json::from_str::<ActivityLevel>("\"MODERATE\"").unwrap(),
            ActivityLevel::Moderate
        );
        assert_eq!(GoalType::parse(GoalType::Gain.as_str()), Some(GoalType::Gain));
        assert_eq!(Gender::parse("unknown"), None);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new("a@example.com".to_owned(), "secret-hash".to_owned(), None);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }
}
