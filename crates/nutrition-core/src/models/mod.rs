// ABOUTME: Core data models for the nutrition tracker
// ABOUTME: Re-exports User, FoodItem, MealEntry, Goal and their supporting enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain data shared by storage, services and routes. Computation lives in
//! the server crate; these types only carry values and their string forms
//! for persistence.

// Domain modules
mod food;
mod goal;
mod meal;
mod user;

// User domain
pub use user::{ActivityLevel, Gender, GoalType, ProfileUpdate, User};

// Catalog domain
pub use food::{FoodCategory, FoodItem, NewFood, NutrientProfile};

// Meal ledger domain
pub use meal::{DailyNutritionSummary, MealAdded, MealEntry, MealRequest, MealType};

// Goal domain
pub use goal::{Goal, GoalRequest};
