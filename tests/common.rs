// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, token service, seeded foods and user helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `nutrition_tracker`

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use nutrition_tracker::{
    auth::{generate_jwt_secret, AuthManager},
    database::Database,
    models::{
        ActivityLevel, FoodCategory, FoodItem, Gender, GoalType, MealRequest, MealType, NewFood,
        NutrientProfile, ProfileUpdate, User,
    },
    resources::ServerResources,
    server::build_router,
    services::FixedClock,
};
use serde_json::Value;
use std::env;
use std::sync::{Arc, Once};
use tower::ServiceExt;
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Lowest bcrypt cost, keeps registration tests fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Fixed "today" used across tests
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

/// Standard in-memory test database
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Token service with a fresh random secret
pub fn create_test_auth_manager() -> AuthManager {
    let secret = generate_jwt_secret().unwrap();
    AuthManager::new(&secret, 24)
}

/// Server resources over a fresh database with the clock pinned to [`test_today`]
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::with_clock(
        database,
        create_test_auth_manager(),
        TEST_BCRYPT_COST,
        Arc::new(FixedClock(test_today())),
    )))
}

/// Insert a user directly, bypassing registration
pub async fn create_test_user(database: &Database, email: &str) -> Result<User> {
    let user = User::new(email.to_owned(), "not-a-real-hash".to_owned(), None);
    Ok(database.users().create(&user).await?)
}

/// Insert a user with a stored calorie target
pub async fn create_user_with_target(database: &Database, email: &str, target: i64) -> Result<User> {
    let mut user = create_test_user(database, email).await?;
    user.daily_calorie_target = Some(target);
    Ok(database.users().save(&user).await?)
}

/// Reference adult profile: 70 kg, 180 cm, 30 y, male, moderate, maintain (2604 kcal)
pub fn reference_profile() -> ProfileUpdate {
    ProfileUpdate {
        display_name: Some("Reference".to_owned()),
        age: Some(30),
        weight_kg: Some(70.0),
        height_cm: Some(180.0),
        gender: Some(Gender::Male),
        activity_level: Some(ActivityLevel::Moderate),
        goal: Some(GoalType::Maintain),
    }
}

/// Insert a catalog food
pub async fn create_test_food(
    database: &Database,
    name: &str,
    per_100g: NutrientProfile,
    category: FoodCategory,
) -> Result<FoodItem> {
    let food = NewFood {
        name: name.to_owned(),
        nutrients_per_100g: per_100g,
        description: None,
        image_url: None,
        category,
    };
    Ok(database.foods().create(&food).await?)
}

/// Chicken breast: 165 kcal, 31 g protein per 100 g
pub async fn seed_chicken(database: &Database) -> Result<FoodItem> {
    create_test_food(
        database,
        "Chicken Breast",
        NutrientProfile::new(165.0, 31.0, 0.0, 3.6, 0.0),
        FoodCategory::Protein,
    )
    .await
}

/// Apple: 52 kcal per 100 g
pub async fn seed_apple(database: &Database) -> Result<FoodItem> {
    create_test_food(
        database,
        "Apple",
        NutrientProfile::new(52.0, 0.3, 14.0, 0.2, 2.4),
        FoodCategory::Fruits,
    )
    .await
}

/// Meal request for a catalog food
pub fn food_meal(food_id: Uuid, quantity_g: f64, meal_date: Option<NaiveDate>) -> MealRequest {
    MealRequest {
        food_id: Some(food_id),
        food_name: None,
        meal_type: MealType::Lunch,
        quantity_g,
        meal_date,
        manual_nutrients: None,
    }
}

/// Meal request with manually entered calories only
pub fn manual_meal(name: &str, calories: f64, meal_date: Option<NaiveDate>) -> MealRequest {
    MealRequest {
        food_id: None,
        food_name: Some(name.to_owned()),
        meal_type: MealType::Snack,
        quantity_g: 100.0,
        meal_date,
        manual_nutrients: Some(NutrientProfile::new(calories, 0.0, 0.0, 0.0, 0.0)),
    }
}

/// Full application router over `resources`, allowing any origin
pub fn test_router(resources: &Arc<ServerResources>) -> Router {
    build_router(resources, &["*".to_owned()])
}

/// Send one request through `app` and decode the JSON body (`Null` when empty)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Error code string of an error response body
pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
