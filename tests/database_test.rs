// ABOUTME: Integration tests for the file-backed SQLite store
// ABOUTME: Persistence across reconnects, idempotent migrations and unique constraints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used)]

mod common;

use chrono::Utc;
use common::{create_test_user, food_meal, init_test_logging, seed_chicken, test_today};
use nutrition_tracker::database::Database;
use nutrition_tracker::errors::{AppError, ErrorCode};
use nutrition_tracker::intelligence::meal_nutrients;
use nutrition_tracker::models::MealEntry;
use tempfile::TempDir;
use uuid::Uuid;

fn file_url(dir: &TempDir) -> String {
    format!("sqlite:{}", dir.path().join("nutrition.db").display())
}

#[tokio::test]
async fn test_data_survives_reconnect() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let url = file_url(&dir);

    let user_id = {
        let database = Database::new(&url).await.unwrap();
        let user = create_test_user(&database, "alice@example.com").await.unwrap();
        let chicken = seed_chicken(&database).await.unwrap();
        let request = food_meal(chicken.id, 150.0, Some(test_today()));
        let meal = MealEntry {
            id: Uuid::new_v4(),
            user_id: user.id,
            food_id: Some(chicken.id),
            food_name: Some(chicken.name.clone()),
            meal_type: request.meal_type,
            quantity_g: request.quantity_g,
            nutrients: meal_nutrients(Some(&chicken), request.quantity_g, None),
            meal_date: test_today(),
            created_at: Utc::now(),
        };
        database.meals().create(&meal).await.unwrap();
        user.id
    };

    // reopening runs the migrations again against the existing file
    let database = Database::new(&url).await.unwrap();
    let user = database.users().get(user_id).await.unwrap().unwrap();
    assert_eq!(user.email, "alice@example.com");

    let meals = database
        .meals()
        .list_for_user_on_date(user_id, test_today())
        .await
        .unwrap();
    assert_eq!(meals.len(), 1);
    assert!((meals[0].nutrients.calories - 247.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_by_store() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let database = Database::new(&file_url(&dir)).await.unwrap();

    create_test_user(&database, "alice@example.com").await.unwrap();
    let err = create_test_user(&database, "alice@example.com")
        .await
        .unwrap_err();
    let err = err.downcast::<AppError>().unwrap();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_ping() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let database = Database::new(&file_url(&dir)).await.unwrap();

    database.ping().await.unwrap();
}
