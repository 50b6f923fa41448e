// ABOUTME: End-to-end tests driving the full router the way a client would
// ABOUTME: Register, log in, set a profile, log meals and read the daily summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used)]

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use common::{create_test_resources, error_code, seed_chicken, send, test_router};
use serde_json::{json, Value};

async fn register_and_login(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], email);
    assert!(body.get("password_hash").is_none());

    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_owned()
}

fn reference_profile_json() -> Value {
    json!({
        "age": 30,
        "weight_kg": 70.0,
        "height_cm": 180.0,
        "gender": "MALE",
        "activity_level": "MODERATE",
        "goal": "MAINTAIN"
    })
}

#[tokio::test]
async fn test_full_day_of_tracking() {
    let resources = create_test_resources().await.unwrap();
    let chicken = seed_chicken(&resources.database).await.unwrap();
    let app = test_router(&resources);
    let token = register_and_login(&app, "alice@example.com").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users/me/profile",
        Some(&token),
        Some(reference_profile_json()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["daily_calorie_target"], 2604);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/users/me/calorie-target",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["daily_calorie_target"], 2604);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/meals/add",
        Some(&token),
        Some(json!({
            "food_id": chicken.id,
            "meal_type": "LUNCH",
            "quantity_g": 150.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["meal"]["nutrients"]["calories"], 247.5);
    assert_eq!(body["meal"]["meal_date"], "2025-01-15");
    assert_eq!(
        body["message"],
        "Meal added successfully! Calories: 247.5 cal | Total today: 247.5/2604 cal | Remaining: 2356.5 cal"
    );
    let meal_id = body["meal"]["id"].as_str().unwrap().to_owned();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/meals/add",
        Some(&token),
        Some(json!({
            "food_name": "Smoothie",
            "meal_type": "SNACK",
            "quantity_g": 300.0,
            "manual_nutrients": {
                "calories": 252.5, "protein_g": 5.0, "carbs_g": 50.0, "fat_g": 2.0, "fiber_g": 4.0
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["meal"]["food_id"], Value::Null);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/meals/nutrition?date=2025-01-15",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meal_count"], 2);
    assert_eq!(body["totals"]["calories"], 500.0);
    assert_eq!(body["remaining_calories"], 2104.0);
    assert_eq!(body["target_is_default"], false);

    let (status, body) = send(&app, Method::GET, "/api/meals", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let uri = format!("/api/meals/{meal_id}");
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({
            "food_id": chicken.id,
            "meal_type": "DINNER",
            "quantity_g": 100.0,
            "meal_date": "2025-01-14"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nutrients"]["calories"], 165.0);
    assert_eq!(body["meal_date"], "2025-01-14");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, body) = send(&app, Method::GET, "/api/meals/all", Some(&token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cross_user_access_is_denied() {
    let resources = create_test_resources().await.unwrap();
    let app = test_router(&resources);
    let alice = register_and_login(&app, "alice@example.com").await;
    let bob = register_and_login(&app, "bob@example.com").await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/meals/add",
        Some(&alice),
        Some(json!({
            "food_name": "Toast",
            "meal_type": "BREAKFAST",
            "quantity_g": 50.0,
            "manual_nutrients": {
                "calories": 130.0, "protein_g": 4.0, "carbs_g": 24.0, "fat_g": 1.5, "fiber_g": 1.0
            }
        })),
    )
    .await;
    let uri = format!("/api/meals/{}", body["meal"]["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "PERMISSION_DENIED");

    let (_, body) = send(&app, Method::GET, "/api/meals/all", Some(&bob), None).await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = send(&app, Method::GET, "/api/meals/all", Some(&alice), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_goal_routes() {
    let resources = create_test_resources().await.unwrap();
    let app = test_router(&resources);
    let token = register_and_login(&app, "alice@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/goals/add",
        Some(&token),
        Some(json!({
            "description": "Reach 65 kg",
            "target_weight_kg": 65.0,
            "goal_type": "LOSS"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/goals/{}", body["id"].as_str().unwrap());

    let (_, body) = send(&app, Method::GET, "/api/goals", Some(&token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_request_errors_use_error_envelope() {
    let resources = create_test_resources().await.unwrap();
    let app = test_router(&resources);
    let token = register_and_login(&app, "alice@example.com").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/meals/nutrition?date=15-01-2025",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users/me/profile",
        Some(&token),
        Some(json!({ "age": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "INSUFFICIENT_PROFILE_DATA");

    let (status, body) = send(&app, Method::DELETE, "/api/meals/xyz", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "nope-nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "AUTH_INVALID");
}
