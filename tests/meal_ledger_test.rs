// ABOUTME: Integration tests for the meal ledger and daily aggregation
// ABOUTME: Snapshots, progress messages, ownership rules, ordering and target handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::float_cmp)]

mod common;

use chrono::Duration;
use common::{
    create_test_resources, create_test_user, create_user_with_target, food_meal, manual_meal,
    seed_apple, seed_chicken, test_today,
};
use nutrition_tracker::errors::ErrorCode;
use nutrition_tracker::models::{MealEntry, MealRequest, MealType, NutrientProfile};
use uuid::Uuid;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[tokio::test]
async fn test_add_meal_scales_catalog_food_and_reports_progress() {
    let resources = create_test_resources().await.unwrap();
    let user = create_user_with_target(&resources.database, "alice@example.com", 2000)
        .await
        .unwrap();
    let chicken = seed_chicken(&resources.database).await.unwrap();

    let added = resources
        .meal_ledger
        .add_meal("alice@example.com", food_meal(chicken.id, 150.0, None))
        .await
        .unwrap();

    assert_eq!(added.meal.user_id, user.id);
    assert_eq!(added.meal.food_id, Some(chicken.id));
    assert_eq!(added.meal.food_name.as_deref(), Some("Chicken Breast"));
    assert_eq!(added.meal.meal_date, test_today());
    assert!(approx(added.meal.nutrients.calories, 247.5));
    assert!(approx(added.meal.nutrients.protein_g, 46.5));
    assert_eq!(
        added.message,
        "Meal added successfully! Calories: 247.5 cal | Total today: 247.5/2000 cal | Remaining: 1752.5 cal"
    );
}

#[tokio::test]
async fn test_progress_message_uses_default_target_when_never_computed() {
    let resources = create_test_resources().await.unwrap();
    create_test_user(&resources.database, "alice@example.com")
        .await
        .unwrap();

    let added = resources
        .meal_ledger
        .add_meal("alice@example.com", manual_meal("Pizza", 800.0, None))
        .await
        .unwrap();

    assert!(added.message.contains("Total today: 800.0/2000 cal"));
    assert!(added.message.ends_with("Remaining: 1200.0 cal"));
}

#[tokio::test]
async fn test_progress_message_reports_exceeded_target() {
    let resources = create_test_resources().await.unwrap();
    create_user_with_target(&resources.database, "alice@example.com", 1500)
        .await
        .unwrap();
    let ledger = &resources.meal_ledger;

    ledger
        .add_meal("alice@example.com", manual_meal("Lunch", 1000.0, None))
        .await
        .unwrap();
    let added = ledger
        .add_meal("alice@example.com", manual_meal("Dinner", 600.0, None))
        .await
        .unwrap();

    assert!(added.message.contains("Total today: 1600.0/1500 cal"));
    assert!(added.message.ends_with("You've exceeded your daily target!"));
}

#[tokio::test]
async fn test_backdated_meal_message_reflects_today() {
    let resources = create_test_resources().await.unwrap();
    create_user_with_target(&resources.database, "alice@example.com", 2000)
        .await
        .unwrap();
    let ledger = &resources.meal_ledger;
    let yesterday = test_today() - Duration::days(1);

    ledger
        .add_meal("alice@example.com", manual_meal("Breakfast", 500.0, None))
        .await
        .unwrap();
    let added = ledger
        .add_meal(
            "alice@example.com",
            manual_meal("Late snack", 300.0, Some(yesterday)),
        )
        .await
        .unwrap();

    assert_eq!(added.meal.meal_date, yesterday);
    assert_eq!(added.meal.created_at.date_naive(), test_today());
    assert!(added.message.contains("Calories: 300.0 cal"));
    assert!(added.message.contains("Total today: 500.0/2000 cal"));
}

#[tokio::test]
async fn test_daily_nutrition_sums_entries_against_target() {
    let resources = create_test_resources().await.unwrap();
    create_user_with_target(&resources.database, "alice@example.com", 2000)
        .await
        .unwrap();
    let chicken = seed_chicken(&resources.database).await.unwrap();
    let apple = seed_apple(&resources.database).await.unwrap();
    let ledger = &resources.meal_ledger;

    ledger
        .add_meal("alice@example.com", food_meal(chicken.id, 150.0, None))
        .await
        .unwrap();
    ledger
        .add_meal("alice@example.com", food_meal(apple.id, 200.0, None))
        .await
        .unwrap();
    ledger
        .add_meal("alice@example.com", manual_meal("Pasta", 598.5, None))
        .await
        .unwrap();
    // other dates do not count
    ledger
        .add_meal(
            "alice@example.com",
            manual_meal("Old", 5000.0, Some(test_today() - Duration::days(3))),
        )
        .await
        .unwrap();

    let summary = ledger
        .daily_nutrition("alice@example.com", test_today())
        .await
        .unwrap();

    assert_eq!(summary.meal_count, 3);
    assert!(approx(summary.totals.calories, 950.0));
    assert!(approx(summary.totals.protein_g, 46.5 + 0.6));
    assert_eq!(summary.calorie_target, 2000);
    assert!(!summary.target_is_default);
    assert!(approx(summary.remaining_calories, 1050.0));
    assert!(approx(summary.progress_percent, 47.5));
}

#[tokio::test]
async fn test_daily_nutrition_over_target_clamps_remaining() {
    let resources = create_test_resources().await.unwrap();
    create_user_with_target(&resources.database, "alice@example.com", 2000)
        .await
        .unwrap();
    let ledger = &resources.meal_ledger;

    ledger
        .add_meal("alice@example.com", manual_meal("Feast", 2500.0, None))
        .await
        .unwrap();

    let summary = ledger
        .daily_nutrition("alice@example.com", test_today())
        .await
        .unwrap();
    assert_eq!(summary.remaining_calories, 0.0);
    assert!(approx(summary.progress_percent, 125.0));
}

#[tokio::test]
async fn test_daily_nutrition_empty_day() {
    let resources = create_test_resources().await.unwrap();
    create_test_user(&resources.database, "alice@example.com")
        .await
        .unwrap();

    let summary = resources
        .meal_ledger
        .daily_nutrition("alice@example.com", test_today())
        .await
        .unwrap();

    assert_eq!(summary.meal_count, 0);
    assert_eq!(summary.totals, NutrientProfile::ZERO);
    assert!(summary.target_is_default);
    assert_eq!(summary.calorie_target, 2000);
    assert_eq!(summary.remaining_calories, 2000.0);
    assert_eq!(summary.progress_percent, 0.0);
}

#[tokio::test]
async fn test_daily_nutrition_rejects_non_positive_target() {
    let resources = create_test_resources().await.unwrap();
    create_user_with_target(&resources.database, "alice@example.com", 0)
        .await
        .unwrap();

    let err = resources
        .meal_ledger
        .daily_nutrition("alice@example.com", test_today())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientProfileData);
}

#[tokio::test]
async fn test_update_and_delete_distinguish_missing_from_foreign() {
    let resources = create_test_resources().await.unwrap();
    create_test_user(&resources.database, "alice@example.com")
        .await
        .unwrap();
    create_test_user(&resources.database, "bob@example.com")
        .await
        .unwrap();
    let ledger = &resources.meal_ledger;

    let meal = ledger
        .add_meal("alice@example.com", manual_meal("Soup", 200.0, None))
        .await
        .unwrap()
        .meal;

    let err = ledger
        .update_meal(meal.id, "bob@example.com", manual_meal("Mine now", 1.0, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    let err = ledger
        .delete_meal(meal.id, "bob@example.com")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    let missing = Uuid::new_v4();
    let err = ledger
        .update_meal(missing, "alice@example.com", manual_meal("x", 1.0, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    let err = ledger
        .delete_meal(missing, "alice@example.com")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    // alice's entry is untouched
    let stored = resources.database.meals().get(meal.id).await.unwrap().unwrap();
    assert_eq!(stored.food_name.as_deref(), Some("Soup"));
    assert!(approx(stored.nutrients.calories, 200.0));

    ledger.delete_meal(meal.id, "alice@example.com").await.unwrap();
    assert!(resources.database.meals().get(meal.id).await.unwrap().is_none());
    let err = ledger
        .delete_meal(meal.id, "alice@example.com")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_update_recomputes_snapshot_and_is_idempotent() {
    let resources = create_test_resources().await.unwrap();
    create_test_user(&resources.database, "alice@example.com")
        .await
        .unwrap();
    let chicken = seed_chicken(&resources.database).await.unwrap();
    let ledger = &resources.meal_ledger;

    let original = ledger
        .add_meal("alice@example.com", food_meal(chicken.id, 100.0, None))
        .await
        .unwrap()
        .meal;

    let request = MealRequest {
        meal_type: MealType::Dinner,
        ..food_meal(chicken.id, 200.0, Some(test_today()))
    };
    let first = ledger
        .update_meal(original.id, "alice@example.com", request.clone())
        .await
        .unwrap();
    let second = ledger
        .update_meal(original.id, "alice@example.com", request)
        .await
        .unwrap();

    assert_eq!(first.id, original.id);
    assert_eq!(first.user_id, original.user_id);
    assert_eq!(first.created_at, original.created_at);
    assert_eq!(first.meal_type, MealType::Dinner);
    assert!(approx(first.nutrients.calories, 330.0));
    assert_eq!(first.nutrients, second.nutrients);
    assert_eq!(first.quantity_g, second.quantity_g);
    assert_eq!(first.meal_date, second.meal_date);
}

#[tokio::test]
async fn test_snapshot_survives_food_removal() {
    let resources = create_test_resources().await.unwrap();
    create_test_user(&resources.database, "alice@example.com")
        .await
        .unwrap();
    let chicken = seed_chicken(&resources.database).await.unwrap();

    let meal = resources
        .meal_ledger
        .add_meal("alice@example.com", food_meal(chicken.id, 150.0, None))
        .await
        .unwrap()
        .meal;

    assert!(resources.database.foods().delete(chicken.id).await.unwrap());

    let stored = resources.database.meals().get(meal.id).await.unwrap().unwrap();
    assert_eq!(stored.food_id, None);
    assert_eq!(stored.food_name.as_deref(), Some("Chicken Breast"));
    assert_eq!(stored.nutrients, meal.nutrients);
}

#[tokio::test]
async fn test_deactivated_food_still_resolves() {
    let resources = create_test_resources().await.unwrap();
    create_test_user(&resources.database, "alice@example.com")
        .await
        .unwrap();
    let apple = seed_apple(&resources.database).await.unwrap();
    assert!(resources.database.foods().deactivate(apple.id).await.unwrap());

    let meal = resources
        .meal_ledger
        .add_meal("alice@example.com", food_meal(apple.id, 100.0, None))
        .await
        .unwrap()
        .meal;

    assert_eq!(meal.food_id, Some(apple.id));
    assert!(approx(meal.nutrients.calories, 52.0));
}

#[tokio::test]
async fn test_unresolvable_food_falls_back_to_manual_values() {
    let resources = create_test_resources().await.unwrap();
    create_test_user(&resources.database, "alice@example.com")
        .await
        .unwrap();

    let request = MealRequest {
        food_id: Some(Uuid::new_v4()),
        ..manual_meal("Homemade stew", 420.0, None)
    };
    let meal = resources
        .meal_ledger
        .add_meal("alice@example.com", request)
        .await
        .unwrap()
        .meal;

    assert_eq!(meal.food_id, None);
    assert_eq!(meal.food_name.as_deref(), Some("Homemade stew"));
    assert!(approx(meal.nutrients.calories, 420.0));
}

#[tokio::test]
async fn test_invalid_input_stores_nothing() {
    let resources = create_test_resources().await.unwrap();
    create_test_user(&resources.database, "alice@example.com")
        .await
        .unwrap();
    let chicken = seed_chicken(&resources.database).await.unwrap();
    let ledger = &resources.meal_ledger;

    let err = ledger
        .add_meal("alice@example.com", food_meal(chicken.id, 0.0, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let err = ledger
        .add_meal("alice@example.com", manual_meal("Negative", -50.0, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    assert!(ledger.list_all("alice@example.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_listings_are_owner_scoped_and_in_creation_order() {
    let resources = create_test_resources().await.unwrap();
    create_test_user(&resources.database, "alice@example.com")
        .await
        .unwrap();
    create_test_user(&resources.database, "bob@example.com")
        .await
        .unwrap();
    let ledger = &resources.meal_ledger;
    let yesterday = test_today() - Duration::days(1);

    for (name, date) in [
        ("first", test_today()),
        ("second", yesterday),
        ("third", test_today()),
    ] {
        ledger
            .add_meal("alice@example.com", manual_meal(name, 100.0, Some(date)))
            .await
            .unwrap();
    }
    ledger
        .add_meal("bob@example.com", manual_meal("bob's", 100.0, None))
        .await
        .unwrap();

    let names = |meals: Vec<MealEntry>| {
        meals
            .into_iter()
            .map(|m| m.food_name.unwrap_or_default())
            .collect::<Vec<_>>()
    };

    let all = ledger.list_all("alice@example.com").await.unwrap();
    assert_eq!(names(all), ["first", "second", "third"]);

    let today = ledger
        .list_for_date("alice@example.com", test_today())
        .await
        .unwrap();
    assert_eq!(names(today), ["first", "third"]);

    let bob = ledger.list_all("bob@example.com").await.unwrap();
    assert_eq!(names(bob), ["bob's"]);
}

#[tokio::test]
async fn test_unknown_owner_is_identity_not_found() {
    let resources = create_test_resources().await.unwrap();

    let err = resources
        .meal_ledger
        .add_meal("ghost@example.com", manual_meal("x", 1.0, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::IdentityNotFound);

    let err = resources
        .meal_ledger
        .list_all("ghost@example.com")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::IdentityNotFound);
}
