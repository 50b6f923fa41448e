// ABOUTME: Public read-only food catalog routes
// ABOUTME: Listing, name search, category filter, protein and calorie shortcuts, goal recommendations, lookup by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::parse_id;
use crate::resources::ServerResources;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use nutrition_core::constants::nutrition::{HIGH_PROTEIN_THRESHOLD_G, LOW_CALORIE_THRESHOLD_KCAL};
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{FoodCategory, FoodItem, GoalType};
use serde::Deserialize;
use std::sync::Arc;

/// `?name=` search query
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Substring to match, case-insensitively
    #[serde(default)]
    pub name: String,
}

/// `?goal_type=` recommendation query
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// LOSS, GAIN or MAINTAIN, case-insensitive
    #[serde(default, alias = "goalType")]
    pub goal_type: Option<String>,
}

/// Catalog routes, all outside authentication
pub struct FoodRoutes;

impl FoodRoutes {
    /// Create all catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/foods", get(Self::handle_list))
            .route("/api/foods/", get(Self::handle_list))
            .route("/api/foods/search", get(Self::handle_search))
            .route("/api/foods/category/:category", get(Self::handle_by_category))
            .route("/api/foods/high-protein", get(Self::handle_high_protein))
            .route("/api/foods/low-calorie", get(Self::handle_low_calorie))
            .route("/api/foods/recommendations", get(Self::handle_recommendations))
            .route("/api/foods/:id", get(Self::handle_get))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> AppResult<Json<Vec<FoodItem>>> {
        Ok(Json(resources.database.foods().list_active().await?))
    }

    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<SearchQuery>,
    ) -> AppResult<Json<Vec<FoodItem>>> {
        let name = query.name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("Search name must not be empty"));
        }
        Ok(Json(resources.database.foods().search(name).await?))
    }

    async fn handle_by_category(
        State(resources): State<Arc<ServerResources>>,
        Path(category): Path<String>,
    ) -> AppResult<Json<Vec<FoodItem>>> {
        let category = FoodCategory::parse(&category)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown food category: {category}")))?;
        Ok(Json(
            resources.database.foods().list_by_category(category).await?,
        ))
    }

    async fn handle_high_protein(
        State(resources): State<Arc<ServerResources>>,
    ) -> AppResult<Json<Vec<FoodItem>>> {
        let foods = resources
            .database
            .foods()
            .list_high_protein(HIGH_PROTEIN_THRESHOLD_G)
            .await?;
        Ok(Json(foods))
    }

    async fn handle_low_calorie(
        State(resources): State<Arc<ServerResources>>,
    ) -> AppResult<Json<Vec<FoodItem>>> {
        let foods = resources
            .database
            .foods()
            .list_low_calorie(LOW_CALORIE_THRESHOLD_KCAL)
            .await?;
        Ok(Json(foods))
    }

    async fn handle_recommendations(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<RecommendationQuery>,
    ) -> AppResult<Json<Vec<FoodItem>>> {
        let raw = query
            .goal_type
            .ok_or_else(|| AppError::invalid_input("goal_type is required"))?;
        let goal = GoalType::parse(&raw.trim().to_uppercase())
            .ok_or_else(|| AppError::invalid_input(format!("Unknown goal type: {raw}")))?;
        Ok(Json(
            resources.database.foods().list_recommended(goal).await?,
        ))
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> AppResult<Json<FoodItem>> {
        let food_id = parse_id(&id, "food")?;
        resources
            .database
            .foods()
            .get(food_id)
            .await?
            .map(Json)
            .ok_or_else(|| AppError::not_found("Food").with_resource_id(id))
    }
}
