// ABOUTME: Meal ledger routes for the authenticated user
// ABOUTME: Add, update, delete, per-date and full listings, and the daily nutrition summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_date_or, parse_id, DateQuery};
use crate::middleware::AuthenticatedUser;
use crate::resources::ServerResources;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use nutrition_core::errors::AppError;
use nutrition_core::models::{DailyNutritionSummary, MealEntry, MealRequest};
use std::sync::Arc;

/// Meal routes
pub struct MealRoutes;

impl MealRoutes {
    /// Create all meal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/meals", get(Self::handle_list_for_date))
            .route("/api/meals/add", post(Self::handle_add))
            .route("/api/meals/all", get(Self::handle_list_all))
            .route("/api/meals/nutrition", get(Self::handle_daily_nutrition))
            .route(
                "/api/meals/:id",
                put(Self::handle_update).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle POST /api/meals/add
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Json(request): Json<MealRequest>,
    ) -> Result<Response, AppError> {
        let added = resources.meal_ledger.add_meal(&user.email, request).await?;
        Ok((StatusCode::CREATED, Json(added)).into_response())
    }

    /// Handle GET /api/meals?date=
    async fn handle_list_for_date(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Query(query): Query<DateQuery>,
    ) -> Result<Json<Vec<MealEntry>>, AppError> {
        let date = parse_date_or(query.date.as_deref(), resources.meal_ledger.today())?;
        let meals = resources
            .meal_ledger
            .list_for_date(&user.email, date)
            .await?;
        Ok(Json(meals))
    }

    /// Handle GET /api/meals/all
    async fn handle_list_all(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
    ) -> Result<Json<Vec<MealEntry>>, AppError> {
        Ok(Json(resources.meal_ledger.list_all(&user.email).await?))
    }

    /// Handle GET /api/meals/nutrition?date=
    async fn handle_daily_nutrition(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Query(query): Query<DateQuery>,
    ) -> Result<Json<DailyNutritionSummary>, AppError> {
        let date = parse_date_or(query.date.as_deref(), resources.meal_ledger.today())?;
        let summary = resources
            .meal_ledger
            .daily_nutrition(&user.email, date)
            .await?;
        Ok(Json(summary))
    }

    /// Handle PUT /api/meals/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Path(id): Path<String>,
        Json(request): Json<MealRequest>,
    ) -> Result<Json<MealEntry>, AppError> {
        let meal_id = parse_id(&id, "meal")?;
        let updated = resources
            .meal_ledger
            .update_meal(meal_id, &user.email, request)
            .await?;
        Ok(Json(updated))
    }

    /// Handle DELETE /api/meals/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let meal_id = parse_id(&id, "meal")?;
        resources.meal_ledger.delete_meal(meal_id, &user.email).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
