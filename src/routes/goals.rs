// ABOUTME: Weight goal routes for the authenticated user
// ABOUTME: Add, list and delete goals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::parse_id;
use crate::middleware::AuthenticatedUser;
use crate::resources::ServerResources;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use nutrition_core::errors::AppError;
use nutrition_core::models::{Goal, GoalRequest};
use std::sync::Arc;

/// Goal routes
pub struct GoalRoutes;

impl GoalRoutes {
    /// Create all goal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/goals", get(Self::handle_list))
            .route("/api/goals/add", post(Self::handle_add))
            .route("/api/goals/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Json(request): Json<GoalRequest>,
    ) -> Result<Response, AppError> {
        let goal = resources.goal_service.add_goal(&user.email, request).await?;
        Ok((StatusCode::CREATED, Json(goal)).into_response())
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
    ) -> Result<Json<Vec<Goal>>, AppError> {
        Ok(Json(resources.goal_service.list_goals(&user.email).await?))
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let goal_id = parse_id(&id, "goal")?;
        resources.goal_service.delete_goal(goal_id, &user.email).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
