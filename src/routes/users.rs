// ABOUTME: Current-user profile routes
// ABOUTME: Profile reads, profile updates with target recomputation and calorie target requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::intelligence::CalorieTargetBreakdown;
use crate::middleware::AuthenticatedUser;
use crate::resources::ServerResources;
use axum::extract::State;
use axum::routing::{get, put};
use axum::{Json, Router};
use nutrition_core::errors::AppError;
use nutrition_core::models::{ProfileUpdate, User};
use std::sync::Arc;

/// Profile routes for the authenticated user
pub struct UserRoutes;

impl UserRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users/me", get(Self::handle_me))
            .route("/api/users/me/profile", put(Self::handle_update_profile))
            .route("/api/users/me/calorie-target", get(Self::handle_calorie_target))
            .with_state(resources)
    }

    /// Handle GET /api/users/me
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
    ) -> Result<Json<User>, AppError> {
        Ok(Json(resources.profile_service.current_user(&user.email).await?))
    }

    /// Handle PUT /api/users/me/profile
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Json(update): Json<ProfileUpdate>,
    ) -> Result<Json<User>, AppError> {
        let updated = resources
            .profile_service
            .update_profile(&user.email, update)
            .await?;
        Ok(Json(updated))
    }

    /// Handle GET /api/users/me/calorie-target
    async fn handle_calorie_target(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
    ) -> Result<Json<CalorieTargetBreakdown>, AppError> {
        let breakdown = resources.profile_service.calorie_target(&user.email).await?;
        Ok(Json(breakdown))
    }
}
