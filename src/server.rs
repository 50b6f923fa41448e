// ABOUTME: HTTP server assembly: router composition, middleware stack and listener lifecycle
// ABOUTME: Applies request ids, request tracing, CORS and the access guard around all routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # HTTP Server
//!
//! Layers, outermost first: request id assignment, request tracing, request
//! id propagation to the response, CORS, then the access guard. The guard
//! also covers the fallback, so unknown protected paths are rejected before
//! they can be reported as missing.

use crate::config::environment::ServerConfig;
use crate::middleware::{require_auth, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, FoodRoutes, GoalRoutes, HealthRoutes, MealRoutes, UserRoutes};
use axum::extract::Request;
use axum::{middleware, Router};
use nutrition_core::errors::{AppError, AppResult};
use std::future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{field, info, info_span, warn};

/// Build the complete application router
pub fn build_router(resources: &Arc<ServerResources>, cors_origins: &[String]) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(FoodRoutes::routes(resources.clone()))
        .merge(UserRoutes::routes(resources.clone()))
        .merge(MealRoutes::routes(resources.clone()))
        .merge(GoalRoutes::routes(resources.clone()))
        .fallback(handle_not_found)
        .layer(middleware::from_fn_with_state(
            resources.access_guard.clone(),
            require_auth,
        ))
        .layer(setup_cors(cors_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id,
                user_email = field::Empty,
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn handle_not_found() -> AppError {
    AppError::not_found("Route")
}

/// Bind the configured port and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn serve(resources: Arc<ServerResources>, config: &ServerConfig) -> AppResult<()> {
    let app = build_router(&resources, &config.cors_origins);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server error: {e}")))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal, running until killed");
        future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
