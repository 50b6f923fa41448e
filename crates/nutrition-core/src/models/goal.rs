// ABOUTME: Weight goal models owned by a single user
// ABOUTME: Goal record and the request used to create one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::user::GoalType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weight goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Free-form description
    pub description: String,
    /// Target body weight in kilograms
    pub target_weight_kg: Option<f64>,
    /// Date the goal should be reached by
    pub target_date: Option<NaiveDate>,
    /// Direction of the goal
    pub goal_type: GoalType,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Goal submitted by its owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalRequest {
    /// Free-form description
    pub description: String,
    /// Target body weight in kilograms
    #[serde(default)]
    pub target_weight_kg: Option<f64>,
    /// Date the goal should be reached by
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    /// Direction of the goal
    pub goal_type: GoalType,
}
