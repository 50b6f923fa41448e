// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Formula coefficients, defaults, auth settings and the public path allow-list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Mifflin-St Jeor equation coefficients
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for
/// resting energy expenditure in healthy individuals. *American Journal of
/// Clinical Nutrition*, 51(2), 241-247.
pub mod bmr {
    /// kcal per kilogram of body weight
    pub const WEIGHT_COEF: f64 = 10.0;
    /// kcal per centimeter of height
    pub const HEIGHT_COEF: f64 = 6.25;
    /// kcal per year of age (subtracted)
    pub const AGE_COEF: f64 = 5.0;
    /// Male constant
    pub const MALE_CONSTANT: f64 = 5.0;
    /// Female constant
    pub const FEMALE_CONSTANT: f64 = -161.0;
}

/// Activity factors applied to BMR to obtain TDEE
pub mod activity_factors {
    /// Little or no exercise
    pub const SEDENTARY: f64 = 1.2;
    /// Light exercise 1-3 days/week
    pub const LIGHT: f64 = 1.375;
    /// Moderate exercise 3-5 days/week
    pub const MODERATE: f64 = 1.55;
    /// Hard exercise 6-7 days/week
    pub const ACTIVE: f64 = 1.725;
}

/// Goal adjustments in kcal
pub mod goal_adjustments {
    /// Deficit applied for weight loss
    pub const LOSS_DEFICIT: f64 = 500.0;
    /// Surplus applied for weight gain
    pub const GAIN_SURPLUS: f64 = 500.0;
}

/// Nutrition display defaults
pub mod nutrition {
    /// Display-only target used when a user has never had one computed
    pub const DEFAULT_DAILY_CALORIE_TARGET: i64 = 2000;
    /// Catalog profiles are expressed per this many grams
    pub const REFERENCE_QUANTITY_G: f64 = 100.0;
    /// Protein per 100 g at or above which a food counts as high-protein
    pub const HIGH_PROTEIN_THRESHOLD_G: f64 = 15.0;
    /// Calories per 100 g at or below which a food counts as low-calorie
    pub const LOW_CALORIE_THRESHOLD_KCAL: f64 = 150.0;
    /// Calories per 100 g at or below which a food is recommended for weight loss
    pub const LOSS_RECOMMENDATION_MAX_KCAL: f64 = 200.0;
}

/// Authentication constants
pub mod auth {
    /// Audience claim written into and required from session tokens
    pub const TOKEN_AUDIENCE: &str = "nutrition-tracker";
    /// Default token lifetime
    pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;
    /// Minimum accepted password length at registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// Bearer scheme prefix of the Authorization header
    pub const BEARER_PREFIX: &str = "Bearer ";

    /// Path prefixes that bypass token verification
    ///
    /// Registration and login, public catalog reads, health checks and API
    /// documentation. A prefix ending in `/` also matches the bare path
    /// without the trailing slash.
    pub const PUBLIC_PATH_PREFIXES: &[&str] = &[
        "/api/auth/",
        "/api/foods/",
        "/health/",
        "/ready/",
        "/v3/api-docs/",
        "/swagger-ui/",
    ];

    /// Paths that bypass token verification only on an exact match
    pub const PUBLIC_EXACT_PATHS: &[&str] = &["/", "/error"];
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Service identity used in logs
pub mod service_names {
    /// Service name reported by logging
    pub const NUTRITION_TRACKER: &str = "nutrition-tracker";
}
