// ABOUTME: Core types and constants for the nutrition tracker platform
// ABOUTME: Foundation crate with error handling, domain models, and formula constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Core
//!
//! Foundation crate providing shared types and constants for the nutrition
//! tracker. This crate is designed to change infrequently, enabling
//! incremental compilation of the server crate that depends on it.
//!
//! ## Modules
//!
//! - `errors`: Unified error type (`AppError`, `ErrorCode`, `AppResult`)
//! - `models`: Users, catalog foods, meal entries, goals and summaries
//! - `constants`: Formula coefficients, defaults and the public path allow-list

/// Unified error handling
pub mod errors;

/// Domain models shared between storage, services and routes
pub mod models;

/// Application constants organized by domain
pub mod constants;
