//! HTTP API Layer
//!
//! This crate provides the REST API for the training center service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each resource
//! - **Middleware**: Request logging and tracing
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{enrollments, grades, health, invoices, payments, sessions, students};
use crate::middleware::request_logging;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let state = AppState { pool, config };

    // Health routes (outside the versioned prefix)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Student routes
    let student_routes = Router::new()
        .route("/", post(students::create_student))
        .route("/", get(students::list_students))
        .route("/:id", get(students::get_student));

    // Session routes
    let session_routes = Router::new()
        .route("/", post(sessions::create_session))
        .route("/", get(sessions::list_sessions))
        .route("/:id", get(sessions::get_session));

    // Enrollment routes, including the grade surface
    let enrollment_routes = Router::new()
        .route("/", post(enrollments::create_enrollment))
        .route("/", get(enrollments::list_enrollments))
        .route("/:id", get(enrollments::get_enrollment))
        .route("/:id/invoices", get(invoices::list_enrollment_invoices))
        .route("/:id/grades", post(grades::record_grade))
        .route("/:id/grades", get(grades::list_grades))
        .route("/:id/grades/average", get(grades::grade_average));

    // Invoice routes
    let invoice_routes = Router::new()
        .route("/", post(invoices::create_invoice))
        .route("/:id", get(invoices::get_invoice))
        .route("/:id/payments", get(payments::list_invoice_payments));

    // Payment routes
    let payment_routes = Router::new()
        .route("/", post(payments::record_payment))
        .route("/:id", get(payments::get_payment))
        .route("/:id", put(payments::amend_payment))
        .route("/:id", delete(payments::void_payment));

    // Versioned API routes
    let api_routes = Router::new()
        .nest("/students", student_routes)
        .nest("/sessions", session_routes)
        .nest("/enrollments", enrollment_routes)
        .nest("/invoices", invoice_routes)
        .nest("/payments", payment_routes)
        .layer(axum_middleware::from_fn(request_logging));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
