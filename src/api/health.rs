//! Health check endpoints with component-level diagnostics.
//!
//! Provides:
//! - `/health` — simple "healthy" + version (for load balancers)
//! - `/health/detailed` — per-component status (database, event_bus)

use axum::extract::Extension;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;

use sentinel_core::{Database, EventBus};

/// Simple health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Detailed health response with per-component checks
#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

/// All component health checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: ComponentHealth,
    pub event_bus: ComponentHealth,
}

/// Individual component health status
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ComponentHealth {
    fn healthy(latency_ms: u64) -> Self {
        Self {
            status: "healthy",
            latency_ms: Some(latency_ms),
            error: None,
            details: None,
        }
    }

    fn healthy_with_details(latency_ms: u64, details: serde_json::Value) -> Self {
        Self {
            status: "healthy",
            latency_ms: Some(latency_ms),
            error: None,
            details: Some(details),
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: "unhealthy",
            latency_ms: None,
            error: Some(error),
            details: None,
        }
    }
}

/// Simple health check (for load balancers)
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Detailed health check with all component statuses
async fn detailed_health_check(
    Extension(db): Extension<Database>,
    Extension(bus): Extension<Arc<EventBus>>,
) -> Json<DetailedHealthResponse> {
    let db_health = check_database(&db).await;
    let event_bus_health = check_event_bus(&bus);

    let overall_status = if db_health.status == "healthy" {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(DetailedHealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            database: db_health,
            event_bus: event_bus_health,
        },
    })
}

/// Check database connectivity
async fn check_database(db: &Database) -> ComponentHealth {
    let start = std::time::Instant::now();
    match sqlx::query("SELECT 1").execute(db.pool()).await {
        Ok(_) => ComponentHealth::healthy(start.elapsed().as_millis() as u64),
        Err(e) => ComponentHealth::unhealthy(e.to_string()),
    }
}

/// Check event bus registration
fn check_event_bus(bus: &EventBus) -> ComponentHealth {
    ComponentHealth::healthy_with_details(
        0,
        serde_json::json!({
            "subscriber_count": bus.subscriber_count(),
        }),
    )
}

/// Create health routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/detailed", get(detailed_health_check))
}
