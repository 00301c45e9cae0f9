//! Health endpoints: a storage-aware status check plus liveness and readiness
//! probes for orchestration and load balancers.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::inbound::http::state::HttpState;

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatusBody {
    #[schema(example = "ok")]
    pub status: String,
}

async fn storage_reachable(state: &HttpState) -> bool {
    match state.storage.ping().await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "storage probe failed");
            false
        }
    }
}

/// Service status. Return `{"status":"ok"}` when storage answers.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Service and storage are healthy", body = HealthStatusBody),
        (status = 503, description = "Storage is unreachable", body = HealthStatusBody)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    let (mut response, status) = if storage_reachable(&state).await {
        (HttpResponse::Ok(), "ok")
    } else {
        (HttpResponse::ServiceUnavailable(), "unavailable")
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(HealthStatusBody {
            status: status.to_owned(),
        })
}

/// Readiness probe. Return 200 once started and storage answers; 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(probes: web::Data<HealthState>, state: web::Data<HttpState>) -> HttpResponse {
    let is_ready = probes.is_ready() && storage_reachable(&state).await;
    HealthState::probe_response(is_ready)
}

/// Liveness probe. Return 200 while alive and 503 once draining.
/// Call `HealthState::mark_unhealthy` before shutdown to surface the drain.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(probes: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(probes.is_alive())
}

/// Register the health routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready).service(live);
}
