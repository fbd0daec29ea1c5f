use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use savora_core::Cookbook;
use serde::{Deserialize, Serialize};

use crate::api::AppState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: HealthCheck,
    pub catalog: HealthCheck,
    pub substitutions: HealthCheck,
    pub checked_at: String,
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let payload = report(&state.cookbook);
    let status_code =
        if payload.status == "ready" { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn report(cookbook: &Cookbook) -> HealthResponse {
    let catalog = count_check(cookbook.store().len(), "recipes loaded");
    let substitutions = count_check(cookbook.substitutions().len(), "substitution rules loaded");
    let ready = catalog.status == "ready";

    HealthResponse {
        status: if ready { "ready" } else { "degraded" }.to_string(),
        service: HealthCheck {
            status: "ready".to_string(),
            detail: "savora-server runtime initialized".to_string(),
        },
        catalog,
        substitutions,
        checked_at: Utc::now().to_rfc3339(),
    }
}

fn count_check(count: usize, what: &str) -> HealthCheck {
    HealthCheck {
        status: if count > 0 { "ready" } else { "degraded" }.to_string(),
        detail: format!("{count} {what}"),
    }
}
