use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use filingscope_core::batch::{BatchHealth, BatchResult};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub const INTERNAL_SECRET_HEADER: &str = "x-internal-secret";

pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchTriggerQuery {
    budget_ms: Option<u64>,
}

fn authorize(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let Some(expected) = state.internal_secret.as_deref() else {
        return Err(ApiError::Unauthorized(
            "manual batch triggers are disabled".to_string(),
        ));
    };
    let provided = headers
        .get(INTERNAL_SECRET_HEADER)
        .and_then(|v| v.to_str().ok());
    if provided == Some(expected) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("invalid internal secret".to_string()))
    }
}

async fn batch_health(State(state): State<Arc<AppState>>) -> ApiResult<Json<BatchHealth>> {
    let health = state.batch_service.get_health()?;
    Ok(Json(health))
}

async fn trigger_filing_batch(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BatchTriggerQuery>,
) -> ApiResult<Json<BatchResult>> {
    authorize(&state, &headers)?;
    tracing::info!("Manual filing batch requested (budget override: {:?})", query.budget_ms);
    let result = state.batch_service.run_filing_batch(query.budget_ms).await?;
    Ok(Json(result))
}

async fn trigger_valuation_batch(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BatchTriggerQuery>,
) -> ApiResult<Json<BatchResult>> {
    authorize(&state, &headers)?;
    tracing::info!(
        "Manual valuation batch requested (budget override: {:?})",
        query.budget_ms
    );
    let result = state
        .batch_service
        .run_valuation_batch(query.budget_ms)
        .await?;
    Ok(Json(result))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/batches/health", get(batch_health))
        .route("/batches/filing", post(trigger_filing_batch))
        .route("/batches/valuation", post(trigger_valuation_batch));

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
