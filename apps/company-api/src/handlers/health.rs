//! 健康检查 handler
//!
//! - GET /health - 连接池快照；不会触发连接池初始化

use crate::AppState;
use crate::utils::pool_stats_to_dto;
use api_contract::HealthResponse;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// 健康检查
pub async fn health(State(state): State<AppState>) -> Response {
    let stats = state.pool.stats().await;
    let body = HealthResponse {
        ok: stats.initialized,
        pool: pool_stats_to_dto(stats),
    };
    (StatusCode::OK, Json(body)).into_response()
}
