//! HTTP 响应辅助函数与 DTO 转换
//!
//! - 错误响应：bad_request_error、not_found_error、storage_error
//! - DTO 转换：company_to_dto、pool_stats_to_dto
//!
//! 错误体统一为 `{"detail": "..."}`。任何存储错误映射为 500，记录不存在映射为 404。

use api_contract::{CompanyDto, ErrorResponse, PoolStatusDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use company_storage::{CompanyRecord, PoolStats, StorageError};

/// 400 响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
}

/// 公司不存在的 404 响应
pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Company not found")),
    )
        .into_response()
}

/// 携带存储错误的 500 响应
///
/// # 参数
/// - `action`：失败操作的动名词短语，例如 "creating company"
/// - `err`：存储错误
///
/// # 返回
/// - 500，`detail` 为 `Error {action}: {err}`
pub fn storage_error(action: &str, err: StorageError) -> Response {
    if err.is_unavailable() {
        tracing::error!(error = %err, action, "database connection failed");
    } else {
        tracing::error!(error = %err, action, "database statement failed");
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(format!("Error {action}: {err}"))),
    )
        .into_response()
}

/// CompanyRecord 转 CompanyDto
pub fn company_to_dto(record: CompanyRecord) -> CompanyDto {
    CompanyDto {
        id: record.id,
        name: record.name,
        location: record.location,
    }
}

/// PoolStats 转 PoolStatusDto
pub fn pool_stats_to_dto(stats: PoolStats) -> PoolStatusDto {
    PoolStatusDto {
        initialized: stats.initialized,
        size: stats.size,
        idle: stats.idle,
        in_use: stats.in_use,
        max_connections: stats.max_connections,
    }
}
