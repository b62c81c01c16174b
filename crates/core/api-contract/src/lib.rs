//! 稳定的 DTO 与 HTTP 响应契约。

use serde::{Deserialize, Serialize};

/// 所有非 2xx 响应的错误体。
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// 简单确认响应体。
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 公司创建/更新请求体（更新为整体替换）。
#[derive(Debug, Deserialize)]
pub struct CompanyRequest {
    pub name: String,
    pub location: String,
}

/// 返回给客户端的公司。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDto {
    pub id: i64,
    pub name: String,
    pub location: String,
}

/// 健康检查接口暴露的连接池快照。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStatusDto {
    pub initialized: bool,
    pub size: u32,
    pub idle: usize,
    pub in_use: usize,
    pub max_connections: u32,
}

/// 健康检查响应体。
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub pool: PoolStatusDto,
}
