//! 公司 CRUD handlers
//!
//! 提供公司资源的增删改查接口：
//! - GET /companies - 列出公司
//! - POST /companies - 创建公司
//! - GET /companies/{id} - 获取公司详情
//! - PUT /companies/{id} - 整体替换 name 与 location
//! - DELETE /companies/{id} - 删除公司
//!
//! 每次存储调用只借出一个连接执行一条语句，构造响应前已归还。

use crate::AppState;
use crate::utils::response::{not_found_error, storage_error};
use crate::utils::{company_to_dto, normalize_company};
use api_contract::{CompanyDto, CompanyRequest, MessageResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(serde::Deserialize)]
pub struct CompanyPath {
    company_id: i64,
}

/// 列出公司
pub async fn list_companies(State(state): State<AppState>) -> Response {
    match state.company_store.list_companies().await {
        Ok(companies) => {
            let data: Vec<CompanyDto> = companies.into_iter().map(company_to_dto).collect();
            (StatusCode::OK, Json(data)).into_response()
        }
        Err(err) => storage_error("fetching companies", err),
    }
}

/// 创建公司
///
/// # 参数
/// - `req`：公司名称与地点，首尾空白会被去除
///
/// # 返回
/// - 200：创建的公司（含数据库分配的主键）
/// - 400：字段为空
/// - 500：存储错误
pub async fn create_company(
    State(state): State<AppState>,
    Json(req): Json<CompanyRequest>,
) -> Response {
    let input = match normalize_company(req) {
        Ok(input) => input,
        Err(response) => return response,
    };
    match state.company_store.create_company(input).await {
        Ok(company) => (StatusCode::OK, Json(company_to_dto(company))).into_response(),
        Err(err) => storage_error("creating company", err),
    }
}

/// 获取公司详情
pub async fn get_company(State(state): State<AppState>, Path(path): Path<CompanyPath>) -> Response {
    match state.company_store.find_company(path.company_id).await {
        Ok(Some(company)) => (StatusCode::OK, Json(company_to_dto(company))).into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error("fetching company", err),
    }
}

/// 更新公司（整体替换）
pub async fn update_company(
    State(state): State<AppState>,
    Path(path): Path<CompanyPath>,
    Json(req): Json<CompanyRequest>,
) -> Response {
    let input = match normalize_company(req) {
        Ok(input) => input,
        Err(response) => return response,
    };
    match state
        .company_store
        .update_company(path.company_id, input)
        .await
    {
        Ok(Some(company)) => (StatusCode::OK, Json(company_to_dto(company))).into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error("updating company", err),
    }
}

/// 删除公司
pub async fn delete_company(
    State(state): State<AppState>,
    Path(path): Path<CompanyPath>,
) -> Response {
    match state.company_store.delete_company(path.company_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(MessageResponse::new("Company deleted")),
        )
            .into_response(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error("deleting company", err),
    }
}
