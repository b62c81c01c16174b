//! 路由定义
//!
//! - health：/health
//! - companies：/companies、/companies/{id}
//!
//! 两个公司路径上的 OPTIONS 由 CORS 层应答。

use super::AppState;
use super::handlers::*;
use crate::middleware::{preflight_body, request_context};
use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// API 路由（尚未绑定状态）
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/:company_id",
            get(get_company).put(update_company).delete(delete_company),
        )
}

/// 完整应用：路由、状态、CORS、追踪与请求 ID
pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    create_api_router()
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(preflight_body))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_context))
}
