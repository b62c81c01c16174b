//! HTTP 中间件
//!
//! - request_context：注入 request_id/trace_id 到请求 span 与响应头
//! - cors_layer：为配置的浏览器来源提供跨域策略
//! - preflight_body：OPTIONS 应答返回 JSON `{}`
//!
//! CorsLayer 自行应答所有 OPTIONS 请求（200、空响应体），覆盖
//! /companies 与 /companies/{id} 的预检；preflight_body 包在其外层补上 `{}`。

use axum::{
    body::Body,
    extract::Request,
    http::{
        HeaderValue, Method, StatusCode,
        header::{self, InvalidHeaderValue},
    },
    middleware::Next,
    response::Response,
};
use company_telemetry::new_request_ids;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::{Instrument, info_span};

/// 请求上下文中间件：注入 request_id/trace_id
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ids.clone());

    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let mut response = next.run(req).instrument(span).await;
    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&ids.request_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response.headers_mut().insert(
        "x-trace-id",
        HeaderValue::from_str(&ids.trace_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response
}

/// 跨域策略
///
/// # 参数
/// - `origins`：允许的来源列表
///
/// # 返回
/// - 允许 GET/POST/PUT/DELETE/OPTIONS、任意请求头并携带凭证的 `CorsLayer`
/// - 来源不是合法头部值时返回 `InvalidHeaderValue`
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // 携带凭证时不能用通配，镜像请求头等价于允许所有请求头
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// OPTIONS 成功应答的响应体替换为 JSON `{}`
pub async fn preflight_body(req: Request<Body>, next: Next) -> Response {
    let is_options = req.method() == Method::OPTIONS;
    let response = next.run(req).await;
    if !is_options || response.status() != StatusCode::OK {
        return response;
    }
    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Response::from_parts(parts, Body::from("{}"))
}
