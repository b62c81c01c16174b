//! handler 与中间件测试共用的 Router 夹具

use crate::AppState;
use crate::middleware::cors_layer;
use crate::routes::create_app;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use company_storage::{PoolManager, PoolSettings};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt;

/// 每次调用得到一个新的具名共享缓存内存库
fn memory_url() -> String {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let seq = NEXT.fetch_add(1, Ordering::Relaxed);
    format!("sqlite:file:company-api-{seq}?mode=memory&cache=shared")
}

/// 基于全新内存 SQLite 库的应用
pub fn memory_app() -> (Router, Arc<PoolManager>) {
    app_with_url(&memory_url())
}

/// 数据库永远无法打开的应用
pub fn unavailable_app() -> (Router, Arc<PoolManager>) {
    app_with_url("sqlite:///definitely-missing-dir/companies.db")
}

pub fn app_with_url(database_url: &str) -> (Router, Arc<PoolManager>) {
    let pool = Arc::new(PoolManager::new(PoolSettings {
        database_url: database_url.to_string(),
        min_connections: 1,
        max_connections: 4,
        acquire_timeout: Duration::from_secs(2),
    }));
    let cors = cors_layer(&["http://localhost:5173".to_string()]).expect("cors");
    let app = create_app(AppState::new(Arc::clone(&pool)), cors);
    (app, pool)
}

/// 发送一个请求并解码 JSON 响应体（为空时为 `Value::Null`）
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// 创建公司并断言成功，返回分配的主键
pub async fn create(app: &Router, name: &str, location: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/companies",
        Some(serde_json::json!({ "name": name, "location": location })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    assert_eq!(body["name"], name);
    assert_eq!(body["location"], location);
    body["id"].as_i64().expect("id")
}
