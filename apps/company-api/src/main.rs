//! 公司管理 HTTP API
//!
//! 启动流程：加载配置，初始化日志追踪，初始化连接池（失败时记录日志，
//! 由之后的请求重试），服务直到 ctrl-c 或 SIGTERM，最后关闭连接池。

mod handlers;
mod middleware;
mod routes;
#[cfg(test)]
mod test_support;
mod utils;

use company_config::AppConfig;
use company_storage::{CompanyStore, PoolManager, PoolSettings, SqlCompanyStore};
use company_telemetry::init_tracing;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PoolManager>,
    pub company_store: Arc<dyn CompanyStore>,
}

impl AppState {
    /// 基于 `pool` 上 SQL 公司存储的应用状态
    pub fn new(pool: Arc<PoolManager>) -> Self {
        let company_store: Arc<dyn CompanyStore> =
            Arc::new(SqlCompanyStore::new(Arc::clone(&pool)));
        Self {
            pool,
            company_store,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 存在时加载本地 .env
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let pool = Arc::new(PoolManager::new(PoolSettings {
        database_url: config.database_url.clone(),
        min_connections: config.pool_min_connections,
        max_connections: config.pool_max_connections,
        acquire_timeout: Duration::from_secs(config.pool_acquire_timeout_seconds),
    }));
    if pool.initialize().await.is_err() {
        warn!("database unavailable at startup, requests will retry pool initialization");
    }

    let cors = middleware::cors_layer(&config.cors_origins)?;
    let app = routes::create_app(AppState::new(Arc::clone(&pool)), cors);

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(addr = %config.http_addr, "company api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.teardown().await;
    info!("server shutdown complete");
    Ok(())
}

/// 收到 ctrl-c 或 SIGTERM 时返回
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
