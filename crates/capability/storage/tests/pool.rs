use company_storage::{PoolManager, PoolSettings, StorageError};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// 10.255.255.1 不可路由，建立连接会一直挂起直到超时
const UNROUTABLE_URL: &str = "mysql://root@10.255.255.1:3306/companies";

fn memory_url() -> String {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let seq = NEXT.fetch_add(1, Ordering::Relaxed);
    format!("sqlite:file:company-pool-{seq}?mode=memory&cache=shared")
}

fn memory_settings(max_connections: u32) -> PoolSettings {
    PoolSettings {
        database_url: memory_url(),
        min_connections: 1,
        max_connections,
        acquire_timeout: Duration::from_secs(2),
    }
}

#[tokio::test]
async fn acquire_initializes_lazily() {
    let manager = PoolManager::new(memory_settings(4));
    assert!(!manager.is_initialized().await);

    let conn = manager.acquire().await.expect("acquire");
    let stats = manager.stats().await;
    assert!(stats.initialized);
    assert_eq!(stats.in_use, 1);
    assert_eq!(stats.max_connections, 4);

    drop(conn);
    assert_eq!(manager.in_use(), 0);
}

#[tokio::test]
async fn initialize_is_idempotent() {
    let manager = PoolManager::new(memory_settings(4));
    manager.initialize().await.expect("first init");
    manager.initialize().await.expect("second init");

    let stats = manager.stats().await;
    assert!(stats.initialized);
    assert!(stats.size >= 1);
    assert_eq!(stats.in_use, 0);
}

#[tokio::test]
async fn pooled_connections_share_one_database() {
    let manager = PoolManager::new(memory_settings(2));
    let mut first = manager.acquire().await.expect("first");
    let mut second = manager.acquire().await.expect("second");

    sqlx::query("INSERT INTO company (name, location) VALUES ('Acme', 'NYC')")
        .execute(&mut *first)
        .await
        .expect("insert through first connection");
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM company")
        .fetch_one(&mut *second)
        .await
        .expect("count through second connection");
    assert_eq!(count, 1);

    first.release();
    second.release();
    assert_eq!(manager.in_use(), 0);
}

#[tokio::test]
async fn per_connection_memory_url_is_rejected() {
    let manager = PoolManager::new(PoolSettings::new("sqlite::memory:"));
    let err = manager.acquire().await.expect_err("rejected");
    assert!(matches!(err, StorageError::PoolInit(_)));
    assert!(!manager.is_initialized().await);
}

#[tokio::test]
async fn explicit_release_returns_connection() {
    let manager = PoolManager::new(memory_settings(2));
    let first = manager.acquire().await.expect("first");
    let second = manager.acquire().await.expect("second");
    assert_eq!(manager.in_use(), 2);

    manager.release(first);
    assert_eq!(manager.in_use(), 1);
    second.release();
    assert_eq!(manager.in_use(), 0);
}

#[tokio::test]
async fn exhausted_pool_times_out() {
    let mut settings = memory_settings(1);
    settings.acquire_timeout = Duration::from_millis(200);
    let manager = PoolManager::new(settings);

    let held = manager.acquire().await.expect("acquire");
    let err = manager.acquire().await.expect_err("pool exhausted");
    assert!(matches!(err, StorageError::ConnectionUnavailable(_)));
    assert!(err.is_unavailable());
    assert_eq!(manager.in_use(), 1);

    drop(held);
    let conn = manager.acquire().await.expect("available again");
    assert_eq!(manager.in_use(), 1);
    drop(conn);
    assert_eq!(manager.in_use(), 0);
}

#[tokio::test]
async fn failed_initialization_is_retried_on_next_acquire() {
    let manager = PoolManager::new(PoolSettings {
        database_url: "sqlite:///definitely-missing-dir/companies.db".to_string(),
        min_connections: 1,
        max_connections: 2,
        acquire_timeout: Duration::from_secs(1),
    });

    for _ in 0..2 {
        let err = manager.acquire().await.expect_err("cannot open database");
        assert!(matches!(err, StorageError::PoolInit(_)));
        assert!(!manager.is_initialized().await);
        assert_eq!(manager.in_use(), 0);
    }
}

#[tokio::test]
async fn unsupported_scheme_fails_initialization() {
    let manager = PoolManager::new(PoolSettings::new("postgres://localhost/companies"));
    let err = manager.initialize().await.expect_err("unsupported");
    assert!(matches!(err, StorageError::PoolInit(_)));
    assert!(err.to_string().starts_with("pool initialization failed"));
}

#[tokio::test]
async fn stats_answer_while_initialization_is_pending() {
    let manager = Arc::new(PoolManager::new(PoolSettings {
        database_url: UNROUTABLE_URL.to_string(),
        min_connections: 1,
        max_connections: 2,
        acquire_timeout: Duration::from_secs(3),
    }));
    let pending = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move { manager.initialize().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let stats = tokio::time::timeout(Duration::from_millis(500), manager.stats())
        .await
        .expect("stats answered");
    assert!(!stats.initialized);
    assert_eq!(stats.in_use, 0);
    let initialized = tokio::time::timeout(Duration::from_millis(500), manager.is_initialized())
        .await
        .expect("is_initialized answered");
    assert!(!initialized);
    pending.abort();
}

#[tokio::test]
async fn teardown_is_idempotent() {
    let manager = PoolManager::new(memory_settings(2));
    manager.teardown().await;

    manager.initialize().await.expect("init");
    manager.teardown().await;
    assert!(!manager.stats().await.initialized);
    manager.teardown().await;

    // 之后的 acquire 重新建立连接池
    let conn = manager.acquire().await.expect("reinitialized");
    assert!(manager.is_initialized().await);
    drop(conn);
    manager.teardown().await;
}

#[tokio::test]
async fn teardown_waits_for_checked_out_connections() {
    let manager = Arc::new(PoolManager::new(memory_settings(2)));
    let conn = manager.acquire().await.expect("acquire");

    let closing = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move { manager.teardown().await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!closing.is_finished());

    drop(conn);
    tokio::time::timeout(Duration::from_secs(5), closing)
        .await
        .expect("teardown finished")
        .expect("join");
    assert!(!manager.is_initialized().await);
    assert_eq!(manager.in_use(), 0);
}
