//! 数据库连接管理
//!
//! `PoolManager` 持有进程内共享的连接池：
//! - initialize：建立有界连接池并初始化表结构
//! - acquire：取出一个连接，连接池未初始化时先初始化
//! - release：归还连接（守卫 drop 时同样归还）
//! - teardown：关闭连接池，等待已借出的连接归还
//!
//! 设计原则：
//! - 连接池放在 `RwLock<Option<_>>` 槽位；空槽位表示尚未初始化或已关闭，
//!   下一次 acquire 会重新初始化
//! - 初始化由独立的 `init_lock` 串行化，槽位写锁只在替换时短暂持有，
//!   `stats()` 与读路径不会等待建立连接
//! - 语句自动提交，不使用事务
//! - `in_use` 统计存活的 `PooledConnection` 守卫，借出与归还时原子更新

use crate::error::StorageError;
use crate::schema::{self, Backend};
use sqlx::any::{Any, AnyPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{AnyConnection, AnyPool};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// 连接池构建参数
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub database_url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl PoolSettings {
    /// 使用默认边界（最少 1、最多 10、获取超时 30 秒）
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            min_connections: 1,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// 连接池快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub initialized: bool,
    /// 已打开的连接数（空闲与借出）
    pub size: u32,
    pub idle: usize,
    /// 通过 `acquire` 借出的连接数
    pub in_use: usize,
    pub max_connections: u32,
}

/// 共享连接池的持有者
pub struct PoolManager {
    settings: PoolSettings,
    pool: RwLock<Option<AnyPool>>,
    init_lock: Mutex<()>,
    in_use: Arc<AtomicUsize>,
}

impl PoolManager {
    pub fn new(settings: PoolSettings) -> Self {
        Self {
            settings,
            pool: RwLock::new(None),
            init_lock: Mutex::new(()),
            in_use: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn settings(&self) -> &PoolSettings {
        &self.settings
    }

    /// 由连接 URL 判定的数据库后端
    pub fn backend(&self) -> Result<Backend, StorageError> {
        Backend::from_url(&self.settings.database_url)
    }

    /// 建立连接池并确保 `company` 表存在
    ///
    /// 已初始化时直接返回现有连接池；失败时槽位保持为空，后续 `acquire` 会重试。
    ///
    /// # 返回
    /// - `Result<AnyPool, StorageError>`：连接池或 `PoolInit` 错误
    pub async fn initialize(&self) -> Result<AnyPool, StorageError> {
        let _init = self.init_lock.lock().await;
        if let Some(pool) = self.current().await {
            return Ok(pool);
        }
        match self.connect().await {
            Ok(pool) => {
                *self.pool.write().await = Some(pool.clone());
                Ok(pool)
            }
            Err(err) => {
                warn!(error = %err, "database connection pool initialization failed");
                Err(err)
            }
        }
    }

    async fn current(&self) -> Option<AnyPool> {
        self.pool.read().await.clone()
    }

    async fn connect(&self) -> Result<AnyPool, StorageError> {
        let backend = self.backend()?;
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .min_connections(self.settings.min_connections)
            .max_connections(self.settings.max_connections)
            .acquire_timeout(self.settings.acquire_timeout)
            .connect(&self.settings.database_url)
            .await
            .map_err(|err| StorageError::PoolInit(err.to_string()))?;
        info!(
            min_connections = self.settings.min_connections,
            max_connections = self.settings.max_connections,
            "database connection pool initialized"
        );

        if let Err(err) = schema::ensure_company_table(&pool, backend).await {
            pool.close().await;
            return Err(StorageError::PoolInit(format!(
                "creating company table: {err}"
            )));
        }
        info!("company table created or verified");
        Ok(pool)
    }

    /// 借出一个连接
    ///
    /// 异步等待空闲连接，超过获取超时返回 `ConnectionUnavailable`。
    pub async fn acquire(&self) -> Result<PooledConnection, StorageError> {
        let pool = match self.current().await {
            Some(pool) => pool,
            None => self.initialize().await?,
        };
        let conn = pool.acquire().await.map_err(|err| {
            warn!(error = %err, "database connection unavailable");
            StorageError::ConnectionUnavailable(err.to_string())
        })?;
        let in_use = self.in_use.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(in_use, "database connection acquired");
        Ok(PooledConnection {
            conn,
            in_use: Arc::clone(&self.in_use),
        })
    }

    /// 归还连接
    pub fn release(&self, connection: PooledConnection) {
        connection.release();
    }

    /// 关闭连接池，等待已借出的连接归还
    ///
    /// 没有连接池时什么也不做。
    pub async fn teardown(&self) {
        let _init = self.init_lock.lock().await;
        let pool = self.pool.write().await.take();
        if let Some(pool) = pool {
            pool.close().await;
            info!("database connection pool closed");
        }
    }

    pub async fn is_initialized(&self) -> bool {
        self.pool.read().await.is_some()
    }

    /// 当前借出的连接数
    pub fn in_use(&self) -> usize {
        self.in_use.load(Ordering::SeqCst)
    }

    pub async fn stats(&self) -> PoolStats {
        let (initialized, size, idle) = match self.current().await {
            Some(pool) => (true, pool.size(), pool.num_idle()),
            None => (false, 0, 0),
        };
        PoolStats {
            initialized,
            size,
            idle,
            in_use: self.in_use(),
            max_connections: self.settings.max_connections,
        }
    }
}

/// 借出的连接
///
/// 守卫 drop 时连接归还连接池，任何退出路径都恰好归还一次。
pub struct PooledConnection {
    conn: PoolConnection<Any>,
    in_use: Arc<AtomicUsize>,
}

impl PooledConnection {
    /// 归还连接
    pub fn release(self) {
        drop(self);
    }
}

impl fmt::Debug for PooledConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledConnection")
            .field("in_use", &self.in_use.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl Deref for PooledConnection {
    type Target = AnyConnection;

    fn deref(&self) -> &AnyConnection {
        &self.conn
    }
}

impl DerefMut for PooledConnection {
    fn deref_mut(&mut self) -> &mut AnyConnection {
        &mut self.conn
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        let in_use = self.in_use.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        debug!(in_use, "database connection released");
    }
}
