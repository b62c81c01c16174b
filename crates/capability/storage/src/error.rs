//! 存储层错误类型
//!
//! 统一封装存储层可能出现的错误：
//! - 连接池创建失败（配置、连通性、表结构初始化）
//! - 连接获取失败（连接池耗尽、已关闭、超时）
//! - 语句执行失败（约束、断连、超时）
//!
//! 记录不存在不是错误，存储返回 `Ok(None)` 或 `Ok(false)`。

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// 连接池无法创建
    #[error("pool initialization failed: {0}")]
    PoolInit(String),
    /// 无法借出连接
    #[error("database connection unavailable: {0}")]
    ConnectionUnavailable(String),
    /// 语句执行失败
    #[error("{0}")]
    Execution(String),
}

impl StorageError {
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// 完全拿不到连接时为 true
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::PoolInit(_) | Self::ConnectionUnavailable(_))
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::Execution(err.to_string())
    }
}
