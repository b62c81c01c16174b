//! 表结构初始化
//!
//! 连接池初始化时创建 `company` 表（不存在时）。
//! 不提供迁移；已存在的表保持不变。

use crate::error::StorageError;
use sqlx::AnyPool;

const MYSQL_COMPANY_TABLE: &str = "CREATE TABLE IF NOT EXISTS company (\
     id BIGINT AUTO_INCREMENT PRIMARY KEY, \
     name VARCHAR(100) NOT NULL, \
     location VARCHAR(100) NOT NULL)";

const SQLITE_COMPANY_TABLE: &str = "CREATE TABLE IF NOT EXISTS company (\
     id INTEGER PRIMARY KEY AUTOINCREMENT, \
     name TEXT NOT NULL, \
     location TEXT NOT NULL)";

/// 由连接 URL scheme 选择的数据库后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    MySql,
    Sqlite,
}

impl Backend {
    /// 解析连接 URL 的后端
    ///
    /// `sqlite::memory:` 会被拒绝：Any 驱动为每个新连接重新解析 URL，
    /// 每个连接都会得到一个独立的空库。内存库需使用具名共享缓存，
    /// 例如 `sqlite:file:companies?mode=memory&cache=shared`。
    ///
    /// # 参数
    /// - `database_url`：数据库连接字符串
    ///
    /// # 返回
    /// - `Result<Backend, StorageError>`：后端或 `PoolInit` 错误
    pub fn from_url(database_url: &str) -> Result<Self, StorageError> {
        let (scheme, rest) = database_url.split_once(':').unwrap_or_default();
        let scheme = scheme.to_ascii_lowercase();
        match scheme.as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" if rest.trim_start_matches("//").starts_with(":memory:") => {
                Err(StorageError::PoolInit(
                    "sqlite::memory: opens a separate database per connection, \
                     use sqlite:file:<name>?mode=memory&cache=shared"
                        .to_string(),
                ))
            }
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(StorageError::PoolInit(format!(
                "unsupported database url scheme: {scheme:?}"
            ))),
        }
    }

    pub fn company_table_ddl(self) -> &'static str {
        match self {
            Self::MySql => MYSQL_COMPANY_TABLE,
            Self::Sqlite => SQLITE_COMPANY_TABLE,
        }
    }
}

/// 创建 `company` 表（不存在时）
pub async fn ensure_company_table(pool: &AnyPool, backend: Backend) -> Result<(), StorageError> {
    sqlx::query(backend.company_table_ddl())
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_from_url_scheme() {
        assert_eq!(
            Backend::from_url("mysql://root@localhost:3306/patient_db").expect("mysql"),
            Backend::MySql
        );
        assert_eq!(
            Backend::from_url("MariaDB://root@localhost/db").expect("mariadb"),
            Backend::MySql
        );
        assert_eq!(
            Backend::from_url("sqlite:file:companies?mode=memory&cache=shared").expect("sqlite"),
            Backend::Sqlite
        );
        assert_eq!(
            Backend::from_url("sqlite://data/companies.db").expect("sqlite file"),
            Backend::Sqlite
        );
    }

    #[test]
    fn backend_rejects_unknown_scheme() {
        let err = Backend::from_url("postgres://localhost/db").expect_err("unsupported");
        assert!(matches!(err, StorageError::PoolInit(_)));
        assert!(Backend::from_url("no-scheme").is_err());
    }

    #[test]
    fn backend_rejects_per_connection_memory_database() {
        for url in ["sqlite::memory:", "sqlite://:memory:"] {
            let err = Backend::from_url(url).expect_err("per-connection memory db");
            assert!(matches!(err, StorageError::PoolInit(_)));
            assert!(err.to_string().contains("cache=shared"));
        }
    }

    #[test]
    fn ddl_is_create_if_absent() {
        for backend in [Backend::MySql, Backend::Sqlite] {
            assert!(backend.company_table_ddl().starts_with("CREATE TABLE IF NOT EXISTS company"));
        }
    }
}
