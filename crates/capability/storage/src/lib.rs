//! # Company Storage
//!
//! 公司 API 的存储层：连接池管理、表结构初始化与公司存储。
//!
//! ## 模块结构
//!
//! 1. **连接管理** (`connection.rs`)：`PoolManager` 持有共享连接池，
//!    负责 initialize / acquire / release / teardown 生命周期
//! 2. **表结构** (`schema.rs`)：后端识别与 create-if-absent DDL
//! 3. **接口定义** (`traits.rs`)：异步 `CompanyStore` trait
//! 4. **数据模型** (`models.rs`)：`CompanyRecord`、`CompanyInput`
//! 5. **错误类型** (`error.rs`)：`StorageError`
//! 6. **实现** (`sql/`)：基于 `PoolManager` 的 `SqlCompanyStore`
//!
//! ## 后端
//!
//! 连接池使用 sqlx `Any` 驱动。生产环境使用 `mysql://`；本地运行与测试使用
//! `sqlite:`。内存库必须是具名共享缓存
//! （`sqlite:file:<name>?mode=memory&cache=shared`），`sqlite::memory:` 会被拒绝。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use company_storage::{CompanyInput, CompanyStore, PoolManager, PoolSettings, SqlCompanyStore};
//! use std::sync::Arc;
//!
//! let pool = Arc::new(PoolManager::new(PoolSettings::new(
//!     "mysql://root@localhost:3306/patient_db",
//! )));
//! pool.initialize().await?;
//!
//! let store = SqlCompanyStore::new(pool.clone());
//! let company = store.create_company(CompanyInput::new("Acme", "NYC")).await?;
//!
//! pool.teardown().await;
//! ```
//!
//! ## 约束
//!
//! - handler 不直接执行 SQL，统一通过存储
//! - 每次借出连接只执行一条语句，自动提交，不使用事务

pub mod connection;
pub mod error;
pub mod models;
pub mod schema;
pub mod sql;
pub mod traits;

pub use connection::*;
pub use error::*;
pub use models::*;
pub use schema::Backend;
pub use sql::SqlCompanyStore;
pub use traits::*;
