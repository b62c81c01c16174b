//! 存储 trait 定义
//!
//! - CompanyStore：公司增删改查
//!
//! 设计原则：
//! - 所有方法失败时返回 StorageError
//! - 不存在用 `Ok(None)` / `Ok(false)` 表示，不是错误
//! - 使用 async_trait，handler 状态中以 trait 对象持有

use crate::error::StorageError;
use crate::models::{CompanyInput, CompanyRecord};
use async_trait::async_trait;

/// 公司存储
///
/// 每次调用只借出一个连接，只执行一条语句。
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// 列出所有公司
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, StorageError>;

    /// 按主键查询公司
    ///
    /// # 参数
    /// - `company_id`：公司主键
    ///
    /// # 返回
    /// - `Ok(Some(record))`：公司存在
    /// - `Ok(None)`：公司不存在
    async fn find_company(&self, company_id: i64) -> Result<Option<CompanyRecord>, StorageError>;

    /// 插入公司，主键由数据库分配
    async fn create_company(&self, input: CompanyInput) -> Result<CompanyRecord, StorageError>;

    /// 整体替换已有公司的 name 与 location
    async fn update_company(
        &self,
        company_id: i64,
        input: CompanyInput,
    ) -> Result<Option<CompanyRecord>, StorageError>;

    /// 删除公司，没有匹配行时返回 `false`
    async fn delete_company(&self, company_id: i64) -> Result<bool, StorageError>;
}
