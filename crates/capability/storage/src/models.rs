//! 数据模型
//!
//! - CompanyRecord：已持久化的公司记录
//! - CompanyInput：创建与整体替换更新使用的 name/location

/// 公司记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub id: i64,
    pub name: String,
    pub location: String,
}

/// 不含主键的公司字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyInput {
    pub name: String,
    pub location: String,
}

impl CompanyInput {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    /// 附上主键，得到该行当前的记录
    pub fn into_record(self, id: i64) -> CompanyRecord {
        CompanyRecord {
            id,
            name: self.name,
            location: self.location,
        }
    }
}
