//! 输入校验辅助函数
//!
//! - normalize_required：去除必填字段首尾空白并拒绝空值
//! - normalize_company：把创建/更新请求体校验为 CompanyInput
//!
//! 校验失败返回 400 `bad_request_error`，发生在借出数据库连接之前。

use crate::utils::response::bad_request_error;
use api_contract::CompanyRequest;
use axum::response::Response;
use company_storage::CompanyInput;

/// 去除必填字段首尾空白并检查非空
pub fn normalize_required(value: String, field: &str) -> Result<String, Response> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(bad_request_error(format!("{field} required")));
    }
    Ok(trimmed.to_string())
}

/// 校验公司请求体
pub fn normalize_company(req: CompanyRequest) -> Result<CompanyInput, Response> {
    let name = normalize_required(req.name, "name")?;
    let location = normalize_required(req.location, "location")?;
    Ok(CompanyInput { name, location })
}
