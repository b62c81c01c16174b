//! Handler 辅助函数

pub mod response;
pub mod validation;

pub use response::{company_to_dto, pool_stats_to_dto};
pub use validation::normalize_company;
