//! SQL 存储实现
//!
//! 存储运行在 `PoolManager` 持有的 `AnyPool` 上，同一份代码在生产环境
//! 使用 MySQL，在测试中使用 SQLite。
//!
//! 语句约束：
//! - 参数用 `?` 占位绑定，不拼接 SQL
//! - 每次借出连接只执行一条语句
//! - 语句完成后立即归还连接，再解码行

pub mod company;

pub use company::*;
