//! Handlers 模块

pub mod companies;
pub mod health;

pub use companies::*;
pub use health::*;
