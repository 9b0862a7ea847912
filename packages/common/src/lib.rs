// Aionix Gateway Common Package
// 通用类型定义和错误类型

pub mod types;
pub mod errors;

pub use types::*;
pub use errors::*;
