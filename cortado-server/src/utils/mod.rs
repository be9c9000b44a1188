//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - HTTP 层错误，响应信封复用 [`shared::ApiResponse`]
//! - [`EngineError`] - 引擎错误分类 (Validation / NotFound / Conflict / Storage)
//! - 日志、业务时区、文本长度校验

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{AppError, EngineError, EngineResult};
pub use error::{ok, ok_with_message};
pub use result::AppResult;
pub use shared::ApiResponse;
