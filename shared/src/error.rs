//! 统一错误码
//!
//! 服务端和客户端共用的稳定错误码表。
//!
//! | 错误码 | 分类 | 说明 |
//! |--------|------|------|
//! | E0000 | 成功 | Success |
//! | E0002 | 业务 | 验证失败 (400) |
//! | E0003 | 业务 | 资源不存在 (404) |
//! | E0004 | 业务 | 并发冲突 (409) |
//! | E9001 | 系统 | 内部错误 (500) |
//! | E9002 | 系统 | 存储错误 (500) |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable error code shared by the HTTP envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Operation completed successfully
    Success,
    /// Malformed or missing input
    Validation,
    /// Referenced venue/order/item/month absent
    NotFound,
    /// Concurrent-update race detected by a version check
    Conflict,
    /// Storage layer failure
    Database,
    /// Unexpected internal failure
    Internal,
}

impl ErrorCode {
    /// Wire representation used in the response envelope
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Success => "E0000",
            ErrorCode::Validation => "E0002",
            ErrorCode::NotFound => "E0003",
            ErrorCode::Conflict => "E0004",
            ErrorCode::Database => "E9002",
            ErrorCode::Internal => "E9001",
        }
    }

    /// HTTP status the collaborating layer maps this code to
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::Success => 200,
            ErrorCode::Validation => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::Conflict => 409,
            ErrorCode::Database | ErrorCode::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
