//! 统一错误处理
//!
//! 提供两层错误类型：
//! - [`EngineError`] - 引擎操作的错误分类
//! - [`AppError`] - HTTP 层错误，负责映射到状态码和错误码
//!
//! # 错误码规范
//!
//! | 错误码 | 状态码 | 说明 |
//! |--------|--------|------|
//! | E0002 | 400 | 验证失败 |
//! | E0003 | 404 | 资源不存在 |
//! | E0004 | 409 | 并发冲突 |
//! | E9002 | 500 | 存储错误 |
//! | E9001 | 500 | 内部错误 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Order xyz not found"))
//!
//! // 返回成功响应
//! Ok(ok(data))
//! ```

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::Serialize;
use shared::{ApiResponse, ErrorCode};
use tracing::error;

use crate::orders::storage::StorageError;

// ============================================================================
// EngineError - 引擎错误分类
// ============================================================================

/// Engine-level error taxonomy
///
/// Every engine operation (aggregator, item lifecycle, ledgers) returns
/// one of these kinds. No operation leaves persisted state partially
/// updated on failure: each one runs inside a single write transaction
/// that either commits or aborts.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed or missing input (required field absent, invalid enum
    /// value, negative quantity)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Referenced venue/order/item/month absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Concurrent-update race detected by a version check
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Storage layer failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

// ============================================================================
// AppError - HTTP 层错误
// ============================================================================

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Conflict: {0}")]
    /// 并发冲突 (409)
    Conflict(String),

    #[error("Database error: {0}")]
    /// 存储错误 (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Validation(msg) => AppError::Validation(msg),
            EngineError::NotFound(msg) => AppError::NotFound(msg),
            EngineError::Conflict(msg) => AppError::Conflict(msg),
            EngineError::Storage(e) => AppError::Database(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::Validation(msg) => (ErrorCode::Validation, msg.clone()),
            AppError::NotFound(msg) => (ErrorCode::NotFound, msg.clone()),
            AppError::Conflict(msg) => (ErrorCode::Conflict, msg.clone()),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (ErrorCode::Database, "Database error".to_string())
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (ErrorCode::Internal, "Internal server error".to_string())
            }
        };

        let status = StatusCode::from_u16(code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(ApiResponse::<()>::error(code.as_str(), message));

        (status, body).into_response()
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok(data))
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(
    data: T,
    message: impl Into<String>,
) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok_with_message(data, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_helpers_use_shared_envelope() {
        let body = serde_json::to_value(&ok(42).0).unwrap();
        assert_eq!(body["code"], "E0000");
        assert_eq!(body["message"], "Success");
        assert_eq!(body["data"], 42);

        let body = serde_json::to_value(&ok_with_message(true, "Order merged").0).unwrap();
        assert_eq!(body["message"], "Order merged");
    }

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(
            AppError::validation("bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("gone").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("race").into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::database("io").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
