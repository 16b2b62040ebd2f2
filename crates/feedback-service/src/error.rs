//! 反馈服务错误类型定义
//!
//! 错误响应体固定为 `{error, message}`，验证错误额外携带
//! 字段级的 `details` 数组。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// 反馈服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 请求参数校验失败（schema/枚举/范围）
    #[error("参数验证失败: {message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },

    /// id 未命中任何记录
    #[error("反馈不存在: {0}")]
    FeedbackNotFound(String),

    /// 数据库错误，包含数据库不可达的场景：
    /// 服务不退出，数据操作在连接恢复前持续返回 500
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    /// 其他未预期错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 构造不带字段明细的验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Validation {
            details: vec![message.clone()],
            message,
        }
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::FeedbackNotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于日志与排查）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::FeedbackNotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 响应体中的 error 字段（面向客户端的粗分类）
    fn error_label(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Validation failed",
            Self::FeedbackNotFound(_) => "Feedback not found",
            Self::Database(_) | Self::Internal(_) => "Internal server error",
        }
    }

    /// 构造响应体
    ///
    /// `verbose` 为 false 时（生产模式），系统级错误只返回通用提示，
    /// 详细信息仅记录日志，防止内部实现细节泄露
    pub fn body(&self, verbose: bool) -> serde_json::Value {
        let message = match self {
            Self::Database(e) => {
                tracing::error!(error = %e, code = self.error_code(), "数据库操作失败");
                if verbose {
                    e.to_string()
                } else {
                    "Something went wrong".to_string()
                }
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, code = self.error_code(), "内部错误");
                if verbose {
                    e.clone()
                } else {
                    "Something went wrong".to_string()
                }
            }
            other => other.to_string(),
        };

        let mut body = json!({
            "error": self.error_label(),
            "message": message,
        });

        if let Self::Validation { details, .. } = self {
            body["details"] = json!(details);
        }

        body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // 生产环境通过 FEEDBACK_ENV=production 标识
        let verbose =
            std::env::var("FEEDBACK_ENV").unwrap_or_default() != "production";
        let body = self.body(verbose);
        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换：展开为字段级明细
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    match &e.message {
                        Some(msg) => format!("{}: {}", field, msg),
                        None => format!("{}: {}", field, e.code),
                    }
                })
            })
            .collect();
        details.sort();

        Self::Validation {
            message: errors.to_string(),
            details,
        }
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
