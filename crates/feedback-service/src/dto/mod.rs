//! 请求/响应 DTO 定义
//!
//! 请求体在 API 边界上严格类型化：未知字段直接拒绝，
//! 校验失败以字段级明细返回 400。

mod request;
mod response;

pub use request::{
    CreateFeedbackRequest, FeedbackQueryParams, PaginationParams, UpdateFeedbackRequest,
};
pub use response::{FeedbackDto, FeedbackStatsDto, HealthResponse, PageResponse};

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// 反序列化 + 校验一体的 JSON 提取器
///
/// 相比裸 `Json<T>`：JSON 解析失败（含未知枚举值、缺失字段、
/// 未知字段）同样映射为结构化的 400 响应，而不是 axum 默认的纯文本
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}
