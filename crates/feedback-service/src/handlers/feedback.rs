//! 反馈 API 处理器
//!
//! HTTP 请求与业务服务之间的转换层：提取/校验输入，
//! 把结果序列化为 JSON 响应

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    dto::{
        CreateFeedbackRequest, FeedbackDto, FeedbackQueryParams, FeedbackStatsDto,
        PageResponse, PaginationParams, UpdateFeedbackRequest, ValidatedJson,
    },
    error::{ApiError, Result},
    state::AppState,
};

/// 路径中的 id 参数
///
/// 非数字的 id 不可能命中任何记录，与未命中同样按 404 处理
fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::FeedbackNotFound(raw.to_string()))
}

/// 提交反馈
///
/// POST /api/feedback
pub async fn create_feedback(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackDto>)> {
    let created = state.service.create(req).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// 查询反馈列表（过滤 + 排序 + 分页）
///
/// GET /api/feedback
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(query): Query<FeedbackQueryParams>,
) -> Result<Json<PageResponse<FeedbackDto>>> {
    let (items, total) = state
        .service
        .list(
            &query.filter(),
            query.sort_by,
            query.sort_order,
            pagination.limit(),
            pagination.offset(),
        )
        .await?;

    let items: Vec<FeedbackDto> = items.into_iter().map(Into::into).collect();
    // 响应回显实际生效的分页参数，而不是客户端原始输入
    Ok(Json(PageResponse::new(
        items,
        total,
        pagination.page_number(),
        pagination.limit(),
    )))
}

/// 查询单条反馈
///
/// GET /api/feedback/{id}
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FeedbackDto>> {
    let feedback = state.service.get(parse_id(&id)?).await?;
    Ok(Json(feedback.into()))
}

/// 更新反馈（实践中只更新 status）
///
/// PATCH /api/feedback/{id}
pub async fn update_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateFeedbackRequest>,
) -> Result<Json<FeedbackDto>> {
    let updated = state
        .service
        .update(parse_id(&id)?, req.into_changes())
        .await?;
    Ok(Json(updated.into()))
}

/// 删除反馈
///
/// DELETE /api/feedback/{id}
pub async fn delete_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.service.delete(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 聚合统计
///
/// GET /api/feedback/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<FeedbackStatsDto>> {
    let stats = state.service.stats().await?;
    Ok(Json(stats.into()))
}
