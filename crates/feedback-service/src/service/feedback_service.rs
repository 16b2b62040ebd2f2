//! 反馈业务服务
//!
//! 仓储之上的薄编排层：集中无法用 schema 约束表达的业务规则
//! （匿名展示名），并提供类型化的统计摘要。
//! 无重试、无缓存，每个调用都是带输入整形的直接透传。

use std::sync::Arc;

use tracing::info;

use crate::dto::CreateFeedbackRequest;
use crate::error::{ApiError, Result};
use crate::models::{
    Feedback, FeedbackChanges, FeedbackFilter, FeedbackStats, NewFeedback, SortField, SortOrder,
};
use crate::repository::FeedbackRepositoryTrait;

/// 匿名反馈的展示名
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// 推导存储的展示名
///
/// 匿名反馈无论是否提供姓名，一律存为 "Anonymous"，
/// 确保存储中不残留真实身份
pub fn display_name(name: Option<&str>, is_anonymous: bool) -> String {
    if is_anonymous {
        ANONYMOUS_NAME.to_string()
    } else {
        // 姓名缺失已在 DTO 边界拒绝，这里兜底为匿名展示名
        name.map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string())
    }
}

/// 反馈业务服务
pub struct FeedbackService<R: FeedbackRepositoryTrait> {
    repo: Arc<R>,
}

impl<R: FeedbackRepositoryTrait> FeedbackService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// 创建反馈记录
    pub async fn create(&self, req: CreateFeedbackRequest) -> Result<Feedback> {
        let record = NewFeedback {
            name: display_name(req.name.as_deref(), req.is_anonymous),
            message: req.message,
            rating: req.rating,
            category: req.category,
            is_anonymous: req.is_anonymous,
            status: req.status.unwrap_or_default(),
        };

        let created = self.repo.insert(&record).await?;
        info!(
            feedback_id = created.id,
            category = created.category.as_str(),
            rating = created.rating,
            "Feedback created"
        );
        Ok(created)
    }

    /// 条件查询列表，返回 (记录, 过滤后总数)
    pub async fn list(
        &self,
        filter: &FeedbackFilter,
        sort_by: SortField,
        sort_order: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Feedback>, i64)> {
        let total = self.repo.count(filter).await?;
        if total == 0 {
            return Ok((vec![], 0));
        }
        let items = self
            .repo
            .find(filter, sort_by, sort_order, limit, offset)
            .await?;
        Ok((items, total))
    }

    /// 按 id 查询，未命中返回 NotFound
    pub async fn get(&self, id: i64) -> Result<Feedback> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::FeedbackNotFound(id.to_string()))
    }

    /// 部分更新（实践中只改 status），未命中返回 NotFound
    ///
    /// 注意：更新不做任何归属校验，任何客户端都能按 id
    /// 修改任意记录。这是已知缺口，补认证属于后续工作而非本层职责
    pub async fn update(&self, id: i64, changes: FeedbackChanges) -> Result<Feedback> {
        if changes.is_empty() {
            return Err(ApiError::validation("至少需要提供一个待更新字段"));
        }

        let updated = self
            .repo
            .update_by_id(id, &changes)
            .await?
            .ok_or_else(|| ApiError::FeedbackNotFound(id.to_string()))?;

        info!(
            feedback_id = id,
            status = updated.status.as_str(),
            "Feedback updated"
        );
        Ok(updated)
    }

    /// 按 id 删除，未命中返回 NotFound（重复删除同样 404）
    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.repo.delete_by_id(id).await? {
            info!(feedback_id = id, "Feedback deleted");
            Ok(())
        } else {
            Err(ApiError::FeedbackNotFound(id.to_string()))
        }
    }

    /// 聚合统计
    pub async fn stats(&self) -> Result<FeedbackStats> {
        self.repo.aggregate_stats().await
    }
}
