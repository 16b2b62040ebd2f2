//! 仓储 Trait 定义
//!
//! 服务层依赖抽象而非具体实现，便于 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Feedback, FeedbackChanges, FeedbackFilter, FeedbackStats, NewFeedback, SortField, SortOrder,
};

/// 反馈记录仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepositoryTrait: Send + Sync {
    /// 插入单条记录，id 和 created_at 由存储分配
    async fn insert(&self, record: &NewFeedback) -> Result<Feedback>;

    /// 批量插入（单条 INSERT 语句，整体成功或整体失败）
    async fn insert_many(&self, records: &[NewFeedback]) -> Result<Vec<Feedback>>;

    /// 按 id 查询
    async fn find_by_id(&self, id: i64) -> Result<Option<Feedback>>;

    /// 条件查询 + 排序 + 分页
    async fn find(
        &self,
        filter: &FeedbackFilter,
        sort_by: SortField,
        sort_order: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Feedback>>;

    /// 条件计数
    async fn count(&self, filter: &FeedbackFilter) -> Result<i64>;

    /// 部分更新，返回 None 表示 id 未命中
    async fn update_by_id(&self, id: i64, changes: &FeedbackChanges) -> Result<Option<Feedback>>;

    /// 按 id 删除，返回是否确实删除了记录
    async fn delete_by_id(&self, id: i64) -> Result<bool>;

    /// 清空全部记录，返回删除条数（仅供种子脚本重置使用）
    async fn delete_all(&self) -> Result<u64>;

    /// 聚合统计：总数、平均评分（一位小数）、去重分类、去重状态
    async fn aggregate_stats(&self) -> Result<FeedbackStats>;
}
