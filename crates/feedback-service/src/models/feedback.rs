//! 反馈记录模型
//!
//! 所有枚举都支持数据库（sqlx）和 JSON（serde）序列化，
//! 数据库中以小写字符串存储，与 JSON 表示一致。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 反馈分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum FeedbackCategory {
    /// 课程内容
    Course,
    /// 场地设施
    Facility,
    /// 讲师
    Instructor,
    /// 改进建议
    Suggestion,
    /// 其他
    General,
}

impl FeedbackCategory {
    /// 数据库/JSON 中的小写字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Facility => "facility",
            Self::Instructor => "instructor",
            Self::Suggestion => "suggestion",
            Self::General => "general",
        }
    }
}

/// 反馈处理状态
///
/// 通常按 pending -> reviewed -> resolved 流转，
/// 但不做状态机校验，任意合法状态都可以直接设置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum FeedbackStatus {
    /// 待处理 - 新提交的默认状态
    #[default]
    Pending,
    /// 已查看
    Reviewed,
    /// 已解决
    Resolved,
}

impl FeedbackStatus {
    /// 数据库/JSON 中的小写字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Resolved => "resolved",
        }
    }
}

/// 反馈记录（数据库行）
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Feedback {
    pub id: i64,
    pub name: String,
    pub message: String,
    pub rating: i32,
    pub category: FeedbackCategory,
    pub is_anonymous: bool,
    pub status: FeedbackStatus,
    pub created_at: DateTime<Utc>,
}

/// 待插入的反馈记录
///
/// id 和 created_at 由存储层在插入时分配
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub name: String,
    pub message: String,
    pub rating: i32,
    pub category: FeedbackCategory,
    pub is_anonymous: bool,
    pub status: FeedbackStatus,
}

/// 查询过滤条件
///
/// 每个字段都是可选的，None 表示不按该字段过滤
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackFilter {
    pub category: Option<FeedbackCategory>,
    pub status: Option<FeedbackStatus>,
    pub rating: Option<i32>,
}

/// 部分更新字段
///
/// None 表示保持原值不变。实践中只有 status 会变化，
/// 但存储层不强制限制其他可变字段
#[derive(Debug, Clone, Default)]
pub struct FeedbackChanges {
    pub status: Option<FeedbackStatus>,
    pub message: Option<String>,
    pub rating: Option<i32>,
    pub category: Option<FeedbackCategory>,
}

impl FeedbackChanges {
    /// 是否没有任何字段需要更新
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.message.is_none()
            && self.rating.is_none()
            && self.category.is_none()
    }
}

/// 排序字段白名单
///
/// 排序字段会拼接进 SQL，必须限定在枚举内防止注入
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    Rating,
    Name,
    Category,
    Status,
}

impl SortField {
    /// 对应的数据库列名
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Rating => "rating",
            Self::Name => "name",
            Self::Category => "category",
            Self::Status => "status",
        }
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// 聚合统计结果
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackStats {
    pub total_feedback: i64,
    /// 平均评分，保留一位小数；无数据时为 0.0
    pub average_rating: f64,
    /// 出现过的分类（去重）
    pub categories: Vec<String>,
    /// 出现过的状态（去重）
    pub statuses: Vec<String>,
}
