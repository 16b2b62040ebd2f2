//! 请求 DTO 定义

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::{
    FeedbackCategory, FeedbackChanges, FeedbackFilter, FeedbackStatus, SortField, SortOrder,
};

/// 提交反馈请求
///
/// POST /api/feedback 的请求体
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_name_presence"))]
pub struct CreateFeedbackRequest {
    /// 非匿名反馈必填；匿名反馈忽略该字段，统一存为 "Anonymous"
    #[validate(length(min = 1, max = 100, message = "姓名长度必须在1-100个字符之间"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 2000, message = "反馈内容长度必须在1-2000个字符之间"))]
    pub message: String,
    #[validate(range(min = 1, max = 5, message = "评分必须在1-5之间"))]
    pub rating: i32,
    pub category: FeedbackCategory,
    #[serde(default)]
    pub is_anonymous: bool,
    /// 缺省为 pending
    pub status: Option<FeedbackStatus>,
}

/// 非匿名反馈必须提供非空白的姓名
fn validate_name_presence(req: &CreateFeedbackRequest) -> Result<(), ValidationError> {
    if req.is_anonymous {
        return Ok(());
    }
    let has_name = req
        .name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());
    if has_name {
        Ok(())
    } else {
        let mut err = ValidationError::new("required");
        err.message = Some("非匿名反馈必须提供姓名".into());
        Err(err)
    }
}

/// 更新反馈请求
///
/// PATCH /api/feedback/{id} 的请求体，所有字段可选，
/// 实践中只更新 status。name/isAnonymous/createdAt 不可变，
/// 由 deny_unknown_fields 拒绝
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateFeedbackRequest {
    pub status: Option<FeedbackStatus>,
    #[validate(length(min = 1, max = 2000, message = "反馈内容长度必须在1-2000个字符之间"))]
    pub message: Option<String>,
    #[validate(range(min = 1, max = 5, message = "评分必须在1-5之间"))]
    pub rating: Option<i32>,
    pub category: Option<FeedbackCategory>,
}

impl UpdateFeedbackRequest {
    pub fn into_changes(self) -> FeedbackChanges {
        FeedbackChanges {
            status: self.status,
            message: self.message,
            rating: self.rating,
            category: self.category,
        }
    }
}

/// 列表查询参数（过滤 + 排序）
///
/// GET /api/feedback?category=course&status=pending&rating=5&sortBy=rating&sortOrder=asc
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQueryParams {
    pub category: Option<FeedbackCategory>,
    pub status: Option<FeedbackStatus>,
    pub rating: Option<i32>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl FeedbackQueryParams {
    pub fn filter(&self) -> FeedbackFilter {
        FeedbackFilter {
            category: self.category,
            status: self.status,
            rating: self.rating,
        }
    }
}

/// 分页查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    /// 实际生效的页码（0 或负数收敛为第一页）
    pub fn page_number(&self) -> i64 {
        self.page.max(1)
    }

    /// 计算数据库查询的 offset
    ///
    /// 先收敛页码再做乘法，极端页码（如 i64::MIN）下
    /// 饱和运算保证不溢出、offset 不为负
    pub fn offset(&self) -> i64 {
        self.page_number()
            .saturating_sub(1)
            .saturating_mul(self.limit())
    }

    /// 获取限制条数（最大100）
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, 100)
    }
}
