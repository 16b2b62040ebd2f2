//! 响应 DTO 定义

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Feedback, FeedbackCategory, FeedbackStats, FeedbackStatus};

/// 反馈记录响应 DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDto {
    pub id: i64,
    pub name: String,
    pub message: String,
    pub rating: i32,
    pub category: FeedbackCategory,
    pub is_anonymous: bool,
    pub status: FeedbackStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackDto {
    fn from(record: Feedback) -> Self {
        Self {
            id: record.id,
            name: record.name,
            message: record.message,
            rating: record.rating,
            category: record.category,
            is_anonymous: record.is_anonymous,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

/// 分页响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        Self {
            items,
            total,
            page,
            page_size,
        }
    }
}

/// 聚合统计响应 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStatsDto {
    pub total_feedback: i64,
    pub average_rating: f64,
    pub categories: Vec<String>,
    pub statuses: Vec<String>,
}

impl From<FeedbackStats> for FeedbackStatsDto {
    fn from(stats: FeedbackStats) -> Self {
        Self {
            total_feedback: stats.total_feedback,
            average_rating: stats.average_rating,
            categories: stats.categories,
            statuses: stats.statuses,
        }
    }
}

/// 存活探针响应
///
/// 只反映进程存活，不检查数据库连通性：
/// 数据库故障时数据接口返回 500，但探针仍然是 OK
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK",
            message: "Student Feedback Tracker API is running",
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_feedback() -> Feedback {
        Feedback {
            id: 7,
            name: "Alice Johnson".into(),
            message: "Great course".into(),
            rating: 5,
            category: FeedbackCategory::Course,
            is_anonymous: false,
            status: FeedbackStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// 记录 JSON 形状是对外契约：
    /// `{id, name, message, rating, category, isAnonymous, status, createdAt}`
    #[test]
    fn test_feedback_dto_json_shape() {
        let dto = FeedbackDto::from(sample_feedback());
        let value = serde_json::to_value(&dto).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "category",
                "createdAt",
                "id",
                "isAnonymous",
                "message",
                "name",
                "rating",
                "status"
            ]
        );
        assert_eq!(value["category"], "course");
        assert_eq!(value["status"], "pending");
    }

    /// 列表响应形状：`{items, total, page, pageSize}`
    #[test]
    fn test_page_response_json_shape() {
        let page = PageResponse::new(vec![FeedbackDto::from(sample_feedback())], 42, 2, 20);
        let value = serde_json::to_value(&page).unwrap();

        assert_eq!(value["total"], 42);
        assert_eq!(value["page"], 2);
        assert_eq!(value["pageSize"], 20);
        assert_eq!(value["items"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_stats_dto_json_shape() {
        let dto = FeedbackStatsDto::from(FeedbackStats {
            total_feedback: 6,
            average_rating: 4.5,
            categories: vec!["course".into(), "facility".into()],
            statuses: vec!["pending".into()],
        });
        let value = serde_json::to_value(&dto).unwrap();

        assert_eq!(value["totalFeedback"], 6);
        assert_eq!(value["averageRating"], 4.5);
        assert_eq!(value["categories"].as_array().unwrap().len(), 2);
        assert_eq!(value["statuses"], serde_json::json!(["pending"]));
    }

    #[test]
    fn test_health_response() {
        let value = serde_json::to_value(HealthResponse::ok()).unwrap();
        assert_eq!(value["status"], "OK");
        assert!(value["timestamp"].as_str().is_some());
    }
}
