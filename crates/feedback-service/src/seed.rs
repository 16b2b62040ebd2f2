//! 种子数据模块
//!
//! 固定的演示样本集，以及服务启动时的非破坏性填充逻辑。
//! 独立重置脚本见 examples/seed_data.rs。

use tracing::{info, warn};

use crate::error::Result;
use crate::models::{FeedbackCategory, FeedbackStatus, NewFeedback};
use crate::repository::FeedbackRepositoryTrait;

/// 启动填充使用的样本数量（样本集的前三条）
pub const STARTUP_SAMPLE_COUNT: usize = 3;

/// 固定样本集
///
/// 评分序列 [5,4,5,4,5,4]，平均分恰为 4.5，便于演示统计接口
pub fn sample_feedback() -> Vec<NewFeedback> {
    vec![
        NewFeedback {
            name: "Alice Johnson".to_string(),
            message: "The course content is excellent and very well structured. The instructors \
                      are knowledgeable and always ready to help. I particularly enjoyed the \
                      hands-on projects that helped me apply what I learned in real-world \
                      scenarios."
                .to_string(),
            rating: 5,
            category: FeedbackCategory::Course,
            is_anonymous: false,
            status: FeedbackStatus::Reviewed,
        },
        NewFeedback {
            name: "Bob Smith".to_string(),
            message: "Great learning environment! The facilities are modern and well-maintained. \
                      The library has all the resources I need for my studies. However, I think \
                      the cafeteria could use some improvement in terms of food variety."
                .to_string(),
            rating: 4,
            category: FeedbackCategory::Facility,
            is_anonymous: false,
            status: FeedbackStatus::Pending,
        },
        NewFeedback {
            name: "Anonymous".to_string(),
            message: "Professor Martinez is an amazing instructor. Her teaching style is engaging \
                      and she makes complex topics easy to understand. She always encourages \
                      questions and provides detailed explanations. Highly recommend her classes!"
                .to_string(),
            rating: 5,
            category: FeedbackCategory::Instructor,
            is_anonymous: true,
            status: FeedbackStatus::Resolved,
        },
        NewFeedback {
            name: "Carol Davis".to_string(),
            message: "I suggest adding more practical workshops and industry guest speakers. It \
                      would be great to have more networking opportunities with professionals in \
                      our field. Overall, the program is good but could benefit from more \
                      real-world connections."
                .to_string(),
            rating: 4,
            category: FeedbackCategory::Suggestion,
            is_anonymous: false,
            status: FeedbackStatus::Pending,
        },
        NewFeedback {
            name: "David Wilson".to_string(),
            message: "The online learning platform is user-friendly and the course materials are \
                      well-organized. I appreciate the flexibility of being able to access \
                      lectures anytime. The discussion forums are also very helpful for peer \
                      interaction."
                .to_string(),
            rating: 5,
            category: FeedbackCategory::General,
            is_anonymous: false,
            status: FeedbackStatus::Reviewed,
        },
        NewFeedback {
            name: "Anonymous".to_string(),
            message: "The assessment methods are fair and comprehensive. I like how the \
                      assignments are designed to test both theoretical knowledge and practical \
                      application. The feedback from instructors is always constructive and \
                      helpful."
                .to_string(),
            rating: 4,
            category: FeedbackCategory::Course,
            is_anonymous: true,
            status: FeedbackStatus::Resolved,
        },
    ]
}

/// 启动时的非破坏性填充
///
/// 仅当存储为空时插入样本集的前三条；已有数据时什么都不做。
/// 与重置脚本的不对称是刻意的：脚本是重置工具，启动填充绝不删数据。
/// 返回实际插入的条数。
pub async fn seed_if_empty<R: FeedbackRepositoryTrait>(repo: &R) -> Result<usize> {
    let existing = repo.count(&Default::default()).await?;
    if existing > 0 {
        info!(count = existing, "Database already contains feedback entries");
        return Ok(0);
    }

    info!("Database is empty, adding sample feedback...");
    let samples = sample_feedback();
    let inserted = repo.insert_many(&samples[..STARTUP_SAMPLE_COUNT]).await?;
    info!(count = inserted.len(), "Added sample feedback entries");
    Ok(inserted.len())
}

/// 启动填充的外层封装：失败只告警，不阻断服务启动
pub async fn seed_on_startup<R: FeedbackRepositoryTrait>(repo: &R) {
    if let Err(e) = seed_if_empty(repo).await {
        warn!(error = %e, "Could not seed database");
    }
}
