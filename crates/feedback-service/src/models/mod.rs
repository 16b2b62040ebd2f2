//! 领域模型定义

mod feedback;

pub use feedback::{
    Feedback, FeedbackCategory, FeedbackChanges, FeedbackFilter, FeedbackStats, FeedbackStatus,
    NewFeedback, SortField, SortOrder,
};
