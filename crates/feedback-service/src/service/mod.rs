//! 业务服务层

mod feedback_service;

pub use feedback_service::{ANONYMOUS_NAME, FeedbackService, display_name};
