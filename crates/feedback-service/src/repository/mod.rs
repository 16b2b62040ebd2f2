//! 数据访问层
//!
//! 反馈记录的持久化存储，基于 PostgreSQL

mod feedback_repo;
mod traits;

pub use feedback_repo::FeedbackRepository;
pub use traits::FeedbackRepositoryTrait;

#[cfg(test)]
pub use traits::MockFeedbackRepositoryTrait;
