//! 应用状态定义
//!
//! Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;

use crate::middleware::RateLimiter;
use crate::repository::FeedbackRepository;
use crate::service::FeedbackService;

/// Axum 应用共享状态
///
/// 业务服务和限流器通过 Arc 在 handler 间共享；
/// 连接池句柄在启动时显式注入，不走隐式单例
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FeedbackService<FeedbackRepository>>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(pool: PgPool, limiter: Arc<RateLimiter>) -> Self {
        let repo = Arc::new(FeedbackRepository::new(pool));
        Self {
            service: Arc::new(FeedbackService::new(repo)),
            limiter,
        }
    }
}
