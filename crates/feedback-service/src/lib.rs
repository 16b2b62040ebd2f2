//! 反馈收集服务
//!
//! 提供反馈记录的提交、查询、状态管理与聚合统计 REST API，
//! 以及演示数据的种子填充。

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;

pub use error::{ApiError, Result};
pub use models::{Feedback, FeedbackCategory, FeedbackStatus};
