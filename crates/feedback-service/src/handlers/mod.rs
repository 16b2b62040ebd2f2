//! REST API 处理器

pub mod feedback;
pub mod health;
