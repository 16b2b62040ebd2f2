//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射和未匹配路由的 404 响应

use axum::{
    Json, Router, middleware,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::{handlers, middleware::rate_limit_middleware, state::AppState};

/// 构建完整应用路由
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

/// /api 下的业务路由
///
/// /feedback/stats 必须在 /feedback/{id} 之前可匹配，
/// axum 的静态段优先级天然保证这一点
fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/feedback",
            get(handlers::feedback::list_feedback).post(handlers::feedback::create_feedback),
        )
        .route("/feedback/stats", get(handlers::feedback::get_stats))
        .route(
            "/feedback/{id}",
            get(handlers::feedback::get_feedback)
                .patch(handlers::feedback::update_feedback)
                .delete(handlers::feedback::delete_feedback),
        )
        .route("/health", get(handlers::health::health_check))
}

/// 未匹配路由统一返回结构化 404
async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "message": format!("Cannot {} {}", method, uri.path()),
        })),
    )
}
