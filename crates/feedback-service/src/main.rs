//! 反馈收集服务入口
//!
//! 启动顺序：配置 -> 日志 -> 惰性连接池 -> 建表/启动填充 -> 路由 -> 监听。
//! 填充在监听之前完成，避免首个请求读到填充一半的存储。

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use feedback_service::middleware::RateLimiter;
use feedback_service::repository::FeedbackRepository;
use feedback_service::{routes, seed, state::AppState};
use feedback_shared::{config::AppConfig, database::Database, observability};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load("feedback-service").unwrap_or_default();

    observability::init(&config.observability)?;

    info!("Starting feedback-service on {}", config.server_addr());
    info!("Environment: {}", config.environment);

    // 惰性连接池：数据库不可达时服务照常启动，
    // 数据操作在连接恢复前返回 500，存活探针不受影响
    let db = Database::connect_lazy(&config.database)?;

    let repo = FeedbackRepository::new(db.pool().clone());
    match db.health_check().await {
        Ok(()) => {
            info!("Connected to PostgreSQL");
            if let Err(e) = repo.ensure_schema().await {
                warn!(error = %e, "Schema setup failed, data operations may fail");
            } else {
                seed::seed_on_startup(&repo).await;
            }
        }
        Err(e) => {
            error!(error = %e, "PostgreSQL unreachable at startup");
            warn!("Server will continue running but database operations will fail");
        }
    }

    let limiter = Arc::new(RateLimiter::new(&config.rate_limit));
    let state = AppState::new(db.pool().clone(), limiter);

    let cors = build_cors_layer(&config);

    let app = routes::app_router(state)
        .layer(cors)
        .layer(DefaultBodyLimit::max(config.http.body_limit_bytes))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());
    info!(
        "API Health Check: http://localhost:{}/api/health",
        config.server.port
    );

    // 优雅关闭：收到 SIGTERM 或 Ctrl+C 时停止接收新连接，
    // 等待已有请求处理完毕
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// 构建 CORS 层
///
/// 允许来源来自配置：开发环境默认本地前端地址，
/// 生产环境必须配置实际域名；通配符在生产环境给出警告
fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = &config.cors.allowed_origins;

    if origins.iter().any(|o| o == "*") {
        if config.is_production() {
            warn!("CORS allowed_origins \"*\" is unsafe in production, configure real domains");
        }
        info!("CORS allowed_origins: * (all origins)");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!("CORS allowed_origins: {}", origins.join(","));
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.trim().parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 监听关闭信号
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("注册 Ctrl+C 处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("注册 SIGTERM 处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
