//! 存活探针处理器

use axum::Json;

use crate::dto::HealthResponse;

/// 存活探针：进程活着即返回 OK
///
/// GET /api/health
///
/// 刻意不检查数据库连通性：数据库故障时数据接口降级为 500，
/// 但进程本身健康，探针保持 200
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
