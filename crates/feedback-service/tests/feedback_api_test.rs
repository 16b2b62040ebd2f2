//! 反馈 API 集成测试
//!
//! 使用真实 PostgreSQL 验证完整的 CRUD、分页、统计与种子流程。
//! 部分用例会清空 feedback 表，必须串行运行：
//!
//! ```bash
//! DATABASE_URL=postgres://... \
//!   cargo test --test feedback_api_test -- --ignored --test-threads=1
//! ```

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use feedback_service::middleware::RateLimiter;
use feedback_service::repository::{FeedbackRepository, FeedbackRepositoryTrait};
use feedback_service::routes::app_router;
use feedback_service::seed;
use feedback_service::state::AppState;
use feedback_shared::config::{DatabaseConfig, RateLimitConfig};
use feedback_shared::database::Database;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

// ==================== 辅助函数 ====================

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests")
}

/// 建立连接、确保表结构，返回路由和裸仓储
async fn setup() -> (Router, FeedbackRepository) {
    let config = DatabaseConfig {
        url: database_url(),
        max_connections: 5,
        ..Default::default()
    };
    let db = Database::connect(&config).await.expect("数据库连接失败");
    let repo = FeedbackRepository::new(db.pool().clone());
    repo.ensure_schema().await.expect("建表失败");

    let limiter = Arc::new(RateLimiter::new(&RateLimitConfig {
        // 配额放大，避免测试自身触发限流
        window_secs: 900,
        max_requests: 100_000,
    }));
    let state = AppState::new(db.pool().clone(), limiter);
    (app_router(state), repo)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("响应体不是合法 JSON")
}

fn valid_feedback_body() -> Value {
    json!({
        "name": "Integration Tester",
        "message": "End to end feedback flow works.",
        "rating": 4,
        "category": "general"
    })
}

// ==================== CRUD 流程 ====================

/// 创建 -> 读取 -> 更新状态 -> 删除 -> 重复删除 的完整生命周期
#[tokio::test]
#[ignore] // 需要数据库连接
async fn feedback_crud_lifecycle() {
    let (router, _repo) = setup().await;

    // 创建：201 + 完整记录
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/feedback", valid_feedback_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    assert_eq!(created["name"], "Integration Tester");
    assert_eq!(created["rating"], 4);
    assert_eq!(created["category"], "general");
    assert_eq!(created["status"], "pending");
    assert_eq!(created["isAnonymous"], false);
    assert!(created["createdAt"].as_str().is_some());
    let id = created["id"].as_i64().expect("缺少 id");

    // 读取：返回创建时的记录
    let response = router
        .clone()
        .oneshot(get_request(&format!("/api/feedback/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = read_json(response).await;
    assert_eq!(fetched, created);

    // 更新状态：pending -> reviewed
    let response = router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/feedback/{id}"),
            json!({"status": "reviewed"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["status"], "reviewed");
    assert_eq!(updated["id"], id);

    // 删除：204
    let response = router
        .clone()
        .oneshot(delete_request(&format!("/api/feedback/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // 删除后读取：404
    let response = router
        .clone()
        .oneshot(get_request(&format!("/api/feedback/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // 幂等删除：第二次同样 404 而不是报错
    let response = router
        .oneshot(delete_request(&format!("/api/feedback/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// 不存在的数字 id 返回 404
#[tokio::test]
#[ignore] // 需要数据库连接
async fn missing_id_returns_404() {
    let (router, _repo) = setup().await;

    let response = router
        .clone()
        .oneshot(get_request("/api/feedback/999999999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(json_request(
            "PATCH",
            "/api/feedback/999999999",
            json!({"status": "resolved"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// 非法输入返回 400 且存储不被污染
#[tokio::test]
#[ignore] // 需要数据库连接
async fn invalid_input_does_not_mutate_store() {
    let (router, repo) = setup().await;
    let before = repo.count(&Default::default()).await.unwrap();

    for body in [
        {
            let mut body = valid_feedback_body();
            body["rating"] = json!(0);
            body
        },
        {
            let mut body = valid_feedback_body();
            body["rating"] = json!(6);
            body
        },
        {
            let mut body = valid_feedback_body();
            body["category"] = json!("complaint");
            body
        },
        json!({"name": "No Message", "rating": 3, "category": "course"}),
    ] {
        let response = router
            .clone()
            .oneshot(json_request("POST", "/api/feedback", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let after = repo.count(&Default::default()).await.unwrap();
    assert_eq!(before, after, "校验失败的请求不应写入存储");
}

/// 匿名提交（未提供姓名）展示名为 Anonymous
#[tokio::test]
#[ignore] // 需要数据库连接
async fn anonymous_submission_displays_anonymous_name() {
    let (router, _repo) = setup().await;

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/feedback",
            json!({
                "message": "Prefer to stay unnamed.",
                "rating": 3,
                "category": "suggestion",
                "isAnonymous": true
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    assert_eq!(created["name"], "Anonymous");
    assert_eq!(created["isAnonymous"], true);
}

// ==================== 分页、过滤与统计 ====================

/// 分页结果两两不相交，并集等于过滤后的全集
#[tokio::test]
#[ignore] // 需要数据库连接，会清空 feedback 表
async fn pagination_pages_are_disjoint_and_cover_the_set() {
    let (router, repo) = setup().await;
    repo.delete_all().await.unwrap();
    repo.insert_many(&seed::sample_feedback()).await.unwrap();

    let mut seen = std::collections::HashSet::new();
    let mut total = 0;
    for page in 1..=3 {
        let response = router
            .clone()
            .oneshot(get_request(&format!(
                "/api/feedback?page={page}&pageSize=2"
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["total"], 6);
        assert_eq!(body["page"], page);
        assert_eq!(body["pageSize"], 2);

        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        for item in items {
            let id = item["id"].as_i64().unwrap();
            assert!(seen.insert(id), "分页结果出现重复 id: {id}");
            total += 1;
        }
    }
    assert_eq!(total, 6, "三页并集应覆盖全部 6 条记录");
}

/// 过滤与排序：按分类过滤、按评分升序
#[tokio::test]
#[ignore] // 需要数据库连接，会清空 feedback 表
async fn list_supports_filter_and_sort() {
    let (router, repo) = setup().await;
    repo.delete_all().await.unwrap();
    repo.insert_many(&seed::sample_feedback()).await.unwrap();

    // 样本集中 course 分类有 2 条
    let response = router
        .clone()
        .oneshot(get_request("/api/feedback?category=course"))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["total"], 2);
    for item in body["items"].as_array().unwrap() {
        assert_eq!(item["category"], "course");
    }

    // 按评分升序
    let response = router
        .oneshot(get_request("/api/feedback?sortBy=rating&sortOrder=asc"))
        .await
        .unwrap();
    let body = read_json(response).await;
    let ratings: Vec<i64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["rating"].as_i64().unwrap())
        .collect();
    let mut sorted = ratings.clone();
    sorted.sort_unstable();
    assert_eq!(ratings, sorted, "评分应为升序");
}

/// 样本集评分 [5,4,5,4,5,4]：平均 4.5，总数 6
#[tokio::test]
#[ignore] // 需要数据库连接，会清空 feedback 表
async fn stats_reflect_seeded_sample_set() {
    let (router, repo) = setup().await;
    repo.delete_all().await.unwrap();
    repo.insert_many(&seed::sample_feedback()).await.unwrap();

    let response = router
        .oneshot(get_request("/api/feedback/stats"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats = read_json(response).await;

    assert_eq!(stats["totalFeedback"], 6);
    assert_eq!(stats["averageRating"], 4.5);

    let categories: Vec<&str> = stats["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(categories.len(), 5, "样本集覆盖全部 5 个分类");
    let statuses = stats["statuses"].as_array().unwrap();
    assert_eq!(statuses.len(), 3, "样本集覆盖全部 3 个状态");
}

// ==================== 种子流程 ====================

/// 启动填充幂等：空库插入 3 条，再次调用不改变计数
#[tokio::test]
#[ignore] // 需要数据库连接，会清空 feedback 表
async fn startup_seeding_is_idempotent() {
    let (_router, repo) = setup().await;
    repo.delete_all().await.unwrap();

    let inserted = seed::seed_if_empty(&repo).await.unwrap();
    assert_eq!(inserted, seed::STARTUP_SAMPLE_COUNT);
    let count = repo.count(&Default::default()).await.unwrap();
    assert_eq!(count as usize, seed::STARTUP_SAMPLE_COUNT);

    // 第二次调用：已有数据，不做任何事
    let inserted = seed::seed_if_empty(&repo).await.unwrap();
    assert_eq!(inserted, 0);
    let count_after = repo.count(&Default::default()).await.unwrap();
    assert_eq!(count, count_after);
}

/// 重置式种子：无论现状如何，结果总是完整样本集
#[tokio::test]
#[ignore] // 需要数据库连接，会清空 feedback 表
async fn reset_seeding_always_yields_full_sample_set() {
    let (_router, repo) = setup().await;

    for _ in 0..2 {
        repo.delete_all().await.unwrap();
        let inserted = repo.insert_many(&seed::sample_feedback()).await.unwrap();
        assert_eq!(inserted.len(), 6);
        let count = repo.count(&Default::default()).await.unwrap();
        assert_eq!(count, 6);
    }
}
