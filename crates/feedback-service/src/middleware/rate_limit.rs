//! 限流中间件
//!
//! 基于固定窗口计数器的按客户端 IP 限流，默认 15 分钟 100 次请求。
//! 计数器保存在进程内（DashMap），单实例部署场景下等价于
//! 边界上的无状态 per-IP 计数；健康检查端点豁免。

use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use serde_json::json;
use tracing::warn;

use feedback_shared::config::RateLimitConfig;

use crate::state::AppState;

/// 固定窗口限流器
///
/// 每个 IP 只保留当前窗口的计数，窗口翻转时清理过期条目，
/// 内存占用与当前窗口的活跃 IP 数成正比。IP 可能来自伪造的
/// X-Forwarded-For，不清理会被唯一 IP 刷爆内存
pub struct RateLimiter {
    max_requests: i64,
    window_secs: u64,
    /// 最近一次观察到的窗口序号，用于触发过期清理
    current_window: AtomicU64,
    /// ip -> (窗口序号, 窗口内请求数)
    counters: DashMap<IpAddr, (u64, i64)>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window_secs: config.window_secs.max(1),
            current_window: AtomicU64::new(0),
            counters: DashMap::new(),
        }
    }

    /// 记录一次请求，返回是否放行
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.check_at(ip, now)
    }

    /// 在给定时间点记录一次请求（时间注入便于测试窗口翻转）
    fn check_at(&self, ip: IpAddr, now_secs: u64) -> bool {
        let window = now_secs / self.window_secs;

        // 窗口推进时一次性清掉所有过期条目
        let previous = self.current_window.swap(window, Ordering::AcqRel);
        if previous != window {
            self.counters.retain(|_, (w, _)| *w == window);
        }

        let mut entry = self.counters.entry(ip).or_insert((window, 0));
        if entry.0 != window {
            // 清理与计数之间翻转的竞态兜底，就地重置
            *entry = (window, 0);
        }
        entry.1 += 1;
        entry.1 <= self.max_requests
    }

    /// 当前持有计数的 IP 数量
    #[cfg(test)]
    fn tracked_ips(&self) -> usize {
        self.counters.len()
    }
}

/// 限流中间件
///
/// 客户端 IP 优先取 X-Forwarded-For 首跳（反向代理场景），
/// 否则取 TCP 对端地址；两者都缺失时放行（无法归因）
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // 存活探针豁免限流
    if request.uri().path() == "/api/health" {
        return next.run(request).await;
    }

    let Some(ip) = client_ip(&request) else {
        return next.run(request).await;
    };

    if !state.limiter.check(ip) {
        warn!(client_ip = %ip, path = %request.uri().path(), "Rate limit exceeded");
        return too_many_requests_response();
    }

    next.run(request).await
}

fn client_ip(request: &Request<Body>) -> Option<IpAddr> {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse::<IpAddr>().ok());

    forwarded.or_else(|| {
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip())
    })
}

fn too_many_requests_response() -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        axum::Json(json!({
            "error": "Too many requests",
            "message": "Too many requests from this IP, please try again later.",
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: i64, window_secs: u64) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            max_requests,
            window_secs,
        })
    }

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([127, 0, 0, last])
    }

    #[test]
    fn test_allows_up_to_max_then_blocks() {
        let limiter = limiter(3, 900);
        for _ in 0..3 {
            assert!(limiter.check_at(ip(1), 1000));
        }
        assert!(!limiter.check_at(ip(1), 1000));
        assert!(!limiter.check_at(ip(1), 1001));
    }

    /// 不同 IP 独立计数
    #[test]
    fn test_counters_are_per_ip() {
        let limiter = limiter(1, 900);
        assert!(limiter.check_at(ip(1), 1000));
        assert!(limiter.check_at(ip(2), 1000));
        assert!(!limiter.check_at(ip(1), 1000));
    }

    /// 窗口翻转后配额重置
    #[test]
    fn test_window_rollover_resets_quota() {
        let limiter = limiter(1, 60);
        assert!(limiter.check_at(ip(1), 100));
        assert!(!limiter.check_at(ip(1), 119));
        // 下一个 60 秒窗口
        assert!(limiter.check_at(ip(1), 120));
    }

    /// 窗口翻转时过期条目被清理：
    /// 伪造大量唯一 IP 不能让计数表无限增长
    #[test]
    fn test_stale_entries_evicted_on_rollover() {
        let limiter = limiter(5, 60);
        for last in 1..=200u8 {
            limiter.check_at(ip(last), 100);
        }
        assert_eq!(limiter.tracked_ips(), 200);

        // 下一个窗口的首个请求触发清理
        assert!(limiter.check_at(ip(1), 160));
        assert_eq!(limiter.tracked_ips(), 1);
    }
}
