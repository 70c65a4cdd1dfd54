//! Fixed-window request limits keyed by client address.
//!
//! `MemoryRateLimiter` is per-process. `RedisRateLimiter` shares counters across
//! replicas and restarts. Backend failures never block a request.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use redis::aio::MultiplexedConnection;
use thiserror::Error;
use tokio::sync::{Mutex, OnceCell};
use tokio::time::Instant;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

const FIFTEEN_MINUTES: Duration = Duration::from_secs(15 * 60);

// Expired windows are swept once the map grows past this many keys.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePolicy {
    pub name: &'static str,
    pub limit: u64,
    pub window: Duration,
    pub message: &'static str,
}

impl RatePolicy {
    pub const GLOBAL: RatePolicy = RatePolicy {
        name: "global",
        limit: 100,
        window: FIFTEEN_MINUTES,
        message: "Too many requests from this IP, please try again later.",
    };

    pub const CONTACT: RatePolicy = RatePolicy {
        name: "contact",
        limit: 5,
        window: FIFTEEN_MINUTES,
        message: "Too many contact form submissions, please try again later.",
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u64 },
    Limited { retry_after: Duration },
}

#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

#[async_trait]
pub trait RateLimiter: Send + Sync {
    fn policy(&self) -> RatePolicy;

    /// Counts one request for `key` and decides whether it may proceed.
    async fn check(&self, key: &str) -> Result<RateDecision, RateLimitError>;
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u64,
}

pub struct MemoryRateLimiter {
    policy: RatePolicy,
    windows: Mutex<HashMap<String, Window>>,
}

impl MemoryRateLimiter {
    pub fn new(policy: RatePolicy) -> Self {
        Self {
            policy,
            windows: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RateLimiter for MemoryRateLimiter {
    fn policy(&self) -> RatePolicy {
        self.policy
    }

    async fn check(&self, key: &str) -> Result<RateDecision, RateLimitError> {
        let now = Instant::now();
        let window_len = self.policy.window;
        let mut windows = self.windows.lock().await;

        if windows.len() > SWEEP_THRESHOLD {
            windows.retain(|_, w| now.duration_since(w.started) < window_len);
        }

        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(window.started) >= window_len {
            *window = Window {
                started: now,
                count: 0,
            };
        }
        window.count += 1;

        Ok(decide(
            &self.policy,
            window.count,
            window_len.saturating_sub(now.duration_since(window.started)),
        ))
    }
}

pub struct RedisRateLimiter {
    client: redis::Client,
    connection: OnceCell<MultiplexedConnection>,
    policy: RatePolicy,
}

impl RedisRateLimiter {
    pub fn new(client: redis::Client, policy: RatePolicy) -> Self {
        Self {
            client,
            connection: OnceCell::new(),
            policy,
        }
    }

    async fn connection(&self) -> Result<MultiplexedConnection, RateLimitError> {
        let conn = self
            .connection
            .get_or_try_init(|| self.client.get_multiplexed_async_connection())
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    fn policy(&self) -> RatePolicy {
        self.policy
    }

    async fn check(&self, key: &str) -> Result<RateDecision, RateLimitError> {
        let mut conn = self.connection().await?;
        let redis_key = format!("folio:ratelimit:{}:{}", self.policy.name, key);

        // The window starts with the first request: SET NX only succeeds then.
        let (count, ttl): (u64, i64) = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&redis_key)
            .arg(0)
            .arg("NX")
            .arg("EX")
            .arg(self.policy.window.as_secs())
            .ignore()
            .cmd("INCR")
            .arg(&redis_key)
            .cmd("TTL")
            .arg(&redis_key)
            .query_async(&mut conn)
            .await?;

        Ok(decide(
            &self.policy,
            count,
            Duration::from_secs(ttl.max(0) as u64),
        ))
    }
}

fn decide(policy: &RatePolicy, count: u64, remaining_window: Duration) -> RateDecision {
    if count > policy.limit {
        RateDecision::Limited {
            retry_after: remaining_window,
        }
    } else {
        RateDecision::Allowed {
            remaining: policy.limit - count,
        }
    }
}

/// Rejects the request with 429 once `key` is over the limit. Backend errors
/// are logged and the request is allowed.
pub async fn enforce(limiter: &dyn RateLimiter, key: &str) -> Result<(), AppError> {
    match limiter.check(key).await {
        Ok(RateDecision::Allowed { .. }) => Ok(()),
        Ok(RateDecision::Limited { retry_after }) => {
            warn!(
                "Rate limit '{}' hit for {key}, retry after {}s",
                limiter.policy().name,
                retry_after.as_secs()
            );
            Err(AppError::RateLimited(limiter.policy().message.to_string()))
        }
        Err(e) => {
            warn!("Rate limiter '{}' unavailable: {e}", limiter.policy().name);
            Ok(())
        }
    }
}

/// Client address used as the rate-limit key. With `trust_proxy`, the first
/// `X-Forwarded-For` hop wins over the socket address.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }
    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware applying the global limit to every request.
pub async fn global_rate_limit(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = client_key(
        request.headers(),
        peer.map(|ConnectInfo(addr)| addr),
        state.config.trust_proxy,
    );
    enforce(state.global_limiter.as_ref(), &key).await?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIGHT: RatePolicy = RatePolicy {
        name: "test",
        limit: 2,
        window: Duration::from_secs(60),
        message: "slow down",
    };

    #[tokio::test]
    async fn test_memory_limiter_blocks_after_limit() {
        tokio::time::pause();
        let limiter = MemoryRateLimiter::new(TIGHT);

        assert_eq!(
            limiter.check("1.2.3.4").await.unwrap(),
            RateDecision::Allowed { remaining: 1 }
        );
        assert_eq!(
            limiter.check("1.2.3.4").await.unwrap(),
            RateDecision::Allowed { remaining: 0 }
        );
        assert!(matches!(
            limiter.check("1.2.3.4").await.unwrap(),
            RateDecision::Limited { .. }
        ));
    }

    #[tokio::test]
    async fn test_memory_limiter_keys_are_independent() {
        tokio::time::pause();
        let limiter = MemoryRateLimiter::new(TIGHT);
        for _ in 0..3 {
            limiter.check("a").await.unwrap();
        }
        assert_eq!(
            limiter.check("b").await.unwrap(),
            RateDecision::Allowed { remaining: 1 }
        );
    }

    #[tokio::test]
    async fn test_memory_limiter_window_resets() {
        tokio::time::pause();
        let limiter = MemoryRateLimiter::new(TIGHT);
        for _ in 0..3 {
            limiter.check("a").await.unwrap();
        }
        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(
            limiter.check("a").await.unwrap(),
            RateDecision::Allowed { remaining: 1 }
        );
    }

    #[tokio::test]
    async fn test_enforce_maps_limit_to_app_error() {
        tokio::time::pause();
        let limiter = MemoryRateLimiter::new(TIGHT);
        assert!(enforce(&limiter, "k").await.is_ok());
        assert!(enforce(&limiter, "k").await.is_ok());
        match enforce(&limiter, "k").await {
            Err(AppError::RateLimited(msg)) => assert_eq!(msg, "slow down"),
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_enforce_fails_open_when_backend_down() {
        let client = redis::Client::open("redis://127.0.0.1:1/").unwrap();
        let limiter = RedisRateLimiter::new(client, TIGHT);
        assert!(enforce(&limiter, "k").await.is_ok());
    }

    #[test]
    fn test_client_key_prefers_forwarded_when_trusted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        let peer: SocketAddr = "10.0.0.1:5555".parse().unwrap();

        assert_eq!(client_key(&headers, Some(peer), true), "203.0.113.7");
        assert_eq!(client_key(&headers, Some(peer), false), "10.0.0.1");
        assert_eq!(client_key(&HeaderMap::new(), None, true), "unknown");
    }
}
