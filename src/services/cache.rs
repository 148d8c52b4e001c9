//! Namespaced key-value cache with per-entry TTL.
//!
//! Backed by Redis when a URL is configured and reachable; otherwise (at
//! startup or whenever a backend call fails or times out) the store
//! transparently degrades to a process-local in-memory map with the same
//! TTL and glob semantics. Nothing survives a restart in fallback mode.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use redis::aio::ConnectionManager;
use redis::RedisResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};

/// TTL for cached per-symbol scan reports.
pub const TTL_SCAN_DATA: Duration = Duration::from_secs(3600);
/// TTL for accepted signals and their dedup records.
pub const TTL_SIGNAL: Duration = Duration::from_secs(24 * 3600);
/// TTL for order records.
pub const TTL_ORDER: Duration = Duration::from_secs(24 * 3600);

/// Bound on any single backend call.
const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(3);

/// Health status of the cache backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Healthy,
    Degraded,
}

/// Health report for the cache store.
#[derive(Debug, Clone, Serialize)]
pub struct CacheHealth {
    pub status: CacheStatus,
    pub connected: bool,
    pub fallback_active: bool,
    pub backend: &'static str,
}

struct FallbackEntry {
    json: String,
    expires_at: Instant,
}

/// Namespaced cache store handle, constructed once at process start and
/// injected into every component that needs it.
pub struct CacheStore {
    namespace: String,
    conn: Arc<RwLock<Option<ConnectionManager>>>,
    fallback: DashMap<String, FallbackEntry>,
    op_timeout: Duration,
}

impl CacheStore {
    /// Create a new store. A missing Redis URL is not an error: it selects
    /// fallback mode.
    pub async fn new(namespace: impl Into<String>, redis_url: Option<&str>) -> Self {
        let conn = match redis_url {
            Some(url) => match timeout(DEFAULT_OP_TIMEOUT, Self::connect(url)).await {
                Ok(Ok(c)) => {
                    info!("Connected to Redis at {}", url);
                    Some(c)
                }
                Ok(Err(e)) => {
                    warn!("Failed to connect to Redis: {}. Using in-memory fallback", e);
                    None
                }
                Err(_) => {
                    warn!("Redis connection timed out. Using in-memory fallback");
                    None
                }
            },
            None => {
                info!("No Redis URL configured, using in-memory fallback cache");
                None
            }
        };

        Self {
            namespace: namespace.into(),
            conn: Arc::new(RwLock::new(conn)),
            fallback: DashMap::new(),
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }

    async fn connect(redis_url: &str) -> RedisResult<ConnectionManager> {
        let client = redis::Client::open(redis_url)?;
        ConnectionManager::new(client).await
    }

    async fn connection(&self) -> Option<ConnectionManager> {
        self.conn.read().await.clone()
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    /// Get a value. Absent, expired and backend-unreachable all read as
    /// `None`; a payload that no longer deserializes is a reported error.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let full_key = self.make_key(key);

        if let Some(mut conn) = self.connection().await {
            let fetched = timeout(
                self.op_timeout,
                redis::cmd("GET")
                    .arg(&full_key)
                    .query_async::<_, Option<String>>(&mut conn),
            )
            .await;
            match fetched {
                Ok(Ok(Some(json))) => return deserialize_entry(key, &json).map(Some),
                Ok(Ok(None)) => return Ok(None),
                Ok(Err(e)) => warn!("Redis GET failed for {}: {}, using fallback", key, e),
                Err(_) => warn!("Redis GET timed out for {}, using fallback", key),
            }
        }

        let expired = match self.fallback.get(&full_key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return deserialize_entry(key, &entry.json).map(Some);
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.fallback.remove(&full_key);
        }
        Ok(None)
    }

    /// Set a value with a TTL. Serialization failure is a reported error;
    /// backend failure degrades to the in-memory map.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        let full_key = self.make_key(key);
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::Cache(format!("failed to serialize value for {}: {}", key, e)))?;

        if let Some(mut conn) = self.connection().await {
            let ttl_secs = ttl.as_secs().max(1);
            let stored = timeout(
                self.op_timeout,
                redis::cmd("SET")
                    .arg(&full_key)
                    .arg(&json)
                    .arg("EX")
                    .arg(ttl_secs)
                    .query_async::<_, ()>(&mut conn),
            )
            .await;
            match stored {
                Ok(Ok(())) => {
                    debug!("Cached {} (TTL {}s)", key, ttl_secs);
                    return Ok(());
                }
                Ok(Err(e)) => warn!("Redis SET failed for {}: {}, using fallback", key, e),
                Err(_) => warn!("Redis SET timed out for {}, using fallback", key),
            }
        }

        self.fallback.insert(
            full_key,
            FallbackEntry {
                json,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    /// Delete a key. Deleting an absent key is not an error.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let full_key = self.make_key(key);

        if let Some(mut conn) = self.connection().await {
            let deleted = timeout(
                self.op_timeout,
                redis::cmd("DEL")
                    .arg(&full_key)
                    .query_async::<_, i64>(&mut conn),
            )
            .await;
            match deleted {
                Ok(Ok(_)) => {
                    self.fallback.remove(&full_key);
                    return Ok(());
                }
                Ok(Err(e)) => warn!("Redis DEL failed for {}: {}, using fallback", key, e),
                Err(_) => warn!("Redis DEL timed out for {}, using fallback", key),
            }
        }

        self.fallback.remove(&full_key);
        Ok(())
    }

    /// Check whether a key exists and has not expired.
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let full_key = self.make_key(key);

        if let Some(mut conn) = self.connection().await {
            let found = timeout(
                self.op_timeout,
                redis::cmd("EXISTS")
                    .arg(&full_key)
                    .query_async::<_, bool>(&mut conn),
            )
            .await;
            match found {
                Ok(Ok(present)) => return Ok(present),
                Ok(Err(e)) => warn!("Redis EXISTS failed for {}: {}, using fallback", key, e),
                Err(_) => warn!("Redis EXISTS timed out for {}, using fallback", key),
            }
        }

        let expired = match self.fallback.get(&full_key) {
            Some(entry) if entry.expires_at > Instant::now() => return Ok(true),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.fallback.remove(&full_key);
        }
        Ok(false)
    }

    /// Delete every key matching the glob pattern (`*` and `?`), or the
    /// whole namespace when no pattern is given. Returns the number of
    /// entries removed. Not atomic across keys: a concurrent `set` on a
    /// matching key may or may not survive.
    pub async fn clear(&self, pattern: Option<&str>) -> Result<u64> {
        let search = self.make_key(pattern.unwrap_or("*"));
        let mut cleared = 0u64;

        if let Some(mut conn) = self.connection().await {
            let keys = timeout(
                self.op_timeout,
                redis::cmd("KEYS")
                    .arg(&search)
                    .query_async::<_, Vec<String>>(&mut conn),
            )
            .await;
            match keys {
                Ok(Ok(keys)) => {
                    if !keys.is_empty() {
                        let deleted = timeout(
                            self.op_timeout,
                            redis::cmd("DEL").arg(&keys).query_async::<_, i64>(&mut conn),
                        )
                        .await;
                        match deleted {
                            Ok(Ok(n)) => cleared += n as u64,
                            Ok(Err(e)) => warn!("Redis DEL failed during clear: {}", e),
                            Err(_) => warn!("Redis DEL timed out during clear"),
                        }
                    }
                }
                Ok(Err(e)) => warn!("Redis KEYS failed during clear: {}", e),
                Err(_) => warn!("Redis KEYS timed out during clear"),
            }
        }

        let mut removed = 0u64;
        self.fallback.retain(|key, _| {
            if glob_match(&search, key) {
                removed += 1;
                false
            } else {
                true
            }
        });
        cleared += removed;

        info!("Cleared {} cache entries matching {}", cleared, search);
        Ok(cleared)
    }

    /// Report backend health. `degraded` means the in-memory fallback is
    /// serving requests.
    pub async fn health(&self) -> CacheHealth {
        if let Some(mut conn) = self.connection().await {
            let pong = timeout(
                self.op_timeout,
                redis::cmd("PING").query_async::<_, String>(&mut conn),
            )
            .await;
            if matches!(pong, Ok(Ok(_))) {
                return CacheHealth {
                    status: CacheStatus::Healthy,
                    connected: true,
                    fallback_active: false,
                    backend: "redis",
                };
            }
            warn!("Redis PING failed, reporting degraded");
        }

        CacheHealth {
            status: CacheStatus::Degraded,
            connected: false,
            fallback_active: true,
            backend: "memory",
        }
    }
}

fn deserialize_entry<T: DeserializeOwned>(key: &str, json: &str) -> Result<T> {
    serde_json::from_str(json)
        .map_err(|e| AppError::Cache(format!("failed to deserialize cached value for {}: {}", key, e)))
}

/// Shell-glob matching over `*` (any run) and `?` (any one character),
/// the subset Redis `KEYS` patterns use here.
fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();

    let (mut pi, mut ti) = (0usize, 0usize);
    let mut star: Option<usize> = None;
    let mut mark = 0usize;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some(pi);
            mark = ti;
            pi += 1;
        } else if let Some(star_pos) = star {
            pi = star_pos + 1;
            mark += 1;
            ti = mark;
        } else {
            return false;
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        symbol: String,
        score: u8,
    }

    fn payload() -> Payload {
        Payload {
            symbol: "NSE:INFY".to_string(),
            score: 9,
        }
    }

    #[tokio::test]
    async fn test_fallback_roundtrip() {
        let cache = CacheStore::new("test", None).await;
        cache
            .set("scan:NSE:INFY", &payload(), Duration::from_secs(60))
            .await
            .unwrap();

        let got: Option<Payload> = cache.get("scan:NSE:INFY").await.unwrap();
        assert_eq!(got, Some(payload()));
        assert!(cache.exists("scan:NSE:INFY").await.unwrap());
    }

    #[tokio::test]
    async fn test_fallback_miss() {
        let cache = CacheStore::new("test", None).await;
        let got: Option<Payload> = cache.get("absent").await.unwrap();
        assert!(got.is_none());
        assert!(!cache.exists("absent").await.unwrap());
    }

    #[tokio::test]
    async fn test_fallback_ttl_expiry() {
        let cache = CacheStore::new("test", None).await;
        cache
            .set("ephemeral", &payload(), Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        let got: Option<Payload> = cache.get("ephemeral").await.unwrap();
        assert!(got.is_none());
        assert!(!cache.exists("ephemeral").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = CacheStore::new("test", None).await;
        cache
            .set("key", &payload(), Duration::from_secs(60))
            .await
            .unwrap();
        cache.delete("key").await.unwrap();
        assert!(!cache.exists("key").await.unwrap());
        // deleting again is a no-op
        cache.delete("key").await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_with_pattern() {
        let cache = CacheStore::new("test", None).await;
        let ttl = Duration::from_secs(60);
        cache.set("scan:NSE:INFY", &payload(), ttl).await.unwrap();
        cache.set("scan:NSE:TCS", &payload(), ttl).await.unwrap();
        cache.set("signal:NSE:INFY", &payload(), ttl).await.unwrap();

        let cleared = cache.clear(Some("scan:*")).await.unwrap();
        assert_eq!(cleared, 2);
        assert!(!cache.exists("scan:NSE:INFY").await.unwrap());
        assert!(cache.exists("signal:NSE:INFY").await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_whole_namespace() {
        let cache = CacheStore::new("test", None).await;
        let ttl = Duration::from_secs(60);
        cache.set("a", &payload(), ttl).await.unwrap();
        cache.set("b", &payload(), ttl).await.unwrap();

        let cleared = cache.clear(None).await.unwrap();
        assert_eq!(cleared, 2);
    }

    #[tokio::test]
    async fn test_health_degraded_without_backend() {
        let cache = CacheStore::new("test", None).await;
        let health = cache.health().await;
        assert_eq!(health.status, CacheStatus::Degraded);
        assert!(!health.connected);
        assert!(health.fallback_active);
        assert_eq!(health.backend, "memory");
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let cache = CacheStore::new("test", None).await;
        let ttl = Duration::from_secs(60);
        cache.set("key", &payload(), ttl).await.unwrap();
        let second = Payload {
            symbol: "NSE:TCS".to_string(),
            score: 4,
        };
        cache.set("key", &second, ttl).await.unwrap();

        let got: Option<Payload> = cache.get("key").await.unwrap();
        assert_eq!(got, Some(second));
    }

    #[test]
    fn test_glob_match() {
        assert!(glob_match("vigil:scan:*", "vigil:scan:NSE:INFY"));
        assert!(glob_match("vigil:*", "vigil:signal:x"));
        assert!(glob_match("vigil:scan:NSE:????", "vigil:scan:NSE:INFY"));
        assert!(!glob_match("vigil:scan:*", "vigil:signal:NSE:INFY"));
        assert!(!glob_match("vigil:scan:NSE:?", "vigil:scan:NSE:INFY"));
        assert!(glob_match("*", "anything"));
        assert!(glob_match("a*b*c", "axxbyyc"));
        assert!(!glob_match("a*b*c", "axxbyy"));
    }
}
