use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Redis URL for persistent caching. Absent is not an error: it
    /// selects the in-memory fallback cache.
    pub redis_url: Option<String>,
    /// Namespace prefix for all cache keys.
    pub cache_namespace: String,
    /// Default candle interval for scans.
    pub default_interval: String,
    /// Default number of bars fetched per symbol.
    pub default_bars: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            redis_url: env::var("REDIS_URL").ok(),
            cache_namespace: env::var("CACHE_NAMESPACE").unwrap_or_else(|_| "vigil".to_string()),
            default_interval: env::var("SCAN_INTERVAL").unwrap_or_else(|_| "1d".to_string()),
            default_bars: env::var("SCAN_BARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
