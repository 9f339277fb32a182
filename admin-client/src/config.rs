//! Client configuration

use std::path::PathBuf;

/// Admin client configuration
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | ADMIN_API_URL | http://localhost:8080 | REST 后端地址 |
/// | ADMIN_API_TOKEN | - | 预置 Bearer token |
/// | REQUEST_TIMEOUT_SECS | 30 | 请求超时(秒) |
/// | ACTIVITY_LOG_BUFFER | 256 | 活动日志通道容量 |
/// | SESSION_DIR | - | 登录状态持久化目录（不设置则仅内存） |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志文件目录 |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Capacity of the activity log channel
    pub activity_buffer: usize,

    /// Directory holding `session.json`; in-memory session when `None`
    pub session_dir: Option<PathBuf>,

    /// Log level filter (overridden by `RUST_LOG`)
    pub log_level: String,

    /// Directory for rolling log files
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration with defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            activity_buffer: 256,
            session_dir: None,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }

    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("ADMIN_API_URL").unwrap_or_else(|_| "http://localhost:8080".into()),
        );
        config.token = std::env::var("ADMIN_API_TOKEN").ok().filter(|t| !t.is_empty());
        config.timeout = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        config.activity_buffer = std::env::var("ACTIVITY_LOG_BUFFER")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(256);
        config.session_dir = std::env::var("SESSION_DIR").ok().map(PathBuf::from);
        config.log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
        config.log_dir = std::env::var("LOG_DIR").ok().map(PathBuf::from);
        config
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the activity log channel capacity (minimum 1)
    pub fn with_activity_buffer(mut self, capacity: usize) -> Self {
        self.activity_buffer = capacity.max(1);
        self
    }

    /// Persist login state under `dir`
    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = Some(dir.into());
        self
    }

    /// Set log level and optional log directory
    pub fn with_logging(mut self, level: impl Into<String>, dir: Option<PathBuf>) -> Self {
        self.log_level = level.into();
        self.log_dir = dir;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
