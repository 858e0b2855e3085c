use crate::error::{ProbeError, Result};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

const BASE_URL_VAR: &str = "GRID_PROBE_BASE_URL";
const TIMEOUT_VAR: &str = "GRID_PROBE_TIMEOUT_SECS";
const STRICT_EXIT_VAR: &str = "GRID_PROBE_STRICT_EXIT";

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// 不带结尾 `/`
    pub base_url: String,
    /// None 时使用 HTTP 客户端默认值
    pub timeout: Option<Duration>,
    /// 出错时以非零状态码退出
    pub strict_exit: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            strict_exit: false,
        }
    }
}

impl ProbeConfig {
    /// 从环境变量读取（调用前先加载 .env）
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    ProbeError::Config(format!("{} 不是有效的秒数: {}", TIMEOUT_VAR, raw))
                })?;
                if secs == 0 {
                    return Err(ProbeError::Config(format!("{} 必须大于 0", TIMEOUT_VAR)));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let strict_exit = lookup(STRICT_EXIT_VAR)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);

        Ok(Self {
            base_url,
            timeout,
            strict_exit,
        })
    }

    pub fn grid_url(&self) -> String {
        format!("{}/market/grid", self.base_url)
    }
}
