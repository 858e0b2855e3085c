use crate::config::ProbeConfig;
use crate::error::Result;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;

/// 一次网格请求的原始结果
#[derive(Debug, Clone)]
pub struct GridResponse {
    /// HTTP 状态码
    pub status: u16,
    /// 原始响应体，保留字段顺序用于完整输出
    pub body: Value,
}

#[async_trait]
pub trait GridSource: Send + Sync {
    /// 获取一次网格快照
    async fn fetch_grid(&self) -> Result<GridResponse>;
}

pub struct GridClient {
    client: Client,
    grid_url: String,
}

impl GridClient {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            grid_url: config.grid_url(),
        })
    }

    pub fn grid_url(&self) -> &str {
        &self.grid_url
    }
}

#[async_trait]
impl GridSource for GridClient {
    async fn fetch_grid(&self) -> Result<GridResponse> {
        debug!("请求网格: {}", self.grid_url);

        let response = self.client.get(&self.grid_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            // 服务端出错时仍返回统一的响应包装，继续解析
            warn!("网格接口返回非 2xx 状态: {}", status);
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;

        debug!("响应体 {} 字节", text.len());

        Ok(GridResponse {
            status: status.as_u16(),
            body,
        })
    }
}
