use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("连接失败: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("API 请求失败: {0}")]
    Http(#[source] reqwest::Error),

    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("无效的响应数据: {0}")]
    InvalidResponse(String),

    #[error("输出失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置错误: {0}")]
    Config(String),
}

impl ProbeError {
    /// 服务器不可达（未启动、端口未监听）
    pub fn is_connect(&self) -> bool {
        matches!(self, ProbeError::Connect(_))
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            ProbeError::Connect(e)
        } else {
            ProbeError::Http(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
