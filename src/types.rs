use crate::error::{ProbeError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// 网格固定的 6 个时间列
pub const COLUMN_KEYS: [&str; 6] = ["col1", "col2", "col3", "col4", "col5", "col6"];

/// 数值或字符串。服务端的价格、赔率两种格式都会出现，
/// 数字保留原始写法（`50000` 不会变成 `50000.0`）。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    pub fn is_number(&self) -> bool {
        matches!(self, Scalar::Number(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

/// 通用 API 响应包装
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    pub success: Option<bool>,

    pub message: Option<String>,

    /// 仅在 success 为 true 时才解析成 [`Grid`]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Envelope::deserialize(value)?)
    }

    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(false)
    }

    /// 解析 data 字段
    pub fn grid(&self) -> Result<Grid> {
        match &self.data {
            Some(Value::Null) | None => Err(ProbeError::InvalidResponse(
                "响应缺少 data 字段".to_string(),
            )),
            Some(data) => Ok(Grid::deserialize(data)?),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Grid {
    pub symbol: Option<String>,

    #[serde(rename = "currentPrice")]
    pub current_price: Option<Scalar>,

    /// 毫秒时间戳
    #[serde(rename = "currentTime")]
    pub current_time: Option<i64>,

    #[serde(rename = "intervalSec")]
    pub interval_sec: Option<i64>,

    #[serde(rename = "lockTimeSec")]
    pub lock_time_sec: Option<i64>,

    /// 是否有列滑动
    pub update: Option<bool>,

    pub col1: Option<Vec<Cell>>,
    pub col2: Option<Vec<Cell>>,
    pub col3: Option<Vec<Cell>>,
    pub col4: Option<Vec<Cell>>,
    pub col5: Option<Vec<Cell>>,
    pub col6: Option<Vec<Cell>>,
}

impl Grid {
    /// 按列名取列，缺失或 null 视为空列
    pub fn column(&self, key: &str) -> &[Cell] {
        let col = match key {
            "col1" => &self.col1,
            "col2" => &self.col2,
            "col3" => &self.col3,
            "col4" => &self.col4,
            "col5" => &self.col5,
            "col6" => &self.col6,
            _ => return &[],
        };
        col.as_deref().unwrap_or(&[])
    }

    /// 依次返回 col1..col6
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, &[Cell])> + '_ {
        COLUMN_KEYS.into_iter().map(move |key| (key, self.column(key)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cell {
    #[serde(rename = "expiryTime")]
    pub expiry_time: Option<i64>,

    /// settled / locked / betting
    pub status: Option<String>,

    #[serde(rename = "priceRange")]
    pub price_range: Option<PriceRange>,

    pub odds: Option<Scalar>,

    /// 仅 settled 状态有值
    #[serde(rename = "isWinning")]
    pub is_winning: Option<bool>,
}

impl Cell {
    pub fn label(&self) -> &str {
        self.price_range
            .as_ref()
            .and_then(|r| r.label.as_deref())
            .unwrap_or("N/A")
    }

    pub fn is_winning(&self) -> bool {
        self.is_winning == Some(true)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceRange {
    /// 显示标签 如 "+1%~+2%"
    pub label: Option<String>,
}
