use crate::api::GridSource;
use crate::error::{ProbeError, Result};
use crate::report;
use chrono::TimeZone;
use log::{info, warn};
use std::fmt::Display;
use std::io::Write;

/// 一次探测的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// success 为 true，网格已输出
    Snapshot,
    /// success 为 false，已输出 message
    Rejected,
    /// 连接失败或响应无法解析，已输出错误提示
    Failed,
}

impl ProbeOutcome {
    pub fn is_failure(&self) -> bool {
        !matches!(self, ProbeOutcome::Snapshot)
    }
}

pub struct GridProbe<S> {
    source: S,
}

impl<S: GridSource> GridProbe<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// 请求一次网格并输出报告。
    ///
    /// 连接失败和其他错误都会被打印并转成 [`ProbeOutcome::Failed`]，
    /// 只有写输出本身失败才返回 `Err`。
    pub async fn run<W, Tz>(&self, out: &mut W, tz: &Tz) -> Result<ProbeOutcome>
    where
        W: Write,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        report::render_banner(out)?;

        match self.probe(out, tz).await {
            Ok(true) => Ok(ProbeOutcome::Snapshot),
            Ok(false) => {
                info!("网格接口返回失败响应");
                Ok(ProbeOutcome::Rejected)
            }
            Err(ProbeError::Io(e)) => Err(ProbeError::Io(e)),
            Err(e) => {
                warn!("网格探测失败: {}", e);
                report::render_error(out, &e)?;
                Ok(ProbeOutcome::Failed)
            }
        }
    }

    async fn probe<W, Tz>(&self, out: &mut W, tz: &Tz) -> Result<bool>
    where
        W: Write,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let response = self.source.fetch_grid().await?;
        report::render_response(out, &response, tz)
    }
}
