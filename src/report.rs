//! 网格快照的文本报告。
//!
//! 所有输出都写入调用方给定的 `Write`，时区也由调用方决定，
//! 相同输入在相同时区下输出完全一致。

use crate::api::GridResponse;
use crate::error::{ProbeError, Result};
use crate::types::{Cell, Envelope, Grid};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::io::Write;

const RULE: &str = "============================================================";
const NOT_AVAILABLE: &str = "N/A";

pub const CONNECT_HINT: &str = "❌ 连接失败，请确保服务器已启动 (npm run start)";
pub const WINNING_MARK: &str = " 🏆";

/// 请求前打印的标题
pub fn render_banner<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "测试 GET /market/grid")?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

/// 渲染一次完整响应：状态、网格摘要、完整 JSON。
/// 返回响应包装中的 success 标志。
pub fn render_response<W, Tz>(out: &mut W, response: &GridResponse, tz: &Tz) -> Result<bool>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let envelope = Envelope::from_value(&response.body)?;

    writeln!(out)?;
    writeln!(out, "状态码: {}", response.status)?;
    writeln!(out, "成功: {}", or_na(envelope.success))?;

    if !envelope.is_success() {
        writeln!(
            out,
            "错误: {}",
            envelope.message.as_deref().unwrap_or(NOT_AVAILABLE)
        )?;
        return Ok(false);
    }

    let grid = envelope.grid()?;
    render_grid(out, &grid, tz)?;

    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "完整响应 JSON:")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&response.body)?)?;
    Ok(true)
}

pub fn render_grid<W, Tz>(out: &mut W, grid: &Grid, tz: &Tz) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let current = to_local(grid.current_time.unwrap_or(0), tz)?;

    writeln!(out)?;
    writeln!(out, "📊 基本信息:")?;
    writeln!(out, "  - Symbol: {}", grid.symbol.as_deref().unwrap_or(NOT_AVAILABLE))?;
    writeln!(out, "  - 当前价格: {}", or_na(grid.current_price.as_ref()))?;
    writeln!(out, "  - 当前时间: {}", format_datetime(&current))?;
    match grid.interval_sec {
        Some(sec) => writeln!(out, "  - 列间隔: {}s", sec)?,
        None => writeln!(out, "  - 列间隔: {}", NOT_AVAILABLE)?,
    }
    if let Some(sec) = grid.lock_time_sec {
        writeln!(out, "  - 锁定时间: {}s", sec)?;
    }
    writeln!(out, "  - 是否更新: {}", or_na(grid.update))?;

    for (name, cells) in grid.columns() {
        if cells.is_empty() {
            continue;
        }
        render_column(out, name, cells, tz)?;
    }
    Ok(())
}

fn render_column<W, Tz>(out: &mut W, name: &str, cells: &[Cell], tz: &Tz) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let first = &cells[0];
    let expiry = to_local(first.expiry_time.unwrap_or(0), tz)?;
    let status = first.status.as_deref().unwrap_or("unknown");

    writeln!(out)?;
    writeln!(
        out,
        "📦 {} (到期: {}, 状态: {}):",
        name.to_uppercase(),
        expiry.format("%H:%M:%S"),
        status
    )?;

    for (i, cell) in cells.iter().enumerate() {
        writeln!(out, "{}", format_row(i + 1, cell))?;
    }
    Ok(())
}

/// 单行格子：标签左对齐 12 位，数字赔率右对齐 5 位，文本赔率左对齐 5 位
pub fn format_row(index: usize, cell: &Cell) -> String {
    let odds = match &cell.odds {
        Some(odds) if odds.is_number() => format!("{:>5}", odds.to_string()),
        Some(odds) => format!("{:<5}", odds.to_string()),
        None => format!("{:<5}", NOT_AVAILABLE),
    };
    let mark = if cell.is_winning() { WINNING_MARK } else { "" };

    format!("    Row {}: {:<12} | 赔率: {}{}", index, cell.label(), odds, mark)
}

/// 已处理错误的单行提示
pub fn render_error<W: Write>(out: &mut W, err: &ProbeError) -> Result<()> {
    if err.is_connect() {
        writeln!(out, "{}", CONNECT_HINT)?;
    } else {
        writeln!(out, "❌ 错误: {}", err)?;
    }
    Ok(())
}

fn to_local<Tz: TimeZone>(millis: i64, tz: &Tz) -> Result<DateTime<Tz>> {
    tz.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ProbeError::InvalidResponse(format!("无效的时间戳: {}", millis)))
}

/// `YYYY-MM-DD HH:MM:SS`，有毫秒部分时追加 6 位小数秒
fn format_datetime<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if dt.timestamp_subsec_micros() == 0 {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
