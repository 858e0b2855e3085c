use anyhow::Result;
use chrono::Local;
use grid_probe::{GridClient, GridProbe, ProbeConfig};
use log::{info, warn};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // 加载环境变量
    dotenv::dotenv().ok();

    // 初始化日志
    env_logger::init();

    let config = ProbeConfig::from_env()?;

    let client = GridClient::new(&config)?;
    info!("探测网格接口: {}", client.grid_url());
    let probe = GridProbe::new(client);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = probe.run(&mut out, &Local).await?;

    if outcome.is_failure() && config.strict_exit {
        warn!("探测未成功 ({:?})，以非零状态退出", outcome);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
