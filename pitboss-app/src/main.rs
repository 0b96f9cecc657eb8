use std::path::PathBuf;

use anyhow::Result;
use pitboss_common::observability::{init_logging, LogConfig, LogFormat};
use pitboss_config::{LoggingSettings, PitbossConfig, PitbossConfigLoader};
use tracing::info;

mod session;

#[tokio::main]
async fn main() -> Result<()> {
    // 1) Load config (env wins); a bare checkout runs entirely on defaults
    let cfg: PitbossConfig = PitbossConfigLoader::new()
        .with_file("pitboss.yaml")
        .load()?;

    let log_path = init_logging(log_config(&cfg.logging))?;
    info!(log = %log_path.display(), table = %cfg.table.url, "pitboss starting");

    let report = session::run(&cfg).await?;

    info!(
        findings = report.findings.len(),
        alerts = report.alerts.len(),
        screenshot = %report.screenshot_path.display(),
        clean = report.clean(),
        "verification finished"
    );

    Ok(())
}

fn log_config(settings: &LoggingSettings) -> LogConfig {
    LogConfig {
        app_name: "pitboss",
        log_dir: settings.dir.as_ref().map(PathBuf::from),
        emit_stderr: settings.stderr,
        format: if settings.format.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        default_filter: settings.filter.clone(),
    }
}
