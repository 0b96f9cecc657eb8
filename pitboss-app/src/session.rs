use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use pitboss_checks::betting::{BettingCheck, BettingReport, TableCheckConfig};
use pitboss_config::PitbossConfig;
use pitboss_drivers::table_browser::driver::TableDriver;
use tracing::warn;

/// Run the betting check over a fresh browser session.
///
/// The WebDriver session is the one shared resource of the whole program;
/// it is closed here on the success path and the error path alike.
pub async fn run(cfg: &PitbossConfig) -> Result<BettingReport> {
    let driver = TableDriver::new(&cfg.webdriver.url, cfg.webdriver.headless).await?;
    let mut page = driver.page();

    let check = BettingCheck::new(check_config(cfg));
    let result = check.run(&mut page).await;

    if let Err(err) = driver.close().await {
        warn!(error = %err, "browser session did not close cleanly");
    }

    result
}

fn check_config(cfg: &PitbossConfig) -> TableCheckConfig {
    TableCheckConfig {
        table_url: cfg.table.url.clone(),
        bet_amount: cfg.check.bet_amount.clone(),
        expected_balance: cfg.check.expected_balance.clone(),
        game_area_timeout: Duration::from_millis(cfg.check.game_area_timeout_ms),
        screenshot_path: PathBuf::from(&cfg.check.screenshot_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_config_carries_the_defaults_through() {
        let cfg = PitbossConfig::default();
        let check = check_config(&cfg);
        assert_eq!(check.table_url, "http://localhost:8080");
        assert_eq!(check.bet_amount, "5");
        assert_eq!(check.expected_balance, "100");
        assert_eq!(check.game_area_timeout, Duration::from_millis(5000));
        assert_eq!(
            check.screenshot_path,
            PathBuf::from("verification/betting_verification.png")
        );
    }
}
