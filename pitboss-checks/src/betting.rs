use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use pitboss_common::PitbossError;
use tracing::info;

use crate::surface::TableSurface;

const BETTING_CONTROLS: &str = "#betting-controls";
const PLAYER_BALANCE: &str = "#player-balance";
const BET_AMOUNT: &str = "#bet-amount";
const START_BUTTON: &str = "#start-btn";
const GAME_AREA: &str = "#game-area";

/// Parameters of a betting verification run.
///
/// The defaults are the deployment the tool was written for: the table
/// served locally on port 8080, a five-unit bet against a fresh hundred,
/// and the screenshot dropped where the reviewer expects to find it.
#[derive(Debug, Clone)]
pub struct TableCheckConfig {
    pub table_url: String,
    pub bet_amount: String,
    pub expected_balance: String,
    pub game_area_timeout: Duration,
    pub screenshot_path: PathBuf,
}

impl Default for TableCheckConfig {
    fn default() -> Self {
        Self {
            table_url: "http://localhost:8080".to_string(),
            bet_amount: "5".to_string(),
            expected_balance: "100".to_string(),
            game_area_timeout: Duration::from_millis(5000),
            screenshot_path: PathBuf::from("verification/betting_verification.png"),
        }
    }
}

/// What a run observed.
///
/// `findings` holds the verdict lines exactly as they were printed; an
/// empty list plus a written screenshot is a clean pass. Alerts raised by
/// the table are kept separately — they are evidence, not verdicts.
#[derive(Debug)]
pub struct BettingReport {
    pub findings: Vec<String>,
    pub alerts: Vec<String>,
    pub balance_matched: bool,
    pub game_area_appeared: bool,
    pub screenshot_path: PathBuf,
}

impl BettingReport {
    fn new(screenshot_path: PathBuf) -> Self {
        Self {
            findings: Vec::new(),
            alerts: Vec::new(),
            balance_matched: false,
            game_area_appeared: false,
            screenshot_path,
        }
    }

    /// Whether the run finished without a single verdict line.
    pub fn clean(&self) -> bool {
        self.findings.is_empty()
    }

    // Verdict lines go to stdout the moment they are observed; their exact
    // wording is the tool's contract.
    fn note_finding(&mut self, line: String) {
        println!("{line}");
        self.findings.push(line);
    }

    fn note_alert(&mut self, text: String) {
        println!("Alert: {text}");
        self.alerts.push(text);
    }
}

/// Drives the betting flow once and reports what it saw.
pub struct BettingCheck {
    config: TableCheckConfig,
}

impl BettingCheck {
    pub fn new(config: TableCheckConfig) -> Self {
        Self { config }
    }

    /// Run the full sequence against `table`.
    ///
    /// Exactly two observations are tolerated without aborting: a starting
    /// balance that differs from the expected value, and a game area that
    /// never shows up inside the wait budget. Both are recorded and the
    /// run proceeds to the screenshot. Every other fault propagates.
    pub async fn run(&self, table: &mut dyn TableSurface) -> Result<BettingReport> {
        let cfg = &self.config;
        let mut report = BettingReport::new(cfg.screenshot_path.clone());

        info!(url = %cfg.table_url, "opening the table");
        table.goto(&cfg.table_url).await?;

        table.wait_for(BETTING_CONTROLS).await?;

        let balance = table.read_text(PLAYER_BALANCE).await?;
        report.balance_matched = balance == cfg.expected_balance;
        if !report.balance_matched {
            report.note_finding(balance_mismatch_line(&balance, &cfg.expected_balance));
        }

        info!(bet = %cfg.bet_amount, "placing the bet");
        table.fill(BET_AMOUNT, &cfg.bet_amount).await?;
        table.click(START_BUTTON).await?;
        if let Some(text) = table.drain_alert().await {
            report.note_alert(text);
        }

        report.game_area_appeared = match table
            .wait_for_within(GAME_AREA, cfg.game_area_timeout)
            .await
        {
            Ok(()) => true,
            Err(err) if is_wait_timeout(&err) => {
                report.note_finding(format!("Timeout waiting for game area: {err}"));
                // a failed start raises its alert late; collect it too
                if let Some(text) = table.drain_alert().await {
                    report.note_alert(text);
                }
                false
            }
            Err(err) => return Err(err),
        };

        let png = table.screenshot_png().await?;
        write_screenshot(&cfg.screenshot_path, &png).await?;
        info!(
            path = %cfg.screenshot_path.display(),
            bytes = png.len(),
            "screenshot written"
        );

        Ok(report)
    }
}

fn balance_mismatch_line(observed: &str, expected: &str) -> String {
    format!("Error: Initial balance is {observed}, expected {expected}")
}

fn is_wait_timeout(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<PitbossError>(),
        Some(PitbossError::WaitTimeout { .. })
    )
}

async fn write_screenshot(path: &Path, png: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create screenshot directory {}", parent.display())
            })?;
        }
    }
    tokio::fs::write(path, png)
        .await
        .with_context(|| format!("failed to write screenshot to {}", path.display()))
}
