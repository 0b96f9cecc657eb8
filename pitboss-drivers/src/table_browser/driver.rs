use crate::table_browser::page::TablePage;
use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::collections::HashMap;
use url::Url;
use webdriver::capabilities::Capabilities;

/// Thin wrapper around a `fantoccini` WebDriver client.
///
/// The driver owns the browser session; [`TableDriver::close`] must run on
/// every exit path so no orphaned browser process survives a verification
/// run. Callers get page-level access through [`TableDriver::page`].
pub struct TableDriver {
    pub client: Client,
}

impl TableDriver {
    /// Create a new driver connected to a running WebDriver service.
    ///
    /// Default deployment: chromedriver at `http://localhost:9515`.
    pub async fn new(webdriver_url: &str, headless: bool) -> Result<Self> {
        let endpoint = Url::parse(webdriver_url)
            .with_context(|| format!("invalid WebDriver endpoint: {webdriver_url}"))?;

        let client = ClientBuilder::native()
            .capabilities(chrome_capabilities(headless))
            .connect(endpoint.as_str())
            .await
            .with_context(|| format!("failed to reach WebDriver service at {endpoint}"))?;

        Ok(Self { client })
    }

    /// Hand out a [`TablePage`] over the same session.
    pub fn page(&self) -> TablePage {
        TablePage::new(self.client.clone())
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

fn chrome_capabilities(headless: bool) -> Capabilities {
    let mut caps = Capabilities::new();
    let mut chrome_opts = HashMap::new();
    chrome_opts.insert("args".to_string(), json!(chrome_args(headless)));
    caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));
    caps
}

fn chrome_args(headless: bool) -> Vec<String> {
    let mut args = vec![
        "--disable-dev-shm-usage".to_string(),
        "--no-sandbox".to_string(),
        "--window-size=1280,900".to_string(),
    ];
    if headless {
        args.push("--headless".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_adds_the_headless_switches() {
        let args = chrome_args(true);
        assert!(args.iter().any(|a| a == "--headless"));
        assert!(args.iter().any(|a| a == "--disable-gpu"));
    }

    #[test]
    fn headed_leaves_the_window_visible() {
        let args = chrome_args(false);
        assert!(!args.iter().any(|a| a == "--headless"));
    }

    #[test]
    fn capabilities_nest_args_under_chrome_options() {
        let caps = chrome_capabilities(true);
        let opts = caps.get("goog:chromeOptions").expect("chrome options set");
        let args = opts.get("args").and_then(|a| a.as_array()).expect("args");
        assert!(args.iter().any(|a| a == "--headless"));
    }
}
