use std::time::Duration;

use anyhow::{anyhow, Result};
use fantoccini::{elements::Element, Client, Locator};
use pitboss_common::PitbossError;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// How often a bounded wait re-queries the DOM for its selector.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// High-level page wrapper providing navigation, element queries, bounded
/// waits, alert drain, and screenshot capture.
pub struct TablePage {
    pub(crate) client: Client,
}

impl TablePage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Navigate to `url`.
    pub async fn goto(&mut self, url: &str) -> Result<()> {
        self.client.goto(url).await.map_err(anyhow::Error::from)?;
        Ok(())
    }

    /// Return the page title.
    pub async fn title(&self) -> Result<String> {
        self.client.title().await.map_err(anyhow::Error::from)
    }

    /// Block until an element matching `selector` appears.
    ///
    /// Uses the client's default wait; a page that never shows the element
    /// surfaces as a hard error from the driver.
    pub async fn wait_for_selector(&self, selector: &str) -> Result<TableElement> {
        let element = self
            .client
            .wait()
            .for_element(Locator::Css(selector))
            .await?;
        Ok(TableElement::new(element))
    }

    /// Wait for `selector` with an explicit budget.
    ///
    /// Polls the DOM until the element appears or the budget runs out.
    /// Lookup errors inside the window are treated as "not there yet" so a
    /// slow render or a momentarily blocked session does not abort the
    /// wait early. The timeout surfaces as [`PitbossError::WaitTimeout`],
    /// which callers can tell apart from every other driver fault.
    pub async fn wait_for_selector_within(
        &self,
        selector: &str,
        budget: Duration,
    ) -> Result<TableElement> {
        let deadline = Instant::now() + budget;
        loop {
            match self.client.find(Locator::Css(selector)).await {
                Ok(element) => return Ok(TableElement::new(element)),
                Err(err) => {
                    if Instant::now() >= deadline {
                        debug!(%selector, error = %err, "bounded wait exhausted its budget");
                        return Err(anyhow!(PitbossError::WaitTimeout {
                            selector: selector.to_string(),
                            budget_ms: budget.as_millis() as u64,
                        }));
                    }
                    sleep(WAIT_POLL_INTERVAL).await;
                }
            }
        }
    }

    /// Find a single element by CSS selector.
    pub async fn find_element(&self, selector: &str) -> Result<TableElement> {
        let element = self.client.find(Locator::Css(selector)).await?;
        Ok(TableElement::new(element))
    }

    /// Return the visible text of the element matching `selector`.
    pub async fn element_text(&self, selector: &str) -> Result<String> {
        self.find_element(selector).await?.text().await
    }

    /// Replace the value of the input matching `selector`.
    pub async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let element = self.find_element(selector).await?;
        element.clear_and_type(value).await
    }

    /// Click the element matching `selector`.
    pub async fn click(&self, selector: &str) -> Result<()> {
        self.find_element(selector).await?.click().await
    }

    /// Read and accept a pending user prompt, if one is open.
    ///
    /// WebDriver has no dialog event stream, so the page raises alerts
    /// between our commands and we collect them explicitly at the points
    /// the table is known to raise them.
    pub async fn drain_alert(&self) -> Option<String> {
        match self.client.get_alert_text().await {
            Ok(text) => {
                if let Err(err) = self.client.accept_alert().await {
                    debug!(error = %err, "alert vanished before it could be accepted");
                }
                Some(text)
            }
            Err(err) => {
                debug!(error = %err, "no open alert to drain");
                None
            }
        }
    }

    /// Capture the current viewport as PNG bytes.
    pub async fn screenshot_png(&self) -> Result<Vec<u8>> {
        self.client.screenshot().await.map_err(anyhow::Error::from)
    }
}

/// Wrapper for DOM elements with the handful of operations the check needs.
pub struct TableElement {
    pub element: Element,
}

impl TableElement {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// Return the element's visible text.
    pub async fn text(&self) -> Result<String> {
        self.element.text().await.map_err(anyhow::Error::from)
    }

    /// Click the element.
    pub async fn click(&self) -> Result<()> {
        self.element.click().await.map_err(anyhow::Error::from)
    }

    /// Clear the element and type `value` into it.
    pub async fn clear_and_type(&self, value: &str) -> Result<()> {
        self.element.clear().await?;
        self.element
            .send_keys(value)
            .await
            .map_err(anyhow::Error::from)
    }
}
