use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use pitboss_drivers::table_browser::page::TablePage;

/// The browser operations the betting check needs from a page.
///
/// The check is written against this seam rather than the driver directly
/// so the sequence logic can run against a scripted table in tests.
#[async_trait]
pub trait TableSurface: Send + Sync {
    async fn goto(&mut self, url: &str) -> Result<()>;
    async fn wait_for(&self, selector: &str) -> Result<()>;
    async fn wait_for_within(&self, selector: &str, budget: Duration) -> Result<()>;
    async fn read_text(&self, selector: &str) -> Result<String>;
    async fn fill(&self, selector: &str, value: &str) -> Result<()>;
    async fn click(&self, selector: &str) -> Result<()>;
    async fn drain_alert(&self) -> Option<String>;
    async fn screenshot_png(&self) -> Result<Vec<u8>>;
}

#[async_trait]
impl TableSurface for TablePage {
    async fn goto(&mut self, url: &str) -> Result<()> {
        TablePage::goto(self, url).await
    }

    async fn wait_for(&self, selector: &str) -> Result<()> {
        self.wait_for_selector(selector).await.map(|_| ())
    }

    async fn wait_for_within(&self, selector: &str, budget: Duration) -> Result<()> {
        self.wait_for_selector_within(selector, budget)
            .await
            .map(|_| ())
    }

    async fn read_text(&self, selector: &str) -> Result<String> {
        self.element_text(selector).await
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        TablePage::fill(self, selector, value).await
    }

    async fn click(&self, selector: &str) -> Result<()> {
        TablePage::click(self, selector).await
    }

    async fn drain_alert(&self) -> Option<String> {
        TablePage::drain_alert(self).await
    }

    async fn screenshot_png(&self) -> Result<Vec<u8>> {
        TablePage::screenshot_png(self).await
    }
}
