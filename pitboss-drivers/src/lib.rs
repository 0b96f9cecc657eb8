//! Driver layer for browser automation.
//!
//! This crate exposes the WebDriver client wrapper and page/element helpers
//! the betting check uses to drive the blackjack table in a real browser.
//!
//! - [`table_browser::driver::TableDriver`]: WebDriver client wrapper
//! - [`table_browser::page::TablePage`]: navigation, DOM helpers, bounded
//!   waits, alert drain, screenshot capture
pub mod table_browser;
