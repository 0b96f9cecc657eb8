//! The betting verification check.
//!
//! - [`surface::TableSurface`]: the seam between the scenario and the
//!   browser, implemented for the real driver page and by scripted fakes
//!   in tests
//! - [`betting::BettingCheck`]: the navigate → assert → bet → wait →
//!   screenshot sequence itself

pub mod betting;
pub mod surface;
