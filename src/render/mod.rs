//! Downstream display of finished reports.

pub mod format;
pub mod output;
