//! evalboard - static benchmark dashboards for model evaluation runs
//!
//! This is the main crate that wraps the dashboard library and provides the
//! `evalboard` command line tool.

pub use evalboard_dashboard as dashboard;

/// Re-export common types and utilities
pub mod prelude {
    pub use crate::dashboard::*;
}
