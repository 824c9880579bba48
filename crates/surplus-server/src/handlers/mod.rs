//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod ask;
pub mod charts;
pub mod preferences;

// Re-export all handlers for use in router
pub use ask::*;
pub use charts::*;
pub use preferences::*;

use surplus_core::Granularity;

use crate::AppError;

/// Parse a `:granularity` path segment
pub(crate) fn parse_granularity(raw: &str) -> Result<Granularity, AppError> {
    raw.parse::<Granularity>()
        .map_err(|e| AppError::bad_request(&e))
}
