//! Export configuration.

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Settings the export aggregator is constructed with.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Amount credited per tripler payout, in cents.
    pub payout_per_tripler: i64,
    /// Emit the header line even when a report has no data rows.
    pub header_on_empty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            payout_per_tripler: 500,
            header_on_empty: false,
        }
    }
}

impl ExportConfig {
    pub fn new(payout_per_tripler: i64) -> Self {
        Self {
            payout_per_tripler,
            ..Self::default()
        }
    }

    pub fn with_header_on_empty(mut self, header_on_empty: bool) -> Self {
        self.header_on_empty = header_on_empty;
        self
    }

    /// Apply `PAYOUT_PER_TRIPLER` from the environment, if set.
    pub fn apply_env(&mut self) -> CoreResult<()> {
        if let Ok(raw) = std::env::var("PAYOUT_PER_TRIPLER") {
            self.payout_per_tripler = raw.trim().parse().map_err(|_| {
                CoreError::config(format!("PAYOUT_PER_TRIPLER must be an integer, got '{}'", raw))
            })?;
        }
        Ok(())
    }
}
