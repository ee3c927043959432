//! Per-ambassador status counts and payout totals.

use serde::Serialize;

use crate::entity::model::{PayoutStatus, TriplerStatus};

/// Counts and totals for one ambassador.
///
/// Status buckets are mutually exclusive. Statuses outside the known set are
/// not counted anywhere. Totals are in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AmbassadorSummary {
    pub unconfirmed: u64,
    pub pending: u64,
    pub confirmed: u64,
    pub disbursed: u64,
    pub settled: u64,
    pub total_earned: i64,
    pub total_sent_to_bank: i64,
}

impl AmbassadorSummary {
    pub fn record_tripler(&mut self, status: Option<&str>) {
        match status.and_then(TriplerStatus::parse) {
            Some(TriplerStatus::Unconfirmed) => self.unconfirmed += 1,
            Some(TriplerStatus::Pending) => self.pending += 1,
            Some(TriplerStatus::Confirmed) => self.confirmed += 1,
            None => {}
        }
    }

    /// Every payout earns `unit`; only settled payouts count as sent to bank.
    /// Totals saturate at the `i64` bounds.
    pub fn record_payout(&mut self, status: Option<&str>, unit: i64) {
        match status.and_then(PayoutStatus::parse) {
            Some(PayoutStatus::Disbursed) => self.disbursed += 1,
            Some(PayoutStatus::Settled) => {
                self.settled += 1;
                self.total_sent_to_bank = self.total_sent_to_bank.saturating_add(unit);
            }
            None => {}
        }
        self.total_earned = self.total_earned.saturating_add(unit);
    }

    pub fn triplers_counted(&self) -> u64 {
        self.unconfirmed + self.pending + self.confirmed
    }
}
