//! Counters returned by each sync procedure.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of a legislator sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegislatorReport {
  pub pages:         u32,
  /// Items delivered upstream, including rejected ones.
  pub fetched:       usize,
  pub saved:         usize,
  /// Records that could not be keyed and were skipped.
  pub rejected:      usize,
  /// Records the store refused.
  pub failed:        usize,
  pub decode_issues: usize,
}

/// Outcome of an expense sync for one year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
  pub year:               i32,
  /// Legislators visited, whether or not their fetch succeeded.
  pub legislators:        usize,
  /// Legislators skipped because their expense fetch failed.
  pub legislators_failed: usize,
  pub fetched:            usize,
  pub inserted:           usize,
  pub duplicates:         usize,
  pub failed:             usize,
  pub decode_issues:      usize,
}

impl ExpenseReport {
  pub fn new(year: i32) -> Self {
    Self {
      year,
      ..Self::default()
    }
  }
}

/// Outcome of a full run: legislators first, then each configured year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
  pub started_at:  DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
  pub legislators: LegislatorReport,
  pub expenses:    Vec<ExpenseReport>,
}
