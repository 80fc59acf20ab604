//! Ranking: legislators ordered by total gross expense within a year.
//!
//! Rankings are always derived at read time; nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::legislator::Legislator;

/// Default number of entries returned by a ranking query.
pub const DEFAULT_LIMIT: u32 = 20;

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
  #[serde(flatten)]
  pub legislator:    Legislator,
  /// Sum of gross amounts for the queried year (`totalGasto`).
  #[serde(rename = "totalGasto")]
  pub total:         f64,
  /// Number of expense rows contributing to `total` (`numeroGastos`).
  #[serde(rename = "numeroGastos")]
  pub expense_count: u64,
  /// 1-based position in result order (`posicao`).
  #[serde(rename = "posicao")]
  pub position:      u32,
}

/// Assign dense 1-based positions in the order the totals were produced.
pub fn assign_positions(rows: Vec<(Legislator, f64, u64)>) -> Vec<RankingEntry> {
  rows
    .into_iter()
    .zip(1u32..)
    .map(|((legislator, total, expense_count), position)| RankingEntry {
      legislator,
      total,
      expense_count,
      position,
    })
    .collect()
}
