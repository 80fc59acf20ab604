//! The `LegislativeStore` trait: what the sync pipeline writes through and
//! what the API reads from. `camara-store-sqlite` is the only backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  expense::{Expense, ExpenseInsert, NewExpense},
  legislator::{Legislator, NewLegislator},
  ranking::RankingEntry,
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the local mirror of upstream legislative data.
///
/// Every operation either commits its whole effect or none of it. There is
/// no atomicity across operations: a sync interrupted halfway leaves a
/// partially updated store, which a later sync repairs because all writes are
/// idempotent.
///
/// Futures are `Send` so handlers can hold them across awaits on a
/// multi-threaded runtime.
pub trait LegislativeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert a legislator, or overwrite every mutable field of the existing
  /// row with the same `id`. Refreshes `updated_at` either way.
  fn upsert_legislator(
    &self,
    legislator: NewLegislator,
  ) -> impl Future<Output = Result<Legislator, Self::Error>> + Send + '_;

  /// Insert an expense unless one with the same
  /// `(legislator_id, year, document_number, gross_amount)` already exists.
  ///
  /// The legislator does not have to exist yet.
  fn insert_expense_if_absent(
    &self,
    expense: NewExpense,
  ) -> impl Future<Output = Result<ExpenseInsert, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All legislators ordered by name ascending, ties broken by id.
  fn list_legislators(
    &self,
  ) -> impl Future<Output = Result<Vec<Legislator>, Self::Error>> + Send + '_;

  /// Expenses of one legislator in one year, ordered by the raw
  /// `document_date` text descending.
  fn list_expenses(
    &self,
    legislator_id: i64,
    year: i32,
  ) -> impl Future<Output = Result<Vec<Expense>, Self::Error>> + Send + '_;

  /// Legislators ranked by total gross expense in `year`.
  ///
  /// Legislators without a positive total are excluded. At most `limit`
  /// entries are returned, positioned 1.. in result order.
  fn compute_ranking(
    &self,
    year: i32,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<RankingEntry>, Self::Error>> + Send + '_;

  fn count_legislators(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn count_expenses(
    &self,
    year: i32,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// The most recent legislator `updated_at`, or `None` for an empty store.
  fn last_updated(
    &self,
  ) -> impl Future<Output = Result<Option<DateTime<Utc>>, Self::Error>> + Send + '_;
}
