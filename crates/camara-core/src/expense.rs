//! Expense: a single reimbursement document attributed to a legislator.
//!
//! Expenses are insert-only. The logical identity of an upstream document is
//! `(legislator_id, year, document_number, gross_amount)`; inserting a record
//! that collides on that key is a no-op, which is what makes repeated syncs
//! idempotent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An expense row as stored locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
  /// Local auto-increment identity; unrelated to any upstream id.
  pub id:              i64,
  #[serde(rename = "deputadoId")]
  pub legislator_id:   i64,
  #[serde(rename = "ano")]
  pub year:            i32,
  #[serde(rename = "mes")]
  pub month:           u32,
  #[serde(rename = "tipoDespesa")]
  pub expense_type:    String,
  /// Free text as delivered upstream; never parsed.
  #[serde(rename = "dataDocumento")]
  pub document_date:   String,
  #[serde(rename = "valorDocumento")]
  pub gross_amount:    f64,
  #[serde(rename = "valorLiquido")]
  pub net_amount:      f64,
  #[serde(rename = "nomeFornecedor")]
  pub supplier_name:   String,
  #[serde(rename = "cnpjCPFFornecedor")]
  pub supplier_tax_id: String,
  #[serde(rename = "numDocumento")]
  pub document_number: String,
  /// When this row was first inserted locally.
  #[serde(rename = "createdAt")]
  pub created_at:      DateTime<Utc>,
}

/// Input to [`LegislativeStore::insert_expense_if_absent`](crate::store::LegislativeStore::insert_expense_if_absent).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewExpense {
  pub legislator_id:   i64,
  pub year:            i32,
  pub month:           u32,
  pub expense_type:    String,
  pub document_date:   String,
  pub gross_amount:    f64,
  pub net_amount:      f64,
  pub supplier_name:   String,
  pub supplier_tax_id: String,
  pub document_number: String,
}

/// Outcome of an idempotent expense insert. Both variants are successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseInsert {
  /// A new row was written.
  Inserted,
  /// A row with the same uniqueness key already existed; nothing changed.
  Duplicate,
}
