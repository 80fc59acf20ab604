//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings so that `MAX()`
//! and `ORDER BY` on the text agree with chronological order.

use camara_core::{expense::Expense, legislator::Legislator};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Counts ──────────────────────────────────────────────────────────────────

/// SQLite hands back `COUNT(*)` as a signed integer.
pub fn decode_count(n: i64) -> u64 { u64::try_from(n).unwrap_or_default() }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawLegislator::from_row`].
pub const LEGISLATOR_COLUMNS: &str =
  "d.id, d.nome, d.nome_civil, d.partido, d.uf, d.foto, d.email, d.updated_at";

/// Raw values read directly from a `deputados` row.
pub struct RawLegislator {
  pub id:         i64,
  pub name:       String,
  pub civil_name: String,
  pub party:      String,
  pub state:      String,
  pub photo_url:  String,
  pub email:      String,
  pub updated_at: String,
}

impl RawLegislator {
  /// Read the eight [`LEGISLATOR_COLUMNS`] starting at column 0.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      civil_name: row.get(2)?,
      party:      row.get(3)?,
      state:      row.get(4)?,
      photo_url:  row.get(5)?,
      email:      row.get(6)?,
      updated_at: row.get(7)?,
    })
  }

  pub fn into_legislator(self) -> Result<Legislator> {
    Ok(Legislator {
      id:         self.id,
      name:       self.name,
      civil_name: self.civil_name,
      party:      self.party,
      state:      self.state,
      photo_url:  self.photo_url,
      email:      self.email,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `despesas` row.
pub struct RawExpense {
  pub id:              i64,
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
  pub created_at:      String,
}

impl RawExpense {
  pub fn into_expense(self) -> Result<Expense> {
    Ok(Expense {
      id:              self.id,
      legislator_id:   self.legislator_id,
      year:            self.year,
      month:           self.month,
      expense_type:    self.expense_type,
      document_date:   self.document_date,
      gross_amount:    self.gross_amount,
      net_amount:      self.net_amount,
      supplier_name:   self.supplier_name,
      supplier_tax_id: self.supplier_tax_id,
      document_number: self.document_number,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

/// A ranking row before positions are assigned.
pub struct RawRankingRow {
  pub legislator:    RawLegislator,
  pub total:         f64,
  pub expense_count: i64,
}
