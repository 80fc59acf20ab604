//! Mapping loosely-typed upstream records onto domain records.
//!
//! Upstream payloads drift: fields go missing, arrive as `null`, or change
//! type. A gap never fails the record. The field takes its zero value (empty
//! string, `0`) and a [`DecodeIssue`] is recorded next to the decoded value
//! so callers can count and log what was lost.
//!
//! The one exception is a legislator without a usable `id`: it cannot be
//! keyed, so the whole record is rejected.

use std::fmt;

use camara_core::{expense::NewExpense, legislator::NewLegislator, project::Project};
use serde_json::Value;

// ─── Issues ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
  Missing,
  Null,
  TypeMismatch,
}

impl fmt::Display for IssueKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      IssueKind::Missing => "missing",
      IssueKind::Null => "null",
      IssueKind::TypeMismatch => "type mismatch",
    })
  }
}

/// A gap found while decoding one field of one record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field `{field}`: {kind}")]
pub struct DecodeIssue {
  pub field: &'static str,
  pub kind:  IssueKind,
}

impl DecodeIssue {
  pub fn new(field: &'static str, kind: IssueKind) -> Self { Self { field, kind } }
}

/// A decoded record together with every gap found while decoding it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
  pub value:  T,
  pub issues: Vec<DecodeIssue>,
}

// ─── Pages ───────────────────────────────────────────────────────────────────

/// One decoded page of an upstream listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
  pub records:  Vec<Decoded<T>>,
  /// Records that could not be decoded at all, one issue each.
  pub rejected: Vec<DecodeIssue>,
}

impl<T> Page<T> {
  pub fn from_items<F>(items: &[Value], mut decode: F) -> Self
  where
    F: FnMut(&Value) -> Result<Decoded<T>, DecodeIssue>,
  {
    let mut records = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();
    for item in items {
      match decode(item) {
        Ok(record) => records.push(record),
        Err(issue) => rejected.push(issue),
      }
    }
    Self { records, rejected }
  }

  /// Number of items upstream delivered, decodable or not. Pagination
  /// decisions are made on this, not on `records.len()`.
  pub fn len(&self) -> usize { self.records.len() + self.rejected.len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  /// Total field-level issues across the decoded records.
  pub fn issue_count(&self) -> usize { self.records.iter().map(|r| r.issues.len()).sum() }
}

// ─── Field reader ────────────────────────────────────────────────────────────

struct FieldReader<'a> {
  record: &'a Value,
  issues: Vec<DecodeIssue>,
}

impl<'a> FieldReader<'a> {
  fn new(record: &'a Value) -> Self {
    Self {
      record,
      issues: Vec::new(),
    }
  }

  fn note(&mut self, field: &'static str, kind: IssueKind) {
    self.issues.push(DecodeIssue::new(field, kind));
  }

  fn lookup(&mut self, field: &'static str) -> Option<&'a Value> {
    match self.record.get(field) {
      None => {
        self.note(field, IssueKind::Missing);
        None
      }
      Some(Value::Null) => {
        self.note(field, IssueKind::Null);
        None
      }
      Some(v) => Some(v),
    }
  }

  fn string(&mut self, field: &'static str) -> String {
    match self.lookup(field) {
      Some(Value::String(s)) => s.clone(),
      Some(_) => {
        self.note(field, IssueKind::TypeMismatch);
        String::new()
      }
      None => String::new(),
    }
  }

  fn number(&mut self, field: &'static str) -> f64 {
    match self.lookup(field).map(Value::as_f64) {
      Some(Some(n)) => n,
      Some(None) => {
        self.note(field, IssueKind::TypeMismatch);
        0.0
      }
      None => 0.0,
    }
  }

  fn integer(&mut self, field: &'static str) -> i64 {
    match self.lookup(field).map(as_integer) {
      Some(Some(n)) => n,
      Some(None) => {
        self.note(field, IssueKind::TypeMismatch);
        0
      }
      None => 0,
    }
  }

  /// Like [`integer`](Self::integer) but narrowed; out-of-range values are a
  /// type mismatch.
  fn narrow<N: TryFrom<i64> + Default>(&mut self, field: &'static str) -> N {
    let wide = self.integer(field);
    N::try_from(wide).unwrap_or_else(|_| {
      self.note(field, IssueKind::TypeMismatch);
      N::default()
    })
  }

  fn required_integer(&self, field: &'static str) -> Result<i64, DecodeIssue> {
    match self.record.get(field) {
      None => Err(DecodeIssue::new(field, IssueKind::Missing)),
      Some(Value::Null) => Err(DecodeIssue::new(field, IssueKind::Null)),
      Some(v) => as_integer(v).ok_or(DecodeIssue::new(field, IssueKind::TypeMismatch)),
    }
  }

  fn finish<T>(self, value: T) -> Decoded<T> {
    Decoded {
      value,
      issues: self.issues,
    }
  }
}

/// Upstream sends integers as JSON numbers, sometimes with a fractional
/// part. Truncate like the upstream's own clients do.
fn as_integer(v: &Value) -> Option<i64> {
  v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// Decode one `/deputados` item.
pub fn decode_legislator(record: &Value) -> Result<Decoded<NewLegislator>, DecodeIssue> {
  let mut r = FieldReader::new(record);
  let id = r.required_integer("id")?;

  let legislator = NewLegislator {
    id,
    name: r.string("nome"),
    civil_name: r.string("nomeCivil"),
    party: r.string("siglaPartido"),
    state: r.string("siglaUf"),
    photo_url: r.string("urlFoto"),
    email: r.string("email"),
  };
  Ok(r.finish(legislator))
}

/// Decode one `/deputados/{id}/despesas` item.
///
/// The owning legislator and the year come from the request, not the record.
pub fn decode_expense(record: &Value, legislator_id: i64, year: i32) -> Decoded<NewExpense> {
  let mut r = FieldReader::new(record);

  let expense = NewExpense {
    legislator_id,
    year,
    month: r.narrow("mes"),
    expense_type: r.string("tipoDespesa"),
    document_date: r.string("dataDocumento"),
    gross_amount: r.number("valorDocumento"),
    net_amount: r.number("valorLiquido"),
    supplier_name: r.string("nomeFornecedor"),
    supplier_tax_id: r.string("cnpjCPFFornecedor"),
    document_number: r.string("numDocumento"),
  };
  r.finish(expense)
}

/// Decode one `/proposicoes` item.
pub fn decode_project(record: &Value) -> Decoded<Project> {
  let mut r = FieldReader::new(record);

  let project = Project {
    id:            r.integer("id"),
    kind:          r.string("siglaTipo"),
    number:        r.integer("numero"),
    year:          r.narrow("ano"),
    summary:       r.string("ementa"),
    presented_at:  r.string("dataApresentacao"),
    full_text_url: r.string("urlInteiroTeor"),
  };
  r.finish(project)
}
