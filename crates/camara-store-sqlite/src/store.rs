//! [`SqliteStore`], the SQLite implementation of [`LegislativeStore`].

use std::path::Path;

use camara_core::{
  expense::{Expense, ExpenseInsert, NewExpense},
  legislator::{Legislator, NewLegislator},
  ranking::{RankingEntry, assign_positions},
  store::LegislativeStore,
};
use chrono::{DateTime, SubsecRound, Utc};
use tracing::debug;

use crate::{
  Result,
  encode::{
    LEGISLATOR_COLUMNS, RawExpense, RawLegislator, RawRankingRow, decode_count, decode_dt,
    encode_dt,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A legislative data mirror backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted. The
/// connection closes when the last clone is dropped.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── LegislativeStore impl ───────────────────────────────────────────────────

impl LegislativeStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn upsert_legislator(&self, legislator: NewLegislator) -> Result<Legislator> {
    // Stored text keeps microseconds; trim so the returned value matches reads.
    let legislator = legislator.into_legislator(Utc::now().trunc_subsecs(6));
    let row = legislator.clone();
    let at_str = encode_dt(row.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO deputados (id, nome, nome_civil, partido, uf, foto, email, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
           ON CONFLICT(id) DO UPDATE SET
             nome       = excluded.nome,
             nome_civil = excluded.nome_civil,
             partido    = excluded.partido,
             uf         = excluded.uf,
             foto       = excluded.foto,
             email      = excluded.email,
             updated_at = excluded.updated_at",
          rusqlite::params![
            row.id,
            row.name,
            row.civil_name,
            row.party,
            row.state,
            row.photo_url,
            row.email,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(legislator)
  }

  async fn insert_expense_if_absent(&self, expense: NewExpense) -> Result<ExpenseInsert> {
    let created_at_str = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "INSERT OR IGNORE INTO despesas (
             deputado_id, ano, mes, tipo_despesa, data_documento,
             valor_documento, valor_liquido, nome_fornecedor,
             cnpj_fornecedor, num_documento, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            expense.legislator_id,
            expense.year,
            expense.month,
            expense.expense_type,
            expense.document_date,
            expense.gross_amount,
            expense.net_amount,
            expense.supplier_name,
            expense.supplier_tax_id,
            expense.document_number,
            created_at_str,
          ],
        )?;
        Ok(changed)
      })
      .await?;

    Ok(if changed == 0 {
      ExpenseInsert::Duplicate
    } else {
      ExpenseInsert::Inserted
    })
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list_legislators(&self) -> Result<Vec<Legislator>> {
    let raws: Vec<RawLegislator> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LEGISLATOR_COLUMNS} FROM deputados d ORDER BY d.nome ASC, d.id ASC"
        ))?;
        let rows = stmt
          .query_map([], RawLegislator::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLegislator::into_legislator).collect()
  }

  async fn list_expenses(&self, legislator_id: i64, year: i32) -> Result<Vec<Expense>> {
    let raws: Vec<RawExpense> = self
      .conn
      .call(move |conn| {
        // `data_documento` is free text, so this ordering is lexicographic.
        let mut stmt = conn.prepare(
          "SELECT id, deputado_id, ano, mes, tipo_despesa, data_documento,
                  valor_documento, valor_liquido, nome_fornecedor,
                  cnpj_fornecedor, num_documento, created_at
           FROM despesas
           WHERE deputado_id = ?1 AND ano = ?2
           ORDER BY data_documento DESC, id ASC",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![legislator_id, year], |row| {
            Ok(RawExpense {
              id:              row.get(0)?,
              legislator_id:   row.get(1)?,
              year:            row.get(2)?,
              month:           row.get(3)?,
              expense_type:    row.get(4)?,
              document_date:   row.get(5)?,
              gross_amount:    row.get(6)?,
              net_amount:      row.get(7)?,
              supplier_name:   row.get(8)?,
              supplier_tax_id: row.get(9)?,
              document_number: row.get(10)?,
              created_at:      row.get(11)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawExpense::into_expense).collect()
  }

  async fn compute_ranking(&self, year: i32, limit: u32) -> Result<Vec<RankingEntry>> {
    let raws: Vec<RawRankingRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LEGISLATOR_COLUMNS},
                  COALESCE(SUM(x.valor_documento), 0) AS total_gasto,
                  COUNT(x.id)                         AS num_gastos
           FROM deputados d
           LEFT JOIN despesas x ON x.deputado_id = d.id AND x.ano = ?1
           GROUP BY d.id
           HAVING total_gasto > 0
           ORDER BY total_gasto DESC, d.nome ASC, d.id ASC
           LIMIT ?2"
        ))?;

        let rows = stmt
          .query_map(rusqlite::params![year, limit], |row| {
            Ok(RawRankingRow {
              legislator:    RawLegislator::from_row(row)?,
              total:         row.get(8)?,
              expense_count: row.get(9)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    let rows = raws
      .into_iter()
      .map(|raw| {
        Ok((
          raw.legislator.into_legislator()?,
          raw.total,
          decode_count(raw.expense_count),
        ))
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(assign_positions(rows))
  }

  async fn count_legislators(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM deputados", [], |r| r.get(0))?))
      .await?;
    Ok(decode_count(n))
  }

  async fn count_expenses(&self, year: i32) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM despesas WHERE ano = ?1",
          rusqlite::params![year],
          |r| r.get(0),
        )?)
      })
      .await?;
    Ok(decode_count(n))
  }

  async fn last_updated(&self) -> Result<Option<DateTime<Utc>>> {
    let max: Option<String> = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT MAX(updated_at) FROM deputados", [], |r| r.get(0))?)
      })
      .await?;

    max.as_deref().map(decode_dt).transpose()
  }
}
