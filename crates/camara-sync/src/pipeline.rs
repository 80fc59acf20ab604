//! [`SyncPipeline`]: pulls upstream listings into a [`LegislativeStore`].

use std::{sync::Arc, time::Duration};

use camara_core::{expense::ExpenseInsert, project::Project, store::LegislativeStore};
use camara_upstream::{Upstream, UpstreamError};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
  config::SyncConfig,
  error::{Result, SyncError, SyncStep},
  gate::SyncGate,
  pagination::{PageCursor, fetch_all},
  report::{ExpenseReport, LegislatorReport, RunSummary},
};

/// Legislators between two progress lines during an expense sync.
const PROGRESS_EVERY: usize = 10;

/// Orchestrates upstream fetches and idempotent store writes.
///
/// Upstream requests are issued one at a time. Record-level failures are
/// logged and counted; only a failed page aborts the unit of work that
/// requested it.
pub struct SyncPipeline<S, U> {
  store:    Arc<S>,
  upstream: Arc<U>,
  config:   SyncConfig,
  gate:     SyncGate,
}

impl<S, U> Clone for SyncPipeline<S, U> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      upstream: Arc::clone(&self.upstream),
      config:   self.config.clone(),
      gate:     self.gate.clone(),
    }
  }
}

impl<S, U> SyncPipeline<S, U>
where
  S: LegislativeStore,
  U: Upstream,
{
  pub fn new(store: Arc<S>, upstream: Arc<U>, config: SyncConfig) -> Self {
    Self {
      store,
      upstream,
      config,
      gate: SyncGate::default(),
    }
  }

  /// The gate [`run_full`](Self::run_full) holds while it runs.
  pub fn gate(&self) -> &SyncGate { &self.gate }

  // ── Legislators ───────────────────────────────────────────────────────────

  /// Page through the legislator listing, upserting records as each page
  /// arrives.
  pub async fn sync_legislators(&self) -> Result<LegislatorReport> {
    info!("starting legislator sync");
    let mut report = LegislatorReport::default();
    let mut cursor = PageCursor::new(self.config.page_size);

    while let Some(page_no) = cursor.next_page() {
      if page_no > 1 {
        pause(self.config.legislator_page_delay).await;
      }

      let page = self
        .upstream
        .legislators_page(page_no, cursor.page_size())
        .await?;
      let delivered = page.len();
      report.pages += 1;
      report.fetched += delivered;
      report.decode_issues += page.issue_count();

      for issue in &page.rejected {
        warn!(page = page_no, %issue, "skipping legislator record");
        report.rejected += 1;
      }

      for record in page.records {
        let id = record.value.id;
        if !record.issues.is_empty() {
          debug!(id, issues = ?record.issues, "legislator decoded with gaps");
        }
        match self.store.upsert_legislator(record.value).await {
          Ok(_) => report.saved += 1,
          Err(e) => {
            warn!(id, error = %e, "failed to save legislator");
            report.failed += 1;
          }
        }
      }

      info!(page = page_no, items = delivered, "legislator page processed");
      cursor.advance(delivered);
    }

    info!(
      pages = report.pages,
      saved = report.saved,
      failed = report.failed,
      rejected = report.rejected,
      "legislator sync finished"
    );
    Ok(report)
  }

  // ── Expenses ──────────────────────────────────────────────────────────────

  /// Fetch `year`'s expenses for every locally known legislator.
  ///
  /// A legislator whose fetch fails is skipped entirely; nothing from a
  /// partial walk is written.
  pub async fn sync_expenses(&self, year: i32) -> Result<ExpenseReport> {
    let legislators = self
      .store
      .list_legislators()
      .await
      .map_err(SyncError::store)?;
    let total = legislators.len();
    info!(year, legislators = total, "starting expense sync");

    let upstream = &*self.upstream;
    let mut report = ExpenseReport::new(year);

    for (i, legislator) in legislators.iter().enumerate() {
      if i > 0 {
        pause(self.config.legislator_delay).await;
      }
      report.legislators += 1;

      let id = legislator.id;
      let fetched = fetch_all(self.config.page_size, Duration::ZERO, move |page, size| {
        upstream.expenses_page(id, year, page, size)
      })
      .await;

      match fetched {
        Err(e) => {
          warn!(legislator = id, year, error = %e, "skipping legislator, expense fetch failed");
          report.legislators_failed += 1;
        }
        Ok(collected) => {
          report.fetched += collected.len();
          report.decode_issues += collected.issue_count();

          for expense in collected.into_values() {
            match self.store.insert_expense_if_absent(expense).await {
              Ok(ExpenseInsert::Inserted) => report.inserted += 1,
              Ok(ExpenseInsert::Duplicate) => report.duplicates += 1,
              Err(e) => {
                warn!(legislator = id, year, error = %e, "failed to store expense");
                report.failed += 1;
              }
            }
          }
        }
      }

      if (i + 1) % PROGRESS_EVERY == 0 {
        info!(year, done = i + 1, total, "expense sync progress");
      }
    }

    info!(
      year,
      inserted = report.inserted,
      duplicates = report.duplicates,
      failed = report.failed,
      skipped = report.legislators_failed,
      "expense sync finished"
    );
    Ok(report)
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  /// Every proposal authored by `legislator_id`, fetched live. Nothing is
  /// stored.
  pub async fn fetch_projects(&self, legislator_id: i64) -> Result<Vec<Project>, UpstreamError> {
    let upstream = &*self.upstream;
    let collected = fetch_all(
      self.config.page_size,
      self.config.project_page_delay,
      move |page, size| upstream.projects_page(legislator_id, page, size),
    )
    .await?;

    debug!(
      legislator = legislator_id,
      pages = collected.pages,
      projects = collected.len(),
      "projects fetched"
    );
    Ok(collected.into_values())
  }

  // ── Full run ──────────────────────────────────────────────────────────────

  /// Legislators, then each configured year's expenses, in order.
  ///
  /// Fails fast with [`SyncError::AlreadyRunning`] if another full run
  /// holds the gate. The first failing step aborts the run, and its error is
  /// wrapped in [`SyncError::Step`].
  pub async fn run_full(&self) -> Result<RunSummary> {
    let _permit = self.gate.try_acquire()?;
    let started_at = Utc::now();
    info!(years = ?self.config.years, "starting full sync");

    let legislators = self
      .sync_legislators()
      .await
      .map_err(|e| e.during(SyncStep::Legislators))?;
    let mut expenses = Vec::with_capacity(self.config.years.len());
    for &year in &self.config.years {
      let report = self
        .sync_expenses(year)
        .await
        .map_err(|e| e.during(SyncStep::Expenses { year }))?;
      expenses.push(report);
    }

    let summary = RunSummary {
      started_at,
      finished_at: Utc::now(),
      legislators,
      expenses,
    };
    info!(
      elapsed_ms = (summary.finished_at - summary.started_at).num_milliseconds(),
      "full sync finished"
    );
    Ok(summary)
  }
}

async fn pause(delay: Duration) {
  if !delay.is_zero() {
    tokio::time::sleep(delay).await;
  }
}
