//! Walking a paginated upstream listing.
//!
//! Upstream has no reliable total count, so a walk stops on the first page
//! that is empty or shorter than the requested size. A short page that is
//! not actually the last one ends the walk early without any error.

use std::{future::Future, time::Duration};

use camara_upstream::{DecodeIssue, Decoded, Page, UpstreamError};

// ─── Cursor ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
  Idle,
  Paging { page: u32 },
}

/// Tracks which page to request next.
#[derive(Debug, Clone)]
pub struct PageCursor {
  page_size: u32,
  state:     PageState,
}

impl PageCursor {
  /// A cursor about to request page 1.
  pub fn new(page_size: u32) -> Self {
    Self {
      page_size: page_size.max(1),
      state:     PageState::Paging { page: 1 },
    }
  }

  pub fn page_size(&self) -> u32 { self.page_size }

  /// The page to request, or `None` once the walk is over.
  pub fn next_page(&self) -> Option<u32> {
    match self.state {
      PageState::Paging { page } => Some(page),
      PageState::Idle => None,
    }
  }

  /// Record how many items the current page delivered.
  pub fn advance(&mut self, delivered: usize) -> PageState {
    if let PageState::Paging { page } = self.state {
      self.state = if delivered == 0 || delivered < self.page_size as usize {
        PageState::Idle
      } else {
        PageState::Paging { page: page + 1 }
      };
    }
    self.state
  }
}

// ─── Collect ─────────────────────────────────────────────────────────────────

/// Every page of a walk, concatenated.
#[derive(Debug, Clone, PartialEq)]
pub struct Collected<T> {
  pub records:  Vec<Decoded<T>>,
  pub rejected: Vec<DecodeIssue>,
  pub pages:    u32,
}

impl<T> Collected<T> {
  pub fn len(&self) -> usize { self.records.len() + self.rejected.len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  pub fn issue_count(&self) -> usize { self.records.iter().map(|r| r.issues.len()).sum() }

  pub fn into_values(self) -> Vec<T> { self.records.into_iter().map(|r| r.value).collect() }
}

/// Request pages `1..` from `fetch` until the cursor goes idle, pausing
/// `delay` between requests. The first failed page aborts the walk.
pub async fn fetch_all<T, F, Fut>(
  page_size: u32,
  delay: Duration,
  mut fetch: F,
) -> Result<Collected<T>, UpstreamError>
where
  F: FnMut(u32, u32) -> Fut,
  Fut: Future<Output = Result<Page<T>, UpstreamError>>,
{
  let mut cursor = PageCursor::new(page_size);
  let mut collected = Collected {
    records:  Vec::new(),
    rejected: Vec::new(),
    pages:    0,
  };

  while let Some(page) = cursor.next_page() {
    if page > 1 && !delay.is_zero() {
      tokio::time::sleep(delay).await;
    }

    let batch = fetch(page, cursor.page_size()).await?;
    collected.pages += 1;
    cursor.advance(batch.len());
    collected.records.extend(batch.records);
    collected.rejected.extend(batch.rejected);
  }

  Ok(collected)
}
