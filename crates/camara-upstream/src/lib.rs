//! Client for the Câmara dos Deputados open-data API.
//!
//! [`UpstreamClient`] issues one paginated GET at a time and maps the untyped
//! `dados` items onto domain records through [`decode`]. The [`Upstream`]
//! trait is the seam the sync pipeline is written against, so tests can
//! substitute an in-memory source.

pub mod client;
pub mod decode;
pub mod envelope;
pub mod error;

use std::future::Future;

use camara_core::{expense::NewExpense, legislator::NewLegislator, project::Project};

pub use client::{DEFAULT_BASE_URL, UpstreamClient, UpstreamConfig};
pub use decode::{DecodeIssue, Decoded, IssueKind, Page};
pub use error::{Result, UpstreamError};

/// A paginated source of legislative records. Pages are 1-based.
pub trait Upstream: Send + Sync {
  fn legislators_page(
    &self,
    page: u32,
    page_size: u32,
  ) -> impl Future<Output = Result<Page<NewLegislator>>> + Send + '_;

  fn expenses_page(
    &self,
    legislator_id: i64,
    year: i32,
    page: u32,
    page_size: u32,
  ) -> impl Future<Output = Result<Page<NewExpense>>> + Send + '_;

  /// Proposals authored by `legislator_id`, newest first.
  fn projects_page(
    &self,
    legislator_id: i64,
    page: u32,
    page_size: u32,
  ) -> impl Future<Output = Result<Page<Project>>> + Send + '_;
}
