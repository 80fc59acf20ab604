use std::time::Duration;

/// Tuning for a [`SyncPipeline`](crate::SyncPipeline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
  /// Items requested per upstream page (`itens`).
  pub page_size:             u32,
  /// Years whose expenses a full run pulls, in order.
  pub years:                 Vec<i32>,
  /// Pause between legislator listing pages.
  pub legislator_page_delay: Duration,
  /// Pause between legislators during an expense sync.
  pub legislator_delay:      Duration,
  /// Pause between proposal pages.
  pub project_page_delay:    Duration,
}

impl Default for SyncConfig {
  fn default() -> Self {
    Self {
      page_size:             100,
      years:                 vec![2024, 2025],
      legislator_page_delay: Duration::from_millis(200),
      legislator_delay:      Duration::from_millis(100),
      project_page_delay:    Duration::from_millis(200),
    }
  }
}

impl SyncConfig {
  /// The same configuration with every pause set to zero.
  pub fn without_delays(self) -> Self {
    Self {
      legislator_page_delay: Duration::ZERO,
      legislator_delay: Duration::ZERO,
      project_page_delay: Duration::ZERO,
      ..self
    }
  }
}
