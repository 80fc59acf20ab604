//! Project: a legislative proposal authored by a legislator.
//!
//! Projects are fetched live from upstream on every request and never stored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
  pub id:            i64,
  /// Proposal type code, e.g. `"PL"` or `"PEC"`.
  #[serde(rename = "siglaTipo")]
  pub kind:          String,
  #[serde(rename = "numero")]
  pub number:        i64,
  #[serde(rename = "ano")]
  pub year:          i32,
  /// Summary text (`ementa`).
  #[serde(rename = "ementa")]
  pub summary:       String,
  #[serde(rename = "dataApresentacao")]
  pub presented_at:  String,
  #[serde(rename = "urlInteiroTeor")]
  pub full_text_url: String,
}
