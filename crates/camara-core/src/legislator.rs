//! Legislator: the identity every expense hangs off.
//!
//! Legislators are keyed by the upstream-assigned `id`. A sync overwrites
//! every mutable attribute; nothing is ever deleted locally, so a legislator
//! that disappears upstream stays available with its last known values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A legislator as stored locally.
///
/// Field names on the wire follow the upstream open-data API so existing
/// clients can consume either source interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legislator {
  pub id:         i64,
  /// Display name (`nome`).
  #[serde(rename = "nome")]
  pub name:       String,
  /// Legal name (`nomeCivil`).
  #[serde(rename = "nomeCivil")]
  pub civil_name: String,
  /// Party affiliation code, e.g. `"PT"`.
  #[serde(rename = "siglaPartido")]
  pub party:      String,
  /// Two-letter region (federative unit) code, e.g. `"SP"`.
  #[serde(rename = "siglaUf")]
  pub state:      String,
  #[serde(rename = "urlFoto")]
  pub photo_url:  String,
  pub email:      String,
  /// Set by the store on every upsert.
  #[serde(rename = "updatedAt")]
  pub updated_at: DateTime<Utc>,
}

/// Input to [`LegislativeStore::upsert_legislator`](crate::store::LegislativeStore::upsert_legislator).
///
/// Identical to [`Legislator`] minus the store-assigned timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewLegislator {
  pub id:         i64,
  pub name:       String,
  pub civil_name: String,
  pub party:      String,
  pub state:      String,
  pub photo_url:  String,
  pub email:      String,
}

impl NewLegislator {
  /// Attach the store-assigned timestamp.
  pub fn into_legislator(self, updated_at: DateTime<Utc>) -> Legislator {
    Legislator {
      id: self.id,
      name: self.name,
      civil_name: self.civil_name,
      party: self.party,
      state: self.state,
      photo_url: self.photo_url,
      email: self.email,
      updated_at,
    }
  }
}
