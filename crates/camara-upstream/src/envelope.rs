//! The `{dados, links}` envelope every upstream listing is wrapped in.

use serde::Deserialize;
use serde_json::Value;

/// One page of a listing, records still untyped.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
  #[serde(rename = "dados")]
  pub items: Vec<Value>,
  #[serde(default)]
  pub links: Vec<Link>,
}

/// A pagination link (`self`, `next`, `first`, `last`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
  #[serde(default)]
  pub rel:  String,
  #[serde(default)]
  pub href: String,
}

impl Envelope {
  pub fn link(&self, rel: &str) -> Option<&str> {
    self
      .links
      .iter()
      .find(|l| l.rel == rel)
      .map(|l| l.href.as_str())
  }
}
