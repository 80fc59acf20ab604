//! Domain types and the storage contract for the legislative data mirror.
//!
//! Nothing here talks to the network or to a database. The upstream client,
//! the SQLite backend, the sync pipeline and the API all meet at these types.

pub mod expense;
pub mod legislator;
pub mod project;
pub mod ranking;
pub mod store;

/// Year used when a request does not name one.
pub const DEFAULT_YEAR: i32 = 2024;
