//! Krusty — data-access layer for a cookie production-tracking service.
//!
//! Customers, raw-material inventory, cookie recipes, and pallets of
//! finished product, persisted in SQLite. The interesting machinery is the
//! request-to-query translation layer: the predicate composer that turns an
//! arbitrary subset of optional filters into one bound conjunctive WHERE
//! clause, and the cookie-payload decoder that scans the loosely-structured
//! creation payload with explicit boundary checks.

pub mod cli;
pub mod core;
pub mod store;
