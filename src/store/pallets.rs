//! Pallet tracking — creation, filtered lookup, and the blocked flag.
//!
//! Lookup, block, and unblock all run through the same composed predicate,
//! so a filter combination behaves identically across the three operations.

use chrono::Utc;
use rusqlite::{params, params_from_iter};
use tracing::debug;

use super::{is_fk_violation, Store};
use crate::core::error::{Error, Result};
use crate::core::filter::{compose, FilterRequest};
use crate::core::types::Pallet;

impl Store {
    /// Produce a pallet of a cookie, stamped with the current time. Returns
    /// the generated pallet id.
    pub fn add_pallet(&self, cookie: &str) -> Result<i64> {
        let produced_at = Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        self.add_pallet_produced_at(cookie, &produced_at)
    }

    /// Produce a pallet with an explicit production timestamp (seeding and
    /// backfilling).
    pub fn add_pallet_produced_at(&self, cookie: &str, produced_at: &str) -> Result<i64> {
        if let Err(e) = self.conn.execute(
            "INSERT INTO pallets (product_name, production_date) VALUES (?1, ?2)",
            params![cookie, produced_at],
        ) {
            return Err(if is_fk_violation(&e) {
                Error::UnknownProduct(cookie.to_string())
            } else {
                e.into()
            });
        }
        let id = self.conn.last_insert_rowid();
        debug!(cookie, id, "pallet produced");
        Ok(id)
    }

    /// Pallets matching the composed filter predicate, in creation order.
    pub fn list_pallets(&self, request: &FilterRequest) -> Result<Vec<Pallet>> {
        let predicate = compose(request)?;
        let sql = format!(
            "SELECT pallet_id, product_name, production_date, blocked
             FROM   pallets
             WHERE  {}
             ORDER BY pallet_id",
            predicate.where_sql(),
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(predicate.bindings()), |row| {
            Ok(Pallet {
                id: row.get(0)?,
                cookie: row.get(1)?,
                production_date: row.get(2)?,
                blocked: row.get(3)?,
            })
        })?;
        rows.collect::<rusqlite::Result<_>>().map_err(Into::into)
    }

    /// Block every pallet of a cookie inside the optional production-date
    /// window. Idempotent; returns how many rows the update touched.
    pub fn block(&self, cookie: &str, window: &FilterRequest) -> Result<usize> {
        self.set_blocked(cookie, window, true)
    }

    /// The exact inverse of [`Store::block`] for the same filters.
    pub fn unblock(&self, cookie: &str, window: &FilterRequest) -> Result<usize> {
        self.set_blocked(cookie, window, false)
    }

    fn set_blocked(&self, cookie: &str, window: &FilterRequest, blocked: bool) -> Result<usize> {
        let predicate = compose(&window.with_cookie(cookie))?;
        let sql = format!(
            "UPDATE pallets SET blocked = {} WHERE {}",
            i32::from(blocked),
            predicate.where_sql(),
        );
        let touched = self
            .conn
            .execute(&sql, params_from_iter(predicate.bindings()))?;
        debug!(cookie, blocked, touched, "pallet state updated");
        Ok(touched)
    }
}
