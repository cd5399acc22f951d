//! SQLite store — the explicitly owned connection every operation goes
//! through.
//!
//! The handle is constructed once and passed to each component call; there
//! is no process-wide connection. All operations are synchronous, one
//! statement (or one transaction) per call, and failures are reported
//! immediately — nothing is retried.

mod cookies;
mod customers;
mod pallets;
mod warehouse;

use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::core::error::Result;

/// Logical tables: warehouse ledger, product catalogue, recipe lines,
/// produced pallets, and the customer registry.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS customers (
    customer_name    TEXT PRIMARY KEY,
    customer_address TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS materials (
    ingredient_name       TEXT PRIMARY KEY,
    unit                  TEXT NOT NULL,
    total_amount          INTEGER NOT NULL DEFAULT 0 CHECK (total_amount >= 0),
    last_delivered        TEXT,
    last_delivered_amount INTEGER
);

CREATE TABLE IF NOT EXISTS products (
    product_name TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS recipe_entries (
    product_name    TEXT NOT NULL REFERENCES products (product_name),
    ingredient_name TEXT NOT NULL REFERENCES materials (ingredient_name),
    amount          INTEGER NOT NULL CHECK (amount > 0),
    PRIMARY KEY (product_name, ingredient_name)
);

CREATE TABLE IF NOT EXISTS pallets (
    pallet_id       INTEGER PRIMARY KEY AUTOINCREMENT,
    product_name    TEXT NOT NULL REFERENCES products (product_name),
    production_date TEXT NOT NULL,
    blocked         INTEGER NOT NULL DEFAULT 0
);
";

/// Owned handle to the production-tracking database.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file, enable foreign keys, and make
    /// sure the schema exists. Parent directories are created as needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let store = Self::init(Connection::open(path)?)?;
        info!(path = %path.display(), "store opened");
        Ok(store)
    }

    /// An in-memory database with the same schema. Used by tests and
    /// throwaway tooling.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Clear all state unconditionally. Foreign-key checks are deferred to
    /// commit so the deletes need not follow dependency order; the deferral
    /// ends with the transaction, so an early failure cannot leave the
    /// connection unchecked.
    pub fn reset(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.pragma_update(None, "defer_foreign_keys", true)?;
        for table in [
            "customers",
            "recipe_entries",
            "pallets",
            "products",
            "materials",
        ] {
            tx.execute(&format!("DELETE FROM {table}"), [])?;
        }
        tx.commit()?;
        info!("store reset");
        Ok(())
    }
}

/// True when the statement failed on a foreign-key constraint, i.e. the
/// request referenced a row that does not exist.
pub(crate) fn is_fk_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}
