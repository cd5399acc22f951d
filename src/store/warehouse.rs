//! Warehouse ledger — raw-material registration and delivery bookkeeping.

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::Store;
use crate::core::error::{Error, Result};
use crate::core::types::Material;

impl Store {
    /// Register a new raw material with an empty running total.
    pub fn add_ingredient(&self, ingredient: &str, unit: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO materials (ingredient_name, unit) VALUES (?1, ?2)",
            params![ingredient, unit],
        )?;
        debug!(ingredient, unit, "ingredient registered");
        Ok(())
    }

    /// Every material with its current stock level.
    pub fn list_ingredients(&self) -> Result<Vec<Material>> {
        let mut stmt = self.conn.prepare(
            "SELECT ingredient_name, total_amount, unit
             FROM   materials
             ORDER BY ingredient_name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Material {
                ingredient: row.get(0)?,
                amount: row.get(1)?,
                unit: row.get(2)?,
            })
        })?;
        rows.collect::<rusqlite::Result<_>>().map_err(Into::into)
    }

    /// Record a delivery for a registered ingredient: bump the running total
    /// and overwrite the last-delivery metadata in one atomic statement,
    /// then re-read the new level inside the same transaction so a
    /// concurrent delivery cannot make the reported total stale.
    ///
    /// Delivering to an unregistered ingredient updates zero rows and is
    /// rejected without creating one.
    pub fn add_delivery(
        &mut self,
        ingredient: &str,
        quantity: i64,
        delivered_at: &str,
    ) -> Result<Material> {
        let tx = self.conn.transaction()?;

        let updated = tx.execute(
            "UPDATE materials
             SET    total_amount = total_amount + ?1,
                    last_delivered = ?2,
                    last_delivered_amount = ?1
             WHERE  ingredient_name = ?3",
            params![quantity, delivered_at, ingredient],
        )?;
        if updated == 0 {
            return Err(Error::UnknownIngredient(ingredient.to_string()));
        }

        // Re-read under the same transaction; a missing row here is a
        // consistency failure, never a silent zero.
        let material = tx
            .query_row(
                "SELECT ingredient_name, total_amount, unit
                 FROM   materials
                 WHERE  ingredient_name = ?1",
                params![ingredient],
                |row| {
                    Ok(Material {
                        ingredient: row.get(0)?,
                        amount: row.get(1)?,
                        unit: row.get(2)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| Error::Inconsistent(ingredient.to_string()))?;

        tx.commit()?;
        debug!(ingredient, quantity, total = material.amount, "delivery recorded");
        Ok(material)
    }
}
