//! Cookie catalogue — products and their recipes.

use rusqlite::params;
use tracing::info;

use super::{is_fk_violation, Store};
use crate::core::error::{DecodeError, Error, Result};
use crate::core::types::{Cookie, RecipeEntry, RecipeLine};

impl Store {
    /// Create a cookie: the product row plus every recipe entry, committed
    /// as a unit. A failing entry rolls back the product row too, so no
    /// orphaned product without a recipe can appear.
    ///
    /// Every entry's ingredient must already be registered in the
    /// warehouse, and every entry must carry the same cookie name.
    pub fn add_cookie(&mut self, entries: &[RecipeEntry]) -> Result<String> {
        let cookie = entries
            .first()
            .map(|e| e.cookie.clone())
            .ok_or(Error::Decode(DecodeError::EmptyRecipe))?;
        if let Some(stray) = entries.iter().find(|e| e.cookie != cookie) {
            return Err(Error::MixedRecipe(cookie, stray.cookie.clone()));
        }

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO products (product_name) VALUES (?1)",
            params![cookie],
        )?;
        for entry in entries {
            if let Err(e) = tx.execute(
                "INSERT INTO recipe_entries (product_name, ingredient_name, amount)
                 VALUES (?1, ?2, ?3)",
                params![cookie, entry.ingredient, entry.amount],
            ) {
                return Err(if is_fk_violation(&e) {
                    Error::UnknownIngredient(entry.ingredient.clone())
                } else {
                    e.into()
                });
            }
        }
        tx.commit()?;

        info!(cookie, entries = entries.len(), "cookie created");
        Ok(cookie)
    }

    /// Every cookie with the number of pallets produced of it.
    pub fn list_cookies(&self) -> Result<Vec<Cookie>> {
        let mut stmt = self.conn.prepare(
            "WITH pallet_counts AS (
                 SELECT   product_name, count(*) AS pallets
                 FROM     pallets
                 GROUP BY product_name
             )
             SELECT          product_name, coalesce(pallets, 0)
             FROM            products
             LEFT OUTER JOIN pallet_counts USING (product_name)
             ORDER BY        product_name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Cookie {
                name: row.get(0)?,
                pallets: row.get(1)?,
            })
        })?;
        rows.collect::<rusqlite::Result<_>>().map_err(Into::into)
    }

    /// The recipe of one cookie, each line joined with the ingredient's
    /// unit, in the order the lines were recorded.
    pub fn get_recipe(&self, cookie: &str) -> Result<Vec<RecipeLine>> {
        let known: i64 = self.conn.query_row(
            "SELECT count(*) FROM products WHERE product_name = ?1",
            params![cookie],
            |row| row.get(0),
        )?;
        if known == 0 {
            return Err(Error::UnknownProduct(cookie.to_string()));
        }

        let mut stmt = self.conn.prepare(
            "SELECT ingredient_name, amount, unit
             FROM   recipe_entries
             JOIN   materials USING (ingredient_name)
             WHERE  product_name = ?1
             ORDER BY recipe_entries.rowid",
        )?;
        let rows = stmt.query_map(params![cookie], |row| {
            Ok(RecipeLine {
                ingredient: row.get(0)?,
                amount: row.get(1)?,
                unit: row.get(2)?,
            })
        })?;
        rows.collect::<rusqlite::Result<_>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(cookie: &str, ingredient: &str, amount: i64) -> RecipeEntry {
        RecipeEntry {
            cookie: cookie.to_string(),
            ingredient: ingredient.to_string(),
            amount,
        }
    }

    fn store_with_pantry() -> Store {
        let store = Store::open_in_memory().unwrap();
        for (name, unit) in [("Flour", "g"), ("Sugar", "g"), ("Egg whites", "ml")] {
            store.add_ingredient(name, unit).unwrap();
        }
        store
    }

    #[test]
    fn test_add_cookie_and_read_recipe_back() {
        let mut store = store_with_pantry();
        store
            .add_cookie(&[
                entry("Choco", "Flour", 200),
                entry("Choco", "Sugar", 50),
            ])
            .unwrap();

        let recipe = store.get_recipe("Choco").unwrap();
        assert_eq!(
            recipe,
            vec![
                RecipeLine {
                    ingredient: "Flour".to_string(),
                    amount: 200,
                    unit: "g".to_string()
                },
                RecipeLine {
                    ingredient: "Sugar".to_string(),
                    amount: 50,
                    unit: "g".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unknown_ingredient_rolls_back_whole_cookie() {
        let mut store = store_with_pantry();
        let err = store
            .add_cookie(&[
                entry("Choco", "Flour", 200),
                entry("Choco", "Plutonium", 1),
            ])
            .unwrap_err();
        assert!(matches!(err, Error::UnknownIngredient(name) if name == "Plutonium"));

        // The product row must not survive the failed entry.
        assert!(store.list_cookies().unwrap().is_empty());
        assert!(matches!(
            store.get_recipe("Choco"),
            Err(Error::UnknownProduct(_))
        ));
    }

    #[test]
    fn test_empty_entry_list_rejected() {
        let mut store = store_with_pantry();
        let err = store.add_cookie(&[]).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode(DecodeError::EmptyRecipe)
        ));
    }

    #[test]
    fn test_mixed_cookie_names_rejected() {
        let mut store = store_with_pantry();
        let err = store
            .add_cookie(&[
                entry("Choco", "Flour", 200),
                entry("Tango", "Sugar", 50),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MixedRecipe(first, stray) if first == "Choco" && stray == "Tango"
        ));

        // Nothing was written.
        assert!(store.list_cookies().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_cookie_rejected() {
        let mut store = store_with_pantry();
        store.add_cookie(&[entry("Choco", "Flour", 200)]).unwrap();
        let err = store.add_cookie(&[entry("Choco", "Sugar", 50)]).unwrap_err();
        assert!(matches!(err, Error::Store(_)));
    }

    #[test]
    fn test_list_cookies_counts_pallets() {
        let mut store = store_with_pantry();
        store.add_cookie(&[entry("Choco", "Flour", 200)]).unwrap();
        store
            .add_cookie(&[entry("Meringue", "Egg whites", 100)])
            .unwrap();
        store.add_pallet("Choco").unwrap();
        store.add_pallet("Choco").unwrap();

        let cookies = store.list_cookies().unwrap();
        assert_eq!(
            cookies,
            vec![
                Cookie {
                    name: "Choco".to_string(),
                    pallets: 2
                },
                Cookie {
                    name: "Meringue".to_string(),
                    pallets: 0
                },
            ]
        );
    }

    #[test]
    fn test_get_recipe_for_unknown_cookie() {
        let store = store_with_pantry();
        assert!(matches!(
            store.get_recipe("Ghost"),
            Err(Error::UnknownProduct(name)) if name == "Ghost"
        ));
    }
}
