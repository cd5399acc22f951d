//! Customer registry.

use rusqlite::params;
use tracing::debug;

use super::Store;
use crate::core::error::Result;
use crate::core::types::Customer;

impl Store {
    pub fn add_customer(&self, name: &str, address: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO customers (customer_name, customer_address) VALUES (?1, ?2)",
            params![name, address],
        )?;
        debug!(name, "customer registered");
        Ok(())
    }

    pub fn list_customers(&self) -> Result<Vec<Customer>> {
        let mut stmt = self.conn.prepare(
            "SELECT customer_name, customer_address
             FROM   customers
             ORDER BY customer_name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Customer {
                name: row.get(0)?,
                address: row.get(1)?,
            })
        })?;
        rows.collect::<rusqlite::Result<_>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    #[test]
    fn test_add_and_list_customers() {
        let store = Store::open_in_memory().unwrap();
        store
            .add_customer("Kakbak HB", "Degkroken 8, Malmö")
            .unwrap();
        store
            .add_customer("Bullar och bong", "Bakgatan 4, Lund")
            .unwrap();

        let customers = store.list_customers().unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].name, "Bullar och bong");
        assert_eq!(customers[1].address, "Degkroken 8, Malmö");
    }

    #[test]
    fn test_duplicate_customer_rejected() {
        let store = Store::open_in_memory().unwrap();
        store.add_customer("Kakbak HB", "Degkroken 8").unwrap();
        assert!(matches!(
            store.add_customer("Kakbak HB", "Somewhere else"),
            Err(Error::Store(_))
        ));
    }
}
