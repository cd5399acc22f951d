//! Domain types shared between the decoders, the store, and the CLI.
//!
//! All types derive Serialize/Deserialize so list commands can print them as
//! JSON directly.

use serde::{Deserialize, Serialize};

/// A wholesale customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub address: String,
}

/// A raw material as tracked by the warehouse ledger. `amount` is the
/// running total of everything delivered since the last reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub ingredient: String,
    pub amount: i64,
    pub unit: String,
}

/// One ingredient line of a cookie's recipe, as decoded from a creation
/// payload. Every entry of one payload carries the same cookie name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub cookie: String,
    pub ingredient: String,
    pub amount: i64,
}

/// A recipe line joined with the ingredient's unit, as reported back to
/// callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub ingredient: String,
    pub amount: i64,
    pub unit: String,
}

/// A cookie product and how many pallets of it have been produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub pallets: i64,
}

/// A produced batch of one cookie. `blocked` flips only through the explicit
/// block/unblock operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pallet {
    pub id: i64,
    pub cookie: String,
    pub production_date: String,
    pub blocked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pallet_serializes_with_blocked_flag() {
        let pallet = Pallet {
            id: 7,
            cookie: "Tango".to_string(),
            production_date: "2024-03-01T08:00:00".to_string(),
            blocked: false,
        };
        let json = serde_json::to_string(&pallet).unwrap();
        assert!(json.contains("\"blocked\":false"));
        assert!(json.contains("\"id\":7"));
    }

    #[test]
    fn test_material_roundtrip() {
        let m = Material {
            ingredient: "Flour".to_string(),
            amount: 500_000,
            unit: "g".to_string(),
        };
        let json = serde_json::to_string(&m).unwrap();
        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
