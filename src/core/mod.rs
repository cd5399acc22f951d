//! Core translation logic — request filters, payload decoding, domain
//! types. Nothing in this tree touches the database.

pub mod config;
pub mod error;
pub mod filter;
pub mod payload;
pub mod types;
