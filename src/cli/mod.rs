//! CLI subcommands — one per store operation, plus init/reset admin.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Subcommand;
use serde::Serialize;

use crate::core::config;
use crate::core::error::Result;
use crate::core::filter::FilterRequest;
use crate::core::payload;
use crate::store::Store;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database file and schema
    Init,

    /// Clear all customers, ingredients, cookies, and pallets
    Reset,

    /// Register a customer
    AddCustomer { name: String, address: String },

    /// List all customers
    Customers,

    /// Register a raw material
    AddIngredient { ingredient: String, unit: String },

    /// Record a delivery and print the new stock level
    Deliver {
        ingredient: String,
        quantity: i64,

        /// Delivery timestamp (default: now)
        #[arg(long)]
        at: Option<String>,
    },

    /// List all materials with their stock levels
    Ingredients,

    /// Create a cookie from a creation payload (file, or stdin when omitted)
    AddCookie { file: Option<PathBuf> },

    /// List all cookies with their pallet counts
    Cookies,

    /// Print the recipe of one cookie
    Recipe { cookie: String },

    /// Produce a pallet of a cookie
    AddPallet {
        cookie: String,

        /// Production timestamp (default: now)
        #[arg(long)]
        produced_at: Option<String>,
    },

    /// List pallets, optionally filtered
    Pallets {
        #[arg(long)]
        cookie: Option<String>,
        #[arg(long)]
        after: Option<String>,
        #[arg(long)]
        before: Option<String>,
    },

    /// Block pallets of a cookie, optionally inside a date window
    Block {
        cookie: String,
        #[arg(long)]
        after: Option<String>,
        #[arg(long)]
        before: Option<String>,
    },

    /// Unblock pallets of a cookie, optionally inside a date window
    Unblock {
        cookie: String,
        #[arg(long)]
        after: Option<String>,
        #[arg(long)]
        before: Option<String>,
    },
}

/// Resolve the database path (`--db` wins over the config file) and open
/// the store.
fn open_store(db: Option<PathBuf>, config_path: &Path) -> Result<Store> {
    let db_path = match db {
        Some(path) => path,
        None => config::load_config_file(config_path)?.db_path,
    };
    Store::open(&db_path)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Dispatch a CLI command against the configured database.
pub fn dispatch(db: Option<PathBuf>, config_path: &Path, cmd: Commands) -> Result<()> {
    let mut store = open_store(db, config_path)?;

    match cmd {
        Commands::Init => {
            println!("database ready");
            Ok(())
        }
        Commands::Reset => {
            store.reset()?;
            println!("database cleared");
            Ok(())
        }
        Commands::AddCustomer { name, address } => {
            store.add_customer(&name, &address)?;
            println!("added customer '{name}'");
            Ok(())
        }
        Commands::Customers => print_json(&store.list_customers()?),
        Commands::AddIngredient { ingredient, unit } => {
            store.add_ingredient(&ingredient, &unit)?;
            println!("added ingredient '{ingredient}' ({unit})");
            Ok(())
        }
        Commands::Deliver {
            ingredient,
            quantity,
            at,
        } => {
            let delivered_at = at.unwrap_or_else(now);
            let material = store.add_delivery(&ingredient, quantity, &delivered_at)?;
            print_json(&material)
        }
        Commands::Ingredients => print_json(&store.list_ingredients()?),
        Commands::AddCookie { file } => {
            let body = read_payload(file.as_deref())?;
            let entries = payload::decode_cookie_payload(&body)?;
            let cookie = store.add_cookie(&entries)?;
            println!("created cookie '{}' ({} recipe lines)", cookie, entries.len());
            Ok(())
        }
        Commands::Cookies => print_json(&store.list_cookies()?),
        Commands::Recipe { cookie } => print_json(&store.get_recipe(&cookie)?),
        Commands::AddPallet {
            cookie,
            produced_at,
        } => {
            let id = match produced_at {
                Some(at) => store.add_pallet_produced_at(&cookie, &at)?,
                None => store.add_pallet(&cookie)?,
            };
            println!("produced pallet {id} of '{cookie}'");
            Ok(())
        }
        Commands::Pallets {
            cookie,
            after,
            before,
        } => print_json(&store.list_pallets(&FilterRequest {
            cookie,
            after,
            before,
        })?),
        Commands::Block {
            cookie,
            after,
            before,
        } => {
            let window = FilterRequest {
                cookie: None,
                after,
                before,
            };
            let touched = store.block(&cookie, &window)?;
            println!("blocked {touched} pallet(s) of '{cookie}'");
            Ok(())
        }
        Commands::Unblock {
            cookie,
            after,
            before,
        } => {
            let window = FilterRequest {
                cookie: None,
                after,
                before,
            };
            let touched = store.unblock(&cookie, &window)?;
            println!("unblocked {touched} pallet(s) of '{cookie}'");
            Ok(())
        }
    }
}

fn read_payload(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}
