//! # Seed Data Generator
//!
//! Writes a demo company snapshot for development.
//!
//! ## Usage
//! ```bash
//! # Seed the configured snapshot path
//! cargo run -p washer-store --bin seed
//!
//! # Specify snapshot path
//! cargo run -p washer-store --bin seed -- --snapshot ./data/company.json
//!
//! # Load settings from a config file
//! cargo run -p washer-store --bin seed -- --config ./store.toml
//! ```
//!
//! ## Generated Data
//! - One washer per (brand, model) below, with stock 10 - 24
//! - A handful of customers
//! - A few purchases so listings and the sales summary have content

use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use washer_core::{Company, InventoryOutcome, Money};
use washer_store::{init_tracing, SnapshotStore, StoreConfig};

/// Brands and their models, with base price in cents.
const WASHERS: &[(&str, &[(&str, i64)])] = &[
    ("Acme", &[("X100", 49999), ("X200", 59999), ("X300 Steam", 74999)]),
    ("Zeta", &[("Z1", 30000), ("Z2 Compact", 34950)]),
    ("Hydra", &[("Front 8kg", 62900), ("Front 10kg", 71900), ("Top 7kg", 45900)]),
    ("Nimbus", &[("N-500", 39999)]),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("Jane Doe", "555-1212"),
    ("John Roe", "555-3434"),
    ("Ada Park", "555-0199"),
    ("Sam Lee", "555-7788"),
];

/// (customer index, brand, model, quantity)
const PURCHASES: &[(usize, &str, &str, i64)] = &[
    (0, "Acme", "X100", 3),
    (1, "Zeta", "Z1", 1),
    (2, "Hydra", "Front 8kg", 2),
    (0, "Nimbus", "N-500", 1),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut snapshot_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--snapshot" | "-s" => {
                if i + 1 < args.len() {
                    snapshot_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Washer Company Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --snapshot <PATH>  Snapshot file to write (default: from config)");
                println!("  -c, --config <PATH>    store.toml to load (default: platform config dir)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut config = StoreConfig::load(config_path)?;
    if let Some(path) = snapshot_path {
        config.snapshot_path = path;
        config.validate()?;
    }
    let store = SnapshotStore::new(config);

    println!("Washer Company Seed Data Generator");
    println!("==================================");
    println!("Snapshot: {}", store.path().display());
    println!();

    if store.exists() {
        println!("Snapshot already exists. Skipping seed to avoid overwriting it.");
        println!("  Delete the file to regenerate.");
        return Ok(());
    }

    let company = build_demo_company()?;
    store.persist(&company)?;

    let summary = company.sales_summary();
    println!("Washers:   {}", company.catalogue().len());
    println!("Customers: {}", company.customers().len());
    println!("Purchases: {} ({} units, {})", summary.purchases, summary.units, summary.revenue);
    println!();
    println!("Seed complete!");

    Ok(())
}

/// Builds the demo company through the public facade.
fn build_demo_company() -> Result<Company, Box<dyn std::error::Error>> {
    let mut company = Company::new();

    for (brand_idx, (brand, models)) in WASHERS.iter().enumerate() {
        for (model_idx, (model, cents)) in models.iter().enumerate() {
            company.add_washer(brand, model, Money::from_cents(*cents))?;

            let quantity = 10 + ((brand_idx * 7 + model_idx * 5) % 15) as i64;
            let outcome = company.add_inventory(brand, model, quantity);
            if outcome != InventoryOutcome::OperationCompleted {
                warn!(brand = %brand, model = %model, %outcome, "Stock not added");
            }
        }
    }

    let ids: Vec<String> = CUSTOMERS
        .iter()
        .map(|(name, phone)| company.add_customer(name, phone).id.to_string())
        .collect();

    for (customer_idx, brand, model, quantity) in PURCHASES {
        let Some(id) = ids.get(*customer_idx) else {
            continue;
        };
        match company.purchase_washer(id, brand, model, *quantity) {
            Ok(washer) => info!(customer_id = %id, washer = %washer, "Demo purchase recorded"),
            Err(e) => warn!(customer_id = %id, error = %e, "Demo purchase skipped"),
        }
    }

    Ok(company)
}
