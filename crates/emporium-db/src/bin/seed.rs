//! # Catalog Seeder
//!
//! Populates the database with the starter catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./emporium.db
//! cargo run -p emporium-db --bin seed
//!
//! # Specify database path
//! cargo run -p emporium-db --bin seed -- --db ./data/emporium.db
//! ```

use std::env;

use emporium_core::Money;
use emporium_db::migrations::migration_status;
use emporium_db::{Database, DbConfig};

/// Starter catalog: (name, price in cents, description).
const CATALOG: &[(&str, i64, &str)] = &[
    ("Round Widget", 299, "A widget that is round"),
    ("Square Widget", 199, "A widget that is square"),
    ("Triangle Widget", 249, "A widget with three sides"),
    ("Hexagon Widget", 399, "A widget with six sides"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./emporium.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Emporium Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./emporium.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Emporium Catalog Seeder");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let (total, applied) = migration_status(db.pool()).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied ({}/{})", applied, total);

    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    for (name, cents, description) in CATALOG {
        let item = db
            .items()
            .insert(name, Money::from_minor(*cents), description)
            .await?;
        println!("  #{} {} ({})", item.id, item.name, item.price);
    }

    println!();
    println!("✓ Seeded {} items", CATALOG.len());

    db.close().await;
    Ok(())
}
