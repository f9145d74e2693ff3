//! # Seed Data Generator
//!
//! Populates the database with a development menu.
//!
//! ## Usage
//! ```bash
//! # Seed the default menu with 20 units of stock per item
//! cargo run -p bistro-db --bin seed
//!
//! # Custom starting stock
//! cargo run -p bistro-db --bin seed -- --stock 5
//!
//! # Specify database path
//! cargo run -p bistro-db --bin seed -- --db ./data/bistro.db
//! ```
//!
//! Audit settings are read from `BISTRO_AUDIT_POLICY` and
//! `BISTRO_AUDIT_ORDER_DECREMENTS`. Set `RUST_LOG` to change log output.

use std::env;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use bistro_core::NewCatalogItem;
use bistro_db::{AuditConfig, Database, DbConfig};

/// Menu: (category, [(name, description, price_cents)])
const MENU: &[(&str, &[(&str, &str, i64)])] = &[
    (
        "Starters",
        &[
            ("Garlic Bread", "Toasted sourdough, garlic butter", 550),
            ("Arancini", "Saffron risotto balls, aioli", 800),
            ("Soup of the Day", "Ask your server", 650),
            ("Bruschetta", "Tomato, basil, olive oil", 700),
        ],
    ),
    (
        "Mains",
        &[
            ("Burger", "Beef patty, cheddar, pickles", 1000),
            ("Margherita", "Tomato, mozzarella, basil", 1200),
            ("Grilled Salmon", "Lemon butter, greens", 1850),
            ("Mushroom Risotto", "Porcini, parmesan", 1450),
            ("Chicken Parmigiana", "Napoli sauce, chips", 1650),
        ],
    ),
    (
        "Desserts",
        &[
            ("Tiramisu", "Espresso, mascarpone", 750),
            ("Panna Cotta", "Vanilla bean, berries", 700),
            ("Affogato", "Gelato, espresso", 600),
        ],
    ),
    (
        "Drinks",
        &[
            ("Iced Tea", "House brewed", 450),
            ("Lemonade", "Fresh squeezed", 350),
            ("Espresso", "Double shot", 380),
            ("Sparkling Water", "750ml bottle", 500),
        ],
    ),
];

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "info,bistro=debug,sqlx=warn";

fn build_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt().with_env_filter(filter).finish()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    build_subscriber(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut stock: i64 = 20;
    let mut db_path = String::from("./bistro_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--stock" | "-s" => {
                if i + 1 < args.len() {
                    stock = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bistro POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --stock <N>    Starting stock per item (default: 20)");
                println!("  -d, --db <PATH>    Database file path (default: ./bistro_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bistro POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Stock:    {} per item", stock);
    println!();

    let config = DbConfig::new(&db_path).audit(AuditConfig::from_env());
    let db = Database::new(config).await?;

    println!("✓ Connected to database (audit: {})", db.audit_config().policy);
    println!("✓ Migrations applied");

    let existing = db.catalog().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding menu...");

    let mut generated = 0;
    for (category_name, items) in MENU {
        let category = db.catalog().insert_category(category_name).await?;

        for (name, description, price_cents) in items.iter() {
            let item = NewCatalogItem {
                category_id: category.id,
                name: name.to_string(),
                description: Some(description.to_string()),
                price_cents: *price_cents,
                available_qty: stock,
            };

            if let Err(e) = db.catalog().insert_item(&item).await {
                eprintln!("Failed to insert {}: {}", name, e);
                continue;
            }
            generated += 1;
        }

        println!("  {} ({} items)", category_name, items.len());
    }

    println!();
    println!("✓ Seeded {} menu items", generated);

    for category in db.catalog().list_categories().await? {
        let items = db.catalog().list_by_category(&category.name).await?;
        println!("  {:<10} {}", category.name, items.len());
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_default_filter_reaches_subscriber() {
        let subscriber = build_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "bistro_db::pool", Level::DEBUG));
            assert!(tracing::enabled!(target: "other_crate", Level::INFO));
            assert!(!tracing::enabled!(target: "other_crate", Level::DEBUG));
            assert!(!tracing::enabled!(target: "sqlx::query", Level::INFO));
        });
    }

    #[test]
    fn test_custom_filter_overrides_default() {
        let subscriber = build_subscriber(EnvFilter::new("error"));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "bistro_db::pool", Level::ERROR));
            assert!(!tracing::enabled!(target: "bistro_db::pool", Level::DEBUG));
            assert!(!tracing::enabled!(target: "sqlx::query", Level::DEBUG));
        });
    }
}
