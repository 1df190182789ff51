//! # Seed Data Generator
//!
//! Populates the database with a realistic bakery catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p bakery-db --bin seed
//!
//! # Specify database path
//! cargo run -p bakery-db --bin seed -- --db ./data/bakery.db
//!
//! # Cap how many items are inserted
//! cargo run -p bakery-db --bin seed -- --count 20
//! ```
//!
//! ## Generated Catalog
//! Creates items across the shop's categories:
//! - Breads (loaves, baguettes, rolls)
//! - Pastries (croissants, danishes, turnovers)
//! - Cakes (whole cakes, slices, cupcakes)
//! - Cookies & biscuits
//! - Drinks (coffee, tea, juice)
//!
//! Each item gets a deterministic price and starting stock so repeated
//! seeds of a fresh database produce the same catalog.

use std::env;

use bakery_core::NewItem;
use bakery_db::{Database, DbConfig};

/// Catalog entries per category: (category id, unit, names).
const CATALOG: &[(i64, &str, &[&str])] = &[
    (
        1,
        "loaf",
        &[
            "Sourdough Loaf",
            "Rye Loaf",
            "Whole Wheat Loaf",
            "Baguette",
            "Ciabatta",
            "Multigrain Loaf",
            "Brioche Loaf",
            "Focaccia",
        ],
    ),
    (
        2,
        "pcs",
        &[
            "Croissant",
            "Pain au Chocolat",
            "Almond Croissant",
            "Apple Turnover",
            "Cheese Danish",
            "Cinnamon Roll",
            "Morning Bun",
            "Palmier",
        ],
    ),
    (
        3,
        "pcs",
        &[
            "Carrot Cake Slice",
            "Chocolate Cake Slice",
            "Cheesecake Slice",
            "Vanilla Cupcake",
            "Red Velvet Cupcake",
            "Lemon Drizzle Slice",
            "Opera Cake Slice",
            "Banana Bread Slice",
        ],
    ),
    (
        4,
        "pcs",
        &[
            "Chocolate Chip Cookie",
            "Oatmeal Raisin Cookie",
            "Shortbread",
            "Macaron",
            "Biscotti",
            "Gingersnap",
            "Snickerdoodle",
            "Florentine",
        ],
    ),
    (
        5,
        "cup",
        &[
            "Drip Coffee",
            "Espresso",
            "Cappuccino",
            "Latte",
            "Hot Chocolate",
            "Earl Grey Tea",
            "Fresh Orange Juice",
            "Iced Tea",
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = usize::MAX;
    let mut db_path = String::from("./bakery_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(usize::MAX);
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
                println!("Bakery POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Maximum items to insert (default: whole catalog)");
                println!("  -d, --db <PATH>    Database file path (default: ./bakery_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bakery POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing items
    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalog...");

    let mut inserted = 0;
    let start = std::time::Instant::now();

    'outer: for (category_id, unit, names) in CATALOG {
        for (index, name) in names.iter().enumerate() {
            if inserted >= count {
                break 'outer;
            }

            let item = generate_item(*category_id, unit, name, index);
            if let Err(e) = db.items().insert(&item).await {
                eprintln!("Failed to insert {}: {}", item.name, e);
                continue;
            }

            inserted += 1;
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Seeded {} items in {:?}", inserted, elapsed);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single catalog item with deterministic price and stock.
fn generate_item(category_id: i64, unit: &str, name: &str, index: usize) -> NewItem {
    // Price: $1.50 base, stepped per category and position
    let unit_price_cents = 150 + category_id * 100 + (index as i64) * 25;

    // Stock: 6-20 on hand, varying per item
    let quantity = 6 + ((index as i64 * 7 + category_id) % 15);

    NewItem {
        name: name.to_string(),
        description: None,
        category_id: Some(category_id),
        quantity,
        unit: unit.to_string(),
        unit_price_cents,
    }
}
