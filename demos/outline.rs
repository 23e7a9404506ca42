//! Reading and writing the line-oriented outline dialect.
//!
//! Run with: cargo run --example outline

use serde_colson::{colson, outline, to_string_pretty, OutlineOptions};
use std::error::Error;

const INVENTORY: &str = "\
:: Inventory export
:::
    store :: Main Street
    open :: True
    rating :: 4.5
    items ::
        :::
            sku :: A-1
            qty :: 3
        :::
            sku :: \\007\\
            qty :: 0
";

fn main() -> Result<(), Box<dyn Error>> {
    let inventory = outline::from_str(INVENTORY)?;
    println!("Outline read as notation:\n{}\n", to_string_pretty(&inventory)?);

    // Strings that would re-read as keywords or numbers are wrapped in backslashes.
    let settings = colson!({
        "name": "demo",
        "mode": "True",
        "version": "1.0",
        "paths": ["/usr/local", " padded "],
        "retries": 3
    });
    let options = OutlineOptions::new().with_tab(2);
    let text = outline::to_string_with_options(&settings, &options)?;
    println!("Written as outline:\n{}\n", text);

    assert_eq!(outline::from_str_with_options(&text, &options)?, settings);
    println!("✓ Round-trip successful");

    match outline::from_str(":::\n    a :: 1\n            b :: 2") {
        Ok(value) => println!("unexpected: {}", value),
        Err(err) => println!("Malformed input: {}", err),
    }

    Ok(())
}
