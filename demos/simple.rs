//! Basic ColSON serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_colson::{from_str, to_string, to_string_pretty};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
    score: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            score: 9.0,
        },
        User {
            id: 43,
            name: "Bob \"the builder\" Smith".to_string(),
            email: "bob@example.com".to_string(),
            score: 7.25,
        },
    ];

    let compact = to_string(&users)?;
    println!("Compact:\n{}\n", compact);

    // Floats keep their decimal point, so `9.0` reads back as a float.
    println!("Pretty:\n{}\n", to_string_pretty(&users)?);

    let users_back: Vec<User> = from_str(&compact)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    Ok(())
}
