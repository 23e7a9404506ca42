//! Tuning output and input with SerializeOptions and ParseOptions.
//!
//! Run with: cargo run --example custom_options

use serde_colson::{
    colson, parse, parse_with_options, serialize, NonFinitePolicy, ParseOptions,
    SerializeOptions,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let value = colson!({
        "zeta": "último",
        "alpha": [1, 2.5],
        "ratio": (f64::NAN)
    });

    // Non-finite numbers are refused unless a policy says otherwise.
    if let Err(err) = serialize(&value, &SerializeOptions::new()) {
        println!("Default options: {}\n", err);
    }

    let options = SerializeOptions::pretty()
        .with_indent(4)
        .with_sort_keys(true)
        .with_escape_non_ascii(true)
        .with_non_finite(NonFinitePolicy::Nullify);
    println!("Sorted, escaped, nullified:\n{}\n", serialize(&value, &options)?);

    // The strict grammar is the default; extensions are opt-in.
    let lenient = "{\n  // retry budget\n  retries: 3,\n  hosts: [\"a\", \"b\",],\n}";
    if let Err(err) = parse(lenient) {
        println!("Strict parse: {}", err);
    }
    let parsed = parse_with_options(lenient, &ParseOptions::relaxed())?;
    println!("Relaxed parse: {}\n", parsed);

    let shallow = ParseOptions::new().with_max_depth(2);
    if let Err(err) = parse_with_options("[[[1]]]", &shallow) {
        println!("Depth limit: {}", err);
    }

    Ok(())
}
