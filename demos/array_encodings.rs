//! Comparing the array encoding policies.
//!
//! Run with: cargo run --example array_encodings

use serde::Serialize;
use serde_urlform::{to_string_with_options, ArrayEncoding, FormOptions};
use std::error::Error;

#[derive(Debug, Serialize)]
struct LineItem {
    sku: String,
    qty: u32,
}

#[derive(Debug, Serialize)]
struct Filter {
    tags: Vec<String>,
    sizes: Vec<u32>,
    items: Vec<LineItem>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = Filter {
        tags: vec!["new".to_string(), "on sale".to_string()],
        sizes: vec![38, 40, 42],
        items: vec![
            LineItem {
                sku: "A-1".to_string(),
                qty: 2,
            },
            LineItem {
                sku: "B-7".to_string(),
                qty: 1,
            },
        ],
    };

    let policies = [
        ("Bracket (default)", ArrayEncoding::Bracket),
        ("Repeated values", ArrayEncoding::Values),
        ("Comma separated", ArrayEncoding::Separator(',')),
    ];

    for (label, policy) in policies {
        let options = FormOptions::new().with_array_encoding(policy);
        println!("{}:", label);
        println!("{}\n", to_string_with_options(&filter, &options)?);
    }

    // Line items always keep their index, whatever the policy
    Ok(())
}
