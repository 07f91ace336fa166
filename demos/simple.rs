//! Basic form encoding.
//!
//! Run with: cargo run --example simple

use serde::Serialize;
use serde_urlform::{to_string, to_writer};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Address {
    street: String,
    city: String,
}

#[derive(Debug, Serialize)]
struct SignUp {
    name: String,
    email: String,
    newsletter: bool,
    referrer: Option<String>,
    address: Address,
}

fn main() -> Result<(), Box<dyn Error>> {
    let form = SignUp {
        name: "Alice Johnson".to_string(),
        email: "alice@example.com".to_string(),
        newsletter: true,
        referrer: None,
        address: Address {
            street: "1 Rue de Rivoli".to_string(),
            city: "Paris".to_string(),
        },
    };

    // Encode to a string
    let body = to_string(&form)?;
    println!("Form body:\n{}\n", body);

    // Or straight into a request buffer
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &form)?;
    assert_eq!(buffer, body.as_bytes());
    println!("✓ Writer output matches ({} bytes)", buffer.len());

    Ok(())
}
