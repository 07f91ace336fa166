//! Building URL query items with a reusable encoder.
//!
//! Run with: cargo run --example query_items

use serde::Serialize;
use serde_urlform::{query, Encoder, FormOptions, QueryItem, UserInfo};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Search {
    q: String,
    page: u32,
    per_page: Option<u32>,
    languages: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let encoder = Encoder::new(FormOptions::sorted());

    let search = Search {
        q: "serde form".to_string(),
        page: 2,
        per_page: None,
        languages: vec!["rust".to_string(), "c++".to_string()],
    };

    println!("Query items:");
    let items = encoder.encode_query_items(&search)?;
    for item in &items {
        println!("  {:<14} {:?}", item.name, item.value);
    }

    // Append to items that are already on the request
    let mut request = vec![QueryItem::new("api_key", "demo")];
    encoder.encode_into(&search, &mut request, &UserInfo::new())?;

    let url = format!("https://api.example.com/search?{}", query::join(&request));
    println!("\nURL:\n{}", url);

    assert_eq!(query::join(&items), encoder.encode(&search)?);
    println!("\n✓ Joined items match the string form");

    Ok(())
}
