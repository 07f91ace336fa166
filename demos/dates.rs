//! Date encoding strategies.
//!
//! Run with: cargo run --example dates

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;
use serde_urlform::{to_string_with_options, DateEncoding, FormOptions};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Booking {
    room: u32,
    #[serde(with = "serde_urlform::date")]
    check_in: DateTime<Utc>,
    #[serde(with = "serde_urlform::date::option")]
    check_out: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct Day {
    year: i32,
    month: u32,
    day: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let booking = Booking {
        room: 12,
        check_in: Utc.with_ymd_and_hms(2024, 7, 1, 14, 0, 0).unwrap(),
        check_out: Some(Utc.with_ymd_and_hms(2024, 7, 4, 10, 30, 0).unwrap()),
    };

    println!("Seconds since 1970 (default):");
    println!("{}\n", to_string_with_options(&booking, &FormOptions::new())?);

    println!("ISO 8601:");
    let iso = FormOptions::new().with_date_encoding(DateEncoding::Iso8601);
    println!("{}\n", to_string_with_options(&booking, &iso)?);

    // A custom strategy can write any serializable value in place of the date
    println!("Custom (split into parts):");
    let parts = FormOptions::new().with_date_encoding(DateEncoding::custom(|date, encoder| {
        encoder.encode(&Day {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        })
    }));
    println!("{}\n", to_string_with_options(&booking, &parts)?);

    // User info reaches the callback
    println!("Custom (local day, offset from user info):");
    let local = FormOptions::new()
        .with_user_info_entry("utc_offset_hours", -10_i64)
        .with_date_encoding(DateEncoding::custom(|date, encoder| {
            let hours = encoder
                .user_info()
                .get::<i64>("utc_offset_hours")
                .copied()
                .unwrap_or(0);
            let local = *date + chrono::Duration::hours(hours);
            encoder.encode(&local.format("%Y-%m-%d").to_string())
        }));
    println!("{}", to_string_with_options(&booking, &local)?);

    Ok(())
}
