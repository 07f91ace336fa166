//! Form Encoding Reference
//!
//! This module documents the output produced by this library. It contains no
//! code.
//!
//! # Overview
//!
//! A value is flattened into `key=value` pairs joined by `&`. Nesting is
//! expressed with bracketed key segments, the convention understood by most
//! web frameworks (Rails, PHP, Express `qs`, Vapor).
//!
//! # Keys
//!
//! A key path `[p0, p1, ..., pn]` is written as `p0[p1]...[pn]`. Each segment
//! is percent-encoded on its own; the brackets themselves are literal.
//!
//! ```text
//! user[name]=Ann
//! user[address][city]=Paris
//! items[0][sku]=A1
//! ```
//!
//! Struct fields and map entries keep the order in which they were visited.
//! With [`FormOptions::stable_key_order`](crate::FormOptions) every level is
//! sorted by key instead, so equal values always produce identical bytes.
//!
//! # Values
//!
//! | Rust value | Text |
//! |------------|------|
//! | integers | decimal, `-42` |
//! | `f32`, `f64` | shortest round-trip decimal, `2`, `0.1` |
//! | `bool` | `true` / `false` |
//! | `char`, `&str`, `String` | itself |
//! | unit enum variant | variant name |
//! | decimal and URL types | their string form |
//! | [`Date`](crate::date::Date) | see *Dates* |
//! | `None`, `()` | nothing is written |
//!
//! Enum variants with data are externally tagged: `Shape::Circle { r: 1 }`
//! at key `shape` becomes `shape[Circle][r]=1`.
//!
//! # Percent-encoding
//!
//! ASCII letters, digits and `*-._` are written as-is. Every other character
//! is replaced by `%XX` for each of its UTF-8 bytes. Spaces become `%20`,
//! never `+`.
//!
//! # Arrays
//!
//! Scalar elements follow [`ArrayEncoding`](crate::ArrayEncoding):
//!
//! | Policy | `tags = ["a", "b"]` |
//! |--------|---------------------|
//! | `Bracket` (default) | `tags[]=a&tags[]=b` |
//! | `Values` | `tags=a&tags=b` |
//! | `Separator(',')` | `tags=a,b` |
//!
//! With `Separator`, items are encoded first and then joined with the literal
//! separator; `&`, `=` and `%` are the exception and are written as `%26`,
//! `%3D` and `%25`. An empty array writes nothing under `Bracket` and
//! `Values`, and `tags=` under `Separator`. The same empty value appears for
//! an array whose elements are all structured: `items=&items[0][x]=1`.
//!
//! Elements that have fields of their own are always written under their
//! index, whatever the policy:
//!
//! ```text
//! items[0][x]=1&items[1][x]=2
//! ```
//!
//! Elements that are themselves flat arrays collapse into the parent under
//! `Values` and `Separator`, and keep their index under `Bracket`
//! (`grid[0][]=1`).
//!
//! Absent elements (`None`) are skipped and do not consume an index.
//!
//! # Dates
//!
//! | Strategy | `2024-01-15T10:30:00.5Z` |
//! |----------|---------------------------|
//! | `SecondsSince1970` (default) | `1705314600.5` |
//! | `Iso8601` | `2024-01-15T10%3A30%3A00Z` |
//! | `Custom` | whatever the callback writes |
//!
//! # Top-level values
//!
//! A top-level scalar, or a top-level array under `Values`/`Separator`, has
//! no key. Its values are written bare: `1&2&3`. As query items these
//! become names without values.
