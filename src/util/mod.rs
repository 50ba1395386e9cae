//! Utility functions shared by the namespace handlers.
//!
//! This module provides reusable utilities for:
//!
//! - **Dates**: permissive parsing of RFC 822 / ISO-8601-ish feed dates into
//!   canonical ISO-8601 strings
//! - **Text processing**: HTML escaping, keyword lists, RSS author strings
//!
//! # Examples
//!
//! ```
//! use feednorm::util::{escape_html, normalize_date};
//!
//! assert_eq!(
//!     normalize_date("Mon, 01 Jan 2024 00:00:00 GMT").as_deref(),
//!     Some("2024-01-01T00:00:00+00:00")
//! );
//! assert_eq!(escape_html("a < b"), "a &lt; b");
//! ```

mod date;
mod text;

pub use date::{normalize_date, parse_date};
pub use text::{escape_html, split_keywords, split_rss_person};
