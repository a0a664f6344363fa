//! fieldbind-path — dotted/bracket field paths over JSON records.
//!
//! A path like `"openGraph.video.width"` or `"images[0]"` addresses one value
//! inside an arbitrarily shaped `serde_json::Value` tree. Reads are
//! miss-tolerant (a shape mismatch resolves to a default, never an error);
//! writes create the containers the path calls for, so a single declarative
//! field list can drive both an edit form and a read-only view over records
//! whose shape is never declared up front.
//!
//! # Example
//!
//! ```
//! use fieldbind_path::{get, parse_path, set, TypeHint};
//! use serde_json::json;
//!
//! let path = parse_path("twitter.player_width").unwrap();
//!
//! // Reads never fail on missing data.
//! assert_eq!(get(&json!({}), &path), None);
//!
//! // Writes build the missing containers and coerce per hint.
//! let record = set(&json!({}), &path, json!("480"), Some(TypeHint::Number));
//! assert_eq!(record, json!({"twitter": {"player_width": 480}}));
//! assert_eq!(get(&record, &path), Some(&json!(480)));
//! ```

pub mod get;
pub mod parse;
pub mod set;
pub mod types;

pub use get::{get, get_or};
pub use parse::{parse_path, ParseError};
pub use set::{remove, set, set_in_place, TypeHint};
pub use types::{Path, Segment};
