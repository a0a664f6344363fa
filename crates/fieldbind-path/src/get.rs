//! Miss-tolerant reads.
//!
//! Missing intermediate data is not an error: a read that runs off the shape
//! of the record resolves to the caller's default. The only values a caller
//! ever sees are the exact terminal value or that default.

use crate::types::{Path, Segment};
use serde_json::Value;

/// Resolve `path` against `record`.
///
/// Returns `None` on any shape mismatch: a missing key, a non-object
/// intermediate, an absent or non-array named array, or an out-of-range
/// index. Never fails otherwise; the terminal value is returned verbatim,
/// including nested objects and arrays.
///
/// # Example
///
/// ```
/// use fieldbind_path::{get, parse_path};
/// use serde_json::json;
///
/// let record = json!({"twitter": {"image": "http://x/y.png"}});
/// let path = parse_path("twitter.image").unwrap();
/// assert_eq!(get(&record, &path), Some(&json!("http://x/y.png")));
///
/// let miss = parse_path("twitter.player_width").unwrap();
/// assert_eq!(get(&record, &miss), None);
/// ```
pub fn get<'a>(record: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = record;
    for segment in &path.segments {
        match segment {
            Segment::Property(name) => {
                current = current.as_object()?.get(name)?;
            }
            Segment::Index { array, index } => {
                current = current.as_object()?.get(array)?.as_array()?.get(*index)?;
            }
        }
    }
    Some(current)
}

/// Defaulting form of [`get`]: a resolution miss yields `default`.
pub fn get_or<'a>(record: &'a Value, path: &Path, default: &'a Value) -> &'a Value {
    get(record, path).unwrap_or(default)
}
