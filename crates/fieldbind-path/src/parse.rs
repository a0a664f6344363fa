//! Field-path parser.
//!
//! Paths are developer-authored constants (`"twitter.player_width"`,
//! `"openGraph.video.width"`, `"images[0]"`, `"a.b[2].c"`), not user input.
//! A malformed path is a programming error surfaced when the schema that
//! carries it is loaded, never a condition to recover from at runtime.

use crate::types::{Path, Segment};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty path")]
    Empty,
    #[error("empty segment at position {0}")]
    EmptySegment(usize),
    #[error("missing property name before bracket in {0:?}")]
    EmptyName(String),
    #[error("unbalanced bracket in {0:?}")]
    UnbalancedBracket(String),
    #[error("invalid array index in {0:?}")]
    InvalidIndex(String),
    #[error("unexpected characters after ']' in {0:?}")]
    TrailingInput(String),
}

/// Parse a dotted/bracket path string into a [`Path`].
///
/// Splits on `.`; each token is either a property name or the trailing
/// bracket form `name[index]` with a non-negative integer index.
///
/// # Example
///
/// ```
/// use fieldbind_path::{parse_path, Segment};
///
/// let path = parse_path("openGraph.images[0]").unwrap();
/// assert_eq!(path.segments.len(), 2);
/// assert_eq!(
///     path.segments[1],
///     Segment::Index { array: "images".to_string(), index: 0 }
/// );
/// ```
pub fn parse_path(input: &str) -> Result<Path, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut segments = Vec::new();
    for (pos, token) in input.split('.').enumerate() {
        if token.is_empty() {
            return Err(ParseError::EmptySegment(pos));
        }
        segments.push(parse_segment(token)?);
    }
    Ok(Path::new(segments))
}

fn parse_segment(token: &str) -> Result<Segment, ParseError> {
    let Some(open) = token.find('[') else {
        if token.contains(']') {
            return Err(ParseError::UnbalancedBracket(token.to_string()));
        }
        return Ok(Segment::Property(token.to_string()));
    };

    let name = &token[..open];
    if name.is_empty() {
        return Err(ParseError::EmptyName(token.to_string()));
    }
    let rest = &token[open + 1..];
    let Some(close) = rest.find(']') else {
        return Err(ParseError::UnbalancedBracket(token.to_string()));
    };
    if close + 1 != rest.len() {
        return Err(ParseError::TrailingInput(token.to_string()));
    }
    let digits = &rest[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidIndex(token.to_string()));
    }
    let index = digits
        .parse()
        .map_err(|_| ParseError::InvalidIndex(token.to_string()))?;
    Ok(Segment::Index {
        array: name.to_string(),
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_properties() {
        let path = parse_path("twitter.player_width").unwrap();
        assert_eq!(
            path.segments,
            vec![
                Segment::Property("twitter".to_string()),
                Segment::Property("player_width".to_string()),
            ]
        );
    }

    #[test]
    fn parse_deep_property_chain() {
        let path = parse_path("openGraph.video.width").unwrap();
        assert_eq!(path.segments.len(), 3);
        assert_eq!(path.to_string(), "openGraph.video.width");
    }

    #[test]
    fn parse_bracket_form() {
        let path = parse_path("images[2]").unwrap();
        assert_eq!(
            path.segments,
            vec![Segment::Index {
                array: "images".to_string(),
                index: 2
            }]
        );
    }

    #[test]
    fn parse_mixed_form() {
        let path = parse_path("a.b[2].c").unwrap();
        assert_eq!(
            path.segments,
            vec![
                Segment::Property("a".to_string()),
                Segment::Index {
                    array: "b".to_string(),
                    index: 2
                },
                Segment::Property("c".to_string()),
            ]
        );
    }

    #[test]
    fn reject_empty_path() {
        assert_eq!(parse_path(""), Err(ParseError::Empty));
    }

    #[test]
    fn reject_empty_segment() {
        assert_eq!(parse_path("a..b"), Err(ParseError::EmptySegment(1)));
        assert_eq!(parse_path(".a"), Err(ParseError::EmptySegment(0)));
        assert_eq!(parse_path("a."), Err(ParseError::EmptySegment(1)));
    }

    #[test]
    fn reject_unbalanced_brackets() {
        assert!(matches!(
            parse_path("a[0"),
            Err(ParseError::UnbalancedBracket(_))
        ));
        assert!(matches!(
            parse_path("a]0"),
            Err(ParseError::UnbalancedBracket(_))
        ));
    }

    #[test]
    fn reject_non_integer_index() {
        assert!(matches!(parse_path("a[x]"), Err(ParseError::InvalidIndex(_))));
        assert!(matches!(parse_path("a[-1]"), Err(ParseError::InvalidIndex(_))));
        assert!(matches!(parse_path("a[]"), Err(ParseError::InvalidIndex(_))));
        assert!(matches!(
            parse_path("a[1.5]"),
            Err(ParseError::InvalidIndex(_))
        ));
    }

    #[test]
    fn reject_bare_bracket() {
        assert!(matches!(parse_path("[0]"), Err(ParseError::EmptyName(_))));
    }

    #[test]
    fn reject_trailing_input_after_bracket() {
        assert!(matches!(
            parse_path("a[0]b"),
            Err(ParseError::TrailingInput(_))
        ));
        assert!(matches!(
            parse_path("a[0][1]"),
            Err(ParseError::TrailingInput(_))
        ));
    }
}
