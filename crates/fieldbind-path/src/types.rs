//! Field path types.

use std::fmt;

/// One step of a [`Path`].
///
/// A segment is either a plain property access or an indexed access into a
/// named array (`images[0]` reads the `images` property, then element `0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Property access: `twitter`, `player_width`.
    Property(String),
    /// Indexed access into a named array: `images[0]`.
    Index { array: String, index: usize },
}

/// A parsed field address: ordered segments from the record root to the
/// terminal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    pub segments: Vec<Segment>,
}

impl Path {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Property(name) => write!(f, "{name}"),
            Segment::Index { array, index } => write!(f, "{array}[{index}]"),
        }
    }
}

impl fmt::Display for Path {
    /// Formats the path back to its source form, e.g. `a.b[2].c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_source_form() {
        let path = Path::new(vec![
            Segment::Property("a".to_string()),
            Segment::Index {
                array: "b".to_string(),
                index: 2,
            },
            Segment::Property("c".to_string()),
        ]);
        assert_eq!(path.to_string(), "a.b[2].c");
    }

    #[test]
    fn display_single_index_segment() {
        let path = Path::new(vec![Segment::Index {
            array: "images".to_string(),
            index: 0,
        }]);
        assert_eq!(path.to_string(), "images[0]");
    }
}
