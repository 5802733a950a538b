use nom::{
    IResult,
    bytes::complete::take_while,
    character::complete::char,
    combinator::map,
    multi::separated_list1,
};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separator between path segments
pub const DELIMITER: char = '/';

/// An ordered list of mapping keys, e.g. `Placement/AvailabilityZone`.
///
/// Empty segments are kept: `"a//b"` has three segments, the middle one `""`,
/// and the empty string is a single empty segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    pub segments: Vec<String>,
}

// Parse one segment: everything up to the next delimiter (possibly nothing)
fn parse_segment(input: &str) -> IResult<&str, String> {
    map(take_while(|c: char| c != DELIMITER), |s: &str| s.to_string())(input)
}

// Parse a complete path
pub fn parse_path(input: &str) -> IResult<&str, Path> {
    map(separated_list1(char(DELIMITER), parse_segment), |segments| {
        Path { segments }
    })(input)
}

impl Path {
    /// Split `input` into segments. Never fails.
    pub fn parse(input: &str) -> Self {
        // A segment may be empty, so the parser always consumes the whole input
        parse_path(input).map_or_else(|_| Path::default(), |(_, path)| path)
    }

    /// Build a path from already-split segments. Zero segments address the document root.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Path {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, "{}", DELIMITER)?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}
