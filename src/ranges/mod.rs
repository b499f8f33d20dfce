//! Genomic intervals, strands, and coordinate resolution.
//!
//! All coordinates are 0-based and right-exclusive. Requests are expressed
//! in [`PositionOffset`] (signed) so that negative starts can be passed in and
//! rejected, rather than wrapped around.
//!
//! A request `[start, end)` on a sequence of length `length` is valid if and only if
//!
//! ```text
//! 0 <= start <= end <= length
//! ```
//!
//! Invalid requests are not errors: [`GenomeStore`] turns them into empty
//! sequences. Only an unknown sequence name is an error, see [`resolve()`].
//!
//! [`GenomeStore`]: crate::genome::GenomeStore

use std::{fmt, ops::Range, str::FromStr};

use indexmap::IndexMap;

use crate::{error::GenoseqError, traits::GenericRange, Position, PositionOffset};

/// The orientation of a read of the reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl FromStr for Strand {
    type Err = GenoseqError;

    /// Parse a strand token: `"+"` or `"forward"`, and `"-"` or `"reverse"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" | "forward" => Ok(Strand::Forward),
            "-" | "reverse" => Ok(Strand::Reverse),
            _ => Err(GenoseqError::InvalidStrand(s.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// A stranded genomic interval request, e.g. `chr1:100-200(-)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenomicInterval {
    pub seqname: String,
    pub start: Position,
    pub end: Position,
    pub strand: Strand,
}

impl GenomicInterval {
    /// Create a new 0-indexed right-exclusive interval.
    pub fn new(seqname: impl Into<String>, start: Position, end: Position, strand: Strand) -> Self {
        Self {
            seqname: seqname.into(),
            start,
            end,
            strand,
        }
    }
}

impl GenericRange for GenomicInterval {
    fn start(&self) -> Position {
        self.start
    }
    fn end(&self) -> Position {
        self.end
    }
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}({})",
            self.seqname, self.start, self.end, self.strand
        )
    }
}

/// Convert a [`Position`] into a [`PositionOffset`], saturating.
pub(crate) fn offset(position: Position) -> PositionOffset {
    PositionOffset::try_from(position).unwrap_or(PositionOffset::MAX)
}

/// Convert a `u64` length (e.g. from a FASTA index) into a [`Position`].
pub(crate) fn try_position(value: u64) -> Result<Position, GenoseqError> {
    Position::try_from(value).map_err(|_| GenoseqError::InvalidPosition(value))
}

/// Normalize the request `[start, end)` against a sequence of `length`.
///
/// # Returns
///
/// * `Some(range)` - the range as [`Position`]s if the request is valid.
/// * `None` - if `start < 0`, `end < start`, or `end > length`.
pub fn try_range(
    start: PositionOffset,
    end: PositionOffset,
    length: Position,
) -> Option<Range<Position>> {
    let length = offset(length);
    if start < 0 || start > length || end > length || end < start {
        return None;
    }
    let start = Position::try_from(start).ok()?;
    let end = Position::try_from(end).ok()?;
    Some(start..end)
}

/// Resolve a request against the table of sequence lengths.
///
/// # Returns
///
/// * `Ok(Some(range))` - the request is valid.
/// * `Ok(None)` - the request is out of range for this sequence (a soft failure).
/// * `Err(GenoseqError::MissingSequence)` - `seqname` is not in `seqlens`.
pub fn resolve(
    seqname: &str,
    start: PositionOffset,
    end: PositionOffset,
    seqlens: &IndexMap<String, Position>,
) -> Result<Option<Range<Position>>, GenoseqError> {
    let length = seqlens
        .get(seqname)
        .ok_or_else(|| GenoseqError::MissingSequence(seqname.to_string()))?;
    Ok(try_range(start, end, *length))
}

/// Validates whether a request is valid for accessing `seqname`.
///
/// # Returns
///
/// * `bool` - `true` if the request is within the sequence; `false` if it is out of
///   range or `seqname` is unknown.
pub fn validate(
    seqname: &str,
    start: PositionOffset,
    end: PositionOffset,
    seqlens: &IndexMap<String, Position>,
) -> bool {
    matches!(resolve(seqname, start, end, seqlens), Ok(Some(_)))
}

#[cfg(test)]
mod tests {
    use super::{resolve, try_range, validate, GenomicInterval, Strand};
    use crate::prelude::*;
    use indexmap::IndexMap;

    fn seqlens() -> IndexMap<String, Position> {
        let mut seqlens = IndexMap::new();
        seqlens.insert("chr1".to_string(), 30);
        seqlens.insert("chrM".to_string(), 10);
        seqlens
    }

    #[test]
    fn test_valid_range() {
        assert_eq!(try_range(0, 30, 30), Some(0..30));
        assert_eq!(try_range(3, 10, 30), Some(3..10));
        // empty ranges are valid, including at the very end
        assert_eq!(try_range(30, 30, 30), Some(30..30));
        assert_eq!(try_range(0, 0, 0), Some(0..0));
    }

    #[test]
    fn test_invalid_range() {
        assert_eq!(try_range(-1, 5, 30), None);
        assert_eq!(try_range(30, 31, 30), None);
        assert_eq!(try_range(31, 31, 30), None);
        assert_eq!(try_range(5, 4, 30), None);
        assert_eq!(try_range(0, -1, 30), None);
    }

    #[test]
    fn test_resolve_missing_sequence() {
        let result = resolve("chr2", 0, 5, &seqlens());
        assert!(matches!(result, Err(GenoseqError::MissingSequence(name)) if name == "chr2"));
    }

    #[test]
    fn test_seqnames_not_normalized() {
        assert!(validate("chrM", 0, 10, &seqlens()));
        assert!(!validate("chrm", 0, 10, &seqlens()));
        assert!(!validate("M", 0, 10, &seqlens()));
    }

    #[test]
    fn test_validate() {
        let seqlens = seqlens();
        assert!(validate("chr1", 0, 30, &seqlens));
        assert!(!validate("chr1", 30, 31, &seqlens));
        assert!(!validate("chrM", -1, 5, &seqlens));
    }

    #[test]
    fn test_strand_parse() {
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("forward".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("-".parse::<Strand>().unwrap(), Strand::Reverse);
        assert_eq!("reverse".parse::<Strand>().unwrap(), Strand::Reverse);
        let result = "sideways".parse::<Strand>();
        assert!(matches!(result, Err(GenoseqError::InvalidStrand(s)) if s == "sideways"));
    }

    #[test]
    fn test_interval_display() {
        let interval = GenomicInterval::new("chr1", 3, 10, Strand::Reverse);
        assert_eq!(interval.to_string(), "chr1:3-10(-)");
        assert_eq!(interval.width(), 7);
    }
}
