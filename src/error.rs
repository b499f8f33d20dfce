//! The [`GenoseqError`] `enum` definition and error messages.
//!
use crate::Position;
use genomap::GenomeMapError;
use std::string::FromUtf8Error;
use thiserror::Error;

/// The [`GenoseqError`] defines the standard set of errors that should
/// be passed to the user.
///
/// Note that an out-of-range request is *not* an error: it resolves to an
/// empty sequence. See [`GenomeStore::get_sequence()`].
///
/// [`GenomeStore::get_sequence()`]: crate::genome::GenomeStore::get_sequence
#[derive(Debug, Error)]
pub enum GenoseqError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Sequence name is not valid UTF8: {0}")]
    InvalidUtf8SequenceName(#[from] FromUtf8Error),

    // Request errors
    #[error("Strand must be one of '+', '-', 'forward', or 'reverse'. Input was '{0}'")]
    InvalidStrand(String),
    #[error("Sequence name '{0}' is not in the genome")]
    MissingSequence(String),
    #[error("Range [{0}, {1}) is invalid for sequence of length {2}")]
    InvalidRangeForSequence(Position, Position, usize),
    #[error("Position {0} cannot be represented on this platform")]
    InvalidPosition(u64),

    #[error("Error encountered in genomap::GenomeMap")]
    GenomeMapError(#[from] GenomeMapError),
}
