//! # genoseq
//!
//! Random-access retrieval of reference genome subsequences, and their conversion to and
//! from a dense one-hot `N x 4` numeric encoding.
//!
//! The main entry point is [`GenomeStore`], which caches the chromosome lengths of a
//! [`SequenceSource`] (e.g. an indexed FASTA file) and answers `(seqname, start, end,
//! strand)` queries. Out-of-range queries are *soft* failures: they return an empty
//! sequence (or a `0 x 4` encoding) rather than an error, so bulk random sampling near
//! chromosome ends does not need error handling.
//!
//! ```
//! use genoseq::prelude::*;
//!
//! let source = NucleotideSequences::from_pairs(vec![("chr1", "ACGTNacgt")]).unwrap();
//! let genome = GenomeStore::new(source).unwrap();
//!
//! let seq = genome.get_sequence("chr1", 0, 4, "-").unwrap();
//! assert_eq!(seq.to_string(), "ACGT");
//!
//! let encoding = genome.get_encoding("chr1", 3, 5, "+").unwrap();
//! assert_eq!(encoding.shape(), &[2, 4]);
//! assert_eq!(decode(encoding.view()), "TN");
//! ```
//!
//! [`GenomeStore`]: crate::genome::GenomeStore
//! [`SequenceSource`]: crate::traits::SequenceSource

pub mod error;
pub mod genome;
pub mod ranges;
pub mod sequences;
pub mod test_utilities;
pub mod traits;

/// Sequence lengths and resolved 0-based positions.
#[cfg(not(feature = "big-position"))]
pub type Position = u32;
#[cfg(feature = "big-position")]
pub type Position = u64;

/// Requested coordinates, which may be negative (and are then rejected).
pub type PositionOffset = i64;

pub const INTERNAL_ERROR_MESSAGE: &str = "
genoseq internal error. This should not happen; please report it.";

pub mod prelude {
    pub use crate::error::GenoseqError;
    pub use crate::genome::GenomeStore;
    pub use crate::ranges::{GenomicInterval, Strand};
    pub use crate::sequences::nucleotide::{
        IndexedNucleotideSequences, NucleotideSequences, Nucleotides,
    };
    pub use crate::sequences::onehot::{decode, encode, reverse_complement, Encoding};
    pub use crate::traits::{GenericRange, SequenceSource};
    pub use crate::{Position, PositionOffset};
}
