//! Traits used by the genoseq library.
//!

use crate::{
    error::GenoseqError,
    sequences::{nucleotide::Nucleotides, onehot::reverse_complement},
    Position,
};

/// The [`GenericRange`] trait defines common functionality for all range types.
pub trait GenericRange: Clone {
    fn start(&self) -> Position;
    fn end(&self) -> Position;
    fn width(&self) -> Position {
        self.end().saturating_sub(self.start())
    }
}

/// The [`SequenceSource`] trait is the capability set [`GenomeStore`] needs from
/// the underlying reference storage: enumerating sequence names, their lengths,
/// and extracting forward (and reverse complement) substrings.
///
/// Implementations may assume `start <= end <= length` with 0-based,
/// right-exclusive coordinates; [`GenomeStore`] validates requests before they
/// reach the source.
///
/// genoseq provides [`SequenceSource`] implementations for:
///
///  - [`IndexedNucleotideSequences`], an indexed FASTA file.
///  - [`NucleotideSequences`], an in-memory genome.
///
/// [`GenomeStore`]: crate::genome::GenomeStore
/// [`IndexedNucleotideSequences`]: crate::sequences::nucleotide::IndexedNucleotideSequences
/// [`NucleotideSequences`]: crate::sequences::nucleotide::NucleotideSequences
pub trait SequenceSource {
    /// Retrieve all sequence names, in the source's order.
    fn seqnames(&self) -> Vec<String>;

    /// Get the length of a particular sequence.
    fn get_sequence_length(&self, seqname: &str) -> Result<Position, GenoseqError>;

    /// Extract the forward strand substring `[start, end)` of `seqname`.
    fn fetch(
        &self,
        seqname: &str,
        start: Position,
        end: Position,
    ) -> Result<Nucleotides, GenoseqError>;

    /// Extract the reverse complement of the substring `[start, end)` of `seqname`.
    fn fetch_reverse_complement(
        &self,
        seqname: &str,
        start: Position,
        end: Position,
    ) -> Result<Nucleotides, GenoseqError> {
        let forward = self.fetch(seqname, start, end)?;
        Ok(Nucleotides::from(reverse_complement(&forward)))
    }
}

impl<S: SequenceSource + ?Sized> SequenceSource for Box<S> {
    fn seqnames(&self) -> Vec<String> {
        (**self).seqnames()
    }

    fn get_sequence_length(&self, seqname: &str) -> Result<Position, GenoseqError> {
        (**self).get_sequence_length(seqname)
    }

    fn fetch(
        &self,
        seqname: &str,
        start: Position,
        end: Position,
    ) -> Result<Nucleotides, GenoseqError> {
        (**self).fetch(seqname, start, end)
    }

    fn fetch_reverse_complement(
        &self,
        seqname: &str,
        start: Position,
        end: Position,
    ) -> Result<Nucleotides, GenoseqError> {
        (**self).fetch_reverse_complement(seqname, start, end)
    }
}
