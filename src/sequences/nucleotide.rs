//! Types and methods for working with per-basepair nucleotide sequence data.
//!
//! Both sources here read FASTA through the [`noodles::fasta`] module, but their API is unstable
//! and may be a source of future pain.

use bytes::Bytes;
use genomap::GenomeMap;
use indexmap::IndexMap;
use noodles::core::{Position as NoodlesPosition, Region};
use noodles::fasta::indexed_reader;
use noodles::fasta::{io::BufReadSeek, reader, record::Sequence, IndexedReader};
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::path::PathBuf;
use std::str;

use super::lazy::LazyLoader;
use crate::error::GenoseqError;
use crate::ranges::try_position;
use crate::traits::SequenceSource;
use crate::Position;

/// A newtype around raw nucleotide [`Bytes`], for making it more
/// display and other operations more convenient.
///
/// Sub-sequences share the underlying buffer, so slicing an in-memory sequence
/// does not copy it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Nucleotides(Bytes);

impl fmt::Display for Nucleotides {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match str::from_utf8(&self.0) {
            Ok(s) => write!(f, "{}", s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl Deref for Nucleotides {
    type Target = Bytes;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for Nucleotides {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&Sequence> for Nucleotides {
    fn from(sequence: &Sequence) -> Self {
        Nucleotides(Bytes::from(sequence.as_ref().to_vec()))
    }
}

impl From<Vec<u8>> for Nucleotides {
    fn from(seq: Vec<u8>) -> Self {
        Nucleotides(Bytes::from(seq))
    }
}

impl<'a> From<&'a [u8]> for Nucleotides {
    fn from(seq: &'a [u8]) -> Self {
        Nucleotides(Bytes::copy_from_slice(seq))
    }
}

impl From<String> for Nucleotides {
    fn from(s: String) -> Self {
        Nucleotides(Bytes::from(s.into_bytes()))
    }
}

impl<'a> From<&'a str> for Nucleotides {
    fn from(s: &'a str) -> Self {
        Nucleotides(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl Nucleotides {
    /// Get the length of the nucleotide sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return whether this is an empty object.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the sub-sequence `[start, end)`, without copying.
    pub fn subsequence(&self, start: Position, end: Position) -> Result<Nucleotides, GenoseqError> {
        let (first, last) = (start as usize, end as usize);
        if first > last || last > self.len() {
            return Err(GenoseqError::InvalidRangeForSequence(
                start,
                end,
                self.len(),
            ));
        }
        Ok(Nucleotides(self.0.slice(first..last)))
    }
}

/// Length of in-memory sequence data, as a [`Position`].
fn sequence_length(seq: &Nucleotides) -> Result<Position, GenoseqError> {
    try_position(seq.len() as u64)
}

/// [`NucleotideSequences`] for storing a whole genome's nucleotide sequence
/// data in-memory.
pub struct NucleotideSequences {
    data: GenomeMap<Nucleotides>,
}

impl NucleotideSequences {
    /// Load an entire FASTA file into memory, into a [`NucleotideSequences`] object.
    ///
    /// # Arguments
    /// * `filepath`: a path to the (possible gzipped) FASTA file.
    /// * `seqnames`: an optional subset of sequences to load.
    pub fn from_fasta(
        filepath: impl Into<PathBuf>,
        seqnames: Option<Vec<String>>,
    ) -> Result<Self, GenoseqError> {
        let data = parse_fasta(filepath, seqnames)?;
        Ok(Self { data })
    }

    /// Build an in-memory genome from `(seqname, sequence)` pairs.
    ///
    /// Duplicate sequence names are an error.
    pub fn from_pairs<N, S>(pairs: impl IntoIterator<Item = (N, S)>) -> Result<Self, GenoseqError>
    where
        N: AsRef<str>,
        S: Into<Nucleotides>,
    {
        let mut data = GenomeMap::new();
        for (name, seq) in pairs {
            data.insert(name.as_ref(), seq.into())?;
        }
        Ok(Self { data })
    }

    /// Retrieve the [`Nucleotides`] for a particular sequence name.
    pub fn get_sequence(&self, seqname: &str) -> Result<&Nucleotides, GenoseqError> {
        self.data
            .get(seqname)
            .ok_or_else(|| GenoseqError::MissingSequence(seqname.to_string()))
    }
}

impl SequenceSource for NucleotideSequences {
    fn seqnames(&self) -> Vec<String> {
        self.data.names()
    }

    fn get_sequence_length(&self, seqname: &str) -> Result<Position, GenoseqError> {
        sequence_length(self.get_sequence(seqname)?)
    }

    fn fetch(
        &self,
        seqname: &str,
        start: Position,
        end: Position,
    ) -> Result<Nucleotides, GenoseqError> {
        log::trace!("fetching {}:{}-{} from memory", seqname, start, end);
        self.get_sequence(seqname)?.subsequence(start, end)
    }
}

/// The key of a region loaded from an indexed FASTA: `(seqname, start, end)`,
/// 0-based and right-exclusive.
type RegionKey = (String, Position, Position);

/// A lazy-loaded set of nucleotide sequences based on indexed FASTA files.
///
/// Sequence lengths come from the FASTA index, so construction does not read
/// any sequence data. Each fetch reads only the requested region off disk, and
/// the most recently fetched region is kept in memory; see [`LazyLoader`].
#[derive(Debug)]
pub struct IndexedNucleotideSequences {
    seqlens: IndexMap<String, Position>,
    lazy: LazyLoader<IndexedReader<Box<dyn BufReadSeek>>, Nucleotides, RegionKey>,
}

impl IndexedNucleotideSequences {
    /// Open an indexed FASTA file.
    ///
    /// # Arguments
    /// * `filepath` - the path to the FASTA file, with its `.fai` index alongside it
    ///   (and `.gzi` if the FASTA is bgzipped).
    /// * `seqnames` - optional subset of sequences to consider.
    pub fn new(
        filepath: impl Into<PathBuf>,
        seqnames: Option<Vec<String>>,
    ) -> Result<Self, GenoseqError> {
        let filepath = filepath.into();
        let reader = indexed_reader::Builder::default().build_from_path(&filepath)?;
        let allowed_seqnames = option_vec_to_hashset(seqnames);

        let mut seqlens = IndexMap::new();
        for record in reader.index().iter() {
            let name = String::from_utf8(record.name().to_vec())?;
            let keep = allowed_seqnames
                .as_ref()
                .map_or(true, |seqnames| seqnames.contains(&name));
            if keep {
                seqlens.insert(name, try_position(record.length())?);
            }
        }
        log::debug!(
            "opened indexed FASTA {} with {} sequences",
            filepath.display(),
            seqlens.len()
        );

        let lazy = LazyLoader::new(reader, |reader, key: &RegionKey| {
            let (seqname, start, end) = key;
            // noodles regions are 1-based and right-inclusive, so an empty
            // range has no region to query
            if start >= end {
                return Ok(Nucleotides::default());
            }
            let region = Region::new(
                seqname.clone().into_bytes(),
                noodles_position(*start + 1)?..=noodles_position(*end)?,
            );
            let record = reader.query(&region)?;
            Ok(Nucleotides::from(record.sequence()))
        });

        Ok(Self { seqlens, lazy })
    }

    /// Get an [`IndexMap`] of the sequence names and their lengths.
    pub fn seqlens(&self) -> &IndexMap<String, Position> {
        &self.seqlens
    }

    /// Return a `bool` indicating whether the region `[start, end)` of `seqname`
    /// is currently cached.
    pub fn is_loaded(&self, seqname: &str, start: Position, end: Position) -> bool {
        self.lazy.is_loaded(&(seqname.to_string(), start, end))
    }

    /// Clear the lazy-loading cache.
    pub fn clear(&self) {
        self.lazy.clear()
    }
}

impl SequenceSource for IndexedNucleotideSequences {
    fn seqnames(&self) -> Vec<String> {
        self.seqlens.keys().cloned().collect()
    }

    fn get_sequence_length(&self, seqname: &str) -> Result<Position, GenoseqError> {
        self.seqlens
            .get(seqname)
            .copied()
            .ok_or_else(|| GenoseqError::MissingSequence(seqname.to_string()))
    }

    fn fetch(
        &self,
        seqname: &str,
        start: Position,
        end: Position,
    ) -> Result<Nucleotides, GenoseqError> {
        // only sequences in the index (and the seqnames subset) can be loaded
        let length = self.get_sequence_length(seqname)?;
        if start > end || end > length {
            return Err(GenoseqError::InvalidRangeForSequence(
                start,
                end,
                length as usize,
            ));
        }
        log::trace!("fetching {}:{}-{} from indexed FASTA", seqname, start, end);
        let seq = self.lazy.get_data(&(seqname.to_string(), start, end))?;
        Ok(seq.clone())
    }
}

/// Convert a 1-based position into a [`noodles::core::Position`].
fn noodles_position(position: Position) -> Result<NoodlesPosition, GenoseqError> {
    NoodlesPosition::try_from(position as usize)
        .map_err(|_| GenoseqError::InvalidPosition(position as u64))
}

// Convert an `Option<Vec<String>>` into a `Option<HashSet<String>>`
fn option_vec_to_hashset(x: Option<Vec<String>>) -> Option<HashSet<String>> {
    x.map(HashSet::from_iter)
}

/// Use the [`noodles`] library to parse a whole FASTA file.
pub fn parse_fasta(
    filepath: impl Into<PathBuf>,
    seqnames: Option<Vec<String>>,
) -> Result<GenomeMap<Nucleotides>, GenoseqError> {
    let seqnames_set = option_vec_to_hashset(seqnames);

    let filepath = filepath.into();

    let mut reader = reader::Builder.build_from_path(filepath)?;

    let mut sequences = GenomeMap::new();

    for result in reader.records() {
        let record = result?;
        let name = String::from_utf8(record.definition().name().to_vec())?;
        if seqnames_set
            .as_ref()
            .map_or(true, |keep_seqnames| keep_seqnames.contains(&name))
        {
            sequences.insert(&name, Nucleotides::from(record.sequence()))?;
        }
    }

    Ok(sequences)
}
