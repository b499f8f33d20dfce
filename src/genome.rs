//! The [`GenomeStore`] type: stranded, bounds-checked access to a reference genome.
//!
//! # Design
//!
//! A [`GenomeStore<S>`] is generic over its [`SequenceSource`] `S`, which is the only
//! part that touches storage. The store itself holds nothing but the table of
//! sequence lengths, read once from the source at construction (names sorted
//! lexicographically) and never modified afterwards. Every query is validated
//! against that table before the source is consulted.
//!
//! Queries fail in one of three ways:
//!
//! 1. **Out-of-range** coordinates (`start < 0`, `end < start`, or past the end of the
//!    sequence) are a *soft* failure: the result is an empty [`Nucleotides`] (or a `0 x 4`
//!    [`Encoding`]). Random sampling near chromosome ends hits these routinely.
//!
//! 2. An **invalid strand token** or **unknown sequence name** is a hard error. Bounds are
//!    checked first, so an out-of-range request with a bad strand token still resolves to
//!    an empty sequence.
//!
//! 3. A **source failure** (e.g. an unreadable FASTA) is propagated as is.
//!
//! [`GenomeStore<S>`]: GenomeStore

use std::ops::Range;
use std::path::PathBuf;

use indexmap::IndexMap;
use rand::Rng;

use crate::{
    error::GenoseqError,
    ranges::{offset, resolve, GenomicInterval, Strand},
    sequences::{
        nucleotide::{IndexedNucleotideSequences, NucleotideSequences, Nucleotides},
        onehot::{encode, Encoding},
    },
    traits::SequenceSource,
    Position, PositionOffset,
};

/// A reference genome: the sorted table of sequence lengths over a
/// [`SequenceSource`], answering stranded sequence and one-hot encoding
/// requests against it.
///
/// Requests are bounds checked against the length table before they reach
/// the source, so an out-of-range request returns an empty result instead of
/// an error.
#[derive(Debug)]
pub struct GenomeStore<S> {
    source: S,
    seqlens: IndexMap<String, Position>,
}

impl GenomeStore<IndexedNucleotideSequences> {
    /// Open an indexed FASTA file (see [`IndexedNucleotideSequences::new()`]).
    pub fn from_indexed_fasta(
        filepath: impl Into<PathBuf>,
        seqnames: Option<Vec<String>>,
    ) -> Result<Self, GenoseqError> {
        Self::new(IndexedNucleotideSequences::new(filepath, seqnames)?)
    }
}

impl GenomeStore<NucleotideSequences> {
    /// Load a whole FASTA file into memory (see [`NucleotideSequences::from_fasta()`]).
    pub fn from_fasta(
        filepath: impl Into<PathBuf>,
        seqnames: Option<Vec<String>>,
    ) -> Result<Self, GenoseqError> {
        Self::new(NucleotideSequences::from_fasta(filepath, seqnames)?)
    }
}

impl<S: SequenceSource> GenomeStore<S> {
    /// Create a new [`GenomeStore`], caching the length of every sequence in `source`.
    pub fn new(source: S) -> Result<Self, GenoseqError> {
        let mut seqnames = source.seqnames();
        seqnames.sort();

        let mut seqlens = IndexMap::with_capacity(seqnames.len());
        for seqname in seqnames {
            let length = source.get_sequence_length(&seqname)?;
            seqlens.insert(seqname, length);
        }

        let total: u64 = seqlens.values().map(|&len| len as u64).sum();
        log::debug!(
            "genome store built with {} sequences, {} bp total",
            seqlens.len(),
            total
        );
        Ok(Self { source, seqlens })
    }

    /// Get the underlying [`SequenceSource`].
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the sequence names, sorted.
    pub fn seqnames(&self) -> Vec<String> {
        self.seqlens.keys().cloned().collect()
    }

    /// Get the sequences lengths.
    pub fn seqlens(&self) -> &IndexMap<String, Position> {
        &self.seqlens
    }

    /// Get the length of a particular sequence.
    pub fn get_sequence_length(&self, seqname: &str) -> Result<Position, GenoseqError> {
        self.seqlens
            .get(seqname)
            .copied()
            .ok_or_else(|| GenoseqError::MissingSequence(seqname.to_string()))
    }

    /// Get the sequence of `[start, end)` on `seqname`, on the strand given by the
    /// token `strand` (`"+"`/`"forward"` or `"-"`/`"reverse"`).
    ///
    /// # Returns
    ///
    /// The sequence, reverse complemented for the reverse strand. An empty sequence if
    /// the range is out of bounds, whatever the strand token.
    ///
    /// # Errors
    ///
    /// * [`GenoseqError::MissingSequence`] if `seqname` is not in the genome.
    /// * [`GenoseqError::InvalidStrand`] if the range is valid but `strand` is not a
    ///   strand token.
    pub fn get_sequence(
        &self,
        seqname: &str,
        start: PositionOffset,
        end: PositionOffset,
        strand: &str,
    ) -> Result<Nucleotides, GenoseqError> {
        let Some(range) = resolve(seqname, start, end, &self.seqlens)? else {
            log::debug!("out of range request {}:{}-{}", seqname, start, end);
            return Ok(Nucleotides::default());
        };
        let strand: Strand = strand.parse()?;
        self.fetch_range(seqname, range, strand)
    }

    /// Like [`GenomeStore::get_sequence()`], then one-hot encode the result.
    ///
    /// An out of range request gives a `0 x 4` encoding.
    pub fn get_encoding(
        &self,
        seqname: &str,
        start: PositionOffset,
        end: PositionOffset,
        strand: &str,
    ) -> Result<Encoding, GenoseqError> {
        let sequence = self.get_sequence(seqname, start, end, strand)?;
        Ok(encode(&sequence))
    }

    /// Get the sequence of a [`GenomicInterval`]; the typed form of
    /// [`GenomeStore::get_sequence()`].
    pub fn fetch(&self, interval: &GenomicInterval) -> Result<Nucleotides, GenoseqError> {
        let GenomicInterval {
            seqname,
            start,
            end,
            strand,
        } = interval;
        match resolve(seqname, offset(*start), offset(*end), &self.seqlens)? {
            Some(range) => self.fetch_range(seqname, range, *strand),
            None => {
                log::debug!("out of range request {}", interval);
                Ok(Nucleotides::default())
            }
        }
    }

    /// Get the one-hot encoding of a [`GenomicInterval`]'s sequence.
    pub fn fetch_encoding(&self, interval: &GenomicInterval) -> Result<Encoding, GenoseqError> {
        Ok(encode(&self.fetch(interval)?))
    }

    fn fetch_range(
        &self,
        seqname: &str,
        range: Range<Position>,
        strand: Strand,
    ) -> Result<Nucleotides, GenoseqError> {
        match strand {
            Strand::Forward => self.source.fetch(seqname, range.start, range.end),
            Strand::Reverse => self
                .source
                .fetch_reverse_complement(seqname, range.start, range.end),
        }
    }

    /// Draw a random interval of `width` bases on `strand`, uniformly over every
    /// placement of the window in the genome (so longer sequences are chosen more
    /// often).
    ///
    /// # Returns
    ///
    /// `None` if no sequence is at least `width` long.
    pub fn random_interval<R: Rng>(
        &self,
        rng: &mut R,
        width: Position,
        strand: Strand,
    ) -> Option<GenomicInterval> {
        let placements: Vec<(&String, u64)> = self
            .seqlens
            .iter()
            .filter(|(_, &length)| length >= width)
            .map(|(seqname, &length)| (seqname, (length - width) as u64 + 1))
            .collect();
        let total: u64 = placements.iter().map(|(_, n)| n).sum();
        if total == 0 {
            return None;
        }

        let mut draw = rng.gen_range(0..total);
        for (seqname, n) in placements {
            if draw < n {
                let start = Position::try_from(draw).ok()?;
                return Some(GenomicInterval::new(
                    seqname.clone(),
                    start,
                    start + width,
                    strand,
                ));
            }
            draw -= n;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::GenomeStore;
    use crate::prelude::*;
    use crate::test_utilities::{random_genome, TEST_CHR1, TEST_CHR2};
    use rand::thread_rng;

    fn test_genome() -> GenomeStore<NucleotideSequences> {
        let source = NucleotideSequences::from_pairs(vec![
            ("chr2", TEST_CHR2),
            ("chr1", TEST_CHR1),
            ("chrX", b"ACGTNacgtn".as_slice()),
        ])
        .unwrap();
        GenomeStore::new(source).unwrap()
    }

    /// A source whose metadata lookups always fail.
    struct BrokenSource;

    impl SequenceSource for BrokenSource {
        fn seqnames(&self) -> Vec<String> {
            vec!["chr1".to_string()]
        }
        fn get_sequence_length(&self, _seqname: &str) -> Result<Position, GenoseqError> {
            Err(GenoseqError::IOError(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "truncated index",
            )))
        }
        fn fetch(&self, _: &str, _: Position, _: Position) -> Result<Nucleotides, GenoseqError> {
            unreachable!()
        }
    }

    #[test]
    fn test_construction_sorted_seqlens() {
        let genome = test_genome();
        assert_eq!(genome.seqnames(), vec!["chr1", "chr2", "chrX"]);
        assert_eq!(genome.get_sequence_length("chr1").unwrap(), 30);
        assert_eq!(genome.get_sequence_length("chr2").unwrap(), 100);
        assert_eq!(genome.get_sequence_length("chrX").unwrap(), 10);
        assert!(matches!(
            genome.get_sequence_length("chrY"),
            Err(GenoseqError::MissingSequence(_))
        ));
    }

    #[test]
    fn test_construction_failure_propagates() {
        let result = GenomeStore::new(BrokenSource);
        assert!(matches!(result, Err(GenoseqError::IOError(_))));
    }

    #[test]
    fn test_get_sequence_forward() {
        let genome = test_genome();
        let seq = genome.get_sequence("chr1", 3, 10, "+").unwrap();
        assert_eq!(seq.to_string(), "ACTACTA");
        let seq = genome.get_sequence("chrX", 2, 8, "forward").unwrap();
        assert_eq!(seq.to_string(), "GTNacg");
    }

    #[test]
    fn test_get_sequence_reverse() {
        let genome = test_genome();
        let seq = genome.get_sequence("chr1", 0, 5, "-").unwrap();
        assert_eq!(seq.to_string(), "GTGAA");
        // soft-masked bases keep their case, N is its own complement
        let seq = genome.get_sequence("chrX", 2, 8, "reverse").unwrap();
        assert_eq!(seq.to_string(), "cgtNAC");
    }

    #[test]
    fn test_get_sequence_reverse_ambiguity_codes() {
        let source = NucleotideSequences::from_pairs(vec![("chrU", "ARKBDSWnrk")]).unwrap();
        let genome = GenomeStore::new(source).unwrap();
        let seq = genome.get_sequence("chrU", 0, 7, "-").unwrap();
        assert_eq!(seq.to_string(), "WSHVMYT");
        let seq = genome.get_sequence("chrU", 5, 10, "-").unwrap();
        assert_eq!(seq.to_string(), "mynWS");
        // ambiguity codes still encode as uncertain rows
        let encoding = genome.get_encoding("chrU", 0, 2, "-").unwrap();
        assert_eq!(encoding.row(0).to_vec(), vec![0.25; 4]);
        assert_eq!(encoding.row(1).to_vec(), vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let genome = test_genome();
        let length = genome.get_sequence_length("chr1").unwrap() as i64;
        assert!(genome.get_sequence("chr1", length, length + 1, "+").unwrap().is_empty());
        assert!(genome.get_sequence("chr1", -1, 5, "+").unwrap().is_empty());
        assert!(genome.get_sequence("chr1", 0, length + 1, "-").unwrap().is_empty());
        assert!(genome.get_sequence("chr1", 10, 5, "+").unwrap().is_empty());
        assert!(genome.get_sequence("chr1", 0, -3, "+").unwrap().is_empty());
        // the empty range at the very end is valid
        assert!(genome.get_sequence("chr1", length, length, "+").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_strand() {
        let genome = test_genome();
        let result = genome.get_sequence("chr1", 0, 10, "sideways");
        assert!(matches!(result, Err(GenoseqError::InvalidStrand(s)) if s == "sideways"));

        // bounds are checked before the strand
        let seq = genome.get_sequence("chr1", -1, 10, "sideways").unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_missing_sequence() {
        let genome = test_genome();
        let result = genome.get_sequence("chr3", 0, 10, "+");
        assert!(matches!(result, Err(GenoseqError::MissingSequence(name)) if name == "chr3"));
    }

    #[test]
    fn test_get_encoding() {
        let genome = test_genome();
        let encoding = genome.get_encoding("chrX", 3, 6, "+").unwrap();
        assert_eq!(encoding.shape(), &[3, 4]);
        assert_eq!(decode(encoding.view()), "TNA");

        let empty = genome.get_encoding("chrX", 9, 11, "+").unwrap();
        assert_eq!(empty.shape(), &[0, 4]);

        assert!(genome.get_encoding("chrX", 0, 3, "?").is_err());
    }

    #[test]
    fn test_fetch_typed() {
        let genome = test_genome();
        let interval = GenomicInterval::new("chr1", 0, 5, Strand::Reverse);
        assert_eq!(genome.fetch(&interval).unwrap().to_string(), "GTGAA");
        assert_eq!(genome.fetch_encoding(&interval).unwrap().shape(), &[5, 4]);

        let past_end = GenomicInterval::new("chr1", 25, 31, Strand::Forward);
        assert!(genome.fetch(&past_end).unwrap().is_empty());
    }

    #[test]
    fn test_whole_sequence_lengths() {
        let source = NucleotideSequences::from_pairs(random_genome(5)).unwrap();
        let genome = GenomeStore::new(source).unwrap();
        for (seqname, &length) in genome.seqlens() {
            let seq = genome.get_sequence(seqname, 0, length as i64, "+").unwrap();
            assert_eq!(seq.len(), length as usize);
        }
    }

    #[test]
    fn test_reverse_is_reverse_complement() {
        let source = NucleotideSequences::from_pairs(random_genome(3)).unwrap();
        let genome = GenomeStore::new(source).unwrap();
        let mut rng = thread_rng();
        for _ in 0..100 {
            let interval = genome.random_interval(&mut rng, 50, Strand::Forward).unwrap();
            let (start, end) = (interval.start as i64, interval.end as i64);
            let forward = genome.get_sequence(&interval.seqname, start, end, "+").unwrap();
            let reverse = genome.get_sequence(&interval.seqname, start, end, "-").unwrap();
            assert_eq!(reverse.to_vec(), reverse_complement(&forward));
        }
    }

    #[test]
    fn test_random_interval() {
        let genome = test_genome();
        let mut rng = thread_rng();
        for _ in 0..200 {
            let interval = genome.random_interval(&mut rng, 20, Strand::Reverse).unwrap();
            // chrX is too short for a 20bp window
            assert_ne!(interval.seqname, "chrX");
            assert_eq!(interval.width(), 20);
            assert_eq!(interval.strand, Strand::Reverse);
            let length = genome.get_sequence_length(&interval.seqname).unwrap();
            assert!(interval.end <= length);
            assert_eq!(genome.fetch(&interval).unwrap().len(), 20);
        }
        assert!(genome.random_interval(&mut rng, 101, Strand::Forward).is_none());
    }
}
