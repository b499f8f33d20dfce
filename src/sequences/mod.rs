//! Functionality for working with per-basepair sequence data.
//!
//! ## Main Functionality
//!
//!  - [`Nucleotides`], a cheaply sliceable nucleotide sequence.
//!  - Two [`SequenceSource`] implementations: [`NucleotideSequences`], a genome held in
//!    memory, and [`IndexedNucleotideSequences`], an indexed FASTA file read lazily one
//!    sequence at a time (with the [`LazyLoader`] type).
//!  - The [`onehot`] codec between sequences and `N x 4` numeric encodings.
//!
//! [`Nucleotides`]: crate::sequences::nucleotide::Nucleotides
//! [`NucleotideSequences`]: crate::sequences::nucleotide::NucleotideSequences
//! [`IndexedNucleotideSequences`]: crate::sequences::nucleotide::IndexedNucleotideSequences
//! [`SequenceSource`]: crate::traits::SequenceSource
//! [`LazyLoader`]: crate::sequences::lazy::LazyLoader

pub mod lazy;
pub mod nucleotide;
pub mod onehot;
