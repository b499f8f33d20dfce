//! One-hot encoding of nucleotide sequences.
//!
//! A sequence of length `N` is encoded as an `N x 4` [`Array2<f64>`] over the
//! ordered alphabet [`BASES`] (`A`, `C`, `G`, `T`). Each row of a canonical base
//! has a single `1.0` in the base's column. Every other symbol (`N`, IUPAC
//! ambiguity codes, gaps, anything else) is encoded as a row of
//! [`UNCERTAIN_VALUE`], i.e. uniform uncertainty over the four bases.
//!
//! Encoding is case-insensitive, so soft-masked (lowercase) bases encode as their
//! uppercase base. Decoding is lossy: any row that does not contain exactly one
//! `1.0` decodes to `N`.
//!
//! ```
//! use genoseq::sequences::onehot::{decode, encode};
//!
//! let encoding = encode("acgtR");
//! assert_eq!(encoding.row(0).to_vec(), vec![1.0, 0.0, 0.0, 0.0]);
//! assert_eq!(encoding.row(4).to_vec(), vec![0.25; 4]);
//! assert_eq!(decode(encoding.view()), "ACGTN");
//! ```
//!
//! [`Array2<f64>`]: https://docs.rs/ndarray/latest/ndarray/type.Array2.html

use ndarray::{Array2, ArrayView2};

/// The one-hot alphabet. The column of a base in an [`Encoding`] is its index here.
pub const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Number of columns in an [`Encoding`].
pub const NBASES: usize = BASES.len();

/// The value filling every column of a row for a non-canonical symbol.
pub const UNCERTAIN_VALUE: f64 = 0.25;

/// The symbol emitted by [`decode()`] for rows that are not one-hot.
pub const UNKNOWN_BASE: u8 = b'N';

/// An `N x 4` one-hot encoding of a length `N` sequence.
pub type Encoding = Array2<f64>;

/// Return the column of `base` in an [`Encoding`], ignoring case.
pub fn base_index(base: u8) -> Option<usize> {
    match base.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// One-hot encode a sequence.
///
/// This never fails; an empty sequence gives a `0 x 4` encoding.
pub fn encode(sequence: impl AsRef<[u8]>) -> Encoding {
    let sequence = sequence.as_ref();
    let mut encoding = Array2::zeros((sequence.len(), NBASES));
    for (mut row, &base) in encoding.rows_mut().into_iter().zip(sequence) {
        match base_index(base) {
            Some(index) => row[index] = 1.0,
            None => row.fill(UNCERTAIN_VALUE),
        }
    }
    encoding
}

/// Decode a one-hot encoding back into an uppercase sequence.
///
/// A row decodes to a base only if exactly one of its first four columns equals
/// `1.0`; all other rows (uncertain, all zero, or malformed) decode to `N`.
pub fn decode(encoding: ArrayView2<'_, f64>) -> String {
    encoding
        .rows()
        .into_iter()
        .map(|row| {
            let mut hits = row
                .iter()
                .take(NBASES)
                .enumerate()
                .filter(|(_, &value)| value == 1.0);
            match (hits.next(), hits.next()) {
                (Some((index, _)), None) => BASES[index] as char,
                _ => UNKNOWN_BASE as char,
            }
        })
        .collect()
}

/// The complement of a base or IUPAC ambiguity code. Case is preserved.
///
/// Ambiguity codes complement to the code of the complementary base set
/// (`R`/`Y`, `K`/`M`, `B`/`V`, `D`/`H`). `S`, `W`, `N` and any other symbol are
/// returned unchanged.
pub fn complement(base: u8) -> u8 {
    let upper = match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        _ => return base,
    };
    if base.is_ascii_lowercase() {
        upper.to_ascii_lowercase()
    } else {
        upper
    }
}

/// Reverse complement a sequence.
pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    sequence.iter().rev().map(|&base| complement(base)).collect()
}
