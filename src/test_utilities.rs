//! Test cases and test utility functions.
//!

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::{thread_rng, Rng};
use tempfile::TempDir;

use crate::Position;

/// A small test chromosome.
pub const TEST_CHR1: &[u8] = b"TTCACTACTATTAGTACTCACGGCGCAATA";

/// A second, longer test chromosome (100 bp).
pub const TEST_CHR2: &[u8] = b"GCTAAAGACAATTACATAACATACACGTCAGCACGAAACTTGTTGGCCCAGTGTGAATCGCTTAAGGGTTAAGTAAGTGTGATGCATACGCCTTTACTTG";

// Stochastic test sequence defaults
pub const MIN_CHROM_LEN: Position = 1_000;
pub const MAX_CHROM_LEN: Position = 10_000;

/// Build a random sequence of `len` symbols drawn uniformly from `alphabet`.
pub fn random_sequence(len: usize, alphabet: &[u8]) -> Vec<u8> {
    let mut rng = thread_rng();
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// Build a random sequence of canonical uppercase bases.
pub fn random_nucleotides(len: usize) -> Vec<u8> {
    random_sequence(len, b"ACGT")
}

/// Build random sequence lengths
pub fn random_seqlen() -> Position {
    let mut rng = thread_rng();
    rng.gen_range(MIN_CHROM_LEN..=MAX_CHROM_LEN)
}

/// Build a random genome of `nchrom` chromosomes named `chr1`, `chr2`, ...,
/// with soft-masked (lowercase) and `N` bases mixed in.
pub fn random_genome(nchrom: usize) -> Vec<(String, Vec<u8>)> {
    (1..=nchrom)
        .map(|i| {
            let seq = random_sequence(random_seqlen() as usize, b"ACGTACGTACGTacgtN");
            (format!("chr{}", i), seq)
        })
        .collect()
}

/// A FASTA file in a temporary directory, removed when dropped.
pub struct TempFasta {
    _dir: TempDir,
    path: PathBuf,
}

impl TempFasta {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write `records` as a FASTA file with `line_width` bases per line, returning
/// the `.fai` index entries (name, length, offset, line bases, line width).
fn write_fasta<N: AsRef<str>, S: AsRef<[u8]>>(
    path: &Path,
    records: &[(N, S)],
    line_width: usize,
) -> std::io::Result<Vec<String>> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut offset = 0;
    let mut index = Vec::new();
    for (name, seq) in records {
        let (name, seq) = (name.as_ref(), seq.as_ref());
        let header = format!(">{}\n", name);
        writer.write_all(header.as_bytes())?;
        offset += header.len();
        index.push(format!(
            "{}\t{}\t{}\t{}\t{}",
            name,
            seq.len(),
            offset,
            line_width,
            line_width + 1
        ));
        for line in seq.chunks(line_width) {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
            offset += line.len() + 1;
        }
    }
    writer.flush()?;
    Ok(index)
}

/// Create a temporary FASTA file (without an index).
pub fn temp_fasta<N: AsRef<str>, S: AsRef<[u8]>>(
    records: &[(N, S)],
    line_width: usize,
) -> TempFasta {
    let dir = tempfile::tempdir().expect("could not create temporary directory");
    let path = dir.path().join("genome.fa");
    write_fasta(&path, records, line_width).expect("could not write temporary FASTA");
    TempFasta { _dir: dir, path }
}

/// Create a temporary FASTA file with its `.fai` index.
pub fn temp_indexed_fasta<N: AsRef<str>, S: AsRef<[u8]>>(
    records: &[(N, S)],
    line_width: usize,
) -> TempFasta {
    let dir = tempfile::tempdir().expect("could not create temporary directory");
    let path = dir.path().join("genome.fa");
    let index = write_fasta(&path, records, line_width).expect("could not write temporary FASTA");
    let fai = dir.path().join("genome.fa.fai");
    let mut contents = index.join("\n");
    contents.push('\n');
    std::fs::write(fai, contents).expect("could not write temporary FASTA index");
    TempFasta { _dir: dir, path }
}
