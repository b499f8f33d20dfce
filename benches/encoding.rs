use criterion::{criterion_group, criterion_main, Criterion};
use genoseq::prelude::*;
use genoseq::test_utilities::{random_genome, random_nucleotides, temp_indexed_fasta};
use rand::thread_rng;

const SEQ_LENGTH: usize = 1_000;

fn bench_onehot(c: &mut Criterion) {
    // create the benchmark group
    let mut group = c.benchmark_group("onehot");

    let seq = random_nucleotides(SEQ_LENGTH);
    let encoding = encode(&seq);

    group.bench_function("encode", |b| b.iter(|| encode(&seq)));
    group.bench_function("decode", |b| b.iter(|| decode(encoding.view())));
    group.finish();
}

fn bench_random_encodings(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_encoding");

    // create the test data
    let fasta = temp_indexed_fasta(&random_genome(22), 60);
    let genome = GenomeStore::from_indexed_fasta(fasta.path(), None).unwrap();
    let mut rng = thread_rng();

    group.bench_function("random_indexed", |b| {
        b.iter(|| {
            let interval = genome
                .random_interval(&mut rng, 200, Strand::Reverse)
                .unwrap();
            genome.fetch_encoding(&interval).unwrap()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_onehot, bench_random_encodings);
criterion_main!(benches);
