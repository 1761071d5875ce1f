use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kmerscope_seq::{
    find_clumps, frequent_words_with_mismatches, neighbors, FrequencyStrategy, FrequencyTable,
};

fn random_dna(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut state: u64 = 42;
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        seq.push(bases[((state >> 33) % 4) as usize]);
    }
    seq
}

fn bench_frequency_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("frequency_table");
    let text = random_dna(2_000);

    for k in [4usize, 8] {
        for strategy in [
            FrequencyStrategy::BruteForce,
            FrequencyStrategy::DirectIndexed,
            FrequencyStrategy::Sorted,
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), k),
                &k,
                |b, &k| b.iter(|| FrequencyTable::build(black_box(&text), k, strategy)),
            );
        }
    }

    group.finish();
}

fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbors");
    let pattern = random_dna(12);

    for d in [1usize, 2, 3] {
        group.bench_with_input(BenchmarkId::from_parameter(d), &d, |b, &d| {
            b.iter(|| neighbors(black_box(&pattern), d))
        });
    }

    group.finish();
}

fn bench_frequent_with_mismatches(c: &mut Criterion) {
    let text = random_dna(1_000);
    c.bench_function("frequent_words_with_mismatches_k8_d2", |b| {
        b.iter(|| frequent_words_with_mismatches(black_box(&text), 8, 2))
    });
}

fn bench_clumps(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_clumps");

    // ~100 kbp genome, classic ori-search parameters.
    let genome = random_dna(100_000);
    group.bench_function("k9_t3_L500", |b| {
        b.iter(|| find_clumps(black_box(&genome), 9, 3, 500))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_frequency_strategies,
    bench_neighbors,
    bench_frequent_with_mismatches,
    bench_clumps
);
criterion_main!(benches);
