use criterion::{black_box, criterion_group, criterion_main, Criterion};
use modsum_core::{
    reachable_residues, select_moduli, solve_adaptive, solve_dense, solve_filtered, solve_sparse,
    Instance, ModulusList, SelectorConfig,
};

fn instance(weights: &[i64], target: i64) -> Instance {
    Instance::new(weights.to_vec(), target).expect("valid instance")
}

fn bench_reachable_residues(c: &mut Criterion) {
    let weights = [3, 34, 4, 12, 5, 2, 17, 29, 41, 8];

    c.bench_function("reachable_residues", |b| {
        b.iter(|| {
            for m in [2, 3, 5, 7, 11, 13, 17, 19, 23, 29] {
                black_box(reachable_residues(black_box(&weights), black_box(m)).ok());
            }
        })
    });
}

fn bench_early_rejection(c: &mut Criterion) {
    let structured = instance(&[7, 14, 21, 28, 35, 42, 49, 56], 1000);
    let moduli = ModulusList::new(vec![7]).expect("valid moduli");

    c.bench_function("dense_multiples_of_seven", |b| {
        b.iter(|| black_box(solve_dense(black_box(&structured)).ok()))
    });
    c.bench_function("sparse_multiples_of_seven", |b| {
        b.iter(|| black_box(solve_sparse(black_box(&structured))))
    });
    c.bench_function("filtered_multiples_of_seven", |b| {
        b.iter(|| black_box(solve_filtered(black_box(&structured), black_box(&moduli))))
    });
}

fn bench_dense_residues(c: &mut Criterion) {
    let dense = instance(&[1, 2, 3, 4, 5], 15);
    let config = SelectorConfig::default();

    c.bench_function("adaptive_dense_residues", |b| {
        b.iter(|| black_box(solve_adaptive(black_box(&dense), 3, &config).ok()))
    });
    c.bench_function("select_moduli", |b| {
        b.iter(|| black_box(select_moduli(black_box(dense.weights()), 3, &config).ok()))
    });
}

fn bench_large_target(c: &mut Criterion) {
    let large = instance(&[12, 18, 30, 42, 66, 78], 20_000);
    let moduli = ModulusList::new(vec![6, 5]).expect("valid moduli");

    c.bench_function("dense_large_target", |b| {
        b.iter(|| black_box(solve_dense(black_box(&large)).ok()))
    });
    c.bench_function("filtered_large_target", |b| {
        b.iter(|| black_box(solve_filtered(black_box(&large), black_box(&moduli))))
    });
}

criterion_group!(
    benches,
    bench_reachable_residues,
    bench_early_rejection,
    bench_dense_residues,
    bench_large_target
);
criterion_main!(benches);
