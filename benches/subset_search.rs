use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use featsel::cross_validation::KFoldEvaluator;
use featsel::prelude::*;
use featsel::search::{FeatureSubsetSearch, OptimizationDriver};
use featsel_bayes::GaussianNb;
use featsel_datasets::generate;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn cross_validation_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let params = GaussianNb::params();

    // Controls the number of rows of the evaluated dataset
    let dataset_sizes = &[100, 1000, 10000];

    let mut group = c.benchmark_group("kfold_evaluation");
    group.sample_size(10);

    for n in dataset_sizes.iter() {
        let dataset = generate::make_informative(*n, 3, 3, 1., &mut rng);
        let subset = FeatureSubset::new(dataset.feature_names().iter().take(4)).unwrap();
        let evaluator = KFoldEvaluator::new(&dataset, &params, 4).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n), &subset, |b, s| {
            b.iter(|| evaluator.score(s))
        });
    }

    group.finish();
}

fn search_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let params = GaussianNb::params();

    let dataset = generate::make_informative(1000, 4, 12, 0.5, &mut rng);
    let evaluator = KFoldEvaluator::new(&dataset, &params, 4).unwrap();
    let initial = FeatureSubset::new(vec!["informative-0"]).unwrap();

    let mut group = c.benchmark_group("subset_search");
    group.sample_size(10);

    let search =
        FeatureSubsetSearch::new(&evaluator, dataset.feature_names(), initial.clone()).unwrap();
    group.bench_function("single_run", |b| {
        b.iter(|| search.run(&mut rng));
    });

    // Sequential and parallel execution of the restarts differ in the number of runs only
    for n_runs in [1, 4, 16].iter() {
        let driver = OptimizationDriver::params().n_runs(*n_runs);
        group.bench_with_input(BenchmarkId::new("restarts", n_runs), &driver, |b, d| {
            b.iter(|| d.optimize(&evaluator, dataset.feature_names(), initial.clone()))
        });
    }

    group.finish();
}

criterion_group!(benches, cross_validation_bench, search_bench);
criterion_main!(benches);
