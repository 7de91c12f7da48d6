//! Select features for a synthetic loan dataset
//!
//! Run with `RUST_LOG=info cargo run --example restarts` to follow the search, or pass the path
//! of a cleaned CSV file and the name of its label column:
//!
//! ```text
//! cargo run --example restarts -- data/loans.csv IR_TF FICO.Score
//! ```
//! Any further arguments form the required initial subset.

use std::env;

use featsel::cross_validation::KFoldEvaluator;
use featsel::search::OptimizationDriver;
use featsel::FeatureSubset;
use featsel_bayes::GaussianNb;
use featsel_datasets::generate;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    let (dataset, initial) = match args.as_slice() {
        [path, label, initial @ ..] if !initial.is_empty() => {
            (featsel_datasets::from_csv(path, label)?, initial.to_vec())
        }
        [] => {
            let mut rng = SmallRng::seed_from_u64(42);
            let dataset = generate::make_informative(500, 3, 7, 0.8, &mut rng);
            (dataset, vec!["informative-0".to_string()])
        }
        _ => return Err("usage: restarts [<csv> <label> <feature>...]".into()),
    };

    let (negatives, positives) = dataset.class_counts();
    println!(
        "{} records with {} features, {} positive and {} negative",
        dataset.nsamples(),
        dataset.nfeatures(),
        positives,
        negatives
    );

    let params = GaussianNb::params();
    let evaluator = KFoldEvaluator::new(&dataset, &params, 4)?;
    let optimization = OptimizationDriver::params().seed(42).optimize(
        &evaluator,
        dataset.feature_names(),
        FeatureSubset::new(initial)?,
    )?;

    for (i, (run, best)) in optimization
        .runs()
        .iter()
        .zip(optimization.trajectory())
        .enumerate()
    {
        println!(
            "run {:>3}: {} features, {} correct, best so far {}",
            i + 1,
            run.subset().len(),
            run.score().correct(),
            best.correct()
        );
    }

    let best = optimization.best();
    let cv = evaluator.evaluate(best.subset())?;
    println!("best subset {}", best.subset());
    println!("score: {}", cv.score());
    println!("{:?}", cv.confusion_matrix()?);

    Ok(())
}
