use fraudscan_classifiers::models::perceptron::LeakyReluPerceptron;
use fraudscan_classifiers::report::{evaluate, ConsoleObserver};
use fraudscan_classifiers::synthetic::SyntheticConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 100 records, 5 features, label = mean(features) > 0.55
    let dataset = SyntheticConfig {
        n_samples: 100,
        n_features: 5,
        seed: Some(2024),
    }
    .generate()?;
    dataset.log_summary();

    let (train, test) = dataset.split(0.8)?;
    println!("Synthetic train shape: {:?}", train.x.shape());
    println!("Synthetic test shape: {:?}", test.x.shape());

    let mut model = LeakyReluPerceptron::with_seed(0.015, 200, 2024);
    let mut observer = ConsoleObserver::new(std::io::stdout());
    let history = model.fit_with_observer(&train.x, train.y.as_slice(), &mut observer)?;
    println!("Trained for {} epochs", history.epochs_run());

    let predictions = model.predict(&test.x)?;
    let report = evaluate(test.y.as_slice(), &predictions)?;
    report.render(&mut std::io::stdout())?;

    Ok(())
}
