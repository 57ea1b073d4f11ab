use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, ValueHint};

/// Build the `fraudscan` command line.
pub fn build_cli() -> Command {
    Command::new("fraudscan")
        .version(clap::crate_version!())
        .about("Train a leaky-ReLU perceptron to flag fraudulent records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Train on a dataset, then evaluate on the held-out tail")
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON run configuration. Defaults are used when omitted.")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("data")
                        .short('d')
                        .long("data")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Labeled CSV/TSV file to train on. Without it a synthetic \
                             fraud dataset is generated.",
                        )
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("label_column")
                        .long("label-column")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help("Header name of the label column. Defaults to the last column."),
                )
                .arg(
                    Arg::new("learning_rate")
                        .short('l')
                        .long("learning-rate")
                        .value_parser(clap::value_parser!(f64))
                        .help("Learning rate. Overrides the configuration file."),
                )
                .arg(
                    Arg::new("epochs")
                        .short('e')
                        .long("epochs")
                        .value_parser(clap::value_parser!(usize))
                        .help("Epoch budget. Overrides the configuration file."),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .value_parser(clap::value_parser!(u64))
                        .help("Seed for weight initialization and synthetic data."),
                )
                .arg(
                    Arg::new("samples")
                        .long("samples")
                        .value_parser(clap::value_parser!(usize))
                        .help("Number of synthetic samples to generate."),
                )
                .arg(
                    Arg::new("features")
                        .long("features")
                        .value_parser(clap::value_parser!(usize))
                        .help("Number of features per synthetic sample."),
                )
                .arg(
                    Arg::new("train_fraction")
                        .long("train-fraction")
                        .value_parser(clap::value_parser!(f64))
                        .help("Fraction of samples (taken from the front) used for training."),
                )
                .arg(
                    Arg::new("no_standardize")
                        .long("no-standardize")
                        .help(
                            "Train on raw feature values. By default features read from \
                             --data are standardized with the training split's mean and std.",
                        )
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("predictions")
                        .short('o')
                        .long("predictions")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help("Write per-sample test predictions to this TSV file.")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help("Do not print per-epoch progress.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config").about("Print the default run configuration as JSON"),
        )
}
