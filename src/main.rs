use anyhow::{Context, Result};
use bayes_classifier::{
    command::{Command, CommandError},
    dataset, NaiveBayesClassifier, WeightedAverage,
};
use clap::{Parser, Subcommand};
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "bayes", about = "Train and query a naive Bayes classifier")]
struct Cli {
    /// How many observations the assumed probability is worth.
    #[arg(long, global = true, env = "BAYES_WEIGHT", default_value_t = 1.0)]
    weight: f64,

    /// Probability assumed for features with little evidence.
    #[arg(long, global = true, env = "BAYES_ASSUMED_PROBABILITY", default_value_t = 0.5)]
    assumed_probability: f64,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Read `t <category> <features...>` / `c <features...>` lines from stdin.
    Repl,
    /// Train from one CSV file and write predictions for another.
    Predict {
        #[arg(long)]
        train: PathBuf,
        #[arg(long)]
        test: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

impl Cli {
    fn smoothing(&self) -> Result<WeightedAverage> {
        WeightedAverage::new(self.weight, self.assumed_probability)
            .context("invalid --weight / --assumed-probability")
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_env("BAYES_LOG")
                .unwrap_or_else(|_| EnvFilter::new("bayes_classifier=warn,bayes=warn")),
        )
        .init();

    let cli = Cli::parse();
    let smoothing = cli.smoothing()?;
    let classifier = NaiveBayesClassifier::with_smoothing(smoothing);

    match cli.command.unwrap_or(Mode::Repl) {
        Mode::Repl => {
            let stdin = io::stdin();
            repl(classifier, stdin.lock(), io::stdout().lock())
        }
        Mode::Predict {
            train,
            test,
            output,
        } => predict(classifier, &train, &test, &output),
    }
}

fn predict(
    mut classifier: NaiveBayesClassifier<String, String>,
    train: &Path,
    test: &Path,
    output: &Path,
) -> Result<()> {
    dataset::train_from_path(&mut classifier, train)
        .with_context(|| format!("failed to train from {}", train.display()))?;
    let predictions = dataset::predict_path(&classifier, test, output)
        .with_context(|| format!("failed to predict {}", test.display()))?;

    println!("Wrote {} predictions to {}", predictions.len(), output.display());

    Ok(())
}

fn repl<R: BufRead, W: Write>(
    mut classifier: NaiveBayesClassifier<String, String>,
    input: R,
    mut out: W,
) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("failed to read from stdin")?;

        match line.parse::<Command>() {
            Ok(Command::Train { category, features }) => {
                classifier.train(category, &features);
            }
            Ok(Command::Classify { features }) => {
                print_results(&classifier, &features, &mut out)?;
            }
            Ok(Command::Reset) => {
                classifier.reset();
                info!("classifier reset");
                writeln!(out, "Reset")?;
            }
            Ok(Command::Stats) => {
                let store = classifier.store();
                writeln!(
                    out,
                    "{} examples, {} categories, {} features",
                    store.total_category_count(),
                    store.category_len(),
                    store.feature_len()
                )?;
            }
            Ok(Command::Quit) => return Ok(()),
            Err(CommandError::Empty) => {}
            Err(err) => {
                warn!(%err, "rejected command");
                writeln!(out, "{}", err)?;
            }
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

fn print_results<W: Write>(
    classifier: &NaiveBayesClassifier<String, String>,
    features: &[String],
    out: &mut W,
) -> Result<()> {
    let detailed = classifier.classify_detailed(features);

    writeln!(out, "Results:")?;
    for classification in &detailed {
        writeln!(out, "{}", classification)?;
    }

    match detailed.last() {
        Some(best) => writeln!(out, "Classified as {}", best.category)?,
        None => writeln!(out, "No results")?,
    }

    Ok(())
}
