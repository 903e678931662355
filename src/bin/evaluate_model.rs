//! Hold-out evaluation for the MediHealth decision tree.
//!
//! Loads the training CSV, shuffles it with a fixed seed, fits a tree on
//! the training share and prints accuracy and the confusion matrix for the
//! remaining rows.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin evaluate_model -- [<dataset.csv>] [--ratio <0..1>] [--seed <u64>]
//! ```
//!
//! The dataset path defaults to `MEDIHEALTH_DATASET_PATH` (or `data/heart.csv`).

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use medihealth::adapters::{evaluate_holdout, load_training_table};
use medihealth::AppConfig;

const DEFAULT_RATIO: f32 = 0.8;
const DEFAULT_SEED: u64 = 42;

struct Args {
    dataset: PathBuf,
    ratio: f32,
    seed: u64,
}

fn usage() -> anyhow::Error {
    anyhow!("Usage: evaluate_model [<dataset.csv>] [--ratio <0..1>] [--seed <u64>]")
}

fn parse_args() -> Result<Args> {
    let mut args = env::args().skip(1);
    let mut dataset: Option<PathBuf> = None;
    let mut ratio = DEFAULT_RATIO;
    let mut seed = DEFAULT_SEED;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ratio" => {
                let v = args.next().ok_or_else(usage)?;
                ratio = v
                    .trim()
                    .parse::<f32>()
                    .context("--ratio must be a number between 0 and 1")?;
            }
            "--seed" => {
                let v = args.next().ok_or_else(usage)?;
                seed = v.trim().parse::<u64>().context("--seed must be a u64")?;
            }
            "-h" | "--help" => return Err(usage()),
            _ => {
                if dataset.is_none() {
                    dataset = Some(PathBuf::from(arg));
                } else {
                    return Err(usage());
                }
            }
        }
    }

    let dataset = dataset.unwrap_or_else(|| AppConfig::from_env().dataset_path);
    Ok(Args {
        dataset,
        ratio,
        seed,
    })
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let table = load_training_table(&args.dataset)
        .with_context(|| format!("Failed to load {:?}", args.dataset))?;
    let (at_risk, clear) = table.class_counts();

    println!("Dataset: {}", args.dataset.display());
    println!(
        "Rows: {} (at risk: {at_risk}, clear: {clear}, skipped: {})",
        table.len(),
        table.skipped_rows()
    );

    let report = evaluate_holdout(&table, args.ratio, args.seed)?;

    println!(
        "Split: {} train / {} test (ratio {}, seed {})",
        report.train_rows, report.test_rows, args.ratio, args.seed
    );
    println!("Accuracy:  {:.2}%", report.accuracy * 100.0);
    println!("Precision: {:.2}%", report.precision * 100.0);
    println!("Recall:    {:.2}%", report.recall * 100.0);
    println!("{}", report.confusion);

    Ok(())
}
