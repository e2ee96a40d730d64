use std::path::{Path, PathBuf};

use chrono::Utc;
use nflmodels_training::{
    EvaluationReport, FieldGoalDiagnostics, LogisticRegression, ModelAdapter, Task, diagnostics,
};
use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;

use super::options::{TaskOptionsArg, TrainingData, training_data};
use crate::util::{self, Output};

const DEFAULT_VALIDATION_FRACTION: f64 = 0.2;
const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Task to train a model for (fieldgoal, nextplay, expectedpoints)
    task: Task,
    /// Play-by-play CSV file
    input: PathBuf,
    #[clap(flatten)]
    options: TaskOptionsArg,
    /// Share of rows held out for validation
    #[arg(long, default_value_t = DEFAULT_VALIDATION_FRACTION)]
    validation_fraction: f64,
    /// Seed of the train/validation split and of the classifier
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Maximum number of training epochs (task default when omitted)
    #[arg(long)]
    max_iter: Option<usize>,
    /// Evaluation report output path
    #[arg(long)]
    report: Option<PathBuf>,
    /// Directory for the validation diagnostics tables (field goal only)
    #[arg(long)]
    diagnostics_dir: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        task,
        input,
        options,
        validation_fraction,
        seed,
        max_iter,
        report,
        diagnostics_dir,
    } = arg;
    anyhow::ensure!(
        *validation_fraction > 0.0 && *validation_fraction < 1.0,
        "validation fraction must be between 0 and 1, got {validation_fraction}"
    );

    let table = util::read_plays_file(input)?;
    let TrainingData {
        dataset,
        class_names,
        dropped,
    } = training_data(*task, &table, options)?;

    let (train_indices, validation_indices) =
        split_indices(dataset.len(), *validation_fraction, *seed);
    anyhow::ensure!(
        !train_indices.is_empty() && !validation_indices.is_empty(),
        "not enough rows to split: {} rows after preprocessing",
        dataset.len()
    );
    let train = dataset.select_rows(&train_indices);
    let validation = dataset.select_rows(&validation_indices);

    let mut params = task.default_params();
    params.seed = *seed;
    if let Some(max_iter) = max_iter {
        params.max_iter = *max_iter;
    }
    let mut model = ModelAdapter::new(*task, LogisticRegression::new(params), class_names)
        .with_print_metrics(true);

    eprintln!(
        "Training {task} model on {} rows ({} features, {} classes)...",
        train.len(),
        train.x.n_columns(),
        model.class_names().len()
    );
    model.fit(&train.x, &train.y)?;
    eprintln!("Validating on {} rows...", validation.len());
    let scored = model.predict_and_score(&validation.x, &validation.y)?;

    if let Some(dir) = diagnostics_dir {
        match diagnostics::diagnose(*task, &validation.x, &validation.y, &scored.probabilities) {
            Some(diagnostics) => save_diagnostics(&diagnostics, dir)?,
            None => eprintln!("No diagnostics for the {task} task"),
        }
    }

    let report_value = EvaluationReport {
        task: *task,
        trained_at: Utc::now(),
        train_rows: train.len(),
        validation_rows: validation.len(),
        features: dataset.x.columns().to_vec(),
        classes: model.class_names().to_vec(),
        params: model.classifier().params().clone(),
        epochs: model.classifier().epochs(),
        dropped_rows: EvaluationReport::dropped_rows(&dropped),
        metrics: scored.metrics,
    };
    Output::save_json(&report_value, report.clone())?;
    Ok(())
}

/// Shuffles row indices with a seeded generator and splits off the
/// validation share, rounded up.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
fn split_indices(len: usize, validation_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut indices = (0..len).collect::<Vec<_>>();
    indices.shuffle(&mut rng);
    let n_validation = ((len as f64 * validation_fraction).ceil() as usize).min(len);
    let train = indices.split_off(n_validation);
    (train, indices)
}

fn save_diagnostics(diagnostics: &FieldGoalDiagnostics, dir: &Path) -> anyhow::Result<()> {
    let roc = util::output_file_in(dir, "roc_curve.csv")?;
    Output::save_csv(diagnostics.roc_rows(), Some(roc))?;
    let calibration = util::output_file_in(dir, "calibration.csv")?;
    Output::save_csv(diagnostics.calibration_rows(), Some(calibration))?;
    let by_distance = util::output_file_in(dir, "success_by_distance.csv")?;
    Output::save_csv(&diagnostics.success_by_distance, Some(by_distance))?;
    eprintln!("Saved diagnostics to {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_indices_partitions_rows() {
        let (train, validation) = split_indices(10, 0.2, 7);
        assert_eq!(train.len(), 8);
        assert_eq!(validation.len(), 2);
        let mut all = train.iter().chain(&validation).copied().collect::<Vec<_>>();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_indices_is_seeded() {
        assert_eq!(split_indices(50, 0.3, 1), split_indices(50, 0.3, 1));
        assert_ne!(split_indices(50, 0.3, 1), split_indices(50, 0.3, 2));
    }

    #[test]
    fn test_split_indices_rounds_up() {
        let (train, validation) = split_indices(3, 0.1, 0);
        assert_eq!((train.len(), validation.len()), (2, 1));
    }
}
