use std::{fmt, path::PathBuf};

use anyhow::Context;
use nflmodels_features::{Dataset, Preprocessed};
use nflmodels_training::Task;

use super::options::{TaskData, TaskOptionsArg, project};
use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PreprocessArg {
    /// Task to project features for (fieldgoal, nextplay, expectedpoints)
    task: Task,
    /// Play-by-play CSV file
    input: PathBuf,
    #[clap(flatten)]
    options: TaskOptionsArg,
    /// Output file path (a directory for expectedpoints)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PreprocessArg) -> anyhow::Result<()> {
    let PreprocessArg {
        task,
        input,
        options,
        output,
    } = arg;

    let table = util::read_plays_file(input)?;
    let Preprocessed { data, .. } = project(*task, &table, options)?;
    match data {
        TaskData::FieldGoal(dataset) => save_dataset(&dataset, output.clone())?,
        TaskData::NextPlay(dataset) => {
            if options.map_target_to_int() {
                let codes = options.next_play().codes();
                save_dataset(&codes.encode_dataset(&dataset), output.clone())?;
            } else {
                save_dataset(&dataset, output.clone())?;
            }
        }
        TaskData::ExpectedPoints(data) => {
            let dir = output.as_deref().ok_or_else(|| {
                anyhow::anyhow!("expectedpoints writes two tables; pass an output directory")
            })?;
            save_dataset(&data.normal, Some(util::output_file_in(dir, "normal.csv")?))?;
            save_dataset(&data.pat, Some(util::output_file_in(dir, "pat.csv")?))?;
        }
    }
    Ok(())
}

fn save_dataset<T>(dataset: &Dataset<T>, output_path: Option<PathBuf>) -> anyhow::Result<()>
where
    T: fmt::Display,
{
    let mut output = Output::from_output_path(output_path)?;
    dataset
        .write_merged_csv(&mut output)
        .with_context(|| format!("Failed to write features to {}", output.display_path()))?;
    eprintln!(
        "Wrote {} rows x {} features to {}",
        dataset.len(),
        dataset.x.n_columns(),
        output.display_path()
    );
    Ok(())
}
