use nflmodels_data::{PlayTable, PlayType};
use nflmodels_features::{
    Dataset, DropReport, Preprocessed,
    expected_points::{self, ExpectedPointsData, ExpectedPointsOptions},
    field_goal::{self, FieldGoalOptions, KickerPolicy},
    next_play::{self, NextPlayOptions},
};
use nflmodels_labeler::ScoringEvent;
use nflmodels_training::{ClassTargets, Task};

const DEFAULT_KICKER_THRESHOLD: usize = 100;

/// Projection options shared by the `preprocess` and `train` commands.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TaskOptionsArg {
    /// Seasons to keep, comma separated (all seasons when omitted)
    #[arg(long, value_delimiter = ',')]
    seasons: Vec<u16>,
    /// Field goal: leave out extra point attempts
    #[arg(long)]
    no_extra_points: bool,
    /// Field goal: leave out the roof and wind features
    #[arg(long)]
    no_wind: bool,
    /// Field goal: leave out the kicker indicators
    #[arg(long)]
    no_kickers: bool,
    /// Field goal: kickers with their own indicator (`active` or `all`)
    #[arg(long, default_value = "active")]
    kickers: KickerPolicy,
    /// Field goal: kickers with at most this many attempts are grouped as "Other"
    #[arg(long, default_value_t = DEFAULT_KICKER_THRESHOLD)]
    kicker_threshold: usize,
    /// Next play: play types to predict, comma separated (pass, run, field_goal, punt when omitted)
    #[arg(long, value_delimiter = ',')]
    play_types: Vec<PlayType>,
    /// Next play: write play type codes instead of names
    #[arg(long)]
    map_target_to_int: bool,
}

impl TaskOptionsArg {
    pub(crate) fn field_goal(&self) -> FieldGoalOptions {
        FieldGoalOptions {
            seasons: self.seasons.clone(),
            use_extra_points: !self.no_extra_points,
            use_wind: !self.no_wind,
            use_kickers: !self.no_kickers,
            kickers: self.kickers.clone(),
            kicker_threshold: self.kicker_threshold,
        }
    }

    pub(crate) fn next_play(&self) -> NextPlayOptions {
        let mut options = NextPlayOptions {
            seasons: self.seasons.clone(),
            ..Default::default()
        };
        if !self.play_types.is_empty() {
            options.play_types.clone_from(&self.play_types);
        }
        options
    }

    pub(crate) fn expected_points(&self) -> ExpectedPointsOptions {
        ExpectedPointsOptions {
            seasons: self.seasons.clone(),
        }
    }

    pub(crate) fn map_target_to_int(&self) -> bool {
        self.map_target_to_int
    }
}

/// Projected data of one task.
pub(crate) enum TaskData {
    FieldGoal(Dataset<u8>),
    NextPlay(Dataset<PlayType>),
    ExpectedPoints(ExpectedPointsData),
}

/// Projects a table into the feature tables of a task.
pub(crate) fn project(
    task: Task,
    table: &PlayTable,
    options: &TaskOptionsArg,
) -> anyhow::Result<Preprocessed<TaskData>> {
    eprintln!("Projecting {task} features...");
    let preprocessed = match task {
        Task::FieldGoal => {
            let Preprocessed { data, dropped } =
                field_goal::preprocess(table, &options.field_goal(), None)?;
            Preprocessed {
                data: TaskData::FieldGoal(data),
                dropped,
            }
        }
        Task::NextPlay => {
            let Preprocessed { data, dropped } =
                next_play::preprocess(table, &options.next_play(), None)?;
            Preprocessed {
                data: TaskData::NextPlay(data),
                dropped,
            }
        }
        Task::ExpectedPoints => {
            let Preprocessed { data, dropped } =
                expected_points::preprocess(table, &options.expected_points(), None)?;
            Preprocessed {
                data: TaskData::ExpectedPoints(data),
                dropped,
            }
        }
    };
    eprintln!("Dropped {} rows", preprocessed.dropped.total());
    Ok(preprocessed)
}

/// A dataset with integer class codes and the names of its classes.
pub(crate) struct TrainingData {
    pub(crate) dataset: Dataset<usize>,
    pub(crate) class_names: Vec<String>,
    pub(crate) dropped: DropReport,
}

/// Projects a table into the training dataset of a task.
///
/// The expected points model is trained on the non point-after plays.
pub(crate) fn training_data(
    task: Task,
    table: &PlayTable,
    options: &TaskOptionsArg,
) -> anyhow::Result<TrainingData> {
    let Preprocessed { data, dropped } = project(task, table, options)?;
    let (dataset, class_names) = match data {
        TaskData::FieldGoal(dataset) => (
            dataset.map_target(usize::from),
            vec!["0".to_owned(), "1".to_owned()],
        ),
        TaskData::NextPlay(dataset) => {
            let codes = options.next_play().codes();
            let names = codes
                .play_types()
                .iter()
                .map(ToString::to_string)
                .collect();
            (codes.encode_dataset(&dataset), names)
        }
        TaskData::ExpectedPoints(ExpectedPointsData { normal, .. }) => {
            let targets = ClassTargets::<ScoringEvent>::from_values(&normal.y);
            let names = targets.names();
            let y = targets
                .encode(&normal.y)
                .ok_or_else(|| anyhow::anyhow!("Scoring event without class code"))?;
            let dataset = Dataset {
                target_name: normal.target_name,
                x: normal.x,
                y,
                schema: normal.schema,
            };
            (dataset, names)
        }
    };
    Ok(TrainingData {
        dataset,
        class_names,
        dropped,
    })
}
