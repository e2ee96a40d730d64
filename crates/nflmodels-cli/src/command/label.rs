use std::path::PathBuf;

use nflmodels_features::{
    Preprocessed,
    expected_points::{self, ExpectedPointsOptions, LabeledPlay},
};
use nflmodels_labeler::ScoringEvent;
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LabelArg {
    /// Play-by-play CSV file
    input: PathBuf,
    /// Seasons to keep, comma separated (all seasons when omitted)
    #[arg(long, value_delimiter = ',')]
    seasons: Vec<u16>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct LabeledRow<'a> {
    game_id: &'a str,
    play_id: Option<f64>,
    game_half: Option<&'a str>,
    posteam: Option<&'a str>,
    next_score: ScoringEvent,
    next_score_value: i8,
}

impl<'a> From<&'a LabeledPlay> for LabeledRow<'a> {
    fn from(play: &'a LabeledPlay) -> Self {
        Self {
            game_id: &play.record.game_id,
            play_id: play.record.play_id,
            game_half: play.record.game_half.as_deref(),
            posteam: play.record.posteam.as_deref(),
            next_score: play.next_score,
            next_score_value: play.next_score_value,
        }
    }
}

pub(crate) fn run(arg: &LabelArg) -> anyhow::Result<()> {
    let LabelArg {
        input,
        seasons,
        output,
    } = arg;

    let table = util::read_plays_file(input)?;
    let options = ExpectedPointsOptions {
        seasons: seasons.clone(),
    };
    eprintln!("Labeling next scoring events...");
    let Preprocessed { data, dropped } = expected_points::label_plays(&table, &options)?;
    eprintln!("Labeled {} plays, dropped {}", data.len(), dropped.total());

    Output::save_csv(data.iter().map(LabeledRow::from), output.clone())?;
    Ok(())
}
