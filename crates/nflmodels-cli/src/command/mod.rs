use clap::{Parser, Subcommand};

use self::{label::LabelArg, preprocess::PreprocessArg, train::TrainArg};

mod label;
mod options;
mod preprocess;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Label every play with the next scoring event of its game half
    Label(#[clap(flatten)] LabelArg),
    /// Write the feature table of a task as CSV
    Preprocess(#[clap(flatten)] PreprocessArg),
    /// Fit and validate the model of a task
    Train(#[clap(flatten)] TrainArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Label(arg) => label::run(&arg)?,
        Mode::Preprocess(arg) => preprocess::run(&arg)?,
        Mode::Train(arg) => train::run(&arg)?,
    }
    Ok(())
}
