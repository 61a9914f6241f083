use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use num::BigInt;

use intercalate::algorithm::derivation::Solution;
use intercalate::io::number::{DayLength, Notation};

/// Derive and simulate calendars for any year and month length.
#[derive(Parser)]
#[command(
    name = "intercalate",
    version,
    author = "Bram van den Heuvel <bram@vandenheuvel.online>",
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Derive a calendar from a year and month length.
    Derive(DeriveArgs),
    /// Show the months of a saved calendar.
    Simulate(SimulateArgs),
    /// Describe a saved calendar.
    Summary(SummaryArgs),
}

/// How lengths are written on the command line.
#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum NotationArg {
    /// "365 97/400"
    Fraction,
    /// "365.2425" or "29.5(3)"
    Decimal,
    /// "29 12h 44m 3s"
    Dhms,
}

/// Subdivision of a day.
#[derive(clap::Args)]
pub struct DayLengthArgs {
    /// Hours in a day.
    #[arg(long, default_value_t = 24)]
    pub hours: u32,

    /// Minutes in an hour.
    #[arg(long, default_value_t = 60)]
    pub minutes: u32,

    /// Seconds in a minute.
    #[arg(long, default_value_t = 60)]
    pub seconds: u32,
}

impl DayLengthArgs {
    pub fn day_length(&self) -> DayLength {
        DayLength { hours: self.hours, minutes: self.minutes, seconds: self.seconds }
    }
}

#[derive(clap::Args)]
pub struct DeriveArgs {
    /// Days in a year.
    #[arg(short, long)]
    pub year: String,

    /// Days in a month.
    #[arg(short, long)]
    pub month: String,

    /// Ordinary months in a year.
    #[arg(short = 'n', long, default_value_t = 12)]
    pub months: usize,

    /// Algorithm to derive the calendar with.
    #[arg(short, long, default_value = "gregorian")]
    pub solution: Solution,

    /// Notation of the year and month length.
    #[arg(long, value_enum, default_value_t = NotationArg::Fraction)]
    pub notation: NotationArg,

    #[command(flatten)]
    pub day: DayLengthArgs,

    /// Save the derived calendar as a project.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Title above the summary.
    #[arg(short, long)]
    pub title: Option<String>,
}

impl DeriveArgs {
    pub fn notation(&self) -> Notation {
        match self.notation {
            NotationArg::Fraction => Notation::Fraction,
            NotationArg::Decimal => Notation::Decimal,
            NotationArg::Dhms => Notation::DayHourMinuteSecond(self.day.day_length()),
        }
    }
}

#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Project file to read the calendar from.
    pub project: PathBuf,

    /// Era year of the epoch.
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub era: BigInt,

    /// Weekday of the first day after the epoch.
    #[arg(short, long, default_value_t = 0)]
    pub week_day: u32,

    /// Era year to start showing, the first year after the epoch if absent.
    #[arg(short, long, allow_negative_numbers = true)]
    pub year: Option<BigInt>,

    /// Number of months to show.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub months: usize,

    /// Days in the real month, to mark moon phases.
    #[arg(long, requires = "real_year")]
    pub real_month: Option<String>,

    /// Days in the real year, to mark seasons.
    #[arg(long, requires = "real_month")]
    pub real_year: Option<String>,

    /// Day on which a real month starts with a new moon.
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub moon_shift: String,

    /// Day on which a real year starts with winter.
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub season_shift: String,
}

#[derive(clap::Args)]
pub struct SummaryArgs {
    /// Project file to read the calendar from.
    pub project: PathBuf,

    /// Title above the summary.
    #[arg(short, long)]
    pub title: Option<String>,
}
