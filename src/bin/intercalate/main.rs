mod cli;
mod logging;

use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use intercalate::algorithm::derivation::{LengthInput, derive};
use intercalate::algorithm::simulation::reals::RealsSettings;
use intercalate::algorithm::simulation::settings::SimulationSettings;
use intercalate::algorithm::simulation::{DayInMonth, Simulation};
use intercalate::data::calendar::SpecialFeature;
use intercalate::error::Result;
use intercalate::io::import;
use intercalate::io::number::decimal_text_to_fraction;
use intercalate::io::project::Project;
use intercalate::io::summary::{TextWriter, fill_writer};

use crate::cli::{Cli, Command, DeriveArgs, SimulateArgs, SummaryArgs};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Derive(args) => derive_calendar(args),
        Command::Simulate(args) => simulate(args),
        Command::Summary(args) => summary(args),
    }
}

fn derive_calendar(args: DeriveArgs) -> Result<()> {
    let notation = args.notation();
    let input = LengthInput {
        year_length: notation.parse(&args.year)?,
        month_length: notation.parse(&args.month)?,
        months_in_year: args.months,
        day_length: args.day.day_length(),
    };
    info!(
        solution = %args.solution,
        year = %notation.format(&input.year_length),
        month = %notation.format(&input.month_length),
        "deriving calendar"
    );

    let calendar = derive(args.solution, &input)?;
    let project = Project::new(input, args.solution, calendar);
    if let Some(path) = &args.output {
        project.save(path)?;
        info!(path = %path.display(), "saved project");
    }

    print_summary(&project, args.title.as_deref());
    Ok(())
}

fn summary(args: SummaryArgs) -> Result<()> {
    let project = import(&args.project)?;
    print_summary(&project, args.title.as_deref());
    Ok(())
}

fn print_summary(project: &Project, title: Option<&str>) {
    let mut writer = TextWriter::new(title);
    fill_writer(&mut writer, project);
    print!("{}", writer.result());
}

fn simulate(args: SimulateArgs) -> Result<()> {
    let project = import(&args.project)?;

    let mut settings = SimulationSettings::new(Arc::new(project.calendar));
    settings.set_era_year(args.era.clone());
    settings.set_era_week_day(args.week_day);
    if let (Some(month_length), Some(year_length)) = (&args.real_month, &args.real_year) {
        settings.set_reals(Some(RealsSettings {
            month_length: decimal_text_to_fraction(month_length)?,
            year_length: decimal_text_to_fraction(year_length)?,
            month_shift: decimal_text_to_fraction(&args.moon_shift)?,
            year_shift: decimal_text_to_fraction(&args.season_shift)?,
        }));
    }

    let mut simulation = settings.build()?;
    if let Some(year) = &args.year {
        simulation.set_era_year(year);
    }
    info!(era_year = %simulation.era_year(), months = args.months, "simulating");

    for index in 0..args.months {
        if index > 0 {
            println!();
            simulation.goto_next_month();
        }
        print_month(&simulation);
    }

    Ok(())
}

fn print_month(simulation: &Simulation) {
    let mut header = format!(
        "{} {}: {} days",
        simulation.era_year(),
        simulation.month_name(),
        simulation.days_in_current_month(),
    );
    match simulation.month_feature() {
        SpecialFeature::None => {}
        SpecialFeature::Leap => header.push_str(", leap month"),
        SpecialFeature::Epagomenal => header.push_str(", epagomenal days"),
    }
    if simulation.is_leap_year() {
        header.push_str(", leap year");
    }
    println!("{header}");

    let weeks = simulation.get_days_in_month();
    for week in &weeks {
        let row = week
            .iter()
            .map(|slot| match slot {
                Some(day) => format!("{:>4}", day.day),
                None => "    ".to_string(),
            })
            .collect::<String>();
        println!("{}", row.trim_end());
    }

    for DayInMonth { day, moon, season } in weeks.iter().flatten().flatten() {
        let labels = moon
            .map(|moon| moon.to_string())
            .into_iter()
            .chain(season.map(|season| season.to_string()))
            .collect::<Vec<_>>();
        if !labels.is_empty() {
            println!("{day:>4}: {}", labels.join(", "));
        }
    }
}
