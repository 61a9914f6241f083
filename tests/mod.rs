//! # Integration tests
//!
//! Integration tests completely external from the crate. All code written in this module could be
//! written by an external user of the crate.

mod derivation;
mod simulation;
mod workflow;

use intercalate::algorithm::derivation::LengthInput;
use intercalate::data::number_types::fraction::MixedFraction;
use intercalate::io::number::DayLength;

fn input(year_length: &str, month_length: &str, months_in_year: usize) -> LengthInput {
    LengthInput {
        year_length: year_length.parse::<MixedFraction>().unwrap(),
        month_length: month_length.parse::<MixedFraction>().unwrap(),
        months_in_year,
        day_length: DayLength::default(),
    }
}
