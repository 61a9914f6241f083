//! # Projects
//!
//! A project holds everything needed to reopen a calendar: the lengths it was derived from, the
//! algorithm that derived it and the calendar as it was edited. Projects are stored as JSON.
//!
//! A project file is either read completely or not at all. Whatever the problem with a file, the
//! caller sees the same error.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::algorithm::derivation::{LengthInput, Solution};
use crate::data::calendar::Calendar;
use crate::data::number_types::fraction::MixedFraction;
use crate::error::{CalendarError, Result};
use crate::io::number::DayLength;

pub(crate) const COULD_NOT_OPEN: &str = "could not open project";

/// A saved calendar with its origin.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Project {
    #[allow(missing_docs)]
    pub day_length: DayLength,
    #[allow(missing_docs)]
    pub year_length: MixedFraction,
    #[allow(missing_docs)]
    pub month_length: MixedFraction,
    #[allow(missing_docs)]
    pub months_in_year: usize,
    /// Algorithm the calendar was derived with.
    pub solution: Solution,
    /// The calendar, possibly edited after derivation.
    pub calendar: Calendar,
}

impl Project {
    #[allow(missing_docs)]
    pub fn new(input: LengthInput, solution: Solution, calendar: Calendar) -> Self {
        let LengthInput { year_length, month_length, months_in_year, day_length } = input;
        Self { day_length, year_length, month_length, months_in_year, solution, calendar }
    }

    /// The lengths the calendar was derived from.
    pub fn input(&self) -> LengthInput {
        LengthInput {
            year_length: self.year_length.clone(),
            month_length: self.month_length.clone(),
            months_in_year: self.months_in_year,
            day_length: self.day_length,
        }
    }

    /// Check the lengths and the calendar.
    ///
    /// # Errors
    ///
    /// `InvalidCalendarState` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.input().validate()?;
        let DayLength { hours, minutes, seconds } = self.day_length;
        if hours == 0 || minutes == 0 || seconds == 0 {
            return Err(CalendarError::invalid_state("every part of a day must be positive"));
        }
        self.calendar.validate()
    }

    /// Write the project as JSON text.
    ///
    /// # Errors
    ///
    /// `InvalidCalendarState` if the project is not valid.
    pub fn to_json(&self) -> Result<String> {
        self.validate()?;
        serde_json::to_string_pretty(self).map_err(|error| {
            CalendarError::invalid_state(format!("could not write project: {error}"))
        })
    }

    /// Read a project from JSON text.
    ///
    /// # Errors
    ///
    /// `InvalidCalendarState("could not open project")` if the text is not a valid project.
    pub fn from_json(text: &str) -> Result<Self> {
        let project = serde_json::from_str::<Self>(text).map_err(|error| {
            warn!(%error, "project is not readable");
            CalendarError::invalid_state(COULD_NOT_OPEN)
        })?;
        project.validate().map_err(|error| {
            warn!(%error, "project is not consistent");
            CalendarError::invalid_state(COULD_NOT_OPEN)
        })?;

        Ok(project)
    }

    /// Store the project in a file.
    ///
    /// # Errors
    ///
    /// `InvalidCalendarState` if the project is not valid or the file can't be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.to_json()?;
        fs::write(path, text).map_err(|error| {
            let path = path.display();
            CalendarError::invalid_state(format!("could not save project to {path}: {error}"))
        })?;
        debug!(path = %path.display(), "saved project");

        Ok(())
    }

    /// Read a project from a file.
    ///
    /// # Errors
    ///
    /// `InvalidCalendarState("could not open project")` if the file can't be read or is not a
    /// valid project.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|error| {
            warn!(path = %path.display(), %error, "project file is not readable");
            CalendarError::invalid_state(COULD_NOT_OPEN)
        })?;
        let project = Self::from_json(&text)?;
        debug!(path = %path.display(), solution = %project.solution, "loaded project");

        Ok(project)
    }
}
