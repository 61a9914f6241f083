//! # Simulation settings
//!
//! Collects the era parameters of a simulation while they are being edited, and hands rebuilt
//! simulations to readers over a channel. Readers own what they receive; nothing is shared
//! mutably between the editing side and the reading side.
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use num::{BigInt, Zero};
use tracing::debug;

use crate::algorithm::simulation::Simulation;
use crate::algorithm::simulation::reals::{RealsCalculator, RealsSettings};
use crate::data::calendar::Calendar;
use crate::error::{CalendarError, Result};

/// Era parameters of a simulation.
#[derive(Clone, Debug)]
pub struct SimulationSettings {
    calendar: Arc<Calendar>,
    era_year: BigInt,
    era_week_day: u32,
    reals: Option<RealsSettings>,
    update_needed: bool,
}

impl SimulationSettings {
    /// Epoch at era year 0, weekday 0 and no moon or season tracking.
    pub fn new(calendar: Arc<Calendar>) -> Self {
        Self {
            calendar,
            era_year: BigInt::zero(),
            era_week_day: 0,
            reals: None,
            update_needed: true,
        }
    }

    /// Whether a setting changed since the last simulation was built.
    pub fn is_update_needed(&self) -> bool {
        self.update_needed
    }

    #[allow(missing_docs)]
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Number of weekdays the era can start on, zero if every month starts a week.
    pub fn shift_week_length(&self) -> u32 {
        let week = self.calendar.week();
        if week.starts_with_month { 0 } else { week.length }
    }

    #[allow(missing_docs)]
    pub fn era_year(&self) -> &BigInt {
        &self.era_year
    }

    /// Set the era year of the epoch; internal year 1 is the year after it.
    pub fn set_era_year(&mut self, era_year: BigInt) {
        self.era_year = era_year;
        self.update_needed = true;
    }

    #[allow(missing_docs)]
    pub fn era_week_day(&self) -> u32 {
        self.era_week_day
    }

    /// Set the weekday of the first day of the era.
    pub fn set_era_week_day(&mut self, week_day: u32) {
        self.era_week_day = week_day;
        self.update_needed = true;
    }

    #[allow(missing_docs)]
    pub fn reals(&self) -> Option<&RealsSettings> {
        self.reals.as_ref()
    }

    /// Track the moon and the seasons, or stop tracking them with `None`.
    pub fn set_reals(&mut self, reals: Option<RealsSettings>) {
        self.reals = reals;
        self.update_needed = true;
    }

    /// Build a simulation from the current settings.
    ///
    /// # Errors
    ///
    /// `InvalidCalendarState` if the calendar can't be simulated or a real length isn't positive.
    pub fn build(&mut self) -> Result<Simulation> {
        let reals = self.reals.clone().map(RealsCalculator::new).transpose()?;
        let simulation = Simulation::new(
            Arc::clone(&self.calendar),
            self.era_week_day,
            self.era_year.clone(),
            reals,
        )?;
        self.update_needed = false;
        debug!(era_year = %self.era_year, era_week_day = self.era_week_day, "built simulation");

        Ok(simulation)
    }
}

/// Create a connected feed and reader.
pub fn channel() -> (SimulationFeed, SimulationReader) {
    let (sender, receiver) = mpsc::channel();
    (SimulationFeed { sender }, SimulationReader { receiver, current: None })
}

/// Publishing side of the simulation hand-off.
#[derive(Clone, Debug)]
pub struct SimulationFeed {
    sender: Sender<Simulation>,
}

impl SimulationFeed {
    /// Send a simulation to the reader.
    ///
    /// # Errors
    ///
    /// `InvalidCalendarState` if the reader is gone.
    pub fn publish(&self, simulation: Simulation) -> Result<()> {
        self.sender
            .send(simulation)
            .map_err(|_| CalendarError::invalid_state("the simulation reader is gone"))
    }

    /// Rebuild and publish a simulation if the settings changed.
    ///
    /// # Return value
    ///
    /// Whether a simulation was published.
    ///
    /// # Errors
    ///
    /// If the settings don't build or the reader is gone.
    pub fn publish_if_needed(&self, settings: &mut SimulationSettings) -> Result<bool> {
        if !settings.is_update_needed() {
            return Ok(false);
        }

        self.publish(settings.build()?)?;
        Ok(true)
    }
}

/// Reading side of the simulation hand-off, keeps the most recent simulation.
#[derive(Debug)]
pub struct SimulationReader {
    receiver: Receiver<Simulation>,
    current: Option<Simulation>,
}

impl SimulationReader {
    fn drain(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(simulation) => self.current = Some(simulation),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }

    /// The most recently published simulation, for navigation by this reader.
    pub fn latest(&mut self) -> Option<&mut Simulation> {
        self.drain();
        self.current.as_mut()
    }

    /// An independent simulation starting over from the most recently published one.
    pub fn snapshot(&mut self) -> Option<Simulation> {
        self.drain();
        self.current.as_ref().map(Simulation::copy)
    }
}
