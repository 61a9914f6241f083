//! # Calendars with exact leap rules
//!
//! Given the length of a year and of a month as exact fractions of a day, derives an intercalation
//! scheme that keeps a calendar in line with the sun, the moon or both over long periods of time.
//! The resulting calendar can be edited, stored and simulated month by month, both before and
//! after its epoch.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;
pub mod error;
pub mod io;
