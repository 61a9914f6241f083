//! # Algorithms
//!
//! Deriving a leap scheme from the lengths of a year and a month, fine tuning the calendar that
//! results, and simulating it day by day.
pub mod derivation;
pub mod editor;
pub mod simulation;
