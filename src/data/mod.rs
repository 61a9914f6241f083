//! # Storing of calendars in memory
//!
//! This module provides the data structures used to represent calendars and the numbers they are
//! built from. Algorithms may introduce their specific data structures in
//! `algorithm::my_algorithm`.

pub mod calendar;
pub mod number_types;
