//! # Number types
//!
//! Calendar arithmetic has to be exact: a year of 365.2425 days only lines up with its leap rules
//! after hundreds of years, and rounding errors would move the rules. All lengths are therefore
//! kept as arbitrary precision fractions.
pub mod fraction;
pub mod functions;
