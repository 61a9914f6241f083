use serde::{Deserialize, Serialize};

/// How days are grouped into weeks.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Week {
    /// Days in a week, positive.
    pub length: u32,
    /// Whether every month starts on the first day of the week. Otherwise, weekdays continue
    /// across month and year boundaries.
    pub starts_with_month: bool,
}

impl Default for Week {
    fn default() -> Self {
        Self { length: 7, starts_with_month: false }
    }
}
