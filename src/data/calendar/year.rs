//! # Months of a year
use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::data::calendar::{IntercalationType, SpecialFeature};

/// A named month.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Month {
    #[allow(missing_docs)]
    pub name: String,
    /// Days in every year.
    pub normal_days: u32,
    /// Days added in leap years only.
    pub leap_days: u32,
}

impl Month {
    #[allow(missing_docs)]
    pub fn new(name: impl Into<String>, normal_days: u32, leap_days: u32) -> Self {
        Self { name: name.into(), normal_days, leap_days }
    }

    /// Days in this month for a year of the given kind.
    pub fn days(&self, kind: IntercalationType) -> u32 {
        match kind {
            IntercalationType::Normal => self.normal_days,
            IntercalationType::Leap => self.normal_days + self.leap_days,
        }
    }

    fn is_similar_to(&self, other: &Self) -> bool {
        self.normal_days == other.normal_days && self.leap_days == other.leap_days
    }
}

/// The ordered months of a year, with at most one feature month.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Year {
    months: Vec<Month>,
    feature: SpecialFeature,
    feature_month: Option<usize>,
}

impl Year {
    /// A year without months.
    pub fn new(feature: SpecialFeature) -> Self {
        Self { months: Vec::new(), feature, feature_month: None }
    }

    #[allow(missing_docs)]
    pub fn feature(&self) -> SpecialFeature {
        self.feature
    }

    /// Index of the feature month, if one is assigned.
    pub fn feature_month(&self) -> Option<usize> {
        self.feature_month
    }

    /// Append a month at the end of the year.
    pub fn add_month(&mut self, name: impl Into<String>, normal_days: u32, leap_days: u32) {
        self.months.push(Month::new(name, normal_days, leap_days));
    }

    #[allow(missing_docs)]
    pub fn push_month(&mut self, month: Month) {
        self.months.push(month);
    }

    #[allow(missing_docs)]
    pub fn month(&self, index: usize) -> Option<&Month> {
        self.months.get(index)
    }

    #[allow(missing_docs)]
    pub fn month_mut(&mut self, index: usize) -> Option<&mut Month> {
        self.months.get_mut(index)
    }

    #[allow(missing_docs)]
    pub fn months(&self) -> &[Month] {
        &self.months
    }

    #[allow(missing_docs)]
    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    #[allow(missing_docs)]
    pub fn last_month_index(&self) -> Option<usize> {
        self.months.len().checked_sub(1)
    }

    /// Remove a month, unassigning the feature if it was the feature month.
    ///
    /// The feature month index follows its month when an earlier month is removed. Out of range
    /// indices are ignored.
    pub fn remove_month(&mut self, index: usize) -> Option<Month> {
        if index >= self.months.len() {
            return None;
        }

        self.feature_month = match self.feature_month {
            Some(feature) if feature == index => None,
            Some(feature) if feature > index => Some(feature - 1),
            other => other,
        };
        Some(self.months.remove(index))
    }

    /// Names of all months in order.
    pub fn month_names(&self) -> Vec<String> {
        self.months.iter().map(|month| month.name.clone()).collect()
    }

    /// Assign the feature to a month. Out of range indices are ignored.
    pub fn set_feature_month(&mut self, index: usize) {
        if index < self.months.len() {
            self.feature_month = Some(index);
        }
    }

    #[allow(missing_docs)]
    pub fn is_month_feature(&self, index: usize) -> bool {
        self.feature_month == Some(index)
    }

    #[allow(missing_docs)]
    pub fn remove_month_feature(&mut self) {
        self.feature_month = None;
    }

    /// Rename months from the start of the year; surplus names or months are left alone.
    pub fn overwrite_month_names(&mut self, names: &[String]) {
        for (month, name) in self.months.iter_mut().zip(names) {
            month.name.clone_from(name);
        }
    }

    /// Whether the month at this index is skipped in a year of the given kind.
    ///
    /// Only a leap feature month is ever skipped, in normal years.
    pub fn is_skipped(&self, index: usize, kind: IntercalationType) -> bool {
        self.feature == SpecialFeature::Leap
            && kind == IntercalationType::Normal
            && self.is_month_feature(index)
    }

    /// Days of the month at this index in a year of the given kind, zero if it is skipped.
    pub fn month_days(&self, index: usize, kind: IntercalationType) -> u32 {
        match self.months.get(index) {
            Some(_) if self.is_skipped(index, kind) => 0,
            Some(month) => month.days(kind),
            None => 0,
        }
    }

    /// Total days in a normal and in a leap year.
    pub fn year_lengths(&self) -> EnumMap<IntercalationType, u64> {
        EnumMap::from_fn(|kind| {
            (0..self.months.len())
                .map(|index| u64::from(self.month_days(index, kind)))
                .sum()
        })
    }

    pub(super) fn is_similar_to(&self, other: &Self) -> bool {
        self.feature == other.feature
            && self.months.len() == other.months.len()
            && self.months.iter().zip(&other.months).all(|(left, right)| left.is_similar_to(right))
    }
}

#[cfg(test)]
mod test {
    use crate::data::calendar::{IntercalationType, SpecialFeature, Year};

    fn metonic() -> Year {
        let mut year = Year::new(SpecialFeature::Leap);
        for index in 0..13 {
            year.add_month(format!("#{}", index + 1), 29 + index % 2, 0);
        }
        year.set_feature_month(12);
        year
    }

    #[test]
    fn lengths() {
        let year = metonic();
        let lengths = year.year_lengths();
        assert_eq!(lengths[IntercalationType::Normal], 6 * 29 + 6 * 30);
        assert_eq!(lengths[IntercalationType::Leap], 6 * 29 + 6 * 30 + 29);
        assert!(year.is_skipped(12, IntercalationType::Normal));
        assert!(!year.is_skipped(12, IntercalationType::Leap));

        let mut year = Year::new(SpecialFeature::Epagomenal);
        year.add_month("#1", 30, 0);
        year.add_month("--", 5, 1);
        year.set_feature_month(1);
        let lengths = year.year_lengths();
        assert_eq!(lengths[IntercalationType::Normal], 35);
        assert_eq!(lengths[IntercalationType::Leap], 36);
    }

    #[test]
    fn feature_month() {
        let mut year = metonic();
        assert!(year.is_month_feature(12));
        year.set_feature_month(13);
        assert_eq!(year.feature_month(), Some(12));

        year.remove_month(0);
        assert_eq!(year.feature_month(), Some(11));
        assert_eq!(year.month_count(), 12);
        year.remove_month(11);
        assert_eq!(year.feature_month(), None);
        assert_eq!(year.remove_month(11), None);
        assert_eq!(year.last_month_index(), Some(10));
    }

    #[test]
    fn names() {
        let mut year = metonic();
        year.overwrite_month_names(&["a".to_string(), "b".to_string()]);
        let names = year.month_names();
        assert_eq!(&names[..3], &["a", "b", "#3"]);
        assert_eq!(Year::new(SpecialFeature::None).last_month_index(), None);
    }
}
