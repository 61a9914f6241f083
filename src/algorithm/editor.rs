//! # Calendar editing
//!
//! Fine tuning of a derived calendar. Days are never created or lost: a day taken from a month
//! goes to a pool, and a day added to a month comes from that pool. Leap years in a cycle are
//! moved the same way. The calendar is finished once every pool is empty and the feature month,
//! if any, is assigned.
use tracing::debug;

use crate::data::calendar::{
    Calendar, IntercalationType, Month, RuleEntry, SpecialFeature, Week,
};
use crate::error::{CalendarError, Result};

/// Name of a month added in the editor.
pub const NEW_MONTH_NAME: &str = "???";

/// Editing state of one calendar.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct CalendarEditor {
    edited: Option<Calendar>,
    awaiting: Option<Calendar>,

    normal_days_pool: u64,
    leap_days_pool: u64,
    /// Leap years removed from the cycle minus leap years added to it.
    surplus_years_in_cycle: i64,
    /// Months added in the editor, only these can be removed again.
    extra_months: usize,
    selected_month: Option<usize>,
    must_assign_month_feature: bool,
}

impl CalendarEditor {
    /// An editor without a calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// An editor for an existing calendar, for example one read from a project.
    pub fn with_calendar(calendar: Calendar) -> Self {
        let mut editor = Self::new();
        editor.start_editing(calendar);
        editor
    }

    fn start_editing(&mut self, calendar: Calendar) {
        self.selected_month = if calendar.year().month_count() == 0 { None } else { Some(0) };
        self.edited = Some(calendar);
        self.surplus_years_in_cycle = 0;
        self.extra_months = 0;
    }

    /// Offer a freshly derived calendar.
    ///
    /// Without a calendar being edited, the offered calendar is edited right away. Otherwise it
    /// waits until [`CalendarEditor::switch_to_awaiting_calendar`] is called, unless it has the
    /// same shape as the edited calendar, in which case it is dropped.
    pub fn offer(&mut self, calendar: Calendar) {
        match &self.edited {
            None => self.start_editing(calendar),
            Some(edited) if edited.is_similar_to(&calendar) => self.awaiting = None,
            Some(_) => self.awaiting = Some(calendar),
        }
    }

    #[allow(missing_docs)]
    pub fn is_new_calendar_awaiting(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Replace the edited calendar by the awaiting one, keeping the month names.
    pub fn switch_to_awaiting_calendar(&mut self) {
        let Some(mut calendar) = self.awaiting.take() else {
            return;
        };

        if let Some(edited) = &self.edited {
            calendar.year_mut().overwrite_month_names(&edited.year().month_names());
        }
        debug!(months = calendar.year().month_count(), "switched to awaiting calendar");
        self.start_editing(calendar);
    }

    /// The calendar being edited.
    pub fn calendar(&self) -> Option<&Calendar> {
        self.edited.as_ref()
    }

    /// Whether the calendar can't be finished yet.
    pub fn in_error_state(&self) -> bool {
        self.edited.is_none()
            || self.normal_days_pool != 0
            || self.leap_days_pool != 0
            || self.surplus_years_in_cycle != 0
            || self.must_assign_month_feature
    }

    /// The finished calendar.
    ///
    /// # Errors
    ///
    /// `InvalidCalendarState` while a pool isn't empty, the cycle has years to assign, the
    /// feature month is missing, or the calendar doesn't validate.
    pub fn final_calendar(&self) -> Result<&Calendar> {
        let calendar = self
            .edited
            .as_ref()
            .ok_or_else(|| CalendarError::invalid_state("no calendar is being edited"))?;
        if self.normal_days_pool != 0 || self.leap_days_pool != 0 {
            return Err(CalendarError::invalid_state(format!(
                "{} normal and {} leap days are not assigned to a month",
                self.normal_days_pool, self.leap_days_pool,
            )));
        }
        if self.surplus_years_in_cycle != 0 {
            return Err(CalendarError::invalid_state(format!(
                "{} leap years of the cycle are not assigned",
                self.surplus_years_in_cycle,
            )));
        }
        if self.must_assign_month_feature {
            return Err(CalendarError::invalid_state("no feature month assigned"));
        }

        calendar.validate()?;
        Ok(calendar)
    }

    #[allow(missing_docs)]
    pub fn has_leap_rules(&self) -> bool {
        self.edited.as_ref().is_some_and(Calendar::has_leap_rules)
    }

    #[allow(missing_docs)]
    pub fn has_cycle(&self) -> bool {
        self.edited.as_ref().is_some_and(Calendar::has_cycle)
    }

    #[allow(missing_docs)]
    pub fn cycle(&self) -> Option<&[IntercalationType]> {
        self.edited.as_ref().and_then(Calendar::cycle)
    }

    #[allow(missing_docs)]
    pub fn rules(&self) -> Option<&[RuleEntry]> {
        self.edited.as_ref().and_then(Calendar::rules)
    }

    /// Turn a rule on or off.
    pub fn switch_rule(&mut self, index: usize, active: bool) {
        if let Some(calendar) = &mut self.edited {
            calendar.switch_rule(index, active);
        }
    }

    #[allow(missing_docs)]
    pub fn is_rule_turned_on(&self, index: usize) -> bool {
        self.edited.as_ref().is_some_and(|calendar| calendar.is_rule_turned_on(index))
    }

    /// Make a year of the cycle a leap year or a normal year.
    ///
    /// The number of leap years in the cycle is fixed: removing one must be matched by adding
    /// one elsewhere.
    pub fn switch_cycle_year(&mut self, index: usize, leap: bool) {
        let Some(calendar) = &mut self.edited else {
            return;
        };

        if leap && calendar.is_cycle_of(index, IntercalationType::Normal) {
            calendar.switch_cycle_on(index, IntercalationType::Leap);
            self.surplus_years_in_cycle -= 1;
        } else if !leap && calendar.is_cycle_of(index, IntercalationType::Leap) {
            calendar.switch_cycle_on(index, IntercalationType::Normal);
            self.surplus_years_in_cycle += 1;
        }
    }

    #[allow(missing_docs)]
    pub fn is_cycle_year_leap(&self, index: usize) -> bool {
        self.edited
            .as_ref()
            .is_some_and(|calendar| calendar.is_cycle_of(index, IntercalationType::Leap))
    }

    /// Leap years that still have to be placed in the cycle, negative if too many are placed.
    pub fn surplus_years_in_cycle(&self) -> i64 {
        self.surplus_years_in_cycle
    }

    #[allow(missing_docs)]
    pub fn month_count(&self) -> usize {
        self.edited.as_ref().map_or(0, |calendar| calendar.year().month_count())
    }

    fn last_month_index(&self) -> Option<usize> {
        self.edited.as_ref().and_then(|calendar| calendar.year().last_month_index())
    }

    #[allow(missing_docs)]
    pub fn selected_month_index(&self) -> Option<usize> {
        self.selected_month
    }

    #[allow(missing_docs)]
    pub fn selected_month(&self) -> Option<&Month> {
        let index = self.selected_month?;
        self.edited.as_ref()?.year().month(index)
    }

    fn selected_month_mut(&mut self) -> Option<&mut Month> {
        let index = self.selected_month?;
        self.edited.as_mut()?.year_mut().month_mut(index)
    }

    #[allow(missing_docs)]
    pub fn can_select_next_month(&self) -> bool {
        self.selected_month.is_some() && self.selected_month != self.last_month_index()
    }

    #[allow(missing_docs)]
    pub fn can_select_previous_month(&self) -> bool {
        self.selected_month.is_some_and(|index| index > 0)
    }

    #[allow(missing_docs)]
    pub fn select_first_month(&mut self) {
        if self.month_count() > 0 {
            self.selected_month = Some(0);
        }
    }

    #[allow(missing_docs)]
    pub fn select_last_month(&mut self) {
        if let Some(last) = self.last_month_index() {
            self.selected_month = Some(last);
        }
    }

    #[allow(missing_docs)]
    pub fn select_next_month(&mut self) {
        if self.can_select_next_month() {
            self.selected_month = self.selected_month.map(|index| index + 1);
        }
    }

    #[allow(missing_docs)]
    pub fn select_previous_month(&mut self) {
        if self.can_select_previous_month() {
            self.selected_month = self.selected_month.map(|index| index - 1);
        }
    }

    /// Rename the selected month.
    pub fn rename_selected_month(&mut self, name: impl Into<String>) {
        if let Some(month) = self.selected_month_mut() {
            month.name = name.into();
        }
    }

    #[allow(missing_docs)]
    pub fn normal_days_pool(&self) -> u64 {
        self.normal_days_pool
    }

    #[allow(missing_docs)]
    pub fn leap_days_pool(&self) -> u64 {
        self.leap_days_pool
    }

    #[allow(missing_docs)]
    pub fn can_add_normal_day(&self) -> bool {
        self.normal_days_pool > 0 && self.selected_month.is_some()
    }

    /// Move a day from the pool to the selected month.
    ///
    /// # Return value
    ///
    /// Whether a day was moved.
    pub fn add_normal_day(&mut self) -> bool {
        if self.normal_days_pool == 0 {
            return false;
        }
        let Some(month) = self.selected_month_mut() else {
            return false;
        };

        month.normal_days += 1;
        self.normal_days_pool -= 1;
        true
    }

    #[allow(missing_docs)]
    pub fn can_remove_normal_day(&self) -> bool {
        self.selected_month().is_some_and(|month| month.normal_days > 0)
    }

    /// Move a day from the selected month to the pool.
    ///
    /// # Return value
    ///
    /// Whether a day was moved.
    pub fn remove_normal_day(&mut self) -> bool {
        let Some(month) = self.selected_month_mut() else {
            return false;
        };
        if month.normal_days == 0 {
            return false;
        }

        month.normal_days -= 1;
        self.normal_days_pool += 1;
        true
    }

    #[allow(missing_docs)]
    pub fn can_add_leap_day(&self) -> bool {
        self.leap_days_pool > 0 && self.selected_month.is_some()
    }

    /// Move a leap day from the pool to the selected month.
    ///
    /// # Return value
    ///
    /// Whether a day was moved.
    pub fn add_leap_day(&mut self) -> bool {
        if self.leap_days_pool == 0 {
            return false;
        }
        let Some(month) = self.selected_month_mut() else {
            return false;
        };

        month.leap_days += 1;
        self.leap_days_pool -= 1;
        true
    }

    #[allow(missing_docs)]
    pub fn can_remove_leap_day(&self) -> bool {
        self.selected_month().is_some_and(|month| month.leap_days > 0)
    }

    /// Move a leap day from the selected month to the pool.
    ///
    /// # Return value
    ///
    /// Whether a day was moved.
    pub fn remove_leap_day(&mut self) -> bool {
        let Some(month) = self.selected_month_mut() else {
            return false;
        };
        if month.leap_days == 0 {
            return false;
        }

        month.leap_days -= 1;
        self.leap_days_pool += 1;
        true
    }

    #[allow(missing_docs)]
    pub fn can_add_month(&self) -> bool {
        self.edited.is_some() && self.normal_days_pool > 0
    }

    /// Add a month at the end of the year holding all days of the normal pool, and select it.
    pub fn add_month(&mut self) {
        if !self.can_add_month() {
            return;
        }
        let Some(calendar) = &mut self.edited else {
            return;
        };

        let days = u32::try_from(self.normal_days_pool).unwrap_or(u32::MAX);
        calendar.year_mut().add_month(NEW_MONTH_NAME, days, 0);
        self.normal_days_pool -= u64::from(days);
        self.extra_months += 1;
        self.select_last_month();
    }

    /// Only months that were added in the editor can be removed, and never the feature month.
    pub fn can_remove_month(&self) -> bool {
        self.edited.is_some() && !self.is_selected_month_featured() && self.extra_months > 0
    }

    /// Remove the selected month, its days go back to the pools.
    pub fn remove_month(&mut self) {
        if !self.can_remove_month() {
            return;
        }
        let (Some(calendar), Some(index)) = (&mut self.edited, self.selected_month) else {
            return;
        };
        let Some(month) = calendar.year_mut().remove_month(index) else {
            return;
        };

        self.normal_days_pool += u64::from(month.normal_days);
        self.leap_days_pool += u64::from(month.leap_days);
        self.extra_months -= 1;
        self.selected_month = None;
        self.select_last_month();
    }

    #[allow(missing_docs)]
    pub fn is_selected_month_featured(&self) -> bool {
        match (&self.edited, self.selected_month) {
            (Some(calendar), Some(index)) => calendar.year().is_month_feature(index),
            _ => false,
        }
    }

    /// Role of the feature month of the edited calendar.
    pub fn feature(&self) -> Option<SpecialFeature> {
        self.edited.as_ref().map(|calendar| calendar.year().feature())
    }

    /// Unassign the feature month, a new one has to be assigned before the calendar is finished.
    pub fn remove_month_feature(&mut self) {
        let Some(calendar) = &mut self.edited else {
            return;
        };
        if calendar.year().feature() == SpecialFeature::None {
            return;
        }

        calendar.year_mut().remove_month_feature();
        self.must_assign_month_feature = true;
    }

    /// Make the selected month the feature month.
    pub fn assign_month_feature(&mut self) {
        if !self.must_assign_month_feature {
            return;
        }
        let (Some(calendar), Some(index)) = (&mut self.edited, self.selected_month) else {
            return;
        };

        calendar.year_mut().set_feature_month(index);
        self.must_assign_month_feature = false;
    }

    #[allow(missing_docs)]
    pub fn must_assign_month_feature(&self) -> bool {
        self.must_assign_month_feature
    }

    #[allow(missing_docs)]
    pub fn week(&self) -> Option<&Week> {
        self.edited.as_ref().map(Calendar::week)
    }

    #[allow(missing_docs)]
    pub fn week_mut(&mut self) -> Option<&mut Week> {
        self.edited.as_mut().map(Calendar::week_mut)
    }
}
