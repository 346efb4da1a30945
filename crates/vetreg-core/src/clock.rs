//! Source of "now" and "today" for defaults and date-bound checks.

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};

/// Wall clock used by a registry backend.
///
/// `Fixed` pins the clock, which keeps date arithmetic in tests independent
/// of the day they run on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
  #[default]
  System,
  Fixed(NaiveDateTime),
}

impl Clock {
  /// Local time, truncated to whole seconds.
  pub fn now(&self) -> NaiveDateTime {
    match self {
      Self::System => Local::now().naive_local().trunc_subsecs(0),
      Self::Fixed(at) => *at,
    }
  }

  pub fn today(&self) -> NaiveDate { self.now().date() }
}
