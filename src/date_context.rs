use chrono::{Datelike, Local, NaiveDate};
use log::{debug, warn};

use crate::schema::MonthKey;

pub const TEST_MONTH_VAR: &str = "QUANT_EXPENSE_TEST_MONTH";
pub const TEST_YEAR_VAR: &str = "QUANT_EXPENSE_TEST_YEAR";

/// The "today" every booking and summary is computed against.
///
/// Passed explicitly into the tracker so tests can pin the period
/// instead of touching the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateContext {
    today: NaiveDate,
}

impl DateContext {
    pub fn system() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    /// Pins the context to the first day of `year`/`month`.
    /// Returns `None` for a month outside 1..=12.
    pub fn fixed(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|today| Self { today })
    }

    pub fn on(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Uses the test month/year override only when both values are present
    /// and form a valid date; otherwise falls back to the system clock.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (Some(month), Some(year)) = (lookup(TEST_MONTH_VAR), lookup(TEST_YEAR_VAR)) else {
            return Self::system();
        };

        let parsed = month
            .trim()
            .parse::<u32>()
            .ok()
            .zip(year.trim().parse::<i32>().ok())
            .and_then(|(m, y)| Self::fixed(y, m));

        match parsed {
            Some(ctx) => {
                debug!("Using date override {}", ctx.period());
                ctx
            }
            None => {
                warn!(
                    "Ignoring invalid date override {}={:?} {}={:?}",
                    TEST_MONTH_VAR, month, TEST_YEAR_VAR, year
                );
                Self::system()
            }
        }
    }

    pub fn current_month(&self) -> u32 {
        self.today.month()
    }

    pub fn current_year(&self) -> i32 {
        self.today.year()
    }

    pub fn current_date(&self) -> NaiveDate {
        self.today
    }

    pub fn period(&self) -> MonthKey {
        MonthKey::new(self.current_year(), self.current_month())
    }
}

impl Default for DateContext {
    fn default() -> Self {
        Self::system()
    }
}
