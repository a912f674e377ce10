use chrono::{Days, NaiveDate, Utc};

/// Yesterday and today as UTC calendar dates. There is no time-of-day component,
/// so this covers up to 48 hours rather than a rolling 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn last_day() -> Self {
        Self::ending_on(Utc::now().date_naive())
    }

    pub fn ending_on(end: NaiveDate) -> Self {
        Self {
            start: end - Days::new(1),
            end,
        }
    }

    pub fn filter_clause(&self) -> String {
        format!(
            "AREA[LastUpdatePostDate]RANGE[{},{}]",
            self.start, self.end
        )
    }
}
