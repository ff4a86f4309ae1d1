use chrono::{Datelike, Duration, Local, NaiveDate};

/// Layout of one calendar month, weeks starting on Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub first_day: NaiveDate,
    pub days_in_month: u32,
    /// Blank cells before the 1st (Sunday = 0).
    pub leading_blanks: u32,
}

impl MonthView {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
        let (next_year, next_month) = next_month(year, month);
        let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
        let days_in_month = (next_first - first_day).num_days() as u32;

        Some(Self {
            year,
            month,
            first_day,
            days_in_month,
            leading_blanks: first_day.weekday().num_days_from_sunday(),
        })
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn containing(date: NaiveDate) -> Self {
        let first_day = date - Duration::days(i64::from(date.day0()));
        Self::new(first_day.year(), first_day.month()).unwrap_or_else(|| Self {
            year: first_day.year(),
            month: first_day.month(),
            first_day,
            days_in_month: 31,
            leading_blanks: first_day.weekday().num_days_from_sunday(),
        })
    }

    /// The requested month, or the current one when either part is missing or out of range.
    pub fn resolve(year: Option<i32>, month: Option<u32>) -> Self {
        match (year, month) {
            (Some(year), Some(month)) => Self::new(year, month).unwrap_or_else(Self::current),
            _ => Self::current(),
        }
    }

    pub fn previous(&self) -> (i32, u32) {
        if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        }
    }

    pub fn next(&self) -> (i32, u32) {
        next_month(self.year, self.month)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.days_in_month).map(|offset| self.first_day + Duration::days(i64::from(offset)))
    }

    /// Grid cells row by row; `None` pads the first and last week.
    pub fn weeks(&self) -> Vec<Vec<Option<NaiveDate>>> {
        let mut cells: Vec<Option<NaiveDate>> = Vec::with_capacity(42);
        cells.extend((0..self.leading_blanks).map(|_| None));
        cells.extend(self.days().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(<[_]>::to_vec).collect()
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_layout_counts_days_and_blanks() {
        // 2026-03-01 is a Sunday.
        let march = MonthView::new(2026, 3).unwrap();
        assert_eq!(march.days_in_month, 31);
        assert_eq!(march.leading_blanks, 0);

        let feb = MonthView::new(2024, 2).unwrap();
        assert_eq!(feb.days_in_month, 29);
        assert_eq!(feb.leading_blanks, 4);
        assert_eq!(feb.weeks().len(), 5);
    }

    #[test]
    fn navigation_wraps_years() {
        let december = MonthView::new(2025, 12).unwrap();
        assert_eq!(december.next(), (2026, 1));
        let january = MonthView::new(2026, 1).unwrap();
        assert_eq!(january.previous(), (2025, 12));
    }

    #[test]
    fn invalid_month_falls_back_to_current() {
        assert_eq!(MonthView::resolve(Some(2026), Some(13)), MonthView::current());
        assert_eq!(MonthView::resolve(Some(2026), None), MonthView::current());
        assert_eq!(MonthView::resolve(Some(2026), Some(5)).month, 5);
    }

    #[test]
    fn containing_finds_first_of_month() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
        let view = MonthView::containing(date);
        assert_eq!(view.first_day, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert!(view.weeks().iter().all(|week| week.len() == 7));
    }
}
