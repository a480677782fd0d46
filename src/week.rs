//! Computing the seven days of a week, and the labels that identify them
//!
//! A day is identified everywhere (tasks, column headers, persisted files) by a canonical label
//! such as `SUNDAY 8-20-2023`: the upper-case English weekday, then `month-day-year` without zero padding.
//! Weeks run from Sunday (column 0) to Saturday (column 6).

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

/// Number of day-columns in a week
pub const DAYS_IN_WEEK: usize = 7;

/// The seven days of a week, some number of weeks away from a reference day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Week {
    offset: i32,
    dates: [NaiveDate; DAYS_IN_WEEK],
}

impl Week {
    /// The week containing `today + offset weeks`.
    ///
    /// Returns `None` when one of its days is outside the range of dates `chrono` can represent.
    pub fn containing(today: NaiveDate, offset: i32) -> Option<Self> {
        let target = today.checked_add_signed(Duration::weeks(i64::from(offset)))?;
        let sunday = target.checked_sub_signed(Duration::days(i64::from(target.weekday().num_days_from_sunday())))?;

        let mut dates = [sunday; DAYS_IN_WEEK];
        for (column, date) in dates.iter_mut().enumerate() {
            *date = sunday.checked_add_signed(Duration::days(column as i64))?;
        }
        Some(Self { offset, dates })
    }

    /// The week `offset` weeks away from the week containing "now", according to the local clock.
    ///
    /// This is evaluated anew on every call, so that the result follows a day (or week) rollover.
    pub fn current(offset: i32) -> Option<Self> {
        Self::containing(today(), offset)
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn dates(&self) -> &[NaiveDate; DAYS_IN_WEEK] {
        &self.dates
    }

    /// The canonical labels of the seven days, Sunday first
    pub fn labels(&self) -> [String; DAYS_IN_WEEK] {
        self.dates.map(format_label)
    }

    /// Returns the column of a day label, if this day belongs to this week
    pub fn column_of(&self, label: &str) -> Option<usize> {
        let date = parse_label(label)?;
        self.dates.iter().position(|d| *d == date)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.column_of(label).is_some()
    }
}

/// The seven day labels of the week `offset_weeks` away from the current one, Sunday first.
///
/// Returns `None` for a week too far away to be represented.
pub fn week_dates(offset_weeks: i32) -> Option<[String; DAYS_IN_WEEK]> {
    Week::current(offset_weeks).map(|week| week.labels())
}

/// The current day, according to the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "SUNDAY",
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
    }
}

/// Render a date as its canonical label, e.g. `SUNDAY 8-20-2023`
pub fn format_label(date: NaiveDate) -> String {
    format!("{} {}-{}-{}", weekday_name(date.weekday()), date.month(), date.day(), date.year())
}

/// Parse a canonical label back into a date.
///
/// Returns `None` for anything [`format_label`] would not have produced, including a weekday that does not match the date.
pub fn parse_label(label: &str) -> Option<NaiveDate> {
    let (_, numbers) = label.split_once(' ')?;
    let mut parts = numbers.split('-');
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    let year = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    if format_label(date) != label {
        return None;
    }
    Some(date)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_label_format() {
        assert_eq!(format_label(ymd(2023, 8, 20)), "SUNDAY 8-20-2023");
        assert_eq!(format_label(ymd(2023, 12, 6)), "WEDNESDAY 12-6-2023");
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label("SUNDAY 8-20-2023"), Some(ymd(2023, 8, 20)));
        assert_eq!(parse_label("MONDAY 8-20-2023"), None);
        assert_eq!(parse_label("SUNDAY 08-20-2023"), None);
        assert_eq!(parse_label("Sunday 8-20-2023"), None);
        assert_eq!(parse_label("SUNDAY 2-30-2023"), None);
        assert_eq!(parse_label("SUNDAY 8-20-2023-1"), None);
        assert_eq!(parse_label(""), None);
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // A Wednesday
        let week = Week::containing(ymd(2023, 8, 23), 0).unwrap();
        assert_eq!(week.labels(), [
            "SUNDAY 8-20-2023", "MONDAY 8-21-2023", "TUESDAY 8-22-2023", "WEDNESDAY 8-23-2023",
            "THURSDAY 8-24-2023", "FRIDAY 8-25-2023", "SATURDAY 8-26-2023",
        ].map(String::from));

        // Sundays and Saturdays belong to their own week
        assert_eq!(Week::containing(ymd(2023, 8, 20), 0), Some(week.clone()));
        assert_eq!(Week::containing(ymd(2023, 8, 26), 0), Some(week));
    }

    #[test]
    fn test_week_across_year_boundary() {
        let week = Week::containing(ymd(2024, 1, 3), 0).unwrap();
        let labels = week.labels();
        assert_eq!(labels[0], "SUNDAY 12-31-2023");
        assert_eq!(labels[1], "MONDAY 1-1-2024");
        assert_eq!(labels[6], "SATURDAY 1-6-2024");
    }

    #[test]
    fn test_week_across_month_boundary() {
        let week = Week::containing(ymd(2023, 3, 1), 0).unwrap();
        let labels = week.labels();
        assert_eq!(labels[0], "SUNDAY 2-26-2023");
        assert_eq!(labels[3], "WEDNESDAY 3-1-2023");
    }

    #[test]
    fn test_offsets_are_consecutive() {
        let today = ymd(2023, 8, 23);
        for offset in -60..60 {
            let week = Week::containing(today, offset).unwrap();
            let dates = week.dates();
            assert_eq!(dates[0].weekday(), Weekday::Sun);
            for pair in dates.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }

            let next = Week::containing(today, offset + 1).unwrap();
            assert_eq!(next.dates()[0] - dates[6], Duration::days(1));
            assert_eq!(next.dates()[0] - dates[0], Duration::days(7));
        }
    }

    #[test]
    fn test_column_of() {
        let week = Week::containing(ymd(2023, 8, 23), 0).unwrap();
        assert_eq!(week.column_of("WEDNESDAY 8-23-2023"), Some(3));
        assert_eq!(week.column_of("SUNDAY 8-27-2023"), None);
        assert_eq!(week.column_of("not a date"), None);
    }

    #[test]
    fn test_current_week_contains_today() {
        let labels = week_dates(0).unwrap();
        assert!(labels.contains(&format_label(today())) || labels.contains(&format_label(today() - Duration::days(1))));
    }

    #[test]
    fn test_weeks_out_of_range() {
        let today = ymd(2023, 8, 23);
        assert_eq!(Week::containing(today, i32::MAX), None);
        assert_eq!(Week::containing(today, i32::MIN), None);
        assert_eq!(Week::containing(today, 20_000_000), None);
        assert_eq!(Week::containing(today, -20_000_000), None);

        // Far, but still representable
        let far = Week::containing(today, 10_000_000).unwrap();
        assert_eq!(far.dates()[0].weekday(), Weekday::Sun);
        assert_eq!(parse_label(&far.labels()[6]), Some(far.dates()[6]));
    }
}
