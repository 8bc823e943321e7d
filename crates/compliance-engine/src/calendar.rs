use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Business calendar for acceptance deadlines: weekends and US federal holidays.
///
/// Holidays are matched on their calendar date; observed-day shifts (a
/// Saturday holiday observed on Friday) are not applied.
pub struct BusinessCalendar;

impl BusinessCalendar {
    /// Deadline for an offer left open `days` calendar days from `start`.
    /// A deadline that lands on a weekend or holiday moves to the next business day.
    pub fn deadline_after(start: NaiveDate, days: u32) -> Option<NaiveDate> {
        let raw = start.checked_add_days(Days::new(u64::from(days)))?;
        Self::next_business_day_on_or_after(raw)
    }

    pub fn next_business_day_on_or_after(date: NaiveDate) -> Option<NaiveDate> {
        let mut current = date;
        while !Self::is_business_day(current) {
            current = current.succ_opt()?;
        }
        Some(current)
    }

    /// Weekdays that are not federal holidays
    pub fn is_business_day(date: NaiveDate) -> bool {
        !Self::is_weekend(date) && !Self::is_holiday(date)
    }

    fn is_weekend(date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn is_holiday(date: NaiveDate) -> bool {
        Self::is_fixed_holiday(date.month(), date.day()) || Self::is_floating_holiday(date)
    }

    fn is_fixed_holiday(month: u32, day: u32) -> bool {
        matches!(
            (month, day),
            (1, 1) |   // New Year's Day
            (6, 19) |  // Juneteenth
            (7, 4) |   // Independence Day
            (11, 11) | // Veterans Day
            (12, 25) // Christmas
        )
    }

    fn is_floating_holiday(date: NaiveDate) -> bool {
        let year = date.year();
        let nth = |month, weekday, n| Self::nth_weekday_of_month(year, month, weekday, n);

        let floating = [
            nth(1, Weekday::Mon, 3),  // Martin Luther King Jr. Day
            nth(2, Weekday::Mon, 3),  // Washington's Birthday
            Self::last_weekday_of_month(year, 5, Weekday::Mon), // Memorial Day
            nth(9, Weekday::Mon, 1),  // Labor Day
            nth(10, Weekday::Mon, 2), // Columbus Day
            nth(11, Weekday::Thu, 4), // Thanksgiving
        ];

        floating.iter().flatten().any(|holiday| *holiday == date)
    }

    fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
        NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
    }

    /// A month holds four or five of each weekday
    fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
        Self::nth_weekday_of_month(year, month, weekday, 5)
            .or_else(|| Self::nth_weekday_of_month(year, month, weekday, 4))
    }
}
