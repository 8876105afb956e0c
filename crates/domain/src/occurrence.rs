use crate::date::get_month_length;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Next occurrence of an event on or after `today`.
///
/// Recurring events keep their month and day and take the year of `today`,
/// advancing one year if the date has already passed this year. Non-recurring
/// events keep their stored date, which may lie in the past.
pub fn next_occurrence(event_date: NaiveDate, is_recurring: bool, today: NaiveDate) -> NaiveDate {
    if !is_recurring {
        return event_date;
    }
    let occurrence = occurrence_in_year(event_date, today.year());
    if occurrence < today {
        occurrence_in_year(event_date, today.year() + 1)
    } else {
        occurrence
    }
}

/// Projects an event's month and day into the given year.
///
/// February 29 events clamp to February 28 in non-leap years.
pub fn occurrence_in_year(event_date: NaiveDate, year: i32) -> NaiveDate {
    let month = event_date.month();
    let day = event_date.day().min(get_month_length(year, month));
    // day was clamped to the month length
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Whole days from `today` until the next occurrence. Negative only for
/// non-recurring events whose date has passed.
pub fn days_until(event_date: NaiveDate, is_recurring: bool, today: NaiveDate) -> i64 {
    (next_occurrence(event_date, is_recurring, today) - today).num_days()
}

/// The calendar day a timestamp falls on in the given timezone
pub fn local_day(timestamp_millis: i64, tz: &Tz) -> NaiveDate {
    tz.timestamp_millis_opt(timestamp_millis)
        .unwrap()
        .date_naive()
}

/// Millisecond timestamps `[start, end)` spanning the given calendar day in
/// the given timezone
pub fn day_bounds_millis(day: NaiveDate, tz: &Tz) -> (i64, i64) {
    (
        local_instant_millis(day, NaiveTime::MIN, tz),
        local_instant_millis(day + Duration::days(1), NaiveTime::MIN, tz),
    )
}

/// The instant at which a wall-clock time occurs on the given day in the
/// given timezone
pub fn local_instant_millis(day: NaiveDate, time: NaiveTime, tz: &Tz) -> i64 {
    // The wall-clock time can fall inside a DST gap, resolve to the earliest
    // valid instant after it
    let mut at = day.and_time(time);
    loop {
        if let Some(instant) = tz.from_local_datetime(&at).earliest() {
            return instant.timestamp_millis();
        }
        at += Duration::minutes(30);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn same_day_occurrence_is_today() {
        let today = date(2026, 5, 17);
        let event = date(1990, 5, 17);
        assert_eq!(next_occurrence(event, true, today), today);
        assert_eq!(days_until(event, true, today), 0);
    }

    #[test]
    fn upcoming_occurrence_stays_in_current_year() {
        let today = date(2026, 5, 17);
        let event = date(1990, 11, 2);
        assert_eq!(next_occurrence(event, true, today), date(2026, 11, 2));
        assert_eq!(days_until(event, true, today), 169);
    }

    #[test]
    fn passed_occurrence_advances_to_next_year() {
        let today = date(2026, 5, 17);
        let event = date(1990, 5, 16);
        assert_eq!(next_occurrence(event, true, today), date(2027, 5, 16));
        assert!(days_until(event, true, today) > 0);
    }

    #[test]
    fn non_recurring_keeps_stored_date() {
        let today = date(2026, 5, 17);
        let future = date(2026, 5, 18);
        let past = date(2026, 5, 10);
        assert_eq!(next_occurrence(future, false, today), future);
        assert_eq!(days_until(future, false, today), 1);
        assert_eq!(next_occurrence(past, false, today), past);
        assert_eq!(days_until(past, false, today), -7);
    }

    #[test]
    fn leap_day_clamps_to_feb_28_in_non_leap_years() {
        let event = date(2020, 2, 29);
        assert_eq!(occurrence_in_year(event, 2026), date(2026, 2, 28));
        assert_eq!(occurrence_in_year(event, 2028), date(2028, 2, 29));

        let today = date(2026, 2, 28);
        assert_eq!(days_until(event, true, today), 0);
    }

    #[test]
    fn clamped_leap_day_still_advances_when_passed() {
        let event = date(2020, 2, 29);
        let today = date(2027, 3, 1);
        assert_eq!(next_occurrence(event, true, today), date(2028, 2, 29));
    }

    #[test]
    fn local_day_follows_timezone() {
        // 2026-05-17 23:30 UTC
        let ts = Utc
            .with_ymd_and_hms(2026, 5, 17, 23, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(local_day(ts, &chrono_tz::UTC), date(2026, 5, 17));
        // Lagos is UTC+1, already past midnight there
        assert_eq!(local_day(ts, &chrono_tz::Africa::Lagos), date(2026, 5, 18));
    }

    #[test]
    fn local_instant_follows_wall_clock() {
        let day = date(2026, 5, 17);
        let eight = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let utc_millis = local_instant_millis(day, eight, &chrono_tz::UTC);
        let lagos_millis = local_instant_millis(day, eight, &chrono_tz::Africa::Lagos);
        // Lagos is one hour ahead of UTC, its 08:00 comes first
        assert_eq!(utc_millis - lagos_millis, 60 * 60 * 1000);
    }

    #[test]
    fn day_bounds_span_24_hours() {
        let day = date(2026, 5, 17);
        let (start, end) = day_bounds_millis(day, &chrono_tz::UTC);
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
        assert_eq!(local_day(start, &chrono_tz::UTC), day);
        assert_eq!(local_day(end - 1, &chrono_tz::UTC), day);
        assert_eq!(local_day(end, &chrono_tz::UTC), date(2026, 5, 18));

        let (lagos_start, _) = day_bounds_millis(day, &chrono_tz::Africa::Lagos);
        assert_eq!(start - lagos_start, 60 * 60 * 1000);
    }
}
