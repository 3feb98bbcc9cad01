//! Relative-date resolution.
//!
//! Maps phrases like "tonight", "tomorrow", or a weekday name to a concrete
//! calendar date. An explicit "today"/"tonight" in the query wins over any
//! weekday name also mentioned; a bare weekday name that matches today's
//! weekday means next week, never today.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Resolve a free-text day reference to a calendar date.
///
/// `reference` is the day name the model extracted (e.g., "Monday",
/// "tonight"); `query` is the user's original text, consulted because the
/// model sometimes returns a weekday name even when the user said "tonight".
/// Unrecognized references resolve to `today`.
pub fn resolve_day_reference(reference: &str, query: &str, today: NaiveDate) -> NaiveDate {
    let reference = reference.trim().to_lowercase();
    let query = query.to_lowercase();

    // Explicit "today"/"tonight" takes precedence over everything else.
    if query.contains("tonight")
        || query.contains("today")
        || reference == "today"
        || reference == "tonight"
    {
        return today;
    }

    if query.contains("tomorrow") || reference == "tomorrow" {
        return next_day(today);
    }

    if let Some(target) = parse_weekday(&reference) {
        let mut days_ahead =
            (target.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
        // Today's own weekday name means next week, not today.
        if days_ahead == 0 {
            days_ahead = 7;
        }
        return today
            .checked_add_days(Days::new(days_ahead as u64))
            .unwrap_or(today);
    }

    today
}

fn next_day(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-06-05 is a Wednesday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_tomorrow_is_next_day() {
        assert_eq!(
            resolve_day_reference("tomorrow", "work tomorrow 9 to 5", today()),
            date(6)
        );
    }

    #[test]
    fn test_future_weekday_is_nearest_occurrence() {
        assert_eq!(
            resolve_day_reference("Friday", "schedule me for Friday", today()),
            date(7)
        );
        assert_eq!(
            resolve_day_reference("Monday", "schedule me for Monday", today()),
            date(10)
        );
    }

    #[test]
    fn test_todays_weekday_name_means_next_week() {
        // Today is Wednesday; a bare "Wednesday" must never resolve to today.
        assert_eq!(
            resolve_day_reference("Wednesday", "can I work Wednesday?", today()),
            date(12)
        );
    }

    #[test]
    fn test_tonight_resolves_to_today() {
        assert_eq!(
            resolve_day_reference("tonight", "I want to work tonight 9pm-11pm", today()),
            today()
        );
    }

    #[test]
    fn test_explicit_today_beats_weekday_name() {
        // Model extracted "Friday" but the user said "tonight".
        assert_eq!(
            resolve_day_reference("Friday", "tonight, not Friday", today()),
            today()
        );
        assert_eq!(
            resolve_day_reference("Wednesday", "today works, Wednesday", today()),
            today()
        );
    }

    #[test]
    fn test_tomorrow_in_query_beats_weekday_reference() {
        assert_eq!(
            resolve_day_reference("Thursday", "tomorrow please", today()),
            date(6)
        );
    }

    #[test]
    fn test_unrecognized_reference_defaults_to_today() {
        assert_eq!(
            resolve_day_reference("2024-06-20", "work 9 to 5", today()),
            today()
        );
        assert_eq!(resolve_day_reference("", "work 9 to 5", today()), today());
    }

    #[test]
    fn test_reference_is_case_insensitive() {
        assert_eq!(
            resolve_day_reference("SATURDAY", "weekend shift", today()),
            date(8)
        );
        assert_eq!(
            resolve_day_reference("  sunday ", "weekend shift", today()),
            date(9)
        );
    }
}
