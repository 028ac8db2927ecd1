use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};

/// Replaces the first `YYYY`, `MM`, `DD`, `HH`, `mm` and `ss` tokens in `pattern`.
pub fn format_date(date: &NaiveDateTime, pattern: &str) -> String {
    pattern
        .replacen("YYYY", &date.year().to_string(), 1)
        .replacen("MM", &format!("{:02}", date.month()), 1)
        .replacen("DD", &format!("{:02}", date.day()), 1)
        .replacen("HH", &format!("{:02}", date.hour()), 1)
        .replacen("mm", &format!("{:02}", date.minute()), 1)
        .replacen("ss", &format!("{:02}", date.second()), 1)
}

/// Compact relative age such as `"5m ago"`; months are 30 days, years 365.
pub fn time_ago(then: &NaiveDateTime, now: &NaiveDateTime) -> String {
    let seconds = (*now - *then).num_seconds();
    match seconds {
        s if s < 60 => "Just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 2_592_000 => format!("{}d ago", s / 86_400),
        s if s < 31_536_000 => format!("{}mo ago", s / 2_592_000),
        s => format!("{}y ago", s / 31_536_000),
    }
}

pub fn time_ago_from_now(then: &NaiveDateTime) -> String {
    time_ago(then, &Local::now().naive_local())
}

pub fn add_days(date: &NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    date.checked_add_signed(Duration::days(days))
}

pub fn is_same_day(date: &NaiveDateTime, day: NaiveDate) -> bool {
    date.date() == day
}

pub fn is_today(date: &NaiveDateTime) -> bool {
    is_same_day(date, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn formats_tokens() {
        let date = at(2024, 3, 7, 9, 5, 2);
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2024-03-07");
        assert_eq!(format_date(&date, "DD/MM/YYYY HH:mm:ss"), "07/03/2024 09:05:02");
    }

    #[test]
    fn relative_ages() {
        let now = at(2024, 6, 1, 12, 0, 0);
        assert_eq!(time_ago(&at(2024, 6, 1, 11, 59, 30), &now), "Just now");
        assert_eq!(time_ago(&at(2024, 6, 1, 11, 55, 0), &now), "5m ago");
        assert_eq!(time_ago(&at(2024, 6, 1, 9, 0, 0), &now), "3h ago");
        assert_eq!(time_ago(&at(2024, 5, 30, 12, 0, 0), &now), "2d ago");
        assert_eq!(time_ago(&at(2024, 3, 1, 12, 0, 0), &now), "3mo ago");
        assert_eq!(time_ago(&at(2021, 6, 1, 12, 0, 0), &now), "3y ago");
    }

    #[test]
    fn add_days_crosses_months() {
        let date = at(2024, 2, 27, 8, 0, 0);
        assert_eq!(add_days(&date, 3), Some(at(2024, 3, 1, 8, 0, 0)));
        assert_eq!(add_days(&date, -27), Some(at(2024, 1, 31, 8, 0, 0)));
    }

    #[test]
    fn same_day_ignores_time() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(is_same_day(&at(2024, 6, 1, 23, 59, 59), day));
        assert!(!is_same_day(&at(2024, 6, 2, 0, 0, 0), day));
    }
}
