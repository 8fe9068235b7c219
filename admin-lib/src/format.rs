//! Turkish display formatting for dates, times and numbers.

use chrono::{DateTime, Local, Utc};

/// Placeholder for missing values.
pub const DASH: &str = "—";

/// Relative time in Turkish, e.g. `5 dakika önce`.
///
/// Under five seconds reads `şimdi`; exactly one day ago reads `dün`.
pub fn time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const MIN: i64 = 60;
    const HOUR: i64 = 60 * MIN;
    const DAY: i64 = 24 * HOUR;

    let diff = now.signed_duration_since(date).num_milliseconds();
    let secs = diff.div_euclid(1000);

    if secs < MIN {
        return if secs < 5 {
            "şimdi".to_string()
        } else {
            format!("{} saniye önce", secs)
        };
    }
    if secs < HOUR {
        return format!("{} dakika önce", secs / MIN);
    }
    if secs < DAY {
        return format!("{} saat önce", secs / HOUR);
    }
    match secs / DAY {
        1 => "dün".to_string(),
        days => format!("{} gün önce", days),
    }
}

/// [`time_ago`] against the current time, `—` when absent.
pub fn time_ago_opt(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => time_ago(date, Utc::now()),
        None => DASH.to_string(),
    }
}

/// `tr-TR` decimal: `.` groups thousands, `,` separates at least two and
/// at most three fraction digits.
pub fn format_decimal_tr(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, "000"));
    let frac = frac_part.strip_suffix('0').unwrap_or(frac_part);

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    format!("{}{},{}", sign, grouped, frac)
}

/// `dd.MM.yyyy` in local time.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%d.%m.%Y").to_string()
}

/// `dd.MM.yyyy HH:mm:ss` in local time.
pub fn format_date_time(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%d.%m.%Y %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_time_ago() {
        let now = Utc::now();
        assert_eq!(time_ago(now, now), "şimdi");
        assert_eq!(time_ago(now - Duration::seconds(4), now), "şimdi");
        assert_eq!(time_ago(now - Duration::seconds(30), now), "30 saniye önce");
        assert_eq!(time_ago(now - Duration::minutes(1), now), "1 dakika önce");
        assert_eq!(time_ago(now - Duration::minutes(59), now), "59 dakika önce");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3 saat önce");
        assert_eq!(time_ago(now - Duration::hours(30), now), "dün");
        assert_eq!(time_ago(now - Duration::days(12), now), "12 gün önce");
        // Clock skew: future dates read as now.
        assert_eq!(time_ago(now + Duration::seconds(10), now), "şimdi");
    }

    #[test]
    fn test_format_decimal_tr() {
        assert_eq!(format_decimal_tr(1234.5), "1.234,50");
        assert_eq!(format_decimal_tr(0.0), "0,00");
        assert_eq!(format_decimal_tr(12.0), "12,00");
        assert_eq!(format_decimal_tr(1234567.891), "1.234.567,891");
        assert_eq!(format_decimal_tr(-5.25), "-5,25");
        assert_eq!(format_decimal_tr(999.9999), "1.000,00");
    }

    #[test]
    fn test_time_ago_opt_missing() {
        assert_eq!(time_ago_opt(None), DASH);
    }
}
