use chrono::{Datelike, NaiveDate};

/// Formats a count with thousands separators (commas)
///
/// # Examples
/// ```
/// use backend::shared::format::format_count;
/// assert_eq!(format_count(1234567), "1,234,567");
/// assert_eq!(format_count(42), "42");
/// ```
pub fn format_count(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

/// Calendar month bucket of a date, "YYYY-MM"
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Round a money amount to cents
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(123456), "123,456");
        assert_eq!(format_count(1234567890), "1,234,567,890");
    }

    #[test]
    fn test_month_key() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 31).unwrap();
        assert_eq!(month_key(date), "2023-07");
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(10.004), 10.0);
        assert_eq!(round_cents(10.006), 10.01);
        assert_eq!(round_cents(-3.333), -3.33);
    }
}
