use chrono::Duration;

use crate::server::error::config::ConfigError;

/// Parses a duration such as `900`, `30s`, `15m`, `1h` or `7d`.
///
/// A bare number is read as seconds.
///
/// # Arguments
/// - `name` - Environment variable the value came from, used in the error
/// - `value` - The raw value
///
/// # Returns
/// - `Ok(Duration)` - Parsed, strictly positive duration
/// - `Err(ConfigError::InvalidValue)` - Empty, non-numeric, zero or unknown unit
pub fn parse_duration(name: &str, value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: format!("'{}' {}", value, reason),
    };

    let value = value.trim();
    let (digits, unit) = match value.find(|c: char| !c.is_ascii_digit()) {
        Some(index) => value.split_at(index),
        None => (value, "s"),
    };

    let amount = digits
        .parse::<i64>()
        .map_err(|_| invalid("is not a duration"))?;
    if amount == 0 {
        return Err(invalid("must be greater than zero"));
    }

    let duration = match unit {
        "s" => Duration::try_seconds(amount),
        "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        _ => return Err(invalid("has an unknown unit, expected s, m, h or d")),
    };

    duration.ok_or_else(|| invalid("is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units() {
        assert_eq!(parse_duration("X", "900").unwrap(), Duration::seconds(900));
        assert_eq!(parse_duration("X", "30s").unwrap(), Duration::seconds(30));
        assert_eq!(parse_duration("X", "15m").unwrap(), Duration::minutes(15));
        assert_eq!(parse_duration("X", "1h").unwrap(), Duration::hours(1));
        assert_eq!(parse_duration("X", "7d").unwrap(), Duration::days(7));
    }

    #[test]
    fn rejects_bad_values() {
        for value in ["", "abc", "10w", "0", "m", "-5s"] {
            assert!(
                parse_duration("X", value).is_err(),
                "expected '{}' to be rejected",
                value
            );
        }
    }
}
