//! Validation utilities for query parameters and master data

/// Earliest and latest year a period report may cover
pub const MIN_REPORT_YEAR: i32 = 2020;
pub const MAX_REPORT_YEAR: i32 = 2100;

/// Validate a reporting period
pub fn validate_period(year: i32, month: i32) -> Result<(), &'static str> {
    if !(MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&year) {
        return Err("Year must be between 2020 and 2100");
    }
    if !(1..=12).contains(&month) {
        return Err("Month must be between 1 and 12");
    }
    Ok(())
}

/// Validate a ranking size against the configured ceiling
pub fn validate_top(top: u32, max_top: u32) -> Result<(), &'static str> {
    if top == 0 {
        return Err("Top must be at least 1");
    }
    if top > max_top {
        return Err("Top exceeds the allowed maximum");
    }
    Ok(())
}

/// Validate a trailing window length against the configured ceiling
pub fn validate_window_days(days: u32, max_days: u32) -> Result<(), &'static str> {
    if days == 0 {
        return Err("Window must cover at least one day");
    }
    if days > max_days {
        return Err("Window exceeds the allowed number of days");
    }
    Ok(())
}

/// Validate a low-stock threshold
pub fn validate_threshold(threshold: i32) -> Result<(), &'static str> {
    if threshold < 0 {
        return Err("Threshold cannot be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_period() {
        assert!(validate_period(2025, 1).is_ok());
        assert!(validate_period(2020, 12).is_ok());
        assert!(validate_period(2100, 6).is_ok());
        assert!(validate_period(2019, 6).is_err());
        assert!(validate_period(2101, 6).is_err());
        assert!(validate_period(2025, 0).is_err());
        assert!(validate_period(2025, 13).is_err());
    }

    #[test]
    fn test_validate_top() {
        assert!(validate_top(10, 100).is_ok());
        assert!(validate_top(100, 100).is_ok());
        assert!(validate_top(0, 100).is_err());
        assert!(validate_top(101, 100).is_err());
    }

    #[test]
    fn test_validate_window_days() {
        assert!(validate_window_days(30, 366).is_ok());
        assert!(validate_window_days(0, 366).is_err());
        assert!(validate_window_days(367, 366).is_err());
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(0).is_ok());
        assert!(validate_threshold(-1).is_err());
    }
}
