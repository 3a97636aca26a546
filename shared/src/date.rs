//! 日期辅助模块
//!
//! 契约中的日期为 ISO 历法日期（"YYYY-MM-DD"），薪资期间为 "YYYY-MM"。
//! 此模块提供表单解析与天数计算，纯逻辑、与平台无关。

use chrono::{Datelike, NaiveDate};

/// 解析 ISO 8601 历法日期（"YYYY-MM-DD"）
///
/// 返回 None 如果解析失败
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// 闭区间天数：起止同日计 1 天
///
/// start `2023-07-01`, end `2023-07-05` => 5
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().abs() + 1
}

/// 格式化薪资期间 "YYYY-MM"
pub fn format_period(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// 从日期取薪资期间 "YYYY-MM"
pub fn period_of(date: NaiveDate) -> String {
    format_period(date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_iso_date("2023-07-01"),
            NaiveDate::from_ymd_opt(2023, 7, 1)
        );
        assert_eq!(parse_iso_date(" 2023-07-01 "), parse_iso_date("2023-07-01"));
        assert_eq!(parse_iso_date("07/01/2023"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn day_count_is_inclusive() {
        let start = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 7, 5).unwrap();
        assert_eq!(inclusive_days(start, end), 5);
        assert_eq!(inclusive_days(start, start), 1);
    }

    #[test]
    fn formats_periods() {
        assert_eq!(format_period(2023, 7), "2023-07");
        let d = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(period_of(d), "2023-12");
    }
}
