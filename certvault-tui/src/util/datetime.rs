//! 日期解析与格式化
//!
//! 服务端返回的时间可能带时区（RFC 3339），也可能是不带时区的 ISO 形式
//! （`2025-01-01T08:00:00` / `2025-01-01T08:00:00.123`），后者按 UTC 处理。

use chrono::{DateTime, NaiveDateTime, Utc};

/// 不带时区的候选格式，按优先级排列
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// 解析服务端时间字符串
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// 距离 `value` 还剩多少天（已过期为负数）
pub fn days_left(value: &str) -> Option<i64> {
    days_left_from(value, Utc::now())
}

fn days_left_from(value: &str, now: DateTime<Utc>) -> Option<i64> {
    parse(value).map(|t| (t - now).num_days())
}

/// 格式化为 `YYYY-MM-DD`；无法解析时原样返回
pub fn format_date(value: &str) -> String {
    parse(value).map_or_else(|| value.to_string(), |t| t.format("%Y-%m-%d").to_string())
}

/// 格式化为 `YYYY-MM-DD HH:MM`
pub fn format_datetime(value: &str) -> String {
    parse(value).map_or_else(
        || value.to_string(),
        |t| t.format("%Y-%m-%d %H:%M").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339() {
        let t = parse("2030-06-01T12:00:00+08:00").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2030, 6, 1, 4, 0, 0).unwrap());
    }

    #[test]
    fn parses_without_timezone() {
        assert!(parse("2030-06-01T12:00:00").is_some());
        assert!(parse("2030-06-01T12:00:00.123").is_some());
        assert!(parse("2030-06-01 12:00:00").is_some());
        assert!(parse("not a date").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn days_left_counts_whole_days() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(days_left_from("2030-01-11T00:00:00Z", now), Some(10));
        assert_eq!(days_left_from("2029-12-30T00:00:00", now), Some(-2));
        assert_eq!(days_left_from("garbage", now), None);
    }

    #[test]
    fn format_falls_back_to_input() {
        assert_eq!(format_date("2030-06-01T12:00:00.5"), "2030-06-01");
        assert_eq!(format_date("n/a"), "n/a");
        assert_eq!(format_datetime("2030-06-01T12:34:00Z"), "2030-06-01 12:34");
    }
}
