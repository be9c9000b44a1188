//! 时间工具函数 — 业务时区转换
//!
//! 营业日边界规则：日历日在配置的业务时区内从午夜开始，
//! 没有其他 cutoff 规则。订单创建时记录 `business_day` 标签，
//! 合并判断只比较标签，避免时钟漂移复活旧桶。

use chrono::{DateTime, Datelike, TimeZone};
use chrono_tz::Tz;

/// Unix millis → 营业日标签 "YYYY-MM-DD" (业务时区)
pub fn business_day(ts_millis: i64, tz: Tz) -> String {
    to_business_time(ts_millis, tz).format("%Y-%m-%d").to_string()
}

/// 当前营业日标签 (业务时区)
pub fn current_business_day(tz: Tz) -> String {
    business_day(shared::util::now_millis(), tz)
}

/// Unix millis → 可排序月份键 "YYYY-MM" (业务时区)
pub fn month_key(ts_millis: i64, tz: Tz) -> String {
    to_business_time(ts_millis, tz).format("%Y-%m").to_string()
}

/// Unix millis → 人类可读月份标签，如 "March 2025" (业务时区)
pub fn month_label(ts_millis: i64, tz: Tz) -> String {
    to_business_time(ts_millis, tz).format("%B %Y").to_string()
}

/// 上一个月的标签，如 1 月 → "December <去年>"
pub fn previous_month_label(now: DateTime<Tz>) -> String {
    let (year, month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    // 每月 1 号在所有时区都存在，unwrap 不会触发
    let first = now
        .timezone()
        .with_ymd_and_hms(year, month, 1, 12, 0, 0)
        .single()
        .or_else(|| now.timezone().with_ymd_and_hms(year, month, 1, 12, 0, 0).earliest());
    match first {
        Some(dt) => dt.format("%B %Y").to_string(),
        None => now.format("%B %Y").to_string(),
    }
}

fn to_business_time(ts_millis: i64, tz: Tz) -> DateTime<Tz> {
    DateTime::from_timestamp_millis(ts_millis)
        .unwrap_or_else(chrono::Utc::now)
        .with_timezone(&tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Kolkata;

    // 2025-03-15 10:30:00 UTC = 2025-03-15 16:00 IST
    const TS: i64 = 1_742_034_600_000;

    #[test]
    fn business_day_uses_configured_timezone() {
        assert_eq!(business_day(TS, Kolkata), "2025-03-15");
        // 2025-03-15 20:00 UTC 已是 IST 的 3 月 16 日凌晨
        let late = 1_742_068_800_000;
        assert_eq!(business_day(late, Kolkata), "2025-03-16");
    }

    #[test]
    fn month_key_and_label_agree() {
        assert_eq!(month_key(TS, Kolkata), "2025-03");
        assert_eq!(month_label(TS, Kolkata), "March 2025");
    }

    #[test]
    fn previous_month_label_wraps_the_year() {
        let jan = Kolkata.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap();
        assert_eq!(previous_month_label(jan), "December 2024");
        let apr = Kolkata.with_ymd_and_hms(2025, 4, 1, 0, 10, 0).unwrap();
        assert_eq!(previous_month_label(apr), "March 2025");
    }
}
