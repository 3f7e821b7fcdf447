use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

/// ローカルタイムゾーンでの今日の日付を取得する。
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM-DD`形式の日付をパースする。
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date: {}", s))
}
