use std::fmt;

/// 0時0分からの経過分で表す時刻。
///
/// 値の範囲は`0..=1439`。未入力は`Option<TimeOfDay>`の`None`で表し、
/// 入力された`00:00`とは区別する。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// 時と分から`TimeOfDay`を作成する。範囲外の場合は`None`を返す。
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self(hour * 60 + minute))
    }

    /// 0時0分からの経過分を返す。
    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// `HH:MM`形式の文字列を時刻に変換する。
///
/// 空文字列や形式が不正な文字列は`None`となり、エラーにはしない。
///
/// # Arguments
///
/// * `text` - 変換する文字列
pub fn parse_time(text: &str) -> Option<TimeOfDay> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (hour, minute) = text.split_once(':')?;
    // "09:30:00"のように区切りが2つ以上ある場合は不正とする
    if minute.contains(':') {
        return None;
    }
    let hour = hour.trim().parse::<u32>().ok()?;
    let minute = minute.trim().parse::<u32>().ok()?;

    TimeOfDay::from_hm(hour, minute)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{parse_time, TimeOfDay};

    /// 正常系のテスト。
    #[rstest]
    #[case::morning("09:30", 570)]
    #[case::midnight("00:00", 0)]
    #[case::last_minute("23:59", 1439)]
    #[case::single_digit_hour("9:05", 545)]
    #[case::surrounding_spaces("  18:30 ", 1110)]
    #[case::spaces_around_colon("12 : 30", 750)]
    fn test_parse_time(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(parse_time(input).map(TimeOfDay::minutes), Some(expected));
    }

    /// 変換できない入力は未入力として扱う。
    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    #[case::no_colon("0930")]
    #[case::too_many_parts("09:30:00")]
    #[case::not_number("ab:cd")]
    #[case::negative("-1:30")]
    #[case::missing_minute("09:")]
    #[case::hour_out_of_range("25:00")]
    #[case::minute_out_of_range("10:99")]
    fn test_parse_time_unset(#[case] input: &str) {
        assert_eq!(parse_time(input), None);
    }

    /// 入力された0時0分は未入力と区別される。
    #[test]
    fn test_midnight_is_not_unset() {
        assert!(parse_time("00:00").is_some());
        assert!(parse_time("").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeOfDay::from_hm(7, 5).unwrap().to_string(), "07:05");
    }
}
