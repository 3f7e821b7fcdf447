use crate::time_of_day::{parse_time, TimeOfDay};

/// 勤務時間から控除する休憩時間帯`[start, end)`。分単位。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakWindow {
    pub start: u32,
    pub end: u32,
}

impl BreakWindow {
    /// 勤務区間`[start, end)`と重なる分数を返す。
    fn overlap(&self, start: u32, end: u32) -> u32 {
        end.min(self.end).saturating_sub(start.max(self.start))
    }
}

/// 昼休み 12:30-13:30
pub const LUNCH_BREAK: BreakWindow = BreakWindow {
    start: 12 * 60 + 30,
    end: 13 * 60 + 30,
};

/// 夕食休憩 18:30-19:30
pub const DINNER_BREAK: BreakWindow = BreakWindow {
    start: 18 * 60 + 30,
    end: 19 * 60 + 30,
};

/// 出勤・退勤時刻から休憩時間を除いた勤務分数を計算する。
///
/// 休憩時間帯は実際に休憩したかどうかに関係なく、勤務区間と重なる分だけ控除する。
///
/// # Arguments
///
/// * `start` - 出勤時刻
/// * `end` - 退勤時刻
pub fn worked_minutes(start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> u32 {
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) if start < end => (start.minutes(), end.minutes()),
        _ => return 0,
    };

    [LUNCH_BREAK, DINNER_BREAK]
        .iter()
        .fold(end - start, |total, window| {
            total.saturating_sub(window.overlap(start, end))
        })
}

/// 文字列の出勤・退勤時刻から勤務分数を計算する。
pub fn parse_and_compute(start_text: &str, end_text: &str) -> u32 {
    worked_minutes(parse_time(start_text), parse_time(end_text))
}

/// 分を時間に変換する。
///
/// 小数第2位までで切り捨てる（四捨五入はしない）。例えば4分は0.06時間となる。
pub fn minutes_to_hours(minutes: u32) -> f64 {
    let hundredths = u64::from(minutes) * 100 / 60;
    hundredths as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{minutes_to_hours, parse_and_compute, worked_minutes};
    use crate::time_of_day::parse_time;

    /// 休憩時間帯を考慮した勤務分数の計算を確認する。
    #[rstest]
    #[case::morning_only("09:00", "12:00", 180)]
    #[case::afternoon_only("13:30", "18:30", 300)]
    #[case::end_touches_lunch("10:00", "12:30", 150)]
    #[case::start_touches_lunch_end("13:30", "14:00", 30)]
    #[case::spans_lunch("09:30", "18:30", 480)]
    #[case::spans_both("09:00", "20:00", 540)]
    #[case::inside_lunch("12:40", "13:00", 0)]
    #[case::whole_lunch("12:30", "13:30", 0)]
    #[case::starts_in_lunch("13:00", "14:00", 30)]
    #[case::ends_in_dinner("17:00", "19:00", 90)]
    #[case::from_midnight("00:00", "01:00", 60)]
    fn test_parse_and_compute(#[case] start: &str, #[case] end: &str, #[case] expected: u32) {
        assert_eq!(parse_and_compute(start, end), expected);
    }

    /// 開始が終了以降、または未入力の場合は0分となる。
    #[rstest]
    #[case::equal("09:00", "09:00")]
    #[case::reversed("18:00", "09:00")]
    #[case::no_start("", "18:00")]
    #[case::no_end("09:00", "")]
    #[case::invalid("nine", "18:00")]
    fn test_parse_and_compute_zero(#[case] start: &str, #[case] end: &str) {
        assert_eq!(parse_and_compute(start, end), 0);
    }

    /// 休憩時間帯に触れない区間は単純な差になる。
    #[test]
    fn test_worked_minutes_without_breaks() {
        for (start, end) in [(0, 750), (810, 1110), (1170, 1439), (60, 61)] {
            let start_time = parse_time(&format!("{}:{}", start / 60, start % 60));
            let end_time = parse_time(&format!("{}:{}", end / 60, end % 60));
            assert_eq!(worked_minutes(start_time, end_time), end - start);
        }
    }

    /// 小数第2位で切り捨てることを確認する。
    #[rstest]
    #[case::zero(0, 0.0)]
    #[case::one_minute(1, 0.01)]
    #[case::three_minutes(3, 0.05)]
    #[case::four_minutes_not_rounded(4, 0.06)]
    #[case::no_float_error(69, 1.15)]
    #[case::one_hour(60, 1.0)]
    #[case::sixty_one(61, 1.01)]
    #[case::hundred_twenty_five(125, 2.08)]
    #[case::nine_hours(540, 9.0)]
    fn test_minutes_to_hours(#[case] minutes: u32, #[case] expected: f64) {
        assert_eq!(minutes_to_hours(minutes), expected);
    }
}
