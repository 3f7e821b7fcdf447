use std::fmt;

use chrono::{Datelike, NaiveDate};

/// 月内の週を年・月・週番号で表すキー。
///
/// フィールド順に比較するため、`Ord`がそのまま時系列順になる。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    pub year: i32,
    pub month: u32,
    pub week: u32,
}

impl WeekKey {
    /// 日付が属する週のキーを返す。
    ///
    /// 月の最初の月曜日より前は1週目、最初の月曜日からは2週目として、以降月曜日ごとに週が進む。
    /// 1日が月曜日の月は1週目が存在せず、2週目から始まる。
    pub fn from_date(date: NaiveDate) -> Self {
        let day0 = date.day0();
        let first_weekday = (date.weekday().num_days_from_monday() + 7 - day0 % 7) % 7;
        let first_monday = (7 - first_weekday) % 7;

        let week = if day0 < first_monday {
            1
        } else {
            (day0 - first_monday) / 7 + 2
        };

        Self {
            year: date.year(),
            month: date.month(),
            week,
        }
    }

    /// 表示用のラベルから月と週番号を読み取り、`today`を基準に年を補ってキーを作成する。
    ///
    /// ラベルは年を持たないため、`today`の月より後の月は前年のものとみなす。
    pub fn from_label(label: &str, today: NaiveDate) -> Option<Self> {
        let (month, week) = parse_label(label)?;
        let year = if month > today.month() {
            today.year() - 1
        } else {
            today.year()
        };
        Some(Self { year, month, week })
    }

    /// 表示用のラベルを返す。
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}월 {}주차", self.month, self.week)
    }
}

/// 日付が属する週のラベルを返す。
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use worktime::week_label::current_week_label;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// assert_eq!(current_week_label(date), "1월 2주차");
/// ```
pub fn current_week_label(now: NaiveDate) -> String {
    WeekKey::from_date(now).label()
}

/// `M월 N주차`形式のラベルを月と週番号に分解する。
fn parse_label(label: &str) -> Option<(u32, u32)> {
    let (month, week) = label.trim().split_once('월')?;
    let month = month.trim().parse::<u32>().ok()?;
    let week = week.trim().strip_suffix("주차")?.trim().parse::<u32>().ok()?;
    if !(1..=12).contains(&month) || week == 0 {
        return None;
    }
    Some((month, week))
}

/// ラベルを時系列順に並べ替える。読み取れないラベルは末尾に文字列順で並べる。
pub fn sort_labels(labels: &mut [String], today: NaiveDate) {
    labels.sort_by(|a, b| {
        let key_a = WeekKey::from_label(a, today);
        let key_b = WeekKey::from_label(b, today);
        match (key_a, key_b) {
            (Some(key_a), Some(key_b)) => key_a.cmp(&key_b).then_with(|| a.cmp(b)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    });
}

/// 時系列で最も新しいラベルを返す。読み取れるラベルが無い場合は`None`を返す。
pub fn latest<'a, I>(labels: I, today: NaiveDate) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .filter_map(|label| WeekKey::from_label(label, today).map(|key| (key, label)))
        .max()
        .map(|(_, label)| label)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate};
    use rstest::rstest;

    use super::{current_week_label, latest, parse_label, sort_labels, WeekKey};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 2025年1月1日は水曜日なので、最初の月曜日は1月6日となる。
    #[rstest]
    #[case::first_day(date(2025, 1, 1), "1월 1주차")]
    #[case::first_sunday(date(2025, 1, 5), "1월 1주차")]
    #[case::first_monday(date(2025, 1, 6), "1월 2주차")]
    #[case::second_sunday(date(2025, 1, 12), "1월 2주차")]
    #[case::second_monday(date(2025, 1, 13), "1월 3주차")]
    #[case::last_day(date(2025, 1, 31), "1월 5주차")]
    fn test_current_week_label_wednesday_start(#[case] input: NaiveDate, #[case] expected: &str) {
        assert_eq!(input.with_day(1).unwrap().weekday(), chrono::Weekday::Wed);
        assert_eq!(current_week_label(input), expected);
    }

    /// 1日が月曜日の月は2週目から始まる。
    #[rstest]
    #[case::first_day(date(2025, 9, 1), "9월 2주차")]
    #[case::first_sunday(date(2025, 9, 7), "9월 2주차")]
    #[case::second_monday(date(2025, 9, 8), "9월 3주차")]
    #[case::last_day(date(2025, 9, 30), "9월 6주차")]
    fn test_current_week_label_monday_start(#[case] input: NaiveDate, #[case] expected: &str) {
        assert_eq!(current_week_label(input), expected);
    }

    /// 1日が日曜日の場合は1日だけが1週目になる。
    #[test]
    fn test_current_week_label_sunday_start() {
        // 2025年6月1日は日曜日
        assert_eq!(current_week_label(date(2025, 6, 1)), "6월 1주차");
        assert_eq!(current_week_label(date(2025, 6, 2)), "6월 2주차");
    }

    #[rstest]
    #[case::simple("1월 1주차", Some((1, 1)))]
    #[case::two_digits("12월 3주차", Some((12, 3)))]
    #[case::no_space("3월2주차", Some((3, 2)))]
    #[case::invalid_month("13월 1주차", None)]
    #[case::zero_week("1월 0주차", None)]
    #[case::no_suffix("1월 1", None)]
    #[case::garbage("week 1", None)]
    fn test_parse_label(#[case] input: &str, #[case] expected: Option<(u32, u32)>) {
        assert_eq!(parse_label(input), expected);
    }

    /// 文字列順では"2월"が"12월"より大きいが、時系列では12月が新しい。
    #[test]
    fn test_latest_is_chronological() {
        let today = date(2025, 12, 20);
        let labels = ["2월 1주차", "12월 3주차", "9월 5주차"];

        assert_eq!(latest(labels, today), Some("12월 3주차"));
    }

    /// 今日の月より後の月は前年として扱う。
    #[test]
    fn test_latest_across_year_boundary() {
        let today = date(2026, 1, 8);
        let labels = ["12월 5주차", "1월 2주차", "11월 1주차"];

        assert_eq!(latest(labels, today), Some("1월 2주차"));
    }

    #[test]
    fn test_latest_ignores_unparseable() {
        let today = date(2025, 5, 1);

        assert_eq!(latest(["zzz", "3월 1주차"], today), Some("3월 1주차"));
        assert_eq!(latest(["zzz"], today), None);
        assert_eq!(latest(Vec::<&str>::new(), today), None);
    }

    #[test]
    fn test_sort_labels() {
        let today = date(2026, 2, 10);
        let mut labels = vec![
            "2월 1주차".to_string(),
            "memo".to_string(),
            "12월 2주차".to_string(),
            "1월 3주차".to_string(),
            "12월 1주차".to_string(),
        ];

        sort_labels(&mut labels, today);

        assert_eq!(
            labels,
            vec!["12월 1주차", "12월 2주차", "1월 3주차", "2월 1주차", "memo"]
        );
    }

    #[test]
    fn test_week_key_from_label() {
        let key = WeekKey::from_label("11월 2주차", date(2026, 3, 1)).unwrap();

        assert_eq!(
            key,
            WeekKey {
                year: 2025,
                month: 11,
                week: 2
            }
        );
        assert_eq!(key.label(), "11월 2주차");
    }
}
