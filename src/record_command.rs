use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use log::warn;

use crate::datetime::parse_date;
use crate::ledger_store::LedgerRepository;
use crate::user::Session;
use crate::week_command::WeekReport;
use crate::week_label::current_week_label;
use crate::week_record::{DayEntry, WeekRecord, Weekday};

/// 週の出勤・退勤時刻を入力して保存するためのサブコマンド。
///
/// 曜日ごとの値は`09:00-18:00`の形式で指定する。`-`を指定するとその曜日を空にする。
#[derive(Debug, Default, clap::Args)]
pub struct RecordArgs {
    #[clap(short = 'l', long = "label", help = "Week label such as \"1월 2주차\"")]
    pub label: Option<String>,

    #[clap(
        short = 'd',
        long = "date",
        help = "Sets a custom date in the format YYYY-MM-DD",
        parse(try_from_str = parse_date),
    )]
    pub date: Option<NaiveDate>,

    #[clap(long = "mon", help = "Monday as START-END, or - to clear")]
    pub mon: Option<String>,

    #[clap(long = "tue", help = "Tuesday as START-END, or - to clear")]
    pub tue: Option<String>,

    #[clap(long = "wed", help = "Wednesday as START-END, or - to clear")]
    pub wed: Option<String>,

    #[clap(long = "thu", help = "Thursday as START-END, or - to clear")]
    pub thu: Option<String>,

    #[clap(long = "fri", help = "Friday as START-END, or - to clear")]
    pub fri: Option<String>,

    #[clap(long = "reset", help = "Start from an empty week instead of the saved one")]
    pub reset: bool,
}

impl RecordArgs {
    /// 指定された曜日と値の組を返す。
    fn edits(&self) -> impl Iterator<Item = (Weekday, &str)> {
        [&self.mon, &self.tue, &self.wed, &self.thu, &self.fri]
            .into_iter()
            .zip(Weekday::ALL)
            .filter_map(|(value, weekday)| value.as_deref().map(|value| (weekday, value)))
    }
}

pub struct RecordCommand<'a, T: LedgerRepository> {
    repository: &'a T,
}

impl<'a, T: LedgerRepository> RecordCommand<'a, T> {
    /// 新しい`RecordCommand`を返す。
    ///
    /// # Arguments
    /// * `repository` - 台帳を保存するためのリポジトリ
    pub fn new(repository: &'a T) -> Self {
        Self { repository }
    }

    /// `record`サブコマンドの処理を行う。
    ///
    /// 保存済みの記録に指定された曜日だけを上書きし、週全体を保存する。
    /// `reset`が指定された場合は空の記録から始める。
    pub fn run(&self, session: &Session, record: RecordArgs) -> Result<WeekReport> {
        let date = record.date.unwrap_or(session.today);
        let label = record
            .label
            .clone()
            .unwrap_or_else(|| current_week_label(date));

        let mut week = if record.reset {
            WeekRecord::default()
        } else {
            let loaded = self.repository.load(&session.user);
            if let Some(warning) = &loaded.warning {
                warn!("Ledger could not be read, starting from an empty week: {:#}", warning);
            }
            loaded.ledger.get(&label).cloned().unwrap_or_default()
        };

        for (weekday, value) in record.edits() {
            let entry = parse_day_range(value)
                .with_context(|| format!("Invalid value for {}", weekday))?;
            week.set_day(weekday, entry);
        }

        self.repository
            .save(&session.user, &label, &week)
            .with_context(|| format!("Failed to save '{}'", label))?;

        Ok(WeekReport::new(label, week, date))
    }
}

/// `START-END`形式の文字列を1日分の記録に変換する。
///
/// 時刻の形式はここでは検証せず、そのまま保存する。読み取れない時刻は計算時に未入力として扱われる。
fn parse_day_range(value: &str) -> Result<DayEntry> {
    let value = value.trim();
    if value == "-" {
        return Ok(DayEntry::default());
    }
    match value.split_once('-') {
        Some((start, end)) => Ok(DayEntry::new(start.trim(), end.trim())),
        None => bail!("Expected START-END but got '{}'", value),
    }
}
