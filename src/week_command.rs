use chrono::NaiveDate;
use log::{info, warn};

use crate::aggregate::{aggregate, WeeklySummary};
use crate::datetime::parse_date;
use crate::ledger_store::LedgerRepository;
use crate::user::Session;
use crate::week_label::current_week_label;
use crate::week_record::WeekRecord;

/// 保存されている週の集計を表示するためのサブコマンド。
#[derive(Debug, Default, clap::Args)]
pub struct WeekArgs {
    #[clap(short = 'l', long = "label", help = "Week label such as \"1월 2주차\"")]
    pub label: Option<String>,

    #[clap(
        short = 'd',
        long = "date",
        help = "Sets a custom date in the format YYYY-MM-DD",
        parse(try_from_str = parse_date),
    )]
    pub date: Option<NaiveDate>,
}

/// 週の記録と集計結果。
#[derive(Debug)]
pub struct WeekReport {
    pub label: String,
    pub record: WeekRecord,
    pub summary: WeeklySummary,
}

impl WeekReport {
    /// 記録を集計して`WeekReport`を作成する。
    pub fn new(label: String, record: WeekRecord, date: NaiveDate) -> Self {
        let summary = aggregate(&record, date);
        Self {
            label,
            record,
            summary,
        }
    }
}

pub struct WeekCommand<'a, T: LedgerRepository> {
    repository: &'a T,
}

impl<'a, T: LedgerRepository> WeekCommand<'a, T> {
    /// 新しい`WeekCommand`を返す。
    ///
    /// # Arguments
    /// * `repository` - 台帳を読み込むためのリポジトリ
    pub fn new(repository: &'a T) -> Self {
        Self { repository }
    }

    /// `week`サブコマンドの処理を行う。
    ///
    /// ラベルが指定されていない場合は、基準日の週ラベルを利用する。
    /// 基準日が指定されていない場合は、セッションの今日を利用する。
    /// 保存されていない週は空の記録として集計する。
    pub fn run(&self, session: &Session, week: WeekArgs) -> WeekReport {
        let date = week.date.unwrap_or(session.today);
        let label = week.label.unwrap_or_else(|| current_week_label(date));

        let loaded = self.repository.load(&session.user);
        if let Some(warning) = &loaded.warning {
            warn!("Ledger could not be read, showing an empty week: {:#}", warning);
        }
        let record = loaded.ledger.get(&label).cloned().unwrap_or_else(|| {
            info!("'{}' is not saved yet", label);
            WeekRecord::default()
        });

        WeekReport::new(label, record, date)
    }
}
