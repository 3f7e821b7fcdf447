use anyhow::{Context, Result};
use log::info;

use crate::ledger_store::LedgerRepository;
use crate::user::Session;
use crate::week_label::{latest, sort_labels};

/// 週の記録を削除するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct DeleteArgs {
    #[clap(help = "Week label to delete, such as \"1월 2주차\"")]
    pub label: String,
}

/// 保存されている週ラベルの一覧。
#[derive(Debug, PartialEq, Eq)]
pub struct LabelList {
    /// 時系列順のラベル。
    pub labels: Vec<String>,
    /// 最も新しいラベル。
    pub latest: Option<String>,
}

/// 台帳の一覧表示と削除を行う。
pub struct LedgerCommand<'a, T: LedgerRepository> {
    repository: &'a T,
}

impl<'a, T: LedgerRepository> LedgerCommand<'a, T> {
    /// 新しい`LedgerCommand`を返す。
    pub fn new(repository: &'a T) -> Self {
        Self { repository }
    }

    /// `list`サブコマンドの処理を行う。
    pub fn list(&self, session: &Session) -> LabelList {
        let mut labels = self.repository.labels(&session.user);
        sort_labels(&mut labels, session.today);
        let latest = latest(labels.iter().map(String::as_str), session.today).map(String::from);
        info!("{} weeks saved for {}", labels.len(), session.user);

        LabelList { labels, latest }
    }

    /// `delete`サブコマンドの処理を行う。削除した場合は`true`を返す。
    pub fn delete(&self, session: &Session, delete: DeleteArgs) -> Result<bool> {
        self.repository
            .delete(&session.user, &delete.label)
            .with_context(|| format!("Failed to delete '{}'", delete.label))
    }
}
