use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::user::UserKey;
use crate::week_record::{Ledger, WeekRecord};

/// 台帳の読み込み結果。
///
/// 保存データが壊れている場合は空の台帳と警告を返し、処理は継続できる。
#[derive(Debug, Default)]
pub struct LoadedLedger {
    pub ledger: Ledger,
    pub warning: Option<anyhow::Error>,
}

/// ユーザーごとの週記録を保存するためのtrait。
///
/// 保存と削除はいずれも台帳全体を読み込み、1つのキーを変更して全体を書き戻す。
/// ロックは行わないため、同じユーザーの同時更新は後から書いた方が残る。
#[cfg_attr(test, mockall::automock)]
pub trait LedgerRepository {
    /// 台帳を読み込む。保存データが無い場合は空の台帳を返す。
    fn load(&self, user: &UserKey) -> LoadedLedger;

    /// 週記録を`label`に保存する。既存の記録は丸ごと置き換える。
    fn save(&self, user: &UserKey, label: &str, record: &WeekRecord) -> Result<()>;

    /// 保存されている週ラベルを返す。
    fn labels(&self, user: &UserKey) -> Vec<String>;

    /// `label`の週記録を削除する。削除した場合は`true`を返す。
    fn delete(&self, user: &UserKey, label: &str) -> Result<bool>;
}

/// ユーザーごとに1つのJSONファイルへ台帳を保存する。
///
/// # Examples
///
/// ```no_run
/// use worktime::ledger_store::{FileLedgerStore, LedgerRepository};
/// use worktime::user::UserKey;
///
/// let store = FileLedgerStore::new("/tmp/worktime");
/// let user = UserKey::new("alice").unwrap();
/// let labels = store.labels(&user);
/// ```
pub struct FileLedgerStore {
    dir: PathBuf,
}

impl FileLedgerStore {
    /// 新しい`FileLedgerStore`を返す。
    ///
    /// # Arguments
    ///
    /// * `dir` - 台帳ファイルを置くディレクトリ。存在しない場合は保存時に作成する
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// ユーザーの台帳ファイルのパスを返す。
    fn path(&self, user: &UserKey) -> PathBuf {
        self.dir
            .join(format!("{}.json", encode_file_stem(user.as_str())))
    }

    /// 台帳ファイルを読み込む。ファイルが無い場合は`None`を返す。
    fn read(path: &Path) -> Result<Option<Ledger>> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        // UTF-8として不正なバイト列もserde_jsonのエラーとして扱う
        let ledger = serde_json::from_slice::<Ledger>(&content)
            .with_context(|| format!("Failed to parse ledger: {}", path.display()))?;

        Ok(Some(ledger))
    }

    /// 更新のために台帳を読み込む。
    ///
    /// 内容が壊れているファイルは`.corrupt`を付けた名前に退避し、空の台帳から更新する。
    /// 既に退避したファイルがある場合は番号を付けて、上書きしない。
    fn read_for_update(&self, path: &Path) -> Result<Ledger> {
        match Self::read(path) {
            Ok(ledger) => Ok(ledger.unwrap_or_default()),
            Err(e) if e.is::<serde_json::Error>() => {
                let backup = backup_path(path);
                warn!("{:#}; moving it to {}", e, backup.display());
                fs::rename(path, &backup).with_context(|| {
                    format!(
                        "Failed to move {} to {}",
                        path.display(),
                        backup.display()
                    )
                })?;
                Ok(Ledger::new())
            }
            Err(e) => Err(e),
        }
    }

    /// 台帳全体を書き込む。
    ///
    /// 一時ファイルに書き出してから置き換えるため、書き込みに失敗しても元のファイルは残る。
    fn write(&self, path: &Path, ledger: &Ledger) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory {}", self.dir.display()))?;

        let mut json = serde_json::to_string_pretty(ledger).context("Failed to serialize ledger")?;
        json.push('\n');

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to replace {} with {}",
                path.display(),
                tmp_path.display()
            )
        })?;

        Ok(())
    }
}

impl LedgerRepository for FileLedgerStore {
    fn load(&self, user: &UserKey) -> LoadedLedger {
        let path = self.path(user);
        match Self::read(&path) {
            Ok(Some(ledger)) => {
                debug!("Loaded {} weeks from {}", ledger.len(), path.display());
                LoadedLedger {
                    ledger,
                    warning: None,
                }
            }
            Ok(None) => {
                debug!("No ledger at {}", path.display());
                LoadedLedger::default()
            }
            Err(e) => {
                warn!("{:#}", e);
                LoadedLedger {
                    ledger: Ledger::new(),
                    warning: Some(e),
                }
            }
        }
    }

    fn save(&self, user: &UserKey, label: &str, record: &WeekRecord) -> Result<()> {
        let path = self.path(user);
        let mut ledger = self.read_for_update(&path)?;
        ledger.insert(label.to_string(), record.clone());
        self.write(&path, &ledger)?;
        info!("Saved '{}' for {}", label, user);

        Ok(())
    }

    fn labels(&self, user: &UserKey) -> Vec<String> {
        self.load(user).ledger.into_keys().collect()
    }

    fn delete(&self, user: &UserKey, label: &str) -> Result<bool> {
        let path = self.path(user);
        let mut ledger = self.read_for_update(&path)?;
        if ledger.remove(label).is_none() {
            info!("'{}' not found for {}", label, user);
            return Ok(false);
        }
        self.write(&path, &ledger)?;
        info!("Deleted '{}' for {}", label, user);

        Ok(true)
    }
}

/// 壊れた台帳の退避先として、まだ存在しないパスを返す。
fn backup_path(path: &Path) -> PathBuf {
    let first = path.with_extension("json.corrupt");
    if !first.exists() {
        return first;
    }
    (1..)
        .map(|n| path.with_extension(format!("json.corrupt.{}", n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// ユーザーキーをファイル名に使える文字列に変換する。
///
/// 英数字（ハングル等を含む）と`-`、`_`以外はUTF-8のバイトごとに`%XX`とする。
/// 異なるキーが同じファイル名になることはない。
fn encode_file_stem(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for c in key.chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            encoded.push(c);
        } else {
            let mut buf = [0; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}
