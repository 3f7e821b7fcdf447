use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

const DATA_DIR_ENV: &str = "WORKTIME_DATA_DIR";
const ROSTER_ENV: &str = "WORKTIME_ROSTER";
const APP_DIR: &str = "worktime";

/// 設定ファイル`<config_dir>/worktime/config.json`の内容。
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    #[serde(default)]
    roster: Vec<String>,
}

/// アプリケーションの設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 台帳ファイルを置くディレクトリ。
    pub data_dir: PathBuf,
    /// 選択できるユーザーの名簿。空の場合は任意のユーザーを受け付ける。
    pub roster: Vec<String>,
}

impl Config {
    /// 設定を読み込む。
    ///
    /// 台帳のディレクトリは、引数、環境変数`WORKTIME_DATA_DIR`、設定ファイル、
    /// `dirs::data_local_dir()`の順に優先する。
    /// 名簿は環境変数`WORKTIME_ROSTER`（カンマ区切り）、設定ファイルの順に優先する。
    ///
    /// # Arguments
    ///
    /// * `data_dir` - コマンドライン引数で指定されたディレクトリ
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let file = match dirs::config_dir() {
            Some(dir) => read_config_file(&dir.join(APP_DIR).join("config.json"))?,
            None => ConfigFile::default(),
        };

        Self::resolve(
            data_dir,
            env::var(DATA_DIR_ENV).ok(),
            env::var(ROSTER_ENV).ok(),
            file,
            dirs::data_local_dir(),
        )
    }

    fn resolve(
        data_dir: Option<PathBuf>,
        env_data_dir: Option<String>,
        env_roster: Option<String>,
        file: ConfigFile,
        default_base: Option<PathBuf>,
    ) -> Result<Self> {
        let data_dir = data_dir
            .or_else(|| env_data_dir.filter(|s| !s.is_empty()).map(PathBuf::from))
            .or(file.data_dir)
            .or_else(|| default_base.map(|base| base.join(APP_DIR)))
            .context("Failed to determine data directory; set WORKTIME_DATA_DIR")?;

        let roster = match env_roster {
            Some(roster) => roster
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect(),
            None => file.roster,
        };

        Ok(Self { data_dir, roster })
    }
}

/// 設定ファイルを読み込む。ファイルが無い場合は既定値を返す。
fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No config file at {}", path.display());
            return Ok(ConfigFile::default());
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
