use std::fmt;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use uuid::Uuid;

/// 台帳の持ち主を表すキー。
///
/// 認証は行わず、呼び出し側から渡された識別子をそのまま使う。
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserKey(String);

impl UserKey {
    /// 新しい`UserKey`を返す。空白のみの識別子はエラーとする。
    pub fn new(key: &str) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() {
            bail!("User key must not be empty");
        }
        Ok(Self(key.to_string()))
    }

    /// ランダムな識別子で新しい`UserKey`を作成する。
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 名簿からユーザーを選択する。
///
/// 名簿が空の場合は任意の識別子を受け付ける。
///
/// # Arguments
///
/// * `roster` - 設定された名簿
/// * `name` - 選択するユーザー名
pub fn select_user(roster: &[String], name: &str) -> Result<UserKey> {
    let key = UserKey::new(name)?;
    if !roster.is_empty() && !roster.iter().any(|member| member.trim() == key.as_str()) {
        bail!(
            "User '{}' is not in the roster ({})",
            key,
            roster.join(", ")
        );
    }
    Ok(key)
}

/// 1回の操作で使う利用者と基準日。
///
/// プロセス全体の状態は持たず、呼び出し側が作成して各コマンドに渡す。
#[derive(Clone, Debug)]
pub struct Session {
    pub user: UserKey,
    pub today: NaiveDate,
}

impl Session {
    pub fn new(user: UserKey, today: NaiveDate) -> Self {
        Self { user, today }
    }
}
