//! 出勤・退勤時刻から休憩時間を除いた勤務時間を計算し、ユーザーごとに週単位で保存する。

pub mod aggregate;
pub mod config;
pub mod console;
pub mod datetime;
pub mod drop_rate_command;
pub mod ledger_command;
pub mod ledger_store;
pub mod logger;
pub mod probability;
pub mod record_command;
pub mod time_of_day;
pub mod user;
pub mod week_command;
pub mod week_label;
pub mod week_record;
pub mod work_time;

pub use aggregate::{aggregate, WeeklySummary};
pub use week_label::current_week_label;
pub use work_time::{minutes_to_hours, parse_and_compute};
