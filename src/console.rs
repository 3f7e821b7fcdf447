use std::io::Write;

use anyhow::{Context, Result};

use crate::aggregate::WeeklySummary;
use crate::drop_rate_command::DropRateReport;
use crate::work_time::minutes_to_hours;

/// Consoleに計算結果を表示するためのtrait。
pub trait ConsolePresenter {
    /// 1区間の勤務時間を表示する。
    fn show_worked_time(&mut self, minutes: u32) -> Result<()>;

    /// 週の集計結果を表示する。
    ///
    /// # Arguments
    ///
    /// * `label` - 週ラベル
    /// * `summary` - 表示する集計結果
    fn show_weekly_summary(&mut self, label: &str, summary: &WeeklySummary) -> Result<()>;

    /// 保存されている週ラベルを表示する。
    fn show_labels(&mut self, labels: &[String], latest: Option<&str>) -> Result<()>;

    /// ドロップ率の計算結果を表示する。
    fn show_drop_rates(&mut self, report: &DropRateReport) -> Result<()>;
}

/// 計算結果をMarkdownのlist形式で表示する。
pub struct ConsoleMarkdownList<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleMarkdownList<'a, W> {
    /// 新しい`ConsoleMarkdownList`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleMarkdownList<'a, W> {
    fn show_worked_time(&mut self, minutes: u32) -> Result<()> {
        writeln!(
            self.writer,
            "- {}분 ({:.2}시간)",
            minutes,
            minutes_to_hours(minutes)
        )
        .context("Failed to write worked time")?;

        Ok(())
    }

    // 曜日ごとの時間のあとに合計と今日までの時間を表示する。
    fn show_weekly_summary(&mut self, label: &str, summary: &WeeklySummary) -> Result<()> {
        writeln!(self.writer, "## {}", label).context("Failed to write week label")?;
        for (weekday, minutes) in &summary.per_day {
            writeln!(
                self.writer,
                "- {}: {:.2}",
                weekday,
                minutes_to_hours(*minutes)
            )
            .with_context(|| format!("Failed to write {}", weekday))?;
        }
        writeln!(
            self.writer,
            "- 총 근무시간: {:.2}\n- {}까지: {:.2}",
            summary.weekly_total_hours(),
            summary.today,
            summary.through_today_hours()
        )
        .context("Failed to write weekly total")?;

        Ok(())
    }

    fn show_labels(&mut self, labels: &[String], latest: Option<&str>) -> Result<()> {
        for label in labels {
            let mark = if Some(label.as_str()) == latest {
                " (latest)"
            } else {
                ""
            };
            writeln!(self.writer, "- {}{}", label, mark)
                .with_context(|| format!("Failed to write label: {}", label))?;
        }

        Ok(())
    }

    fn show_drop_rates(&mut self, report: &DropRateReport) -> Result<()> {
        writeln!(
            self.writer,
            "- 그룹 확률: {:.3}%",
            report.group_percentage
        )
        .context("Failed to write group probability")?;
        for item in &report.items {
            writeln!(
                self.writer,
                "- {}: {:.2}% -> {} ({:.4}%)",
                item.id,
                item.group_percentage,
                format_thousands(item.parts),
                item.total_percentage
            )
            .with_context(|| format!("Failed to write item: {}", item.id))?;
        }
        writeln!(
            self.writer,
            "- 합계: {:.2}% -> {} ({:.4}%)",
            report.sum_of_group_percentages,
            format_thousands(report.total_parts),
            report.total_percentage
        )
        .context("Failed to write drop rate total")?;

        Ok(())
    }
}

/// 3桁ごとにカンマで区切った文字列を返す。
fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }
    formatted
}
