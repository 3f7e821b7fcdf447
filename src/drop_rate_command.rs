use anyhow::{bail, Context, Result};
use log::warn;

use crate::probability::{validate_percentages, ProbabilityScale};

/// グループ内の確率から全体に対するドロップ率を計算するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct DropRateArgs {
    #[clap(
        short = 'g',
        long = "group",
        help = "Probability of the whole group in billionths (1000000000 = 100%)"
    )]
    pub group: u64,

    #[clap(
        required = true,
        help = "Items as ID=PERCENT, the percentage within the group",
        parse(try_from_str = parse_item),
    )]
    pub items: Vec<(String, f64)>,
}

/// 1アイテム分の計算結果。
#[derive(Debug, Clone, PartialEq)]
pub struct DropRateItem {
    pub id: String,
    pub group_percentage: f64,
    pub parts: u64,
    pub total_percentage: f64,
}

/// ドロップ率の計算結果。
#[derive(Debug, Clone, PartialEq)]
pub struct DropRateReport {
    pub group_percentage: f64,
    pub items: Vec<DropRateItem>,
    pub sum_of_group_percentages: f64,
    pub total_parts: u64,
    pub total_percentage: f64,
    pub is_valid: bool,
}

/// `drop-rate`サブコマンドの処理を行う。
///
/// グループ内の確率の合計が100%でない場合は警告を出すが、計算は行う。
pub fn drop_rate_command(scale: ProbabilityScale, drop_rate: DropRateArgs) -> Result<DropRateReport> {
    if drop_rate.group == 0 || drop_rate.group > scale.max() {
        bail!(
            "Group probability must be between 1 and {} but got {}",
            scale.max(),
            drop_rate.group
        );
    }

    let (is_valid, sum_of_group_percentages) = validate_percentages(&drop_rate.items);
    if !is_valid {
        warn!(
            "Percentages within the group sum to {:.2}%, not 100%",
            sum_of_group_percentages
        );
    }

    let items: Vec<DropRateItem> = scale
        .multiple_items(drop_rate.group, &drop_rate.items)
        .into_iter()
        .zip(&drop_rate.items)
        .map(|((id, parts), (_, group_percentage))| DropRateItem {
            id: id.to_string(),
            group_percentage: *group_percentage,
            parts,
            total_percentage: scale.parts_to_percentage(parts),
        })
        .collect();
    let total_parts = items.iter().map(|item| item.parts).sum();

    Ok(DropRateReport {
        group_percentage: scale.parts_to_percentage(drop_rate.group),
        items,
        sum_of_group_percentages,
        total_parts,
        total_percentage: scale.parts_to_percentage(total_parts),
        is_valid,
    })
}

/// `ID=PERCENT`形式のアイテムをパースする。
fn parse_item(s: &str) -> Result<(String, f64)> {
    let (id, percentage) = s
        .split_once('=')
        .with_context(|| format!("Expected ID=PERCENT but got '{}'", s))?;
    let id = id.trim();
    if id.is_empty() {
        bail!("Item ID must not be empty: '{}'", s);
    }
    let percentage = percentage
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Failed to parse percentage: '{}'", s))?;
    if !(0.0..=100.0).contains(&percentage) {
        bail!("Percentage must be between 0 and 100: '{}'", s);
    }

    Ok((id.to_string(), percentage))
}
