/// 百分率と固定小数点の確率（10億分率）を相互に変換する。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbabilityScale {
    max: u64,
}

/// 10億分率（1,000,000,000 = 100%）。
pub const BILLIONTHS: ProbabilityScale = ProbabilityScale {
    max: 1_000_000_000,
};

impl ProbabilityScale {
    /// 100%に相当する値を返す。
    pub fn max(&self) -> u64 {
        self.max
    }

    /// 百分率をスケール値に変換する。小数部は切り捨てる。
    pub fn percentage_to_parts(&self, percentage: f64) -> u64 {
        (percentage * (self.max as f64 / 100.0)) as u64
    }

    /// スケール値を百分率に変換する。
    pub fn parts_to_percentage(&self, parts: u64) -> f64 {
        parts as f64 / (self.max as f64 / 100.0)
    }

    /// グループ内の確率をもとに、全体に対するアイテムの確率を計算する。
    ///
    /// # Arguments
    ///
    /// * `group_parts` - グループ全体の確率（スケール値）
    /// * `item_percentage` - グループ内でのアイテムの確率（百分率）
    pub fn item_probability(&self, group_parts: u64, item_percentage: f64) -> u64 {
        let group_percentage = self.parts_to_percentage(group_parts);
        self.percentage_to_parts(group_percentage * item_percentage / 100.0)
    }

    /// 複数アイテムの確率をまとめて計算する。入力の順序を保つ。
    pub fn multiple_items<'a>(
        &self,
        group_parts: u64,
        items: &'a [(String, f64)],
    ) -> Vec<(&'a str, u64)> {
        items
            .iter()
            .map(|(id, percentage)| (id.as_str(), self.item_probability(group_parts, *percentage)))
            .collect()
    }
}

/// グループ内の確率の合計が100%かどうかを検証する。合計値も返す。
pub fn validate_percentages(items: &[(String, f64)]) -> (bool, f64) {
    let total: f64 = items.iter().map(|(_, percentage)| percentage).sum();
    ((total - 100.0).abs() < 0.01, total)
}
