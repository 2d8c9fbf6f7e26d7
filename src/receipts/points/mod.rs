mod rules;

use std::fmt;

use serde::Serialize;

use super::domain::Receipt;

/// The fixed set of scoring rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsRule {
    RetailerAlphanumeric,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    DescriptionLength,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl PointsRule {
    pub const ALL: [PointsRule; 7] = [
        PointsRule::RetailerAlphanumeric,
        PointsRule::RoundDollarTotal,
        PointsRule::QuarterMultipleTotal,
        PointsRule::ItemPairs,
        PointsRule::DescriptionLength,
        PointsRule::OddPurchaseDay,
        PointsRule::AfternoonPurchase,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PointsRule::RetailerAlphanumeric => "alphanumeric characters in retailer name",
            PointsRule::RoundDollarTotal => "round dollar total",
            PointsRule::QuarterMultipleTotal => "total is a multiple of 0.25",
            PointsRule::ItemPairs => "every two items",
            PointsRule::DescriptionLength => "item descriptions with length divisible by 3",
            PointsRule::OddPurchaseDay => "odd purchase day",
            PointsRule::AfternoonPurchase => "purchased between 14:00 and 16:00",
        }
    }

    fn apply(self, receipt: &Receipt) -> u64 {
        match self {
            PointsRule::RetailerAlphanumeric => rules::retailer_alphanumeric(&receipt.retailer),
            PointsRule::RoundDollarTotal => rules::round_dollar_total(&receipt.total),
            PointsRule::QuarterMultipleTotal => rules::quarter_multiple_total(&receipt.total),
            PointsRule::ItemPairs => rules::item_pairs(&receipt.items),
            PointsRule::DescriptionLength => rules::description_length(&receipt.items),
            PointsRule::OddPurchaseDay => rules::odd_purchase_day(&receipt.purchase_date),
            PointsRule::AfternoonPurchase => rules::afternoon_purchase(&receipt.purchase_time),
        }
    }
}

impl fmt::Display for PointsRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Points awarded by a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule: PointsRule,
    pub points: u64,
}

/// Per-rule audit trail alongside the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub total: u64,
    pub components: Vec<RuleContribution>,
}

impl PointsBreakdown {
    pub fn points_for(&self, rule: PointsRule) -> u64 {
        self.components
            .iter()
            .find(|component| component.rule == rule)
            .map_or(0, |component| component.points)
    }
}

/// Stateless scorer. Every rule runs; a rule whose input cannot be parsed awards nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointsEngine;

impl PointsEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, receipt: &Receipt) -> PointsBreakdown {
        let components: Vec<RuleContribution> = PointsRule::ALL
            .iter()
            .map(|&rule| RuleContribution {
                rule,
                points: rule.apply(receipt),
            })
            .collect();

        let total = components
            .iter()
            .fold(0u64, |acc, component| acc.saturating_add(component.points));

        PointsBreakdown { total, components }
    }
}

/// Total points for a receipt.
pub fn calculate_points(receipt: &Receipt) -> u64 {
    PointsEngine::new().score(receipt).total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipts::domain::Item;

    fn receipt(
        retailer: &str,
        date: &str,
        time: &str,
        items: Vec<Item>,
        total: &str,
    ) -> Receipt {
        Receipt {
            retailer: retailer.to_string(),
            purchase_date: date.to_string(),
            purchase_time: time.to_string(),
            items,
            total: total.to_string(),
        }
    }

    #[test]
    fn target_receipt_scores_twelve() {
        let receipt = receipt(
            "Target",
            "2022-01-01",
            "13:01",
            vec![Item::new("Mountain Dew 12PK", "6.49")],
            "35.35",
        );

        let breakdown = PointsEngine::new().score(&receipt);
        assert_eq!(breakdown.total, 12);
        assert_eq!(breakdown.points_for(PointsRule::RetailerAlphanumeric), 6);
        assert_eq!(breakdown.points_for(PointsRule::OddPurchaseDay), 6);
        assert_eq!(breakdown.points_for(PointsRule::AfternoonPurchase), 0);
    }

    #[test]
    fn walmart_receipt_scores_ninety_eight() {
        let receipt = receipt(
            "Walmart",
            "2023-12-25",
            "15:30",
            vec![Item::new("Pepsi", "2.00")],
            "2.00",
        );

        let breakdown = PointsEngine::new().score(&receipt);
        assert_eq!(breakdown.total, 98);
        assert_eq!(breakdown.points_for(PointsRule::RoundDollarTotal), 50);
        assert_eq!(breakdown.points_for(PointsRule::QuarterMultipleTotal), 25);
        assert_eq!(breakdown.points_for(PointsRule::AfternoonPurchase), 10);
        assert_eq!(breakdown.points_for(PointsRule::DescriptionLength), 0);
    }

    #[test]
    fn corner_market_example() {
        let receipt = receipt(
            "M&M Corner Market",
            "2022-03-20",
            "14:33",
            vec![
                Item::new("Gatorade", "2.25"),
                Item::new("Gatorade", "2.25"),
                Item::new("Gatorade", "2.25"),
                Item::new("Gatorade", "2.25"),
            ],
            "9.00",
        );

        // 14 alnum + 50 + 25 + 10 pairs + 10 afternoon
        assert_eq!(calculate_points(&receipt), 109);
    }

    #[test]
    fn description_bonus_uses_trimmed_length_and_rounds_up() {
        let receipt = receipt(
            "Target",
            "2022-01-01",
            "13:13",
            vec![
                Item::new("Mountain Dew 12PK", "6.49"),
                Item::new("Emils Cheese Pizza", "12.25"),
                Item::new("Knorr Creamy Chicken", "1.26"),
                Item::new("Doritos Nacho Cheese", "3.35"),
                Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
            ],
            "35.35",
        );

        let breakdown = PointsEngine::new().score(&receipt);
        assert_eq!(breakdown.points_for(PointsRule::DescriptionLength), 6);
        assert_eq!(breakdown.points_for(PointsRule::ItemPairs), 10);
        assert_eq!(breakdown.total, 28);
    }

    #[test]
    fn scoring_is_deterministic() {
        let receipt = receipt(
            "Walgreens",
            "2022-01-02",
            "08:13",
            vec![Item::new("Pepsi - 12-oz", "1.25"), Item::new("Dasani", "1.40")],
            "2.65",
        );

        let engine = PointsEngine::new();
        assert_eq!(engine.score(&receipt), engine.score(&receipt));
        assert_eq!(calculate_points(&receipt), engine.score(&receipt).total);
    }

    #[test]
    fn breakdown_lists_every_rule_once() {
        let breakdown = PointsEngine::new().score(&Receipt::default());
        let rules: Vec<PointsRule> = breakdown.components.iter().map(|c| c.rule).collect();
        assert_eq!(rules, PointsRule::ALL.to_vec());
        assert_eq!(breakdown.total, 0);
    }
}
