use std::fmt;

use serde::{Deserialize, Serialize};

use super::item::Item;
use crate::config;

// ---------------------------------------------------------------------------
// CostClass — Tier of a cost-per-use figure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostClass {
    Excellent,
    Good,
    High,
}

impl CostClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::High => "high",
        }
    }
}

impl fmt::Display for CostClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValueTier — Coarse band of a value score (drives the value bar color)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueTier {
    Low,
    Medium,
    High,
}

impl ValueTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ValueTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ItemMetrics — Every derived number for one item at one instant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetrics {
    pub id: String,
    pub age_days: i64,
    pub use_days: f64,
    pub cost_per_calendar_day: f64,
    pub cost_per_use_day: f64,
    pub value_score: f64,
    pub cost_class: CostClass,
    pub value_tier: ValueTier,
}

// ---------------------------------------------------------------------------
// SummaryStats — Headline numbers for a non-empty collection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCost {
    pub id: String,
    pub name: String,
    pub cost_per_use_day: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub item_count: usize,
    pub total_invested: f64,
    /// Sum of every item's cost per use-day.
    pub daily_burn: f64,
    pub avg_cost_per_use_day: f64,
    /// The item with the lowest cost per use-day (first one wins ties).
    pub best_value_item: Item,
    pub per_item: Vec<ItemCost>,
}

// ---------------------------------------------------------------------------
// CategoryTotal — One bucket of a per-category breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

// ---------------------------------------------------------------------------
// ValueHistogram — Item counts per 20-point value score band
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueHistogram {
    pub buckets: [usize; 5],
}

impl ValueHistogram {
    pub fn labels() -> [&'static str; 5] {
        config::HISTOGRAM_LABELS
    }

    /// Number of items that landed in a bucket.
    pub fn total(&self) -> usize {
        self.buckets.iter().sum()
    }

    /// Pair each bucket with its label, lowest band first.
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        config::HISTOGRAM_LABELS.into_iter().zip(self.buckets.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// TrendSeries — Hypothetical cost per use across ownership lengths
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub months: u32,
    /// Axis label: `"6mo"` below a year, `"1.5y"` from a year on.
    pub label: String,
    /// `None` when the item would have no use-days at this point.
    pub cost_per_use: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub item_id: String,
    pub name: String,
    pub points: Vec<TrendPoint>,
}

// ---------------------------------------------------------------------------
// WhatIf — Projection for a hypothetical purchase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub years: f64,
    pub cost_per_use: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIf {
    pub cost_per_use_day: f64,
    pub cost_per_calendar_day: f64,
    pub monthly: f64,
    pub weekly: f64,
    pub cost_class: CostClass,
    pub timeline: Vec<Milestone>,
}

// ---------------------------------------------------------------------------
// ChartData — Everything the charts view plots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub category_totals: Vec<CategoryTotal>,
    pub monthly_cost_by_category: Vec<CategoryTotal>,
    pub value_histogram: ValueHistogram,
    pub cost_per_use_trend: Vec<TrendSeries>,
}
