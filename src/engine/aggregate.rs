//! Roll-ups over a whole collection: headline stats, per-category totals,
//! the value score histogram and the cost-per-use trend.

use chrono::{DateTime, Utc};

use super::metrics::{cost_per_calendar_day, cost_per_use_day, usage_fraction, value_score};
use crate::config;
use crate::models::{
    CategoryTotal, Item, ItemCost, SummaryStats, TrendPoint, TrendSeries, ValueHistogram,
};

/// Headline numbers for the collection, or `None` when it is empty.
///
/// An empty collection has nothing to summarize; it is not a $0 summary.
pub fn summary_stats(items: &[Item], now: DateTime<Utc>) -> Option<SummaryStats> {
    let first = items.first()?;

    let per_item: Vec<ItemCost> = items
        .iter()
        .map(|i| ItemCost {
            id: i.id.clone(),
            name: i.name.clone(),
            cost_per_use_day: cost_per_use_day(i, now),
        })
        .collect();

    let total_invested = items.iter().map(|i| i.price).sum();
    let daily_burn: f64 = per_item.iter().map(|c| c.cost_per_use_day).sum();

    let mut best = (first, per_item[0].cost_per_use_day);
    for (item, cost) in items.iter().zip(&per_item).skip(1) {
        if cost.cost_per_use_day < best.1 {
            best = (item, cost.cost_per_use_day);
        }
    }

    Some(SummaryStats {
        item_count: items.len(),
        total_invested,
        daily_burn,
        avg_cost_per_use_day: daily_burn / items.len() as f64,
        best_value_item: best.0.clone(),
        per_item,
    })
}

/// Sum of `value(item)` per category, in order of first appearance, with
/// blank categories folded into [`UNCATEGORIZED`](config::UNCATEGORIZED).
fn totals_by_category(items: &[Item], value: impl Fn(&Item) -> f64) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for item in items {
        let category = item.category_or_default();
        let amount = value(item);
        match totals.iter_mut().find(|t| t.category == category) {
            Some(t) => t.total += amount,
            None => totals.push(CategoryTotal {
                category: category.to_string(),
                total: amount,
            }),
        }
    }
    totals
}

/// Money spent per category.
pub fn category_totals(items: &[Item]) -> Vec<CategoryTotal> {
    totals_by_category(items, |i| i.price)
}

/// Current calendar cost per day of each category, scaled to a 30-day month.
pub fn monthly_cost_by_category(items: &[Item], now: DateTime<Utc>) -> Vec<CategoryTotal> {
    totals_by_category(items, |i| cost_per_calendar_day(i, now) * config::DAYS_PER_MONTH)
}

/// Count items per 20-point value score band. A score of exactly 100 lands
/// in the top band; scores that are not finite are not counted.
pub fn value_score_histogram(items: &[Item], now: DateTime<Utc>) -> ValueHistogram {
    let mut histogram = ValueHistogram::default();
    for item in items {
        let score = value_score(item, now);
        if !score.is_finite() {
            continue;
        }
        let bucket = ((score.max(0.0) / 20.0).floor() as usize).min(4);
        histogram.buckets[bucket] += 1;
    }
    histogram
}

/// Hypothetical cost per use of the `top_n` most expensive items after
/// owning each of them for [`TREND_MONTHS`](config::TREND_MONTHS).
pub fn cost_per_use_trend(items: &[Item], top_n: usize) -> Vec<TrendSeries> {
    let mut by_price: Vec<&Item> = items.iter().collect();
    by_price.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(std::cmp::Ordering::Equal));

    by_price
        .into_iter()
        .take(top_n)
        .map(|item| {
            let fraction = usage_fraction(item);
            let points = config::TREND_MONTHS
                .iter()
                .map(|&months| {
                    let use_days = f64::from(months) * config::DAYS_PER_MONTH * fraction;
                    TrendPoint {
                        months,
                        label: month_label(months),
                        cost_per_use: (use_days > 0.0).then(|| item.price / use_days),
                    }
                })
                .collect();
            TrendSeries {
                item_id: item.id.clone(),
                name: item.name.clone(),
                points,
            }
        })
        .collect()
}

fn month_label(months: u32) -> String {
    if months >= 12 {
        format!("{}y", f64::from(months) / 12.0)
    } else {
        format!("{months}mo")
    }
}
