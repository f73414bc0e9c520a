//! Per-item metric functions.
//!
//! Everything here is a pure function of an [`Item`] and an explicit `now`.
//! The only guards are the one-day floor on age and the seven-day default on
//! usage; malformed numbers (NaN, negative prices) flow through unchecked.

use chrono::{DateTime, NaiveTime, Utc};

use crate::config;
use crate::models::{CostClass, Item, ItemMetrics, ValueTier};

/// Whole days since purchase, never less than one.
///
/// The purchase date is taken as UTC midnight. Same-day and future-dated
/// purchases both report `1`.
pub fn age_days(item: &Item, now: DateTime<Utc>) -> i64 {
    let purchased = item.purchase_date.and_time(NaiveTime::MIN).and_utc();
    (now - purchased).num_days().max(1)
}

/// Share of days the item is in use: `days_per_week / 7`.
///
/// A zero or NaN `days_per_week` counts as every day.
pub fn usage_fraction(item: &Item) -> f64 {
    let days = item.days_per_week;
    let days = if days == 0.0 || days.is_nan() {
        config::DAYS_PER_WEEK
    } else {
        days
    };
    days / config::DAYS_PER_WEEK
}

pub fn effective_use_days(item: &Item, now: DateTime<Utc>) -> f64 {
    age_days(item, now) as f64 * usage_fraction(item)
}

pub fn cost_per_calendar_day(item: &Item, now: DateTime<Utc>) -> f64 {
    item.price / age_days(item, now) as f64
}

pub fn cost_per_use_day(item: &Item, now: DateTime<Utc>) -> f64 {
    item.price / effective_use_days(item, now)
}

/// How much of the item's value has been realized, as a percentage capped
/// at 100.
///
/// With an expected lifespan the score is use-days over expected use-days;
/// the usage fraction cancels, so this tracks calendar age against the
/// calendar lifespan. Without one, the target is the number of days it
/// takes to get down to [`TARGET_DAILY_COST`](config::TARGET_DAILY_COST).
pub fn value_score(item: &Item, now: DateTime<Utc>) -> f64 {
    let use_days = effective_use_days(item, now);
    let score = match item.expected_years {
        Some(years) if years != 0.0 && !years.is_nan() => {
            let expected_use_days = years * config::DAYS_PER_YEAR * usage_fraction(item);
            use_days / expected_use_days * 100.0
        }
        _ => {
            let target = item.price / config::TARGET_DAILY_COST;
            use_days / target * 100.0
        }
    };
    cap_percent(score)
}

/// `min(100, score)` that lets NaN through instead of swallowing it.
fn cap_percent(score: f64) -> f64 {
    if score > 100.0 {
        100.0
    } else {
        score
    }
}

/// Tier a cost per use-day: below 1 is excellent, below 5 good, else high.
pub fn cost_class(cost_per_use_day: f64) -> CostClass {
    if cost_per_use_day < 1.0 {
        CostClass::Excellent
    } else if cost_per_use_day < 5.0 {
        CostClass::Good
    } else {
        CostClass::High
    }
}

pub fn value_tier(score: f64) -> ValueTier {
    if score > 66.0 {
        ValueTier::High
    } else if score > 33.0 {
        ValueTier::Medium
    } else {
        ValueTier::Low
    }
}

/// Render an amount of money for display.
///
/// Anything below one cent reads `"<$0.01"`; everything else is `$` plus
/// two decimals.
pub fn format_money(n: f64) -> String {
    if n < 0.01 {
        "<$0.01".to_string()
    } else {
        format!("${n:.2}")
    }
}

/// Compute every per-item metric at once.
pub fn item_metrics(item: &Item, now: DateTime<Utc>) -> ItemMetrics {
    let cost_per_use_day = cost_per_use_day(item, now);
    let value_score = value_score(item, now);
    ItemMetrics {
        id: item.id.clone(),
        age_days: age_days(item, now),
        use_days: effective_use_days(item, now),
        cost_per_calendar_day: cost_per_calendar_day(item, now),
        cost_per_use_day,
        value_score,
        cost_class: cost_class(cost_per_use_day),
        value_tier: value_tier(value_score),
    }
}
