//! "What if I bought this?" projections for purchases that are not tracked.

use super::metrics::cost_class;
use crate::config;
use crate::models::{Milestone, WhatIf};

/// Project the cost of a hypothetical purchase kept for `years`.
///
/// Returns `None` until both `price` and `years` are present and positive,
/// so "not entered yet" is never shown as a computed zero. A missing, zero
/// or non-finite `days_per_week` means daily use.
///
/// The timeline lists the ages in
/// [`WHAT_IF_MILESTONES`](config::WHAT_IF_MILESTONES) up to twice the
/// expected lifespan.
pub fn what_if(price: Option<f64>, years: Option<f64>, days_per_week: Option<f64>) -> Option<WhatIf> {
    let price = price.filter(|p| p.is_finite() && *p > 0.0)?;
    let years = years.filter(|y| y.is_finite() && *y > 0.0)?;
    let days_per_week = days_per_week
        .filter(|d| d.is_finite() && *d != 0.0)
        .unwrap_or(config::DAYS_PER_WEEK);

    let fraction = days_per_week / config::DAYS_PER_WEEK;
    let cost_per_use_day = price / (years * config::DAYS_PER_YEAR * fraction);

    let timeline = config::WHAT_IF_MILESTONES
        .iter()
        .filter(|&&m| m <= years * 2.0)
        .map(|&m| Milestone {
            years: m,
            cost_per_use: price / (m * config::DAYS_PER_YEAR * fraction),
        })
        .collect();

    Some(WhatIf {
        cost_per_use_day,
        cost_per_calendar_day: price / (years * config::DAYS_PER_YEAR),
        monthly: price / (years * 12.0),
        weekly: price / (years * 52.0),
        cost_class: cost_class(cost_per_use_day),
        timeline,
    })
}
