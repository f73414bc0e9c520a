//! The valuation engine.
//!
//! Pure functions over plain [`Item`](crate::models::Item) values: nothing
//! here reads the clock, touches storage or mutates its input. Callers pass
//! `now` explicitly and get fresh values back.

pub mod aggregate;
pub mod collection;
pub mod metrics;
pub mod projection;

pub use aggregate::{
    category_totals, cost_per_use_trend, monthly_cost_by_category, summary_stats,
    value_score_histogram,
};
pub use collection::{categories_of, category_options, filter_by_category, sort_items, SortKey};
pub use metrics::{
    age_days, cost_class, cost_per_calendar_day, cost_per_use_day, effective_use_days,
    format_money, item_metrics, usage_fraction, value_score, value_tier,
};
pub use projection::what_if;
