//! Category extraction, filtering and sorting over item collections.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::metrics::cost_per_use_day;
use crate::config;
use crate::models::Item;

// ---------------------------------------------------------------------------
// SortKey
// ---------------------------------------------------------------------------

/// Orderings offered by the item list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Cheapest cost per use-day first.
    #[default]
    CostPerDay,
    CostPerDayDesc,
    Price,
    PriceDesc,
    /// Newest purchase first.
    Date,
    /// Oldest purchase first.
    DateOld,
    Name,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        Self::CostPerDay,
        Self::CostPerDayDesc,
        Self::Price,
        Self::PriceDesc,
        Self::Date,
        Self::DateOld,
        Self::Name,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CostPerDay => "costPerDay",
            Self::CostPerDayDesc => "costPerDayDesc",
            Self::Price => "price",
            Self::PriceDesc => "priceDesc",
            Self::Date => "date",
            Self::DateOld => "dateOld",
            Self::Name => "name",
        }
    }

    /// Resolve a key name; anything unrecognized falls back to
    /// [`SortKey::CostPerDay`].
    pub fn parse(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .unwrap_or_default()
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Distinct non-empty categories, in order of first appearance.
pub fn categories_of(items: &[Item]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|i| i.category.as_str())
        .filter(|c| !c.is_empty() && seen.insert(*c))
        .map(str::to_string)
        .collect()
}

/// Categories to offer when editing an item: the defaults plus whatever the
/// collection already uses, deduplicated and sorted.
pub fn category_options(items: &[Item]) -> Vec<String> {
    let mut options: Vec<String> = config::DEFAULT_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .chain(categories_of(items))
        .collect();
    options.sort();
    options.dedup();
    options
}

/// Items in `category`. `None` or the [`ALL_CATEGORIES`](config::ALL_CATEGORIES)
/// sentinel keeps everything.
pub fn filter_by_category(items: &[Item], category: Option<&str>) -> Vec<Item> {
    match category {
        None | Some(config::ALL_CATEGORIES) => items.to_vec(),
        Some(cat) => items.iter().filter(|i| i.category == cat).cloned().collect(),
    }
}

/// Return a sorted copy of `items`.
///
/// The sort is stable, so items with equal keys keep their input order.
/// `now` is only read by the cost-per-day keys.
pub fn sort_items(items: &[Item], key: SortKey, now: DateTime<Utc>) -> Vec<Item> {
    let mut sorted = items.to_vec();
    match key {
        SortKey::CostPerDay | SortKey::CostPerDayDesc => {
            // Decorate first so each cost is computed once.
            let mut keyed: Vec<(f64, Item)> = sorted
                .into_iter()
                .map(|i| (cost_per_use_day(&i, now), i))
                .collect();
            if key == SortKey::CostPerDay {
                keyed.sort_by(|a, b| cmp_f64(a.0, b.0));
            } else {
                keyed.sort_by(|a, b| cmp_f64(b.0, a.0));
            }
            return keyed.into_iter().map(|(_, i)| i).collect();
        }
        SortKey::Price => sorted.sort_by(|a, b| cmp_f64(a.price, b.price)),
        SortKey::PriceDesc => sorted.sort_by(|a, b| cmp_f64(b.price, a.price)),
        SortKey::Date => sorted.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date)),
        SortKey::DateOld => sorted.sort_by(|a, b| a.purchase_date.cmp(&b.purchase_date)),
        SortKey::Name => sorted.sort_by(|a, b| compare_names(&a.name, &b.name)),
    }
    sorted
}

/// NaN compares equal to everything, leaving such items where they were.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Name order that ignores case and accents (`"Émile"` sorts with `"emile"`).
/// Names equal after folding fall back to case-insensitive order, then to
/// the exact string.
fn compare_names(a: &str, b: &str) -> Ordering {
    fold_name(a)
        .cmp(&fold_name(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Lowercase `name` and strip combining marks after canonical decomposition.
fn fold_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewItem;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn item(id: &str, name: &str, price: f64, date: (i32, u32, u32), category: &str) -> Item {
        NewItem::new(name, price, NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap())
            .category(category)
            .into_item(id.into(), now())
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn sample() -> Vec<Item> {
        vec![
            item("a", "laptop", 1200.0, (2024, 1, 1), "Electronics"),
            item("b", "Bike", 800.0, (2022, 1, 1), "Sports"),
            item("c", "mug", 12.0, (2024, 12, 1), ""),
            item("d", "Phone", 800.0, (2023, 6, 1), "Electronics"),
        ]
    }

    #[test]
    fn categories_are_distinct_and_skip_empty() {
        assert_eq!(categories_of(&sample()), vec!["Electronics", "Sports"]);
    }

    #[test]
    fn category_options_merge_defaults() {
        let mut items = sample();
        items.push(item("e", "Lamp", 40.0, (2024, 1, 1), "Lighting"));
        let options = category_options(&items);
        assert!(options.contains(&"Lighting".to_string()));
        assert_eq!(options.iter().filter(|c| *c == "Electronics").count(), 1);
        assert!(options.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn filter_all_keeps_everything() {
        assert_eq!(filter_by_category(&sample(), None).len(), 4);
        assert_eq!(filter_by_category(&sample(), Some("all")).len(), 4);
        assert_eq!(ids(&filter_by_category(&sample(), Some("Electronics"))), vec!["a", "d"]);
        assert!(filter_by_category(&sample(), Some("Garden")).is_empty());
    }

    #[test]
    fn price_sort_is_stable_for_ties() {
        let items = sample();
        assert_eq!(ids(&sort_items(&items, SortKey::Price, now())), vec!["c", "b", "d", "a"]);
        assert_eq!(ids(&sort_items(&items, SortKey::PriceDesc, now())), vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn date_sorts() {
        let items = sample();
        assert_eq!(ids(&sort_items(&items, SortKey::Date, now())), vec!["c", "a", "d", "b"]);
        assert_eq!(ids(&sort_items(&items, SortKey::DateOld, now())), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        assert_eq!(ids(&sort_items(&sample(), SortKey::Name, now())), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn name_sort_ignores_accents() {
        let items = vec![
            item("z", "Zoe", 10.0, (2024, 1, 1), ""),
            item("e", "Émile", 10.0, (2024, 1, 1), ""),
            item("a", "anna", 10.0, (2024, 1, 1), ""),
            item("f", "emile", 10.0, (2024, 1, 1), ""),
        ];
        assert_eq!(ids(&sort_items(&items, SortKey::Name, now())), vec!["a", "f", "e", "z"]);
    }

    #[test]
    fn cost_sort_uses_cost_per_use_day() {
        let items = sample();
        let asc = sort_items(&items, SortKey::CostPerDay, now());
        let costs: Vec<f64> = asc.iter().map(|i| cost_per_use_day(i, now())).collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));

        let desc = sort_items(&items, SortKey::CostPerDayDesc, now());
        let mut reversed = ids(&asc);
        reversed.reverse();
        assert_eq!(ids(&desc), reversed);
    }

    #[test]
    fn sorting_leaves_input_alone() {
        let items = sample();
        let before = items.clone();
        let _ = sort_items(&items, SortKey::Name, now());
        assert_eq!(items, before);
    }

    #[test]
    fn unknown_key_falls_back_to_cost_per_day() {
        assert_eq!(SortKey::parse("bogus"), SortKey::CostPerDay);
        assert_eq!("priceDesc".parse::<SortKey>().unwrap(), SortKey::PriceDesc);
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), key);
        }
    }
}
