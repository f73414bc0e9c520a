use std::path::PathBuf;

pub const DATA_FILE: &str = "value-tracker.json";
pub const LOCK_FILE: &str = "value-tracker.lock";

pub const JSON_EXPORT_FILE: &str = "value-tracker.json";
pub const CSV_EXPORT_FILE: &str = "value-tracker.csv";

/// Category label used when an item has none.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Filter sentinel meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Category assigned by [`NewItem::validate`](crate::models::NewItem::validate)
/// when the caller leaves it blank.
pub const FALLBACK_CATEGORY: &str = "Other";

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Electronics",
    "Vehicle",
    "Furniture",
    "Clothing",
    "Kitchen",
    "Sports",
    "Tools",
    "Other",
];

pub const DAYS_PER_WEEK: f64 = 7.0;
pub const MIN_DAYS_PER_WEEK: f64 = 0.1;
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Calendar cost per day at which an item without an expected lifespan
/// counts as fully paid off.
pub const TARGET_DAILY_COST: f64 = 0.10;

/// Ownership lengths, in months, sampled by the cost-per-use trend.
pub const TREND_MONTHS: [u32; 9] = [1, 3, 6, 12, 18, 24, 36, 48, 60];
pub const DEFAULT_TREND_TOP_N: usize = 5;

/// Ages, in years, reported by the what-if timeline.
pub const WHAT_IF_MILESTONES: [f64; 7] = [0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0];

pub const HISTOGRAM_LABELS: [&str; 5] = ["0–20", "20–40", "40–60", "60–80", "80–100"];

pub const CSV_COLUMNS: [&str; 7] = [
    "name",
    "price",
    "purchaseDate",
    "category",
    "expectedYears",
    "daysPerWeek",
    "notes",
];

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("value-tracker")
    } else {
        PathBuf::from(".value-tracker")
    }
}
