//! Value tracker SDK for Rust.
//!
//! Tracks owned items (price, purchase date, how often they are used, how
//! long they should last) and works out what they really cost: per calendar
//! day, per day of actual use, and how much of their value has been
//! realized so far.
//!
//! The math lives in [`engine`] as pure functions over plain [`Item`]
//! values with an explicit `now`. [`ValueTracker`] wraps a file-backed
//! [`ItemStore`] and exposes the same operations over the stored collection.
//!
//! # Quick start
//!
//! ```no_run
//! use chrono::{NaiveDate, Utc};
//! use value_tracker::{NewItem, ValueTracker};
//!
//! let tracker = ValueTracker::builder().build().unwrap();
//!
//! // Track a purchase
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! tracker.items().add(NewItem::new("Laptop", 1200.0, date).expected_years(4.0)).unwrap();
//!
//! // Headline numbers (None while nothing is tracked)
//! if let Some(stats) = tracker.summary(Utc::now()).unwrap() {
//!     println!("best value: {}", stats.best_value_item.name);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod queries;
pub mod store;

#[cfg(feature = "async")]
pub use async_client::AsyncValueTracker;
pub use codec::ExportFormat;
pub use engine::SortKey;
pub use error::{Result, TrackerError};
pub use models::{CostClass, Item, ItemMetrics, ItemUpdate, NewItem, SummaryStats, ValueTier, WhatIf};
pub use store::ItemStore;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use models::ChartData;

const LOG_TARGET: &str = "value_tracker";

// ---------------------------------------------------------------------------
// ValueTrackerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ValueTracker`] instance.
///
/// Use [`ValueTracker::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](ValueTrackerBuilder::build) to open the store.
#[derive(Debug, Default)]
pub struct ValueTrackerBuilder {
    data_dir: Option<PathBuf>,
    seed: Option<Vec<Item>>,
}

impl ValueTrackerBuilder {
    /// Set a custom data directory.
    ///
    /// If not set, the platform-appropriate default data directory is used
    /// (e.g. `~/.local/share/value-tracker` on Linux,
    /// `~/Library/Application Support/value-tracker` on macOS).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Items to start with when no data file exists yet.
    pub fn seed(mut self, items: Vec<Item>) -> Self {
        self.seed = Some(items);
        self
    }

    /// Open the store, creating the data directory if needed.
    ///
    /// Nothing is read until the first query.
    pub fn build(self) -> Result<ValueTracker> {
        let store = ItemStore::new(self.data_dir, self.seed)?;
        Ok(ValueTracker { store })
    }
}

// ---------------------------------------------------------------------------
// ValueTracker
// ---------------------------------------------------------------------------

/// The main entry point: the stored collection plus the engine.
///
/// Methods that depend on time take `now` explicitly so results are
/// reproducible; pass `Utc::now()` for live numbers.
#[derive(Debug)]
pub struct ValueTracker {
    store: ItemStore,
}

impl ValueTracker {
    /// Create a new builder for configuring the tracker.
    pub fn builder() -> ValueTrackerBuilder {
        ValueTrackerBuilder::default()
    }

    /// Access the item query interface.
    pub fn items(&self) -> queries::ItemQuery<'_> {
        queries::ItemQuery::new(&self.store)
    }

    // -- Derived numbers ---------------------------------------------------

    /// Metrics for one stored item, or `None` if the id is unknown.
    pub fn metrics_for(&self, id: &str, now: DateTime<Utc>) -> Result<Option<ItemMetrics>> {
        Ok(self.items().get(id)?.map(|i| engine::item_metrics(&i, now)))
    }

    /// Metrics for every stored item, in stored order.
    pub fn all_metrics(&self, now: DateTime<Utc>) -> Result<Vec<ItemMetrics>> {
        Ok(self
            .store
            .load()?
            .iter()
            .map(|i| engine::item_metrics(i, now))
            .collect())
    }

    /// Headline numbers, or `None` while the collection is empty.
    pub fn summary(&self, now: DateTime<Utc>) -> Result<Option<SummaryStats>> {
        Ok(engine::summary_stats(&self.store.load()?, now))
    }

    /// Everything the charts view needs, computed from one snapshot.
    pub fn charts(&self, now: DateTime<Utc>) -> Result<ChartData> {
        let items = self.store.load()?;
        Ok(ChartData {
            category_totals: engine::category_totals(&items),
            monthly_cost_by_category: engine::monthly_cost_by_category(&items, now),
            value_histogram: engine::value_score_histogram(&items, now),
            cost_per_use_trend: engine::cost_per_use_trend(&items, config::DEFAULT_TREND_TOP_N),
        })
    }

    /// Categories to offer in the item form.
    pub fn category_options(&self) -> Result<Vec<String>> {
        Ok(engine::category_options(&self.store.load()?))
    }

    /// Project a purchase that is not tracked. See [`engine::what_if`].
    pub fn what_if(
        &self,
        price: Option<f64>,
        years: Option<f64>,
        days_per_week: Option<f64>,
    ) -> Option<WhatIf> {
        engine::what_if(price, years, days_per_week)
    }

    // -- Import / export ---------------------------------------------------

    /// Encode the stored collection.
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        codec::export(&self.store.load()?, format)
    }

    /// Write an export into `dir` under the format's file name and return
    /// the path written.
    pub fn write_export(&self, dir: &Path, format: ExportFormat) -> Result<PathBuf> {
        let path = dir.join(format.file_name());
        store::write_atomic(&path, &self.export(format)?)?;
        log::info!(target: LOG_TARGET, "Exported {format} to {}", path.display());
        Ok(path)
    }

    /// Replace the collection with the items in a JSON export.
    ///
    /// On a parse failure the stored collection is left unchanged.
    pub fn import_json(&self, text: &str) -> Result<Vec<Item>> {
        let items = codec::import_json(text)?;
        self.items().replace_all(items.clone())?;
        Ok(items)
    }

    /// Append the rows of a CSV export as new items.
    pub fn import_csv(&self, text: &str) -> Result<Vec<Item>> {
        let drafts = codec::import_csv(text)?;
        self.items().add_all(drafts)
    }

    /// Import a file, choosing CSV or JSON by its extension (JSON unless it
    /// ends in `.csv`).
    pub fn import_file(&self, path: &Path) -> Result<Vec<Item>> {
        let text = fs::read_to_string(path)?;
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        log::info!(target: LOG_TARGET, "Importing {}", path.display());
        if is_csv {
            self.import_csv(&text)
        } else {
            self.import_json(&text)
        }
    }

    // -- Utility -----------------------------------------------------------

    /// Return a reference to the underlying [`ItemStore`].
    pub fn store(&self) -> &ItemStore {
        &self.store
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for ValueTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueTracker(data_file={})", self.store.data_file().display())
    }
}
