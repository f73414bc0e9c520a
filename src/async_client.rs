//! Async wrapper around [`ValueTracker`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every tracker operation on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the data file is read, locked and rewritten.
//!
//! # Example
//!
//! ```no_run
//! use value_tracker::AsyncValueTracker;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let tracker = AsyncValueTracker::builder().build().await.unwrap();
//!
//!     // Run any sync tracker method via closure
//!     let items = tracker.run(|t| t.items().list()).await.unwrap();
//!
//!     // Convenience method for the headline numbers
//!     let stats = tracker.summary().await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::codec::ExportFormat;
use crate::error::{Result, TrackerError};
use crate::models::{Item, ItemUpdate, NewItem, SummaryStats};
use crate::ValueTracker;

// ---------------------------------------------------------------------------
// AsyncValueTrackerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncValueTracker`] instance.
#[derive(Debug, Default)]
pub struct AsyncValueTrackerBuilder {
    data_dir: Option<PathBuf>,
    seed: Option<Vec<Item>>,
}

impl AsyncValueTrackerBuilder {
    /// Set a custom data directory.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Items to start with when no data file exists yet.
    pub fn seed(mut self, items: Vec<Item>) -> Self {
        self.seed = Some(items);
        self
    }

    /// Build the async tracker.
    ///
    /// Opening the store runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncValueTracker> {
        tokio::task::spawn_blocking(move || {
            let mut builder = ValueTracker::builder();
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            if let Some(seed) = self.seed {
                builder = builder.seed(seed);
            }
            let tracker = builder.build()?;
            Ok(AsyncValueTracker {
                inner: Arc::new(Mutex::new(tracker)),
            })
        })
        .await
        .map_err(|e| TrackerError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncValueTracker
// ---------------------------------------------------------------------------

/// Async wrapper around [`ValueTracker`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The tracker sits behind a [`Mutex`], so
/// operations issued from concurrent tasks run one at a time and each
/// read-modify-write cycle sees the previous one's result.
#[derive(Debug, Clone)]
pub struct AsyncValueTracker {
    inner: Arc<Mutex<ValueTracker>>,
}

impl AsyncValueTracker {
    /// Create a new builder for configuring the async tracker.
    pub fn builder() -> AsyncValueTrackerBuilder {
        AsyncValueTrackerBuilder::default()
    }

    /// Run a sync tracker operation on the blocking thread pool.
    ///
    /// The closure receives a `&ValueTracker` reference and should return
    /// a `Result<T>`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use value_tracker::AsyncValueTracker;
    /// # async fn example() -> value_tracker::Result<()> {
    /// # let tracker = AsyncValueTracker::builder().build().await?;
    /// let categories = tracker.run(|t| t.items().categories()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ValueTracker) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let tracker = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = tracker
                .lock()
                .map_err(|_| TrackerError::InvalidArgument("Tracker lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| TrackerError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// List every stored item.
    pub async fn list(&self) -> Result<Vec<Item>> {
        self.run(|t| t.items().list()).await
    }

    /// Validate and store a new item.
    pub async fn add(&self, draft: NewItem) -> Result<Item> {
        self.run(move |t| t.items().add(draft)).await
    }

    /// Apply a whole-field update to a stored item.
    pub async fn update(&self, id: &str, update: ItemUpdate) -> Result<Item> {
        let id = id.to_string();
        self.run(move |t| t.items().update(&id, &update)).await
    }

    /// Remove a stored item.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        self.run(move |t| t.items().remove(&id)).await
    }

    /// Headline numbers as of now.
    pub async fn summary(&self) -> Result<Option<SummaryStats>> {
        self.run(|t| t.summary(Utc::now())).await
    }

    /// Encode the stored collection.
    pub async fn export(&self, format: ExportFormat) -> Result<String> {
        self.run(move |t| t.export(format)).await
    }

    /// Replace the collection with the items in a JSON export.
    pub async fn import_json(&self, text: String) -> Result<Vec<Item>> {
        self.run(move |t| t.import_json(&text)).await
    }
}
