//! Item queries and mutations against the [`ItemStore`].

use chrono::{DateTime, Utc};

use crate::engine::{self, SortKey};
use crate::error::{Result, TrackerError};
use crate::models::{new_item_id, Item, ItemUpdate, NewItem};
use crate::store::ItemStore;

const LOG_TARGET: &str = "value_tracker::items";

// ---------------------------------------------------------------------------
// SearchItemsParams
// ---------------------------------------------------------------------------

/// Parameters for the item search method.
#[derive(Debug, Clone, Default)]
pub struct SearchItemsParams {
    /// Exact category match; `None` or `"all"` keeps every item.
    pub category: Option<String>,
    pub sort: SortKey,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

// ---------------------------------------------------------------------------
// ItemQuery
// ---------------------------------------------------------------------------

/// Query interface for tracked items backed by the data file.
///
/// Every mutation is one locked read-modify-write cycle on the store.
pub struct ItemQuery<'a> {
    store: &'a ItemStore,
}

impl<'a> ItemQuery<'a> {
    /// Create a new `ItemQuery` bound to the given store.
    pub fn new(store: &'a ItemStore) -> Self {
        Self { store }
    }

    /// Every item, in stored order.
    pub fn list(&self) -> Result<Vec<Item>> {
        self.store.load()
    }

    pub fn get(&self, id: &str) -> Result<Option<Item>> {
        Ok(self.store.load()?.into_iter().find(|i| i.id == id))
    }

    /// Filter by category, sort, then paginate.
    pub fn search(&self, params: &SearchItemsParams, now: DateTime<Utc>) -> Result<Vec<Item>> {
        let items = self.store.load()?;
        let filtered = engine::filter_by_category(&items, params.category.as_deref());
        let sorted = engine::sort_items(&filtered, params.sort, now);

        let offset = params.offset.unwrap_or(0);
        let limit = params.limit.unwrap_or(usize::MAX);
        Ok(sorted.into_iter().skip(offset).take(limit).collect())
    }

    /// Distinct non-empty categories in use.
    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(engine::categories_of(&self.store.load()?))
    }

    /// Validate `draft`, give it an id and creation time, and store it.
    pub fn add(&self, draft: NewItem) -> Result<Item> {
        let item = draft.validate()?.into_item(new_item_id(), Utc::now());
        let stored = item.clone();
        self.store.modify(move |items| {
            items.push(stored);
            Ok(())
        })?;
        log::info!(target: LOG_TARGET, "Added item {} ({})", item.id, item.name);
        Ok(item)
    }

    /// Add several drafts in one cycle. Nothing is stored if any draft is
    /// invalid.
    pub fn add_all(&self, drafts: Vec<NewItem>) -> Result<Vec<Item>> {
        let now = Utc::now();
        let new_items = drafts
            .into_iter()
            .map(|d| Ok(d.validate()?.into_item(new_item_id(), now)))
            .collect::<Result<Vec<Item>>>()?;

        let stored = new_items.clone();
        self.store.modify(move |items| {
            items.extend(stored);
            Ok(())
        })?;
        log::info!(target: LOG_TARGET, "Added {} items", new_items.len());
        Ok(new_items)
    }

    /// Apply `update` to the item with `id` and return the new version.
    pub fn update(&self, id: &str, update: &ItemUpdate) -> Result<Item> {
        let updated = self.store.modify(|items| {
            let item = items
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| TrackerError::NotFound(format!("Item {id}")))?;
            update.apply(item)?;
            Ok(item.clone())
        })?;
        log::info!(target: LOG_TARGET, "Updated item {id}");
        Ok(updated)
    }

    /// Remove the item with `id`. Returns whether anything was removed.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let removed = self.store.modify(|items| {
            let before = items.len();
            items.retain(|i| i.id != id);
            Ok(items.len() != before)
        })?;
        if removed {
            log::info!(target: LOG_TARGET, "Removed item {id}");
        }
        Ok(removed)
    }

    /// Replace the whole collection.
    ///
    /// The current data file is never read, so this also overwrites a file
    /// that no longer parses.
    pub fn replace_all(&self, new_items: Vec<Item>) -> Result<()> {
        let count = new_items.len();
        self.store.save(&new_items)?;
        log::info!(target: LOG_TARGET, "Replaced collection with {count} items");
        Ok(())
    }
}
