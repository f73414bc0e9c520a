use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;
use crate::error::{Result, TrackerError};

fn default_days_per_week() -> f64 {
    config::DAYS_PER_WEEK
}

// ---------------------------------------------------------------------------
// Item — A tracked possession (canonical persisted/exported shape)
// ---------------------------------------------------------------------------

/// A tracked possession.
///
/// Every derived number (cost per day, value score, ...) is a pure function
/// of these fields and a caller-supplied "now"; none of them is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub expected_years: Option<f64>,
    #[serde(default = "default_days_per_week")]
    pub days_per_week: f64,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// The category used for grouping, with blank categories folded into
    /// [`UNCATEGORIZED`](config::UNCATEGORIZED).
    pub fn category_or_default(&self) -> &str {
        if self.category.is_empty() {
            config::UNCATEGORIZED
        } else {
            &self.category
        }
    }

    /// Strip the identity fields, leaving the user-editable part.
    pub fn to_new_item(&self) -> NewItem {
        NewItem {
            name: self.name.clone(),
            price: self.price,
            purchase_date: self.purchase_date,
            category: self.category.clone(),
            expected_years: self.expected_years,
            days_per_week: self.days_per_week,
            notes: self.notes.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// NewItem — Caller-supplied draft of an item (no id / createdAt yet)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub expected_years: Option<f64>,
    #[serde(default = "default_days_per_week")]
    pub days_per_week: f64,
    #[serde(default)]
    pub notes: String,
}

impl NewItem {
    /// Create a draft used every day, with no category, lifespan or notes.
    pub fn new(name: impl Into<String>, price: f64, purchase_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            price,
            purchase_date,
            category: String::new(),
            expected_years: None,
            days_per_week: config::DAYS_PER_WEEK,
            notes: String::new(),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn expected_years(mut self, years: f64) -> Self {
        self.expected_years = Some(years);
        self
    }

    pub fn days_per_week(mut self, days: f64) -> Self {
        self.days_per_week = days;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Check and normalize the draft the way the item form does before saving.
    ///
    /// - `name` must be non-blank and `price` finite and positive
    ///   (otherwise [`TrackerError::InvalidArgument`]).
    /// - A blank category becomes [`FALLBACK_CATEGORY`](config::FALLBACK_CATEGORY).
    /// - A non-positive or non-finite lifespan is dropped.
    /// - `days_per_week` is clamped to `[0.1, 7]`, with unusable values
    ///   reset to 7.
    pub fn validate(mut self) -> Result<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TrackerError::InvalidArgument("name is required".into()));
        }
        self.name = name.to_string();

        check_price(self.price)?;

        if self.category.trim().is_empty() {
            self.category = config::FALLBACK_CATEGORY.to_string();
        }
        self.expected_years = self.expected_years.filter(|y| y.is_finite() && *y > 0.0);
        self.days_per_week = clamp_days_per_week(self.days_per_week);
        Ok(self)
    }

    /// Attach identity to the draft.
    pub fn into_item(self, id: String, created_at: DateTime<Utc>) -> Item {
        Item {
            id,
            name: self.name,
            price: self.price,
            purchase_date: self.purchase_date,
            category: self.category,
            expected_years: self.expected_years,
            days_per_week: self.days_per_week,
            notes: self.notes,
            created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// ItemUpdate — Whole-field replacement patch
// ---------------------------------------------------------------------------

/// Replacement values for an existing item.
///
/// Each `Some` field replaces the stored value wholesale. `id` and
/// `createdAt` are not part of the patch and can never change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    pub category: Option<String>,
    /// `Some(None)` clears the lifespan.
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub expected_years: Option<Option<f64>>,
    pub days_per_week: Option<f64>,
    pub notes: Option<String>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch to `item`, validating the replaced fields with the
    /// same rules as [`NewItem::validate`].
    ///
    /// The item is left untouched when validation fails.
    pub fn apply(&self, item: &mut Item) -> Result<()> {
        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                return Err(TrackerError::InvalidArgument("name is required".into()));
            }
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }

        if let Some(ref name) = self.name {
            item.name = name.trim().to_string();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(date) = self.purchase_date {
            item.purchase_date = date;
        }
        if let Some(ref category) = self.category {
            item.category = if category.trim().is_empty() {
                config::FALLBACK_CATEGORY.to_string()
            } else {
                category.clone()
            };
        }
        if let Some(years) = self.expected_years {
            item.expected_years = years.filter(|y| y.is_finite() && *y > 0.0);
        }
        if let Some(days) = self.days_per_week {
            item.days_per_week = clamp_days_per_week(days);
        }
        if let Some(ref notes) = self.notes {
            item.notes = notes.clone();
        }
        Ok(())
    }
}

mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Option<f64>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(inner) => inner.serialize(s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<f64>>, D::Error> {
        Option::<f64>::deserialize(d).map(Some)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_price(price: f64) -> Result<()> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(TrackerError::InvalidArgument(format!(
            "price must be a positive number, got {price}"
        )))
    }
}

fn clamp_days_per_week(days: f64) -> f64 {
    if days.is_finite() && days > 0.0 {
        days.clamp(config::MIN_DAYS_PER_WEEK, config::DAYS_PER_WEEK)
    } else {
        config::DAYS_PER_WEEK
    }
}

/// Generate a random RFC 4122 version 4 identifier.
pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn validate_normalizes_form_fields() {
        let draft = NewItem::new("  Laptop ", 1200.0, date("2024-01-01"))
            .days_per_week(12.0)
            .expected_years(0.0)
            .validate()
            .unwrap();
        assert_eq!(draft.name, "Laptop");
        assert_eq!(draft.category, "Other");
        assert_eq!(draft.expected_years, None);
        assert_eq!(draft.days_per_week, 7.0);
    }

    #[test]
    fn validate_clamps_low_usage_and_resets_zero() {
        let low = NewItem::new("Tent", 300.0, date("2024-01-01")).days_per_week(0.01);
        assert_eq!(low.validate().unwrap().days_per_week, 0.1);

        let zero = NewItem::new("Tent", 300.0, date("2024-01-01")).days_per_week(0.0);
        assert_eq!(zero.validate().unwrap().days_per_week, 7.0);
    }

    #[test]
    fn validate_rejects_blank_name_and_bad_price() {
        assert!(NewItem::new(" ", 10.0, date("2024-01-01")).validate().is_err());
        assert!(NewItem::new("Mug", 0.0, date("2024-01-01")).validate().is_err());
        assert!(NewItem::new("Mug", f64::NAN, date("2024-01-01")).validate().is_err());
    }

    #[test]
    fn update_replaces_only_given_fields() {
        let mut item = NewItem::new("Bike", 800.0, date("2023-05-01"))
            .expected_years(10.0)
            .into_item("id-1".into(), Utc::now());
        let created = item.created_at;

        let patch = ItemUpdate {
            price: Some(750.0),
            expected_years: Some(None),
            ..Default::default()
        };
        patch.apply(&mut item).unwrap();

        assert_eq!(item.id, "id-1");
        assert_eq!(item.created_at, created);
        assert_eq!(item.name, "Bike");
        assert_eq!(item.price, 750.0);
        assert_eq!(item.expected_years, None);
    }

    #[test]
    fn update_with_blank_category_falls_back_like_new_items() {
        let mut item = NewItem::new("Bike", 800.0, date("2023-05-01"))
            .category("Sports")
            .into_item("id-1".into(), Utc::now());
        let patch = ItemUpdate {
            category: Some("  ".into()),
            ..Default::default()
        };
        patch.apply(&mut item).unwrap();
        assert_eq!(item.category, "Other");
    }

    #[test]
    fn failed_update_leaves_item_untouched() {
        let mut item = NewItem::new("Bike", 800.0, date("2023-05-01")).into_item("id-1".into(), Utc::now());
        let before = item.clone();
        let patch = ItemUpdate {
            name: Some("Road bike".into()),
            price: Some(-1.0),
            ..Default::default()
        };
        assert!(patch.apply(&mut item).is_err());
        assert_eq!(item, before);
    }

    #[test]
    fn update_deserializes_null_lifespan_as_clear() {
        let patch: ItemUpdate = serde_json::from_str(r#"{"expectedYears": null}"#).unwrap();
        assert_eq!(patch.expected_years, Some(None));

        let patch: ItemUpdate = serde_json::from_str(r#"{"notes": "x"}"#).unwrap();
        assert_eq!(patch.expected_years, None);
    }

    #[test]
    fn item_ids_are_v4_shaped_and_distinct() {
        let a = new_item_id();
        let b = new_item_id();
        assert_ne!(a, b);
        assert_eq!(Uuid::parse_str(&a).unwrap().get_version_num(), 4);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let item: Item = serde_json::from_str(
            r#"{"id":"x","name":"Desk","price":250,"purchaseDate":"2022-03-04",
                "createdAt":"2022-03-04T10:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(item.category, "");
        assert_eq!(item.category_or_default(), "Uncategorized");
        assert_eq!(item.expected_years, None);
        assert_eq!(item.days_per_week, 7.0);
        assert_eq!(item.notes, "");
    }
}
