use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// A manufacturable product family (e.g. "Tilt-turn window"), root of one
/// attribute hierarchy and carrier of the base price and weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManufacturingType {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Coarse grouping shown in the console (e.g. `window`, `door`).
    pub base_category: String,
    /// Base price in cents before option impacts.
    pub base_price_cents: i64,
    /// Base weight in grams before option impacts.
    pub base_weight_grams: i64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new manufacturing type.
#[derive(Debug, Clone)]
pub struct NewManufacturingType {
    pub name: String,
    pub description: Option<String>,
    pub base_category: String,
    pub base_price_cents: i64,
    pub base_weight_grams: i64,
}

impl NewManufacturingType {
    pub fn new(name: impl Into<String>, base_category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            base_category: base_category.into(),
            base_price_cents: 0,
            base_weight_grams: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn base_price_cents(mut self, cents: i64) -> Self {
        self.base_price_cents = cents;
        self
    }

    pub fn base_weight_grams(mut self, grams: i64) -> Self {
        self.base_weight_grams = grams;
        self
    }
}

/// Patch data applied when updating an existing manufacturing type.
#[derive(Debug, Clone, Default)]
pub struct UpdateManufacturingType {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub base_category: Option<String>,
    pub base_price_cents: Option<i64>,
    pub base_weight_grams: Option<i64>,
    pub is_active: Option<bool>,
}

impl UpdateManufacturingType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(Into::into));
        self
    }

    pub fn base_category(mut self, base_category: impl Into<String>) -> Self {
        self.base_category = Some(base_category.into());
        self
    }

    pub fn base_price_cents(mut self, cents: i64) -> Self {
        self.base_price_cents = Some(cents);
        self
    }

    pub fn base_weight_grams(mut self, grams: i64) -> Self {
        self.base_weight_grams = Some(grams);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// Query definition used to list manufacturing types.
#[derive(Debug, Clone, Default)]
pub struct ManufacturingTypeListQuery {
    /// Optional search applied to name and description.
    pub search: Option<String>,
    /// Whether inactive types should be included in the results.
    pub include_inactive: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ManufacturingTypeListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
