use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A customer's assembled set of choices for one manufacturing type, with the
/// derived totals persisted at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub id: i32,
    pub manufacturing_type_id: i32,
    pub name: Option<String>,
    pub total_price_cents: i64,
    pub total_weight_grams: i64,
    /// Selections loaded alongside the configuration.
    pub selections: Vec<ConfigurationSelection>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One chosen option or entered value inside a configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationSelection {
    pub id: i32,
    pub configuration_id: i32,
    pub attribute_node_id: i32,
    /// Free-text value for non-option attributes; `None` for picked options.
    pub value: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Payload required to insert a configuration row.
#[derive(Debug, Clone)]
pub struct NewConfiguration {
    pub manufacturing_type_id: i32,
    pub name: Option<String>,
    pub total_price_cents: i64,
    pub total_weight_grams: i64,
}

impl NewConfiguration {
    pub fn new(manufacturing_type_id: i32) -> Self {
        Self {
            manufacturing_type_id,
            name: None,
            total_price_cents: 0,
            total_weight_grams: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn totals(mut self, total_price_cents: i64, total_weight_grams: i64) -> Self {
        self.total_price_cents = total_price_cents;
        self.total_weight_grams = total_weight_grams;
        self
    }
}

/// Payload for one selection attached to a new configuration.
#[derive(Debug, Clone)]
pub struct NewConfigurationSelection {
    pub attribute_node_id: i32,
    pub value: Option<String>,
}

impl NewConfigurationSelection {
    pub fn option(attribute_node_id: i32) -> Self {
        Self {
            attribute_node_id,
            value: None,
        }
    }

    pub fn value(attribute_node_id: i32, value: impl Into<String>) -> Self {
        Self {
            attribute_node_id,
            value: Some(value.into()),
        }
    }
}
