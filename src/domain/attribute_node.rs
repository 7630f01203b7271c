use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::condition::DisplayCondition;

/// Role of a node inside an attribute hierarchy.
///
/// Categories group attributes, attributes collect the options a user picks
/// from (or a free-text value), options are leaves carrying price and weight
/// impacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Category,
    Attribute,
    Option,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Attribute => "attribute",
            Self::Option => "option",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "category" => Some(Self::Category),
            "attribute" => Some(Self::Attribute),
            "option" => Some(Self::Option),
            _ => None,
        }
    }
}

/// How an option node's price impact is applied to the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceImpactType {
    /// `price_impact_cents` is added as-is.
    Fixed,
    /// `price_impact_cents` holds basis points applied to the base price.
    Percent,
}

impl PriceImpactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Percent => "percent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fixed" => Some(Self::Fixed),
            "percent" => Some(Self::Percent),
            _ => None,
        }
    }
}

/// One node of a manufacturing type's attribute hierarchy.
///
/// `path` is the dot-joined chain of ancestor slugs and must stay consistent
/// with `parent_node_id`; `depth` equals the path segment count minus one.
/// Both are computed by the hierarchy service, never by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeNode {
    pub id: i32,
    pub manufacturing_type_id: i32,
    pub parent_node_id: Option<i32>,
    pub name: String,
    /// Path segment derived from the name, unique among siblings.
    pub slug: String,
    pub node_type: NodeType,
    /// Payload type for attribute nodes (`text`, `number`, `multi`, ...).
    pub data_type: Option<String>,
    pub required: bool,
    /// Materialized dot-path of ancestor slugs, e.g. `frame.material.wood`.
    pub path: String,
    pub depth: i32,
    pub sort_order: i32,
    pub ui_component: Option<String>,
    pub help_text: Option<String>,
    /// Free-form validation rules consumed by the client form renderer.
    pub validation_rules: Option<serde_json::Value>,
    /// Condition deciding whether the node is shown to the user.
    pub display_condition: Option<DisplayCondition>,
    pub price_impact_type: Option<PriceImpactType>,
    pub price_impact_cents: i64,
    pub weight_impact_grams: i64,
    pub page_type: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fully resolved insert payload for an attribute node.
///
/// `slug`, `path` and `depth` are filled in by the hierarchy service so the
/// materialized-path invariants hold by construction.
#[derive(Debug, Clone)]
pub struct NewAttributeNode {
    pub manufacturing_type_id: i32,
    pub parent_node_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub node_type: NodeType,
    pub data_type: Option<String>,
    pub required: bool,
    pub path: String,
    pub depth: i32,
    pub sort_order: i32,
    pub ui_component: Option<String>,
    pub help_text: Option<String>,
    pub validation_rules: Option<serde_json::Value>,
    pub display_condition: Option<DisplayCondition>,
    pub price_impact_type: Option<PriceImpactType>,
    pub price_impact_cents: i64,
    pub weight_impact_grams: i64,
    pub page_type: Option<String>,
}
