use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::attribute_node::{NodeType, PriceImpactType};
use crate::domain::condition::DisplayCondition;
use crate::forms::{parse_money_cents, sanitize_inline_text, sanitize_multiline_text};
use crate::routes::empty_string_as_none;

const NAME_MAX_LEN: u64 = 128;

pub type NodeFormResult<T> = Result<T, NodeFormError>;

/// Errors that can occur while processing hierarchy node forms.
#[derive(Debug, Error)]
pub enum NodeFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("node name cannot be empty")]
    EmptyName,
    #[error("unknown node type `{value}`")]
    UnknownNodeType { value: String },
    #[error("unknown price impact type `{value}`")]
    UnknownPriceImpactType { value: String },
    #[error("invalid price impact `{value}`")]
    InvalidPriceImpact { value: String },
    #[error("invalid display condition: {0}")]
    InvalidCondition(String),
    #[error("invalid validation rules: {0}")]
    InvalidRules(String),
    #[error("invalid subtree definition: {0}")]
    InvalidSubtree(String),
}

/// The node attributes a caller may set; slug, path and depth are computed by
/// the hierarchy service.
#[derive(Debug, Clone)]
pub struct NodeDraft {
    pub name: String,
    pub node_type: NodeType,
    pub data_type: Option<String>,
    pub required: bool,
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

impl NodeDraft {
    /// Minimal draft used by tests and programmatic callers.
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            name: name.into(),
            node_type,
            data_type: None,
            required: false,
            sort_order: 0,
            ui_component: None,
            help_text: None,
            validation_rules: None,
            display_condition: None,
            price_impact_type: None,
            price_impact_cents: 0,
            weight_impact_grams: 0,
            page_type: None,
        }
    }
}

/// Form payload emitted when adding a single node to a hierarchy.
///
/// `price_impact` is a decimal money string for fixed impacts and a percent
/// string (e.g. `2.5` for 2.5%) for percent impacts; percent values are
/// stored as basis points.
#[derive(Debug, Deserialize, Validate)]
pub struct AddNodeForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub parent_node_id: Option<i32>,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    pub node_type: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub data_type: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sort_order: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub ui_component: Option<String>,
    pub help_text: Option<String>,
    /// JSON textarea, optional.
    pub validation_rules: Option<String>,
    /// JSON textarea, optional.
    pub display_condition: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub price_impact_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub price_impact: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub weight_impact_grams: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page_type: Option<String>,
}

impl AddNodeForm {
    pub fn into_node_draft(self) -> NodeFormResult<NodeDraft> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(NodeFormError::EmptyName);
        }

        let node_type =
            NodeType::parse(self.node_type.trim()).ok_or_else(|| NodeFormError::UnknownNodeType {
                value: self.node_type.trim().to_string(),
            })?;

        let price_impact_type = self
            .price_impact_type
            .as_deref()
            .map(|value| {
                PriceImpactType::parse(value.trim()).ok_or_else(|| {
                    NodeFormError::UnknownPriceImpactType {
                        value: value.trim().to_string(),
                    }
                })
            })
            .transpose()?;

        let price_impact_cents = self
            .price_impact
            .as_deref()
            .map(parse_impact)
            .transpose()?
            .unwrap_or(0);

        let validation_rules = self
            .validation_rules
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| {
                serde_json::from_str::<serde_json::Value>(value)
                    .map_err(|err| NodeFormError::InvalidRules(err.to_string()))
            })
            .transpose()?;

        let display_condition = self
            .display_condition
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| {
                DisplayCondition::from_json(value)
                    .map_err(|err| NodeFormError::InvalidCondition(err.to_string()))
            })
            .transpose()?;

        let help_text = self
            .help_text
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        Ok(NodeDraft {
            name,
            node_type,
            data_type: self.data_type,
            required: self.required,
            sort_order: self.sort_order.unwrap_or(0),
            ui_component: self.ui_component,
            help_text,
            validation_rules,
            display_condition,
            price_impact_type,
            price_impact_cents,
            weight_impact_grams: self.weight_impact_grams.unwrap_or(0),
            page_type: self.page_type,
        })
    }
}

/// One node in a nested subtree definition, as submitted in the JSON
/// textarea of the subtree form or the API.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    pub node_type: NodeType,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub ui_component: Option<String>,
    #[serde(default)]
    pub help_text: Option<String>,
    #[serde(default)]
    pub validation_rules: Option<serde_json::Value>,
    #[serde(default)]
    pub display_condition: Option<DisplayCondition>,
    #[serde(default)]
    pub price_impact_type: Option<PriceImpactType>,
    #[serde(default)]
    pub price_impact_cents: i64,
    #[serde(default)]
    pub weight_impact_grams: i64,
    #[serde(default)]
    pub page_type: Option<String>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// The draft for this node alone, children excluded.
    pub fn to_draft(&self) -> NodeDraft {
        NodeDraft {
            name: self.name.clone(),
            node_type: self.node_type,
            data_type: self.data_type.clone(),
            required: self.required,
            sort_order: self.sort_order,
            ui_component: self.ui_component.clone(),
            help_text: self.help_text.clone(),
            validation_rules: self.validation_rules.clone(),
            display_condition: self.display_condition.clone(),
            price_impact_type: self.price_impact_type,
            price_impact_cents: self.price_impact_cents,
            weight_impact_grams: self.weight_impact_grams,
            page_type: self.page_type.clone(),
        }
    }
}

/// Form payload carrying a nested subtree definition.
#[derive(Debug, Deserialize)]
pub struct AddSubtreeForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub parent_node_id: Option<i32>,
    /// JSON textarea with the nested node definition.
    pub tree: String,
}

impl AddSubtreeForm {
    pub fn into_parts(self) -> NodeFormResult<(Option<i32>, NodeSpec)> {
        let spec: NodeSpec = serde_json::from_str(self.tree.trim())
            .map_err(|err| NodeFormError::InvalidSubtree(err.to_string()))?;
        Ok((self.parent_node_id, spec))
    }
}

// Fixed impacts and percent impacts both parse as two-decimal numbers;
// cents and basis points coincide (2.5% -> 250 bp, $2.50 -> 250 cents).
fn parse_impact(input: &str) -> NodeFormResult<i64> {
    parse_money_cents(input).ok_or_else(|| NodeFormError::InvalidPriceImpact {
        value: input.trim().to_string(),
    })
}
