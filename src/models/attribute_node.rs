use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::attribute_node::{
    AttributeNode as DomainAttributeNode, NewAttributeNode as DomainNewAttributeNode, NodeType,
    PriceImpactType,
};
use crate::domain::condition::DisplayCondition;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::attribute_nodes)]
pub struct AttributeNode {
    pub id: i32,
    pub manufacturing_type_id: i32,
    pub parent_node_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub node_type: String,
    pub data_type: Option<String>,
    pub required: bool,
    pub path: String,
    pub depth: i32,
    pub sort_order: i32,
    pub ui_component: Option<String>,
    pub help_text: Option<String>,
    pub validation_rules: Option<String>,
    pub display_condition: Option<String>,
    pub price_impact_type: Option<String>,
    pub price_impact_cents: i64,
    pub weight_impact_grams: i64,
    pub page_type: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::attribute_nodes)]
pub struct NewAttributeNode<'a> {
    pub manufacturing_type_id: i32,
    pub parent_node_id: Option<i32>,
    pub name: &'a str,
    pub slug: &'a str,
    pub node_type: &'a str,
    pub data_type: Option<&'a str>,
    pub required: bool,
    pub path: &'a str,
    pub depth: i32,
    pub sort_order: i32,
    pub ui_component: Option<&'a str>,
    pub help_text: Option<&'a str>,
    pub validation_rules: Option<String>,
    pub display_condition: Option<String>,
    pub price_impact_type: Option<&'a str>,
    pub price_impact_cents: i64,
    pub weight_impact_grams: i64,
    pub page_type: Option<&'a str>,
}

impl From<AttributeNode> for DomainAttributeNode {
    fn from(value: AttributeNode) -> Self {
        let node_type = NodeType::parse(&value.node_type).unwrap_or(NodeType::Category);
        let price_impact_type = value
            .price_impact_type
            .as_deref()
            .and_then(PriceImpactType::parse);
        let validation_rules = value
            .validation_rules
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok());
        let display_condition = value.display_condition.as_deref().and_then(|raw| {
            match DisplayCondition::from_json(raw) {
                Ok(condition) => Some(condition),
                Err(err) => {
                    log::warn!("discarding malformed display condition on node {}: {err}", value.id);
                    None
                }
            }
        });

        Self {
            id: value.id,
            manufacturing_type_id: value.manufacturing_type_id,
            parent_node_id: value.parent_node_id,
            name: value.name,
            slug: value.slug,
            node_type,
            data_type: value.data_type,
            required: value.required,
            path: value.path,
            depth: value.depth,
            sort_order: value.sort_order,
            ui_component: value.ui_component,
            help_text: value.help_text,
            validation_rules,
            display_condition,
            price_impact_type,
            price_impact_cents: value.price_impact_cents,
            weight_impact_grams: value.weight_impact_grams,
            page_type: value.page_type,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewAttributeNode> for NewAttributeNode<'a> {
    fn from(value: &'a DomainNewAttributeNode) -> Self {
        Self {
            manufacturing_type_id: value.manufacturing_type_id,
            parent_node_id: value.parent_node_id,
            name: value.name.as_str(),
            slug: value.slug.as_str(),
            node_type: value.node_type.as_str(),
            data_type: value.data_type.as_deref(),
            required: value.required,
            path: value.path.as_str(),
            depth: value.depth,
            sort_order: value.sort_order,
            ui_component: value.ui_component.as_deref(),
            help_text: value.help_text.as_deref(),
            validation_rules: value
                .validation_rules
                .as_ref()
                .and_then(|rules| serde_json::to_string(rules).ok()),
            display_condition: value
                .display_condition
                .as_ref()
                .and_then(|condition| condition.to_json().ok()),
            price_impact_type: value.price_impact_type.map(|impact| impact.as_str()),
            price_impact_cents: value.price_impact_cents,
            weight_impact_grams: value.weight_impact_grams,
            page_type: value.page_type.as_deref(),
        }
    }
}
