use serde::Serialize;

use crate::domain::attribute_node::{AttributeNode, NodeType, PriceImpactType};
use crate::domain::manufacturing_type::ManufacturingType;

/// The derived price and weight of a configuration.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub base_price_cents: i64,
    pub options_price_cents: i64,
    pub total_price_cents: i64,
    pub total_weight_grams: i64,
}

/// Price a set of selected option nodes against a manufacturing type.
///
/// Fixed impacts add their cents as-is; percent impacts store basis points
/// and apply to the base price only, so two percent options never compound.
/// Non-option nodes carry no impact and are ignored.
pub fn price_configuration(
    manufacturing_type: &ManufacturingType,
    selected_nodes: &[&AttributeNode],
) -> PriceBreakdown {
    let base = manufacturing_type.base_price_cents;
    let mut options_price_cents = 0i64;
    let mut total_weight_grams = manufacturing_type.base_weight_grams;

    for node in selected_nodes {
        if node.node_type != NodeType::Option {
            continue;
        }

        options_price_cents += match node.price_impact_type {
            Some(PriceImpactType::Fixed) | None => node.price_impact_cents,
            Some(PriceImpactType::Percent) => base * node.price_impact_cents / 10_000,
        };
        total_weight_grams += node.weight_impact_grams;
    }

    PriceBreakdown {
        base_price_cents: base,
        options_price_cents,
        total_price_cents: base + options_price_cents,
        total_weight_grams,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn window_type(base_price_cents: i64, base_weight_grams: i64) -> ManufacturingType {
        let now = Utc::now().naive_utc();
        ManufacturingType {
            id: 1,
            name: "Tilt-turn window".to_string(),
            description: None,
            base_category: "window".to_string(),
            base_price_cents,
            base_weight_grams,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn option_node(
        id: i32,
        impact_type: Option<PriceImpactType>,
        price_impact_cents: i64,
        weight_impact_grams: i64,
    ) -> AttributeNode {
        let now = Utc::now().naive_utc();
        AttributeNode {
            id,
            manufacturing_type_id: 1,
            parent_node_id: Some(10),
            name: format!("option {id}"),
            slug: format!("option_{id}"),
            node_type: NodeType::Option,
            data_type: None,
            required: false,
            path: format!("frame.material.option_{id}"),
            depth: 2,
            sort_order: 0,
            ui_component: None,
            help_text: None,
            validation_rules: None,
            display_condition: None,
            price_impact_type: impact_type,
            price_impact_cents,
            weight_impact_grams,
            page_type: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn fixed_impacts_add_cents() {
        let mt = window_type(100_000, 20_000);
        let wood = option_node(1, Some(PriceImpactType::Fixed), 15_000, 5_000);
        let triple = option_node(2, Some(PriceImpactType::Fixed), 8_000, 3_000);

        let breakdown = price_configuration(&mt, &[&wood, &triple]);
        assert_eq!(breakdown.base_price_cents, 100_000);
        assert_eq!(breakdown.options_price_cents, 23_000);
        assert_eq!(breakdown.total_price_cents, 123_000);
        assert_eq!(breakdown.total_weight_grams, 28_000);
    }

    #[test]
    fn percent_impacts_apply_to_base_only() {
        let mt = window_type(100_000, 20_000);
        // 2.5% and 10% as basis points.
        let a = option_node(1, Some(PriceImpactType::Percent), 250, 0);
        let b = option_node(2, Some(PriceImpactType::Percent), 1_000, 0);
        let fixed = option_node(3, Some(PriceImpactType::Fixed), 5_000, 0);

        let breakdown = price_configuration(&mt, &[&a, &b, &fixed]);
        assert_eq!(breakdown.options_price_cents, 2_500 + 10_000 + 5_000);
        assert_eq!(breakdown.total_price_cents, 117_500);
    }

    #[test]
    fn non_option_nodes_are_ignored() {
        let mt = window_type(100_000, 20_000);
        let mut category = option_node(1, Some(PriceImpactType::Fixed), 99_999, 99_999);
        category.node_type = NodeType::Category;

        let breakdown = price_configuration(&mt, &[&category]);
        assert_eq!(breakdown.total_price_cents, 100_000);
        assert_eq!(breakdown.total_weight_grams, 20_000);
    }

    #[test]
    fn missing_impact_type_defaults_to_fixed() {
        let mt = window_type(100_000, 0);
        let node = option_node(1, None, 2_000, 0);

        let breakdown = price_configuration(&mt, &[&node]);
        assert_eq!(breakdown.options_price_cents, 2_000);
    }
}
