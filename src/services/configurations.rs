use std::collections::{HashMap, HashSet};

use crate::domain::attribute_node::{AttributeNode, NodeType};
use crate::domain::configuration::{
    Configuration, NewConfiguration, NewConfigurationSelection,
};
use crate::domain::manufacturing_type::ManufacturingType;
use crate::forms::quotes::SelectionEntry;
use crate::repository::{
    AttributeNodeReader, ConfigurationWriter, ManufacturingTypeReader,
};
use crate::services::pricing::{self, PriceBreakdown};
use crate::services::{ServiceError, ServiceResult};

const MULTI_DATA_TYPE: &str = "multi";

/// A validated, priced set of selections ready to persist.
#[derive(Debug)]
pub struct ValidatedConfiguration {
    pub new_configuration: NewConfiguration,
    pub selections: Vec<NewConfigurationSelection>,
    pub breakdown: PriceBreakdown,
}

/// Validate submitted selections against a manufacturing type's hierarchy
/// and price them, without touching the database beyond reads.
///
/// Rules: every selection must reference a node of this type; categories are
/// not selectable; an attribute receives at most one option unless its
/// data type is `multi`; required attributes whose display condition holds
/// for the submitted values must be covered.
pub fn validate_selections<R>(
    repo: &R,
    manufacturing_type_id: i32,
    name: Option<String>,
    entries: &[SelectionEntry],
) -> ServiceResult<ValidatedConfiguration>
where
    R: AttributeNodeReader + ManufacturingTypeReader + ?Sized,
{
    let Some(manufacturing_type) = repo
        .get_manufacturing_type_by_id(manufacturing_type_id)
        .map_err(ServiceError::from)?
    else {
        return Err(ServiceError::NotFound);
    };

    if !manufacturing_type.is_active {
        return Err(ServiceError::Form(format!(
            "manufacturing type `{}` is inactive",
            manufacturing_type.name
        )));
    }

    let nodes = repo
        .list_nodes(manufacturing_type_id)
        .map_err(ServiceError::from)?;
    let by_id: HashMap<i32, &AttributeNode> = nodes.iter().map(|node| (node.id, node)).collect();

    let mut selected_options: Vec<&AttributeNode> = Vec::new();
    let mut options_per_attribute: HashMap<i32, usize> = HashMap::new();
    let mut covered_attributes: HashMap<i32, Vec<String>> = HashMap::new();
    let mut seen_nodes: HashSet<i32> = HashSet::new();
    let mut selections = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(node) = by_id.get(&entry.attribute_node_id) else {
            return Err(ServiceError::Form(format!(
                "selection references unknown node {}",
                entry.attribute_node_id
            )));
        };

        // Each node may be selected once; repeats would double-price
        // options and duplicate selection rows.
        if !seen_nodes.insert(node.id) {
            return Err(ServiceError::Form(format!(
                "node `{}` is selected more than once",
                node.slug
            )));
        }

        match node.node_type {
            NodeType::Option => {
                let Some(parent_id) = node.parent_node_id else {
                    return Err(ServiceError::Form(format!(
                        "option `{}` has no parent attribute",
                        node.slug
                    )));
                };
                selected_options.push(node);
                *options_per_attribute.entry(parent_id).or_insert(0) += 1;
                covered_attributes
                    .entry(parent_id)
                    .or_default()
                    .push(node.slug.clone());
                selections.push(NewConfigurationSelection::option(node.id));
            }
            NodeType::Attribute => {
                let Some(value) = entry
                    .value
                    .as_deref()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                else {
                    return Err(ServiceError::Form(format!(
                        "attribute `{}` needs a value",
                        node.slug
                    )));
                };
                covered_attributes
                    .entry(node.id)
                    .or_default()
                    .push(value.to_string());
                selections.push(NewConfigurationSelection::value(node.id, value));
            }
            NodeType::Category => {
                return Err(ServiceError::Form(format!(
                    "category `{}` is not selectable",
                    node.slug
                )));
            }
        }
    }

    for (attribute_id, count) in &options_per_attribute {
        if *count <= 1 {
            continue;
        }
        let attribute = by_id.get(attribute_id);
        let is_multi = attribute
            .and_then(|node| node.data_type.as_deref())
            .is_some_and(|data_type| data_type == MULTI_DATA_TYPE);
        if !is_multi {
            let slug = attribute.map_or("?", |node| node.slug.as_str());
            return Err(ServiceError::Form(format!(
                "attribute `{slug}` accepts a single option"
            )));
        }
    }

    // Field values the display conditions are evaluated against: attribute
    // slug -> entered value or chosen option slug(s).
    let fields: HashMap<String, String> = covered_attributes
        .iter()
        .filter_map(|(attribute_id, values)| {
            by_id
                .get(attribute_id)
                .map(|node| (node.slug.clone(), values.join(",")))
        })
        .collect();

    for node in &nodes {
        if node.node_type != NodeType::Attribute || !node.required {
            continue;
        }
        if covered_attributes.contains_key(&node.id) {
            continue;
        }
        let visible = node
            .display_condition
            .as_ref()
            .map_or(true, |condition| condition.evaluate(&fields));
        if visible {
            return Err(ServiceError::Form(format!(
                "required attribute `{}` is missing",
                node.slug
            )));
        }
    }

    let breakdown = pricing::price_configuration(&manufacturing_type, &selected_options);

    let mut new_configuration = NewConfiguration::new(manufacturing_type_id)
        .totals(breakdown.total_price_cents, breakdown.total_weight_grams);
    if let Some(name) = name.filter(|name| !name.is_empty()) {
        new_configuration = new_configuration.with_name(name);
    }

    Ok(ValidatedConfiguration {
        new_configuration,
        selections,
        breakdown,
    })
}

/// Price a submission without persisting anything, for the API preview.
pub fn preview_price<R>(
    repo: &R,
    manufacturing_type_id: i32,
    entries: &[SelectionEntry],
) -> ServiceResult<PriceBreakdown>
where
    R: AttributeNodeReader + ManufacturingTypeReader + ?Sized,
{
    validate_selections(repo, manufacturing_type_id, None, entries)
        .map(|validated| validated.breakdown)
}

/// Validate, price and persist a configuration with its selections.
pub fn create_configuration<R>(
    repo: &R,
    manufacturing_type_id: i32,
    name: Option<String>,
    entries: &[SelectionEntry],
) -> ServiceResult<Configuration>
where
    R: AttributeNodeReader + ManufacturingTypeReader + ConfigurationWriter + ?Sized,
{
    let validated = validate_selections(repo, manufacturing_type_id, name, entries)?;
    repo.create_configuration(&validated.new_configuration, &validated.selections)
        .map_err(ServiceError::from)
}

/// The manufacturing type loaded for pricing display; kept separate so route
/// handlers can reuse the already-fetched row.
pub fn load_manufacturing_type<R>(repo: &R, id: i32) -> ServiceResult<ManufacturingType>
where
    R: ManufacturingTypeReader + ?Sized,
{
    repo.get_manufacturing_type_by_id(id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::attribute_node::PriceImpactType;
    use crate::domain::condition::DisplayCondition;
    use crate::domain::manufacturing_type::ManufacturingTypeListQuery;
    use crate::repository::RepositoryResult;

    struct FakeRepo {
        manufacturing_type: ManufacturingType,
        nodes: Vec<AttributeNode>,
    }

    impl ManufacturingTypeReader for FakeRepo {
        fn get_manufacturing_type_by_id(
            &self,
            id: i32,
        ) -> RepositoryResult<Option<ManufacturingType>> {
            Ok((id == self.manufacturing_type.id).then(|| self.manufacturing_type.clone()))
        }
        fn list_manufacturing_types(
            &self,
            _query: ManufacturingTypeListQuery,
        ) -> RepositoryResult<(usize, Vec<ManufacturingType>)> {
            Ok((1, vec![self.manufacturing_type.clone()]))
        }
    }

    impl AttributeNodeReader for FakeRepo {
        fn get_node_by_id(&self, id: i32) -> RepositoryResult<Option<AttributeNode>> {
            Ok(self.nodes.iter().find(|node| node.id == id).cloned())
        }
        fn list_nodes(&self, _manufacturing_type_id: i32) -> RepositoryResult<Vec<AttributeNode>> {
            Ok(self.nodes.clone())
        }
        fn slug_exists(
            &self,
            _manufacturing_type_id: i32,
            parent_node_id: Option<i32>,
            slug: &str,
        ) -> RepositoryResult<bool> {
            Ok(self
                .nodes
                .iter()
                .any(|node| node.parent_node_id == parent_node_id && node.slug == slug))
        }
    }

    fn node(
        id: i32,
        parent: Option<i32>,
        slug: &str,
        node_type: NodeType,
        required: bool,
    ) -> AttributeNode {
        let now = Utc::now().naive_utc();
        AttributeNode {
            id,
            manufacturing_type_id: 1,
            parent_node_id: parent,
            name: slug.to_string(),
            slug: slug.to_string(),
            node_type,
            data_type: None,
            required,
            path: slug.to_string(),
            depth: 0,
            sort_order: 0,
            ui_component: None,
            help_text: None,
            validation_rules: None,
            display_condition: None,
            price_impact_type: None,
            price_impact_cents: 0,
            weight_impact_grams: 0,
            page_type: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn repo() -> FakeRepo {
        let now = Utc::now().naive_utc();
        let manufacturing_type = ManufacturingType {
            id: 1,
            name: "Window".to_string(),
            description: None,
            base_category: "window".to_string(),
            base_price_cents: 100_000,
            base_weight_grams: 20_000,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let mut material = node(10, None, "material", NodeType::Attribute, true);
        material.data_type = Some("text".to_string());
        let mut wood = node(11, Some(10), "wood", NodeType::Option, false);
        wood.price_impact_type = Some(PriceImpactType::Fixed);
        wood.price_impact_cents = 15_000;
        wood.weight_impact_grams = 5_000;
        let mut pvc = node(12, Some(10), "pvc", NodeType::Option, false);
        pvc.price_impact_type = Some(PriceImpactType::Percent);
        pvc.price_impact_cents = 250;

        let mut width = node(20, None, "width", NodeType::Attribute, true);
        width.data_type = Some("number".to_string());

        // Only demanded once a wood frame was picked.
        let mut finish = node(30, None, "finish", NodeType::Attribute, true);
        finish.display_condition = Some(
            DisplayCondition::from_json(
                r#"{"operator": "equals", "field": "material", "value": "wood"}"#,
            )
            .expect("valid condition"),
        );
        let lacquer = node(31, Some(30), "lacquer", NodeType::Option, false);

        FakeRepo {
            manufacturing_type,
            nodes: vec![material, wood, pvc, width, finish, lacquer],
        }
    }

    fn entry(id: i32) -> SelectionEntry {
        SelectionEntry {
            attribute_node_id: id,
            value: None,
        }
    }

    fn value_entry(id: i32, value: &str) -> SelectionEntry {
        SelectionEntry {
            attribute_node_id: id,
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn valid_selection_is_priced() {
        let repo = repo();
        let entries = vec![entry(11), value_entry(20, "1200"), entry(31)];
        let validated = validate_selections(&repo, 1, None, &entries).expect("valid");

        assert_eq!(validated.breakdown.total_price_cents, 115_000);
        assert_eq!(validated.breakdown.total_weight_grams, 25_000);
        assert_eq!(validated.selections.len(), 3);
        assert_eq!(validated.new_configuration.total_price_cents, 115_000);
    }

    #[test]
    fn hidden_required_attribute_is_not_demanded() {
        let repo = repo();
        // PVC picked, so `finish` stays hidden and only width is required.
        let entries = vec![entry(12), value_entry(20, "900")];
        let validated = validate_selections(&repo, 1, None, &entries).expect("valid");
        assert_eq!(validated.breakdown.options_price_cents, 2_500);
    }

    #[test]
    fn visible_required_attribute_must_be_covered() {
        let repo = repo();
        // Wood picked makes `finish` visible, but no finish option selected.
        let entries = vec![entry(11), value_entry(20, "900")];
        let err = validate_selections(&repo, 1, None, &entries).unwrap_err();
        assert!(matches!(err, ServiceError::Form(message) if message.contains("finish")));
    }

    #[test]
    fn two_options_per_single_attribute_are_rejected() {
        let repo = repo();
        let entries = vec![entry(11), entry(12), value_entry(20, "900")];
        let err = validate_selections(&repo, 1, None, &entries).unwrap_err();
        assert!(matches!(err, ServiceError::Form(message) if message.contains("material")));
    }

    #[test]
    fn multi_attribute_accepts_several_options() {
        let mut repo = repo();
        repo.nodes[0].data_type = Some("multi".to_string());
        // Both picks evaluate `material` as "wood,pvc", which no longer
        // equals "wood", so `finish` stays hidden.
        let entries = vec![entry(11), entry(12), value_entry(20, "900")];
        let validated = validate_selections(&repo, 1, None, &entries).expect("multi allowed");
        assert_eq!(validated.breakdown.options_price_cents, 15_000 + 2_500);
    }

    #[test]
    fn repeated_selections_are_rejected() {
        let mut repo = repo();
        repo.nodes[0].data_type = Some("multi".to_string());

        // The same option twice would price its impact twice, even on a
        // multi attribute.
        let entries = vec![entry(11), entry(11), value_entry(20, "900")];
        let err = validate_selections(&repo, 1, None, &entries).unwrap_err();
        assert!(matches!(err, ServiceError::Form(message) if message.contains("wood")));

        // The same free-text attribute twice would persist two rows.
        let entries = vec![entry(12), value_entry(20, "900"), value_entry(20, "1200")];
        let err = validate_selections(&repo, 1, None, &entries).unwrap_err();
        assert!(matches!(err, ServiceError::Form(message) if message.contains("width")));
    }

    #[test]
    fn unknown_node_and_category_selection_are_rejected() {
        let mut repo = repo();
        repo.nodes.push(node(40, None, "frame", NodeType::Category, false));

        let err = validate_selections(&repo, 1, None, &[entry(999)]).unwrap_err();
        assert!(matches!(err, ServiceError::Form(message) if message.contains("999")));

        let err = validate_selections(&repo, 1, None, &[entry(40)]).unwrap_err();
        assert!(matches!(err, ServiceError::Form(message) if message.contains("frame")));
    }

    #[test]
    fn missing_manufacturing_type_is_not_found() {
        let repo = repo();
        assert!(matches!(
            validate_selections(&repo, 999, None, &[]),
            Err(ServiceError::NotFound)
        ));
    }
}
