use std::collections::HashMap;

use serde::Serialize;

use crate::domain::attribute_node::{AttributeNode, NewAttributeNode, NodeType};
use crate::domain::auth::AuthenticatedUser;
use crate::forms::nodes::{NodeDraft, NodeSpec};
use crate::repository::{
    AttributeNodeReader, AttributeNodeWriter, ManufacturingTypeReader,
};
use crate::services::{ServiceError, ServiceResult};

/// A node with its children assembled, for templates and the JSON API.
#[derive(Debug, Serialize)]
pub struct TreeNode {
    #[serde(flatten)]
    pub node: AttributeNode,
    pub children: Vec<TreeNode>,
}

/// Derive a path segment from a display name: lowercase alphanumeric runs
/// joined by underscores.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut previous_separator = true;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
            previous_separator = false;
        } else if !previous_separator {
            slug.push('_');
            previous_separator = true;
        }
    }

    while slug.ends_with('_') {
        slug.pop();
    }

    slug
}

/// Insert a single node under `parent_node_id` (or as a root).
///
/// The slug, path and depth are computed here so the materialized-path
/// invariants hold: `path = parent.path + "." + slug`, roots carry
/// `path = slug` at depth 0. Structural rules: options live under
/// attributes, attributes accept only options as children, options are
/// leaves.
pub fn create_node<R>(
    repo: &R,
    user: &AuthenticatedUser,
    manufacturing_type_id: i32,
    parent_node_id: Option<i32>,
    draft: NodeDraft,
) -> ServiceResult<AttributeNode>
where
    R: AttributeNodeReader + AttributeNodeWriter + ManufacturingTypeReader + ?Sized,
{
    if !user.is_superuser {
        return Err(ServiceError::Unauthorized);
    }

    if repo
        .get_manufacturing_type_by_id(manufacturing_type_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let parent = match parent_node_id {
        Some(parent_id) => {
            let Some(parent) = repo.get_node_by_id(parent_id).map_err(ServiceError::from)?
            else {
                return Err(ServiceError::NotFound);
            };
            if parent.manufacturing_type_id != manufacturing_type_id {
                return Err(ServiceError::Form(
                    "parent node belongs to a different manufacturing type".to_string(),
                ));
            }
            Some(parent)
        }
        None => None,
    };

    check_placement(parent.as_ref().map(|p| p.node_type), draft.node_type)?;

    let slug = slugify(&draft.name);
    if slug.is_empty() {
        return Err(ServiceError::Form(format!(
            "name `{}` yields an empty slug",
            draft.name
        )));
    }

    if repo
        .slug_exists(manufacturing_type_id, parent_node_id, &slug)
        .map_err(ServiceError::from)?
    {
        return Err(ServiceError::Conflict);
    }

    let (path, depth) = match &parent {
        Some(parent) => (format!("{}.{slug}", parent.path), parent.depth + 1),
        None => (slug.clone(), 0),
    };

    let new_node = NewAttributeNode {
        manufacturing_type_id,
        parent_node_id,
        name: draft.name,
        slug,
        node_type: draft.node_type,
        data_type: draft.data_type,
        required: draft.required,
        path,
        depth,
        sort_order: draft.sort_order,
        ui_component: draft.ui_component,
        help_text: draft.help_text,
        validation_rules: draft.validation_rules,
        display_condition: draft.display_condition,
        price_impact_type: draft.price_impact_type,
        price_impact_cents: draft.price_impact_cents,
        weight_impact_grams: draft.weight_impact_grams,
        page_type: draft.page_type,
    };

    repo.create_node(&new_node).map_err(ServiceError::from)
}

/// Insert a whole nested subtree depth-first under `parent_node_id`,
/// returning the number of nodes created.
pub fn create_subtree<R>(
    repo: &R,
    user: &AuthenticatedUser,
    manufacturing_type_id: i32,
    parent_node_id: Option<i32>,
    spec: &NodeSpec,
) -> ServiceResult<usize>
where
    R: AttributeNodeReader + AttributeNodeWriter + ManufacturingTypeReader + ?Sized,
{
    let created = create_node(
        repo,
        user,
        manufacturing_type_id,
        parent_node_id,
        spec.to_draft(),
    )?;

    let mut count = 1;
    for child in &spec.children {
        count += create_subtree(repo, user, manufacturing_type_id, Some(created.id), child)?;
    }

    Ok(count)
}

/// Load all nodes of a manufacturing type and assemble the nested tree.
pub fn load_tree<R>(repo: &R, manufacturing_type_id: i32) -> ServiceResult<Vec<TreeNode>>
where
    R: AttributeNodeReader + ManufacturingTypeReader + ?Sized,
{
    if repo
        .get_manufacturing_type_by_id(manufacturing_type_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let nodes = repo
        .list_nodes(manufacturing_type_id)
        .map_err(ServiceError::from)?;

    Ok(assemble_tree(nodes))
}

/// Delete a node and its whole subtree; returns the number of rows removed.
pub fn remove_subtree<R>(repo: &R, user: &AuthenticatedUser, node_id: i32) -> ServiceResult<usize>
where
    R: AttributeNodeReader + AttributeNodeWriter + ?Sized,
{
    if !user.is_superuser {
        return Err(ServiceError::Unauthorized);
    }

    let Some(node) = repo.get_node_by_id(node_id).map_err(ServiceError::from)? else {
        return Err(ServiceError::NotFound);
    };

    repo.delete_subtree(node.manufacturing_type_id, &node.path)
        .map_err(ServiceError::from)
}

/// Render the nested tree as indented ASCII art for the console page.
pub fn render_ascii(tree: &[TreeNode]) -> String {
    let mut out = String::new();
    for (index, root) in tree.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&root.node.name);
        render_children(&root.children, "", &mut out);
    }
    out
}

fn render_children(children: &[TreeNode], prefix: &str, out: &mut String) {
    let last_index = children.len().saturating_sub(1);
    for (index, child) in children.iter().enumerate() {
        let is_last = index == last_index;
        out.push('\n');
        out.push_str(prefix);
        out.push_str(if is_last { "└─ " } else { "├─ " });
        out.push_str(&child.node.name);

        let child_prefix = if is_last {
            format!("{prefix}   ")
        } else {
            format!("{prefix}│  ")
        };
        render_children(&child.children, &child_prefix, out);
    }
}

/// Group flat nodes by parent and nest them. The repository returns nodes
/// ordered by (depth, sort_order, id), which this preserves per sibling
/// group.
fn assemble_tree(nodes: Vec<AttributeNode>) -> Vec<TreeNode> {
    let mut children_of: HashMap<Option<i32>, Vec<AttributeNode>> = HashMap::new();
    for node in nodes {
        children_of.entry(node.parent_node_id).or_default().push(node);
    }
    attach_children(&mut children_of, None)
}

fn attach_children(
    children_of: &mut HashMap<Option<i32>, Vec<AttributeNode>>,
    parent: Option<i32>,
) -> Vec<TreeNode> {
    children_of
        .remove(&parent)
        .unwrap_or_default()
        .into_iter()
        .map(|node| {
            let children = attach_children(children_of, Some(node.id));
            TreeNode { node, children }
        })
        .collect()
}

fn check_placement(parent_type: Option<NodeType>, child_type: NodeType) -> ServiceResult<()> {
    let allowed = match parent_type {
        None => child_type != NodeType::Option,
        Some(NodeType::Category) => child_type != NodeType::Option,
        Some(NodeType::Attribute) => child_type == NodeType::Option,
        Some(NodeType::Option) => false,
    };

    if allowed {
        Ok(())
    } else {
        let placement = match parent_type {
            None => format!("{} node cannot be a root", child_type.as_str()),
            Some(parent) => format!(
                "{} node cannot be placed under {} node",
                child_type.as_str(),
                parent.as_str()
            ),
        };
        Err(ServiceError::Form(placement))
    }
}
