use diesel::prelude::*;

use crate::{
    domain::attribute_node::{
        AttributeNode as DomainAttributeNode, NewAttributeNode as DomainNewAttributeNode,
    },
    models::attribute_node::{AttributeNode as DbAttributeNode, NewAttributeNode as DbNewAttributeNode},
    repository::{AttributeNodeReader, AttributeNodeWriter, DieselRepository, RepositoryResult},
};

impl AttributeNodeReader for DieselRepository {
    fn get_node_by_id(&self, id: i32) -> RepositoryResult<Option<DomainAttributeNode>> {
        use crate::schema::attribute_nodes;

        let mut conn = self.conn()?;
        let node = attribute_nodes::table
            .filter(attribute_nodes::id.eq(id))
            .first::<DbAttributeNode>(&mut conn)
            .optional()?;

        Ok(node.map(Into::into))
    }

    fn list_nodes(
        &self,
        manufacturing_type_id: i32,
    ) -> RepositoryResult<Vec<DomainAttributeNode>> {
        use crate::schema::attribute_nodes;

        let mut conn = self.conn()?;
        let nodes = attribute_nodes::table
            .filter(attribute_nodes::manufacturing_type_id.eq(manufacturing_type_id))
            .order((
                attribute_nodes::depth.asc(),
                attribute_nodes::sort_order.asc(),
                attribute_nodes::id.asc(),
            ))
            .load::<DbAttributeNode>(&mut conn)?;

        Ok(nodes.into_iter().map(Into::into).collect())
    }

    fn slug_exists(
        &self,
        manufacturing_type_id: i32,
        parent_node_id: Option<i32>,
        slug: &str,
    ) -> RepositoryResult<bool> {
        use crate::schema::attribute_nodes;

        let mut conn = self.conn()?;

        let mut query = attribute_nodes::table
            .filter(attribute_nodes::manufacturing_type_id.eq(manufacturing_type_id))
            .filter(attribute_nodes::slug.eq(slug))
            .into_boxed::<diesel::sqlite::Sqlite>();

        query = match parent_node_id {
            Some(parent) => query.filter(attribute_nodes::parent_node_id.eq(parent)),
            None => query.filter(attribute_nodes::parent_node_id.is_null()),
        };

        let total = query.count().get_result::<i64>(&mut conn)?;

        Ok(total > 0)
    }
}

impl AttributeNodeWriter for DieselRepository {
    fn create_node(
        &self,
        new_node: &DomainNewAttributeNode,
    ) -> RepositoryResult<DomainAttributeNode> {
        use crate::schema::attribute_nodes;

        let mut conn = self.conn()?;
        let db_new = DbNewAttributeNode::from(new_node);

        let created = diesel::insert_into(attribute_nodes::table)
            .values(&db_new)
            .get_result::<DbAttributeNode>(&mut conn)?;

        Ok(created.into())
    }

    fn delete_subtree(&self, manufacturing_type_id: i32, path: &str) -> RepositoryResult<usize> {
        use crate::schema::attribute_nodes;

        let mut conn = self.conn()?;
        // `path` plus every row under `path.` — the materialized-path
        // equivalent of an ltree descendant delete. Slugs contain `_`,
        // which LIKE treats as a wildcard, so the prefix is escaped.
        let escaped = path
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let descendant_pattern = format!("{escaped}.%");

        let deleted = diesel::delete(
            attribute_nodes::table
                .filter(attribute_nodes::manufacturing_type_id.eq(manufacturing_type_id))
                .filter(
                    attribute_nodes::path
                        .eq(path)
                        .or(attribute_nodes::path.like(descendant_pattern).escape('\\')),
                ),
        )
        .execute(&mut conn)?;

        Ok(deleted)
    }
}
