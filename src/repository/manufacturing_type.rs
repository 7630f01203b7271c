use diesel::prelude::*;

use crate::{
    domain::manufacturing_type::{
        ManufacturingType as DomainManufacturingType, ManufacturingTypeListQuery,
        NewManufacturingType as DomainNewManufacturingType,
        UpdateManufacturingType as DomainUpdateManufacturingType,
    },
    models::manufacturing_type::{
        ManufacturingType as DbManufacturingType, NewManufacturingType as DbNewManufacturingType,
        UpdateManufacturingType as DbUpdateManufacturingType,
    },
    repository::{
        DieselRepository, ManufacturingTypeReader, ManufacturingTypeWriter, RepositoryError,
        RepositoryResult,
    },
};

impl ManufacturingTypeReader for DieselRepository {
    fn get_manufacturing_type_by_id(
        &self,
        id: i32,
    ) -> RepositoryResult<Option<DomainManufacturingType>> {
        use crate::schema::manufacturing_types;

        let mut conn = self.conn()?;
        let manufacturing_type = manufacturing_types::table
            .filter(manufacturing_types::id.eq(id))
            .first::<DbManufacturingType>(&mut conn)
            .optional()?;

        Ok(manufacturing_type.map(Into::into))
    }

    fn list_manufacturing_types(
        &self,
        query: ManufacturingTypeListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainManufacturingType>)> {
        use crate::schema::manufacturing_types;

        let mut conn = self.conn()?;

        let mut count_query = manufacturing_types::table.into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            count_query = count_query.filter(manufacturing_types::is_active.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                manufacturing_types::name
                    .like(pattern.clone())
                    .or(manufacturing_types::description.like(pattern)),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = manufacturing_types::table.into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            items = items.filter(manufacturing_types::is_active.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                manufacturing_types::name
                    .like(pattern.clone())
                    .or(manufacturing_types::description.like(pattern)),
            );
        }

        items = items.order((
            manufacturing_types::is_active.desc(),
            manufacturing_types::name.asc(),
        ));

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_types = items.load::<DbManufacturingType>(&mut conn)?;

        Ok((total, db_types.into_iter().map(Into::into).collect()))
    }
}

impl ManufacturingTypeWriter for DieselRepository {
    fn create_manufacturing_type(
        &self,
        new_type: &DomainNewManufacturingType,
    ) -> RepositoryResult<DomainManufacturingType> {
        use crate::schema::manufacturing_types;

        let mut conn = self.conn()?;
        let db_new = DbNewManufacturingType::from(new_type);

        let created = diesel::insert_into(manufacturing_types::table)
            .values(&db_new)
            .get_result::<DbManufacturingType>(&mut conn)?;

        Ok(created.into())
    }

    fn update_manufacturing_type(
        &self,
        id: i32,
        updates: &DomainUpdateManufacturingType,
    ) -> RepositoryResult<DomainManufacturingType> {
        use crate::schema::manufacturing_types;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateManufacturingType::from(updates);

        let updated = diesel::update(
            manufacturing_types::table.filter(manufacturing_types::id.eq(id)),
        )
        .set(&db_updates)
        .get_result::<DbManufacturingType>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_manufacturing_type(&self, id: i32) -> RepositoryResult<()> {
        use crate::schema::manufacturing_types;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            manufacturing_types::table.filter(manufacturing_types::id.eq(id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
