use diesel::prelude::*;

use crate::{
    domain::configuration::{
        Configuration as DomainConfiguration, NewConfiguration as DomainNewConfiguration,
        NewConfigurationSelection as DomainNewSelection,
    },
    models::configuration::{
        Configuration as DbConfiguration, ConfigurationSelection as DbSelection,
        NewConfiguration as DbNewConfiguration, NewConfigurationSelection as DbNewSelection,
    },
    repository::{
        ConfigurationReader, ConfigurationWriter, DieselRepository, RepositoryError,
        RepositoryResult,
    },
};

impl ConfigurationReader for DieselRepository {
    fn get_configuration_by_id(&self, id: i32) -> RepositoryResult<Option<DomainConfiguration>> {
        use crate::schema::{configuration_selections, configurations};

        let mut conn = self.conn()?;
        let configuration = configurations::table
            .filter(configurations::id.eq(id))
            .first::<DbConfiguration>(&mut conn)
            .optional()?;

        let Some(db_configuration) = configuration else {
            return Ok(None);
        };

        let selections = configuration_selections::table
            .filter(configuration_selections::configuration_id.eq(id))
            .order(configuration_selections::id.asc())
            .load::<DbSelection>(&mut conn)?;

        let mut domain: DomainConfiguration = db_configuration.into();
        domain.selections = selections.into_iter().map(Into::into).collect();

        Ok(Some(domain))
    }
}

impl ConfigurationWriter for DieselRepository {
    fn create_configuration(
        &self,
        new_configuration: &DomainNewConfiguration,
        selections: &[DomainNewSelection],
    ) -> RepositoryResult<DomainConfiguration> {
        use crate::schema::{configuration_selections, configurations};

        let mut conn = self.conn()?;

        let created = conn.transaction::<DbConfiguration, diesel::result::Error, _>(|conn| {
            let db_new = DbNewConfiguration::from(new_configuration);
            let configuration = diesel::insert_into(configurations::table)
                .values(&db_new)
                .get_result::<DbConfiguration>(conn)?;

            let rows: Vec<DbNewSelection> = selections
                .iter()
                .map(|selection| DbNewSelection {
                    configuration_id: configuration.id,
                    attribute_node_id: selection.attribute_node_id,
                    value: selection.value.as_deref(),
                })
                .collect();

            if !rows.is_empty() {
                diesel::insert_into(configuration_selections::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            Ok(configuration)
        })?;

        self.get_configuration_by_id(created.id)?
            .ok_or(RepositoryError::NotFound)
    }

    fn delete_configuration(&self, id: i32) -> RepositoryResult<()> {
        use crate::schema::configurations;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(configurations::table.filter(configurations::id.eq(id)))
            .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
