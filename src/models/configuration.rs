use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::configuration::{
    Configuration as DomainConfiguration, ConfigurationSelection as DomainConfigurationSelection,
    NewConfiguration as DomainNewConfiguration,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::configurations)]
pub struct Configuration {
    pub id: i32,
    pub manufacturing_type_id: i32,
    pub name: Option<String>,
    pub total_price_cents: i64,
    pub total_weight_grams: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::configurations)]
pub struct NewConfiguration<'a> {
    pub manufacturing_type_id: i32,
    pub name: Option<&'a str>,
    pub total_price_cents: i64,
    pub total_weight_grams: i64,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::configuration_selections)]
pub struct ConfigurationSelection {
    pub id: i32,
    pub configuration_id: i32,
    pub attribute_node_id: i32,
    pub value: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::configuration_selections)]
pub struct NewConfigurationSelection<'a> {
    pub configuration_id: i32,
    pub attribute_node_id: i32,
    pub value: Option<&'a str>,
}

impl From<Configuration> for DomainConfiguration {
    fn from(value: Configuration) -> Self {
        Self {
            id: value.id,
            manufacturing_type_id: value.manufacturing_type_id,
            name: value.name,
            total_price_cents: value.total_price_cents,
            total_weight_grams: value.total_weight_grams,
            selections: Vec::new(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<ConfigurationSelection> for DomainConfigurationSelection {
    fn from(value: ConfigurationSelection) -> Self {
        Self {
            id: value.id,
            configuration_id: value.configuration_id,
            attribute_node_id: value.attribute_node_id,
            value: value.value,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewConfiguration> for NewConfiguration<'a> {
    fn from(value: &'a DomainNewConfiguration) -> Self {
        Self {
            manufacturing_type_id: value.manufacturing_type_id,
            name: value.name.as_deref(),
            total_price_cents: value.total_price_cents,
            total_weight_grams: value.total_weight_grams,
        }
    }
}
