use chrono::{Local, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::manufacturing_type::{
    ManufacturingType as DomainManufacturingType,
    NewManufacturingType as DomainNewManufacturingType,
    UpdateManufacturingType as DomainUpdateManufacturingType,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::manufacturing_types)]
pub struct ManufacturingType {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub base_category: String,
    pub base_price_cents: i64,
    pub base_weight_grams: i64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::manufacturing_types)]
pub struct NewManufacturingType<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub base_category: &'a str,
    pub base_price_cents: i64,
    pub base_weight_grams: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::manufacturing_types)]
pub struct UpdateManufacturingType<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub base_category: Option<&'a str>,
    pub base_price_cents: Option<i64>,
    pub base_weight_grams: Option<i64>,
    pub is_active: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<ManufacturingType> for DomainManufacturingType {
    fn from(value: ManufacturingType) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            base_category: value.base_category,
            base_price_cents: value.base_price_cents,
            base_weight_grams: value.base_weight_grams,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewManufacturingType> for NewManufacturingType<'a> {
    fn from(value: &'a DomainNewManufacturingType) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_deref(),
            base_category: value.base_category.as_str(),
            base_price_cents: value.base_price_cents,
            base_weight_grams: value.base_weight_grams,
        }
    }
}

impl<'a> From<&'a DomainUpdateManufacturingType> for UpdateManufacturingType<'a> {
    fn from(value: &'a DomainUpdateManufacturingType) -> Self {
        Self {
            name: value.name.as_deref(),
            description: value.description.as_ref().map(|inner| inner.as_deref()),
            base_category: value.base_category.as_deref(),
            base_price_cents: value.base_price_cents,
            base_weight_grams: value.base_weight_grams,
            is_active: value.is_active,
            updated_at: Local::now().naive_utc(),
        }
    }
}
