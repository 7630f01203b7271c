use chrono::{Local, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::quote::{
    NewQuote as DomainNewQuote, Quote as DomainQuote, QuoteStatus,
    UpdateQuote as DomainUpdateQuote,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::quotes)]
pub struct Quote {
    pub id: i32,
    pub customer_id: i32,
    pub configuration_id: i32,
    pub reference: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub total_price_cents: i64,
    pub currency: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quotes)]
pub struct NewQuote<'a> {
    pub customer_id: i32,
    pub configuration_id: i32,
    pub reference: Option<&'a str>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub total_price_cents: i64,
    pub currency: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::quotes)]
pub struct UpdateQuote<'a> {
    pub status: Option<&'a str>,
    pub notes: Option<Option<&'a str>>,
    pub reference: Option<Option<&'a str>>,
    pub updated_at: NaiveDateTime,
}

impl From<Quote> for DomainQuote {
    fn from(value: Quote) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            configuration_id: value.configuration_id,
            reference: value.reference,
            status: QuoteStatus::parse(&value.status).unwrap_or_default(),
            notes: value.notes,
            total_price_cents: value.total_price_cents,
            currency: value.currency,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewQuote> for NewQuote<'a> {
    fn from(value: &'a DomainNewQuote) -> Self {
        Self {
            customer_id: value.customer_id,
            configuration_id: value.configuration_id,
            reference: value.reference.as_deref(),
            status: value.status.as_str(),
            notes: value.notes.as_deref(),
            total_price_cents: value.total_price_cents,
            currency: value.currency.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateQuote> for UpdateQuote<'a> {
    fn from(value: &'a DomainUpdateQuote) -> Self {
        Self {
            status: value.status.map(|status| status.as_str()),
            notes: value.notes.as_ref().map(|inner| inner.as_deref()),
            reference: value.reference.as_ref().map(|inner| inner.as_deref()),
            updated_at: Local::now().naive_utc(),
        }
    }
}
