use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::{
    domain::quote::{
        NewQuote as DomainNewQuote, Quote as DomainQuote, QuoteListQuery, QuoteStatus,
        UpdateQuote as DomainUpdateQuote,
    },
    models::quote::{NewQuote as DbNewQuote, Quote as DbQuote, UpdateQuote as DbUpdateQuote},
    repository::{DieselRepository, QuoteReader, QuoteWriter, RepositoryError, RepositoryResult},
};

impl QuoteReader for DieselRepository {
    fn get_quote_by_id(&self, id: i32) -> RepositoryResult<Option<DomainQuote>> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let quote = quotes::table
            .filter(quotes::id.eq(id))
            .first::<DbQuote>(&mut conn)
            .optional()?;

        Ok(quote.map(Into::into))
    }

    fn list_quotes(&self, query: QuoteListQuery) -> RepositoryResult<(usize, Vec<DomainQuote>)> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;

        let mut count_query = quotes::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = query.status {
            count_query = count_query.filter(quotes::status.eq(status.as_str()));
        }

        if let Some(customer_id) = query.customer_id {
            count_query = count_query.filter(quotes::customer_id.eq(customer_id));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(quotes::reference.like(pattern));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = quotes::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = query.status {
            items = items.filter(quotes::status.eq(status.as_str()));
        }

        if let Some(customer_id) = query.customer_id {
            items = items.filter(quotes::customer_id.eq(customer_id));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(quotes::reference.like(pattern));
        }

        items = items.order(quotes::created_at.desc());

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_quotes = items.load::<DbQuote>(&mut conn)?;

        Ok((total, db_quotes.into_iter().map(Into::into).collect()))
    }

    fn count_quotes_by_status(&self) -> RepositoryResult<Vec<(QuoteStatus, usize)>> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let rows = quotes::table
            .group_by(quotes::status)
            .select((quotes::status, count_star()))
            .load::<(String, i64)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .filter_map(|(status, total)| {
                QuoteStatus::parse(&status).map(|status| (status, total as usize))
            })
            .collect())
    }
}

impl QuoteWriter for DieselRepository {
    fn create_quote(&self, new_quote: &DomainNewQuote) -> RepositoryResult<DomainQuote> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let db_new = DbNewQuote::from(new_quote);

        let created = diesel::insert_into(quotes::table)
            .values(&db_new)
            .get_result::<DbQuote>(&mut conn)?;

        Ok(created.into())
    }

    fn update_quote(
        &self,
        quote_id: i32,
        updates: &DomainUpdateQuote,
    ) -> RepositoryResult<DomainQuote> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateQuote::from(updates);

        let updated = diesel::update(quotes::table.filter(quotes::id.eq(quote_id)))
            .set(&db_updates)
            .get_result::<DbQuote>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_quote(&self, quote_id: i32) -> RepositoryResult<()> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(quotes::table.filter(quotes::id.eq(quote_id)))
            .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
