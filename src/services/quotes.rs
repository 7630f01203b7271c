use serde::Deserialize;

use crate::domain::quote::{NewQuote, Quote, QuoteListQuery, QuoteStatus, UpdateQuote};
use crate::forms::quotes::{AddQuoteForm, EditQuoteForm, QuoteStatusForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    AttributeNodeReader, ConfigurationWriter, CustomerReader, ManufacturingTypeReader,
    QuoteReader, QuoteWriter,
};
use crate::services::configurations;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the quotes index page and the API list.
#[derive(Debug, Default, Deserialize)]
pub struct QuotesQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub customer_id: Option<i32>,
    pub page: Option<usize>,
}

/// Data required to render the quotes index template.
pub struct QuotesPageData {
    pub quotes: Paginated<Quote>,
    pub search: Option<String>,
    pub status: Option<QuoteStatus>,
}

/// Loads the quotes overview.
pub fn load_quotes_page<R>(repo: &R, query: QuotesQuery) -> ServiceResult<QuotesPageData>
where
    R: QuoteReader + ?Sized,
{
    let QuotesQuery {
        search,
        status,
        customer_id,
        page,
    } = query;

    let status = status
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            QuoteStatus::parse(value)
                .ok_or_else(|| ServiceError::Form(format!("unknown quote status `{value}`")))
        })
        .transpose()?;

    let page = page.unwrap_or(1);
    let mut list_query = QuoteListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(search_term) = search.as_ref() {
        list_query = list_query.search(search_term);
    }
    if let Some(status) = status {
        list_query = list_query.status(status);
    }
    if let Some(customer_id) = customer_id {
        list_query = list_query.customer(customer_id);
    }

    let (total, items) = repo.list_quotes(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(QuotesPageData {
        quotes: Paginated::new(items, page, total_pages),
        search,
        status,
    })
}

/// Create a quote from a customer and a set of selections.
///
/// The selections are validated and priced into a fresh configuration; the
/// quote starts as a draft carrying the configuration's total. If the quote
/// insert fails the configuration is rolled back so no orphan rows remain.
pub fn create_quote<R>(repo: &R, form: AddQuoteForm) -> ServiceResult<Quote>
where
    R: AttributeNodeReader
        + ManufacturingTypeReader
        + ConfigurationWriter
        + CustomerReader
        + QuoteWriter
        + ?Sized,
{
    let draft = form
        .into_quote_draft()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_customer_by_id(draft.customer_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let configuration = configurations::create_configuration(
        repo,
        draft.manufacturing_type_id,
        draft.name,
        &draft.selections,
    )?;

    let mut new_quote = NewQuote::new(
        draft.customer_id,
        configuration.id,
        configuration.total_price_cents,
        draft.currency,
    );
    if let Some(reference) = draft.reference {
        new_quote = new_quote.with_reference(reference);
    }
    if let Some(notes) = draft.notes {
        new_quote = new_quote.with_notes(notes);
    }

    match repo.create_quote(&new_quote) {
        Ok(quote) => Ok(quote),
        Err(err) => {
            log::error!(
                "Failed to create quote for configuration {}: {err}",
                configuration.id
            );
            if let Err(delete_err) = repo.delete_configuration(configuration.id) {
                log::error!(
                    "Failed to roll back configuration {} after quote error: {delete_err}",
                    configuration.id
                );
            }
            Err(ServiceError::from(err))
        }
    }
}

/// Move a quote through its lifecycle, rejecting illegal transitions.
pub fn change_status<R>(repo: &R, form: QuoteStatusForm) -> ServiceResult<Quote>
where
    R: QuoteReader + QuoteWriter + ?Sized,
{
    let (quote_id, next) = form
        .into_parts()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let Some(quote) = repo.get_quote_by_id(quote_id).map_err(ServiceError::from)? else {
        return Err(ServiceError::NotFound);
    };

    if !quote.status.can_transition(next) {
        return Err(ServiceError::Form(format!(
            "quote cannot move from {} to {}",
            quote.status.as_str(),
            next.as_str()
        )));
    }

    repo.update_quote(quote_id, &UpdateQuote::new().status(next))
        .map_err(ServiceError::from)
}

/// Update a quote's reference or notes.
pub fn update_quote<R>(repo: &R, form: EditQuoteForm) -> ServiceResult<Quote>
where
    R: QuoteWriter + ?Sized,
{
    let quote_id = form.id;
    let updates = form
        .into_update_quote()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    repo.update_quote(quote_id, &updates)
        .map_err(ServiceError::from)
}

/// Delete a quote and its configuration.
pub fn remove_quote<R>(repo: &R, quote_id: i32) -> ServiceResult<()>
where
    R: QuoteReader + QuoteWriter + ConfigurationWriter + ?Sized,
{
    let Some(quote) = repo.get_quote_by_id(quote_id).map_err(ServiceError::from)? else {
        return Err(ServiceError::NotFound);
    };

    repo.delete_quote(quote_id).map_err(ServiceError::from)?;
    repo.delete_configuration(quote.configuration_id)
        .map_err(ServiceError::from)
}
