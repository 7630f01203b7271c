use serde::Serialize;

use crate::domain::manufacturing_type::ManufacturingTypeListQuery;
use crate::domain::customer::CustomerListQuery;
use crate::domain::quote::{Quote, QuoteListQuery, QuoteStatus};
use crate::repository::{CustomerReader, ManufacturingTypeReader, QuoteReader};
use crate::services::{ServiceError, ServiceResult};

const RECENT_QUOTES: usize = 5;

/// Per-status quote counts shown on the dashboard.
#[derive(Debug, Default, Serialize)]
pub struct QuoteCounts {
    pub draft: usize,
    pub sent: usize,
    pub accepted: usize,
    pub ordered: usize,
    pub cancelled: usize,
}

/// Data required to render the dashboard.
pub struct DashboardData {
    pub customer_count: usize,
    pub type_count: usize,
    pub quote_counts: QuoteCounts,
    pub recent_quotes: Vec<Quote>,
}

/// Loads the dashboard statistics.
pub fn load_dashboard<R>(repo: &R) -> ServiceResult<DashboardData>
where
    R: CustomerReader + ManufacturingTypeReader + QuoteReader + ?Sized,
{
    let (customer_count, _) = repo
        .list_customers(CustomerListQuery::new().paginate(1, 1))
        .map_err(ServiceError::from)?;

    let (type_count, _) = repo
        .list_manufacturing_types(ManufacturingTypeListQuery::new().include_inactive())
        .map_err(ServiceError::from)?;

    let mut quote_counts = QuoteCounts::default();
    for (status, count) in repo.count_quotes_by_status().map_err(ServiceError::from)? {
        match status {
            QuoteStatus::Draft => quote_counts.draft = count,
            QuoteStatus::Sent => quote_counts.sent = count,
            QuoteStatus::Accepted => quote_counts.accepted = count,
            QuoteStatus::Ordered => quote_counts.ordered = count,
            QuoteStatus::Cancelled => quote_counts.cancelled = count,
        }
    }

    let (_, recent_quotes) = repo
        .list_quotes(QuoteListQuery::new().paginate(1, RECENT_QUOTES))
        .map_err(ServiceError::from)?;

    Ok(DashboardData {
        customer_count,
        type_count,
        quote_counts,
        recent_quotes,
    })
}
