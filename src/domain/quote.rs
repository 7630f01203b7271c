use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Lifecycle states for a quote. The order stage is folded into the quote as
/// the `ordered` status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Ordered,
    Cancelled,
}

impl Default for QuoteStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Ordered => "ordered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "accepted" => Some(Self::Accepted),
            "ordered" => Some(Self::Ordered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// Forward path is draft → sent → accepted → ordered; cancellation is
    /// allowed from any state that has not been ordered yet.
    pub fn can_transition(&self, next: QuoteStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Sent)
                | (Self::Sent, Self::Accepted)
                | (Self::Accepted, Self::Ordered)
                | (Self::Draft, Self::Cancelled)
                | (Self::Sent, Self::Cancelled)
                | (Self::Accepted, Self::Cancelled)
        )
    }
}

/// Domain representation of a quote issued to a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: i32,
    pub customer_id: i32,
    pub configuration_id: i32,
    /// External human-friendly reference.
    pub reference: Option<String>,
    pub status: QuoteStatus,
    pub notes: Option<String>,
    /// Total copied from the priced configuration at creation time.
    pub total_price_cents: i64,
    /// ISO 4217 currency code used for the total.
    pub currency: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new quote.
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub customer_id: i32,
    pub configuration_id: i32,
    pub reference: Option<String>,
    pub status: QuoteStatus,
    pub notes: Option<String>,
    pub total_price_cents: i64,
    pub currency: String,
}

impl NewQuote {
    pub fn new(
        customer_id: i32,
        configuration_id: i32,
        total_price_cents: i64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            customer_id,
            configuration_id,
            reference: None,
            status: QuoteStatus::default(),
            notes: None,
            total_price_cents,
            currency: currency.into(),
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Patch data applied when updating an existing quote.
#[derive(Debug, Clone, Default)]
pub struct UpdateQuote {
    pub status: Option<QuoteStatus>,
    pub notes: Option<Option<String>>,
    pub reference: Option<Option<String>>,
}

impl UpdateQuote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: QuoteStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn notes(mut self, notes: Option<impl Into<String>>) -> Self {
        self.notes = Some(notes.map(Into::into));
        self
    }

    pub fn reference(mut self, reference: Option<impl Into<String>>) -> Self {
        self.reference = Some(reference.map(Into::into));
        self
    }
}

/// Query definition used to list quotes.
#[derive(Debug, Clone, Default)]
pub struct QuoteListQuery {
    /// Optional status filter.
    pub status: Option<QuoteStatus>,
    /// Optional search applied to the reference.
    pub search: Option<String>,
    /// Optional customer filter.
    pub customer_id: Option<i32>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl QuoteListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: QuoteStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn customer(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
