use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::quote::{QuoteStatus, UpdateQuote};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};
use crate::routes::empty_string_as_none;

const REFERENCE_MAX_LEN: u64 = 64;
const CURRENCY_CODE_LEN: u64 = 3;

pub type QuoteFormResult<T> = Result<T, QuoteFormError>;

/// Errors that can occur while processing quote forms.
#[derive(Debug, Error)]
pub enum QuoteFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("invalid selections payload: {0}")]
    InvalidSelections(String),
    #[error("unknown quote status `{value}`")]
    UnknownStatus { value: String },
    #[error("invalid currency code `{value}`")]
    InvalidCurrency { value: String },
}

/// One submitted selection: a picked option node or a free-text value for an
/// attribute node. Shared by the quote form and the API price preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub attribute_node_id: i32,
    #[serde(default)]
    pub value: Option<String>,
}

/// Form payload emitted when creating a quote from the console.
#[derive(Debug, Deserialize, Validate)]
pub struct AddQuoteForm {
    pub customer_id: i32,
    pub manufacturing_type_id: i32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub name: Option<String>,
    #[validate(length(max = REFERENCE_MAX_LEN))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub reference: Option<String>,
    pub notes: Option<String>,
    #[validate(length(equal = CURRENCY_CODE_LEN))]
    pub currency: String,
    /// JSON array of selection entries.
    pub selections: String,
}

/// The validated payload handed to the quote service.
#[derive(Debug, Clone)]
pub struct QuoteDraft {
    pub customer_id: i32,
    pub manufacturing_type_id: i32,
    pub name: Option<String>,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub currency: String,
    pub selections: Vec<SelectionEntry>,
}

impl AddQuoteForm {
    pub fn into_quote_draft(self) -> QuoteFormResult<QuoteDraft> {
        self.validate()?;

        let currency = self.currency.trim().to_uppercase();
        if currency.len() != CURRENCY_CODE_LEN as usize
            || !currency.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(QuoteFormError::InvalidCurrency {
                value: self.currency.trim().to_string(),
            });
        }

        let selections: Vec<SelectionEntry> = serde_json::from_str(self.selections.trim())
            .map_err(|err| QuoteFormError::InvalidSelections(err.to_string()))?;

        let notes = self
            .notes
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        Ok(QuoteDraft {
            customer_id: self.customer_id,
            manufacturing_type_id: self.manufacturing_type_id,
            name: self.name.as_deref().map(sanitize_inline_text),
            reference: self.reference.as_deref().map(sanitize_inline_text),
            notes,
            currency,
            selections,
        })
    }
}

/// Form payload emitted by the status buttons on the quotes page.
#[derive(Debug, Deserialize)]
pub struct QuoteStatusForm {
    pub id: i32,
    pub status: String,
}

impl QuoteStatusForm {
    pub fn into_parts(self) -> QuoteFormResult<(i32, QuoteStatus)> {
        let status =
            QuoteStatus::parse(self.status.trim()).ok_or_else(|| QuoteFormError::UnknownStatus {
                value: self.status.trim().to_string(),
            })?;
        Ok((self.id, status))
    }
}

/// Form payload emitted when editing a quote's reference or notes. Empty
/// strings clear the corresponding field.
#[derive(Debug, Deserialize, Validate)]
pub struct EditQuoteForm {
    pub id: i32,
    #[validate(length(max = REFERENCE_MAX_LEN))]
    pub reference: Option<String>,
    pub notes: Option<String>,
}

impl EditQuoteForm {
    pub fn into_update_quote(self) -> QuoteFormResult<UpdateQuote> {
        self.validate()?;

        let mut updates = UpdateQuote::new();

        if let Some(reference) = self.reference {
            let sanitized = sanitize_inline_text(&reference);
            if sanitized.is_empty() {
                updates = updates.reference(None::<String>);
            } else {
                updates = updates.reference(Some(sanitized));
            }
        }

        if let Some(notes) = self.notes {
            let sanitized = sanitize_multiline_text(&notes);
            if sanitized.is_empty() {
                updates = updates.notes(None::<String>);
            } else {
                updates = updates.notes(Some(sanitized));
            }
        }

        Ok(updates)
    }
}
