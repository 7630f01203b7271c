use std::io::{Cursor, Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use csv::{StringRecord, Trim};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::customer::{NewCustomer, UpdateCustomer};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

const NAME_MAX_LEN: u64 = 128;

pub type CustomerFormResult<T> = Result<T, CustomerFormError>;

/// Errors that can occur while processing customer forms.
#[derive(Debug, Error)]
pub enum CustomerFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("customer name cannot be empty")]
    EmptyName,
    #[error("upload is missing the required `name` header")]
    MissingNameHeader,
    #[error("row {row} is missing a customer name")]
    UploadMissingName { row: usize },
    #[error("upload contains no customers")]
    EmptyUpload,
    #[error("failed to read uploaded file")]
    FileRead(#[from] std::io::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Multipart form carrying the customers CSV upload.
#[derive(MultipartForm)]
pub struct UploadCustomersMultipart {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadCustomersMultipart {
    /// Read the temp file back into an in-memory upload payload.
    pub fn into_upload(mut self) -> CustomerFormResult<UploadCustomersForm> {
        let mut bytes = Vec::new();
        self.csv.file.rewind()?;
        self.csv.file.read_to_end(&mut bytes)?;
        Ok(UploadCustomersForm::new(self.csv.file_name, bytes))
    }
}

/// Form payload emitted when submitting the "Add customer" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCustomerForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

impl AddCustomerForm {
    pub fn into_new_customer(self) -> CustomerFormResult<NewCustomer> {
        let form = normalize_optional_email(self);
        form.validate()?;

        let name = sanitize_inline_text(&form.name);
        if name.is_empty() {
            return Err(CustomerFormError::EmptyName);
        }

        let mut new_customer = NewCustomer::new(name);

        if let Some(email) = form.email {
            new_customer = new_customer.with_email(email);
        }
        if let Some(phone) = non_empty_inline(form.phone.as_deref()) {
            new_customer = new_customer.with_phone(phone);
        }
        if let Some(company) = non_empty_inline(form.company.as_deref()) {
            new_customer = new_customer.with_company(company);
        }
        if let Some(notes) = form
            .notes
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            new_customer = new_customer.with_notes(notes);
        }

        Ok(new_customer)
    }
}

/// Form payload emitted when editing a customer. Empty strings clear the
/// corresponding optional field.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCustomerForm {
    pub id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

impl EditCustomerForm {
    pub fn into_update_customer(self) -> CustomerFormResult<UpdateCustomer> {
        self.validate()?;

        let mut updates = UpdateCustomer::new();

        if let Some(name) = self.name {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(CustomerFormError::EmptyName);
            }
            updates = updates.name(sanitized);
        }

        if let Some(email) = self.email {
            updates = updates.email(non_empty_inline(Some(&email)));
        }
        if let Some(phone) = self.phone {
            updates = updates.phone(non_empty_inline(Some(&phone)));
        }
        if let Some(company) = self.company {
            updates = updates.company(non_empty_inline(Some(&company)));
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

/// Multipart-backed upload payload for bulk customer import.
#[derive(Debug)]
pub struct UploadCustomersForm {
    /// Optional filename provided by the client.
    pub file_name: Option<String>,
    /// Raw CSV bytes received from the upload.
    pub bytes: Vec<u8>,
}

impl UploadCustomersForm {
    pub fn new(file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name, bytes }
    }

    /// Parse the uploaded CSV into customer payloads.
    ///
    /// The header row must carry `name`; `email`, `phone`, `company` and
    /// `notes` are optional columns. Errors report the offending row number.
    pub fn into_new_customers(self) -> CustomerFormResult<Vec<NewCustomer>> {
        let UploadCustomersForm { bytes, .. } = self;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(Cursor::new(bytes));

        let headers = reader.headers()?.clone();
        let columns = locate_customer_headers(&headers);
        let Some(name_index) = columns.name_index else {
            return Err(CustomerFormError::MissingNameHeader);
        };

        let mut customers = Vec::new();

        for (index, row) in reader.records().enumerate() {
            let row_number = index + 2; // account for header row
            let record = row?;

            let name = sanitize_inline_text(record.get(name_index).unwrap_or(""));
            if name.is_empty() {
                return Err(CustomerFormError::UploadMissingName { row: row_number });
            }

            let mut customer = NewCustomer::new(name);

            if let Some(email) = column_value(&record, columns.email_index) {
                customer = customer.with_email(email);
            }
            if let Some(phone) = column_value(&record, columns.phone_index) {
                customer = customer.with_phone(phone);
            }
            if let Some(company) = column_value(&record, columns.company_index) {
                customer = customer.with_company(company);
            }
            if let Some(notes) = column_value(&record, columns.notes_index) {
                customer = customer.with_notes(notes);
            }

            customers.push(customer);
        }

        if customers.is_empty() {
            return Err(CustomerFormError::EmptyUpload);
        }

        Ok(customers)
    }
}

struct CustomerHeaderIndexes {
    name_index: Option<usize>,
    email_index: Option<usize>,
    phone_index: Option<usize>,
    company_index: Option<usize>,
    notes_index: Option<usize>,
}

fn locate_customer_headers(headers: &StringRecord) -> CustomerHeaderIndexes {
    CustomerHeaderIndexes {
        name_index: locate_header(headers, "name"),
        email_index: locate_header(headers, "email"),
        phone_index: locate_header(headers, "phone"),
        company_index: locate_header(headers, "company"),
        notes_index: locate_header(headers, "notes"),
    }
}

fn locate_header(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

fn column_value(record: &StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|idx| record.get(idx))
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

fn non_empty_inline(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

// Empty optional email strings must become None before `validate`, which
// rejects Some("") as an invalid address.
fn normalize_optional_email(mut form: AddCustomerForm) -> AddCustomerForm {
    form.email = form
        .email
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    form
}
