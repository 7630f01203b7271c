use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::customer::{Customer, CustomerListQuery};
use crate::forms::customers::{AddCustomerForm, EditCustomerForm, UploadCustomersForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{CustomerReader, CustomerWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the customers index page.
#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render the customers index template.
pub struct CustomersPageData {
    pub customers: Paginated<Customer>,
    pub search: Option<String>,
}

/// Loads the customers overview page.
pub fn load_customers_page<R>(repo: &R, query: CustomersQuery) -> ServiceResult<CustomersPageData>
where
    R: CustomerReader + ?Sized,
{
    let CustomersQuery { search, page } = query;

    let page = page.unwrap_or(1);
    let mut list_query = CustomerListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(search_term) = search.as_ref() {
        list_query = list_query.search(search_term);
    }

    let (total, items) = repo.list_customers(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(CustomersPageData {
        customers: Paginated::new(items, page, total_pages),
        search,
    })
}

/// Creates a new customer record.
pub fn create_customer<R>(repo: &R, form: AddCustomerForm) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let new_customer = form
        .into_new_customer()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    repo.create_customer(&new_customer)
        .map_err(ServiceError::from)
}

/// Applies edits to an existing customer.
pub fn update_customer<R>(repo: &R, form: EditCustomerForm) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let customer_id = form.id;
    let updates = form
        .into_update_customer()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    repo.update_customer(customer_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a customer; only superusers may remove records with history.
pub fn delete_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    customer_id: i32,
) -> ServiceResult<()>
where
    R: CustomerWriter + ?Sized,
{
    if !user.is_superuser {
        return Err(ServiceError::Unauthorized);
    }
    repo.delete_customer(customer_id).map_err(ServiceError::from)
}

/// Imports customers from an uploaded CSV file; returns how many were
/// created.
pub fn import_customers<R>(repo: &R, form: UploadCustomersForm) -> ServiceResult<usize>
where
    R: CustomerWriter + ?Sized,
{
    let customers = form
        .into_new_customers()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let mut created = 0usize;
    for customer in &customers {
        repo.create_customer(customer).map_err(ServiceError::from)?;
        created += 1;
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::{MockCustomerReader, MockCustomerWriter};

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            email: "admin@example.com".to_string(),
            username: "admin".to_string(),
            is_superuser: true,
            token: "token".to_string(),
        }
    }

    #[test]
    fn page_query_applies_search_and_pagination() {
        let mut reader = MockCustomerReader::new();
        reader
            .expect_list_customers()
            .withf(|query| {
                query.search.as_deref() == Some("acme")
                    && query.pagination.as_ref().is_some_and(|p| p.page == 2)
            })
            .returning(|_| Ok((0, Vec::new())));

        let data = load_customers_page(
            &reader,
            CustomersQuery {
                search: Some("acme".to_string()),
                page: Some(2),
            },
        )
        .expect("page loads");
        assert_eq!(data.customers.page, 2);
    }

    #[test]
    fn delete_requires_superuser() {
        let writer = MockCustomerWriter::new();
        let mut user = admin();
        user.is_superuser = false;

        assert!(matches!(
            delete_customer(&writer, &user, 3),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn import_creates_each_row() {
        let mut writer = MockCustomerWriter::new();
        writer
            .expect_create_customer()
            .times(2)
            .returning(|new_customer| {
                let now = chrono::Utc::now().naive_utc();
                Ok(Customer {
                    id: 1,
                    name: new_customer.name.clone(),
                    email: new_customer.email.clone(),
                    phone: None,
                    company: None,
                    notes: None,
                    created_at: now,
                    updated_at: now,
                })
            });

        let csv = "name,email\nAcme,sales@acme.com\nBeta,\n";
        let form = UploadCustomersForm::new(None, csv.into());
        assert_eq!(import_customers(&writer, form).expect("import"), 2);
    }
}
