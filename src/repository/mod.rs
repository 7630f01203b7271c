use crate::db::{DbConnection, DbPool};
use crate::domain::attribute_node::{AttributeNode, NewAttributeNode};
use crate::domain::configuration::{
    Configuration, NewConfiguration, NewConfigurationSelection,
};
use crate::domain::customer::{Customer, CustomerListQuery, NewCustomer, UpdateCustomer};
use crate::domain::manufacturing_type::{
    ManufacturingType, ManufacturingTypeListQuery, NewManufacturingType, UpdateManufacturingType,
};
use crate::domain::quote::{NewQuote, Quote, QuoteListQuery, QuoteStatus, UpdateQuote};
use crate::domain::session::{NewSession, Session};
use crate::domain::user::{NewUser, UpdateUser, User, UserListQuery};

pub mod errors;

mod attribute_node;
mod configuration;
mod customer;
mod manufacturing_type;
mod quote;
mod session;
mod user;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

/// Diesel-backed repository implementation that wraps an r2d2 pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over user accounts.
pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    fn count_users(&self) -> RepositoryResult<usize>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
}

/// Write operations over user accounts.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    fn delete_user(&self, user_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over session rows.
pub trait SessionReader {
    fn get_session_by_token(&self, token: &str) -> RepositoryResult<Option<Session>>;
}

/// Write operations over session rows.
pub trait SessionWriter {
    fn create_session(&self, new_session: &NewSession) -> RepositoryResult<Session>;
    /// Mark the session carrying `token` inactive (logout).
    fn deactivate_session(&self, token: &str) -> RepositoryResult<()>;
    /// Mark every active session of a user inactive; returns the count.
    fn deactivate_user_sessions(&self, user_id: i32) -> RepositoryResult<usize>;
}

/// Read-only operations over manufacturing types.
pub trait ManufacturingTypeReader {
    fn get_manufacturing_type_by_id(
        &self,
        id: i32,
    ) -> RepositoryResult<Option<ManufacturingType>>;
    fn list_manufacturing_types(
        &self,
        query: ManufacturingTypeListQuery,
    ) -> RepositoryResult<(usize, Vec<ManufacturingType>)>;
}

/// Write operations over manufacturing types.
pub trait ManufacturingTypeWriter {
    fn create_manufacturing_type(
        &self,
        new_type: &NewManufacturingType,
    ) -> RepositoryResult<ManufacturingType>;
    fn update_manufacturing_type(
        &self,
        id: i32,
        updates: &UpdateManufacturingType,
    ) -> RepositoryResult<ManufacturingType>;
    fn delete_manufacturing_type(&self, id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over attribute hierarchy nodes.
pub trait AttributeNodeReader {
    fn get_node_by_id(&self, id: i32) -> RepositoryResult<Option<AttributeNode>>;
    /// All nodes of one manufacturing type, ordered by (depth, sort_order, id).
    fn list_nodes(&self, manufacturing_type_id: i32) -> RepositoryResult<Vec<AttributeNode>>;
    fn slug_exists(
        &self,
        manufacturing_type_id: i32,
        parent_node_id: Option<i32>,
        slug: &str,
    ) -> RepositoryResult<bool>;
}

/// Write operations over attribute hierarchy nodes.
pub trait AttributeNodeWriter {
    fn create_node(&self, new_node: &NewAttributeNode) -> RepositoryResult<AttributeNode>;
    /// Delete the node at `path` and every descendant (path prefix match);
    /// returns the number of rows removed.
    fn delete_subtree(&self, manufacturing_type_id: i32, path: &str) -> RepositoryResult<usize>;
}

/// Read-only operations over configurations.
pub trait ConfigurationReader {
    fn get_configuration_by_id(&self, id: i32) -> RepositoryResult<Option<Configuration>>;
}

/// Write operations over configurations.
pub trait ConfigurationWriter {
    /// Insert the configuration row together with its selections.
    fn create_configuration(
        &self,
        new_configuration: &NewConfiguration,
        selections: &[NewConfigurationSelection],
    ) -> RepositoryResult<Configuration>;
    fn delete_configuration(&self, id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over customers.
pub trait CustomerReader {
    fn get_customer_by_id(&self, id: i32) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
}

/// Write operations over customers.
pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn update_customer(
        &self,
        customer_id: i32,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    fn delete_customer(&self, customer_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over quotes.
pub trait QuoteReader {
    fn get_quote_by_id(&self, id: i32) -> RepositoryResult<Option<Quote>>;
    fn list_quotes(&self, query: QuoteListQuery) -> RepositoryResult<(usize, Vec<Quote>)>;
    /// Quote totals grouped by status, for the dashboard.
    fn count_quotes_by_status(&self) -> RepositoryResult<Vec<(QuoteStatus, usize)>>;
}

/// Write operations over quotes.
pub trait QuoteWriter {
    fn create_quote(&self, new_quote: &NewQuote) -> RepositoryResult<Quote>;
    fn update_quote(&self, quote_id: i32, updates: &UpdateQuote) -> RepositoryResult<Quote>;
    fn delete_quote(&self, quote_id: i32) -> RepositoryResult<()>;
}
