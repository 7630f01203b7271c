use mockall::mock;

use super::{
    AttributeNodeReader, AttributeNodeWriter, ConfigurationReader, ConfigurationWriter,
    CustomerReader, CustomerWriter, ManufacturingTypeReader, ManufacturingTypeWriter, QuoteReader,
    QuoteWriter, SessionReader, SessionWriter, UserReader, UserWriter,
};
use crate::domain::{
    attribute_node::{AttributeNode, NewAttributeNode},
    configuration::{Configuration, NewConfiguration, NewConfigurationSelection},
    customer::{Customer, CustomerListQuery, NewCustomer, UpdateCustomer},
    manufacturing_type::{
        ManufacturingType, ManufacturingTypeListQuery, NewManufacturingType,
        UpdateManufacturingType,
    },
    quote::{NewQuote, Quote, QuoteListQuery, QuoteStatus, UpdateQuote},
    session::{NewSession, Session},
    user::{NewUser, UpdateUser, User, UserListQuery},
};
use crate::repository::RepositoryResult;

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
        fn count_users(&self) -> RepositoryResult<usize>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
        fn delete_user(&self, user_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub SessionReader {}

    impl SessionReader for SessionReader {
        fn get_session_by_token(&self, token: &str) -> RepositoryResult<Option<Session>>;
    }
}

mock! {
    pub SessionWriter {}

    impl SessionWriter for SessionWriter {
        fn create_session(&self, new_session: &NewSession) -> RepositoryResult<Session>;
        fn deactivate_session(&self, token: &str) -> RepositoryResult<()>;
        fn deactivate_user_sessions(&self, user_id: i32) -> RepositoryResult<usize>;
    }
}

mock! {
    pub ManufacturingTypeReader {}

    impl ManufacturingTypeReader for ManufacturingTypeReader {
        fn get_manufacturing_type_by_id(&self, id: i32) -> RepositoryResult<Option<ManufacturingType>>;
        fn list_manufacturing_types(&self, query: ManufacturingTypeListQuery) -> RepositoryResult<(usize, Vec<ManufacturingType>)>;
    }
}

mock! {
    pub ManufacturingTypeWriter {}

    impl ManufacturingTypeWriter for ManufacturingTypeWriter {
        fn create_manufacturing_type(&self, new_type: &NewManufacturingType) -> RepositoryResult<ManufacturingType>;
        fn update_manufacturing_type(&self, id: i32, updates: &UpdateManufacturingType) -> RepositoryResult<ManufacturingType>;
        fn delete_manufacturing_type(&self, id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub AttributeNodeReader {}

    impl AttributeNodeReader for AttributeNodeReader {
        fn get_node_by_id(&self, id: i32) -> RepositoryResult<Option<AttributeNode>>;
        fn list_nodes(&self, manufacturing_type_id: i32) -> RepositoryResult<Vec<AttributeNode>>;
        fn slug_exists(&self, manufacturing_type_id: i32, parent_node_id: Option<i32>, slug: &str) -> RepositoryResult<bool>;
    }
}

mock! {
    pub AttributeNodeWriter {}

    impl AttributeNodeWriter for AttributeNodeWriter {
        fn create_node(&self, new_node: &NewAttributeNode) -> RepositoryResult<AttributeNode>;
        fn delete_subtree(&self, manufacturing_type_id: i32, path: &str) -> RepositoryResult<usize>;
    }
}

mock! {
    pub ConfigurationReader {}

    impl ConfigurationReader for ConfigurationReader {
        fn get_configuration_by_id(&self, id: i32) -> RepositoryResult<Option<Configuration>>;
    }
}

mock! {
    pub ConfigurationWriter {}

    impl ConfigurationWriter for ConfigurationWriter {
        fn create_configuration(&self, new_configuration: &NewConfiguration, selections: &[NewConfigurationSelection]) -> RepositoryResult<Configuration>;
        fn delete_configuration(&self, id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CustomerReader {}

    impl CustomerReader for CustomerReader {
        fn get_customer_by_id(&self, id: i32) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    }
}

mock! {
    pub CustomerWriter {}

    impl CustomerWriter for CustomerWriter {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn update_customer(&self, customer_id: i32, updates: &UpdateCustomer) -> RepositoryResult<Customer>;
        fn delete_customer(&self, customer_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub QuoteReader {}

    impl QuoteReader for QuoteReader {
        fn get_quote_by_id(&self, id: i32) -> RepositoryResult<Option<Quote>>;
        fn list_quotes(&self, query: QuoteListQuery) -> RepositoryResult<(usize, Vec<Quote>)>;
        fn count_quotes_by_status(&self) -> RepositoryResult<Vec<(QuoteStatus, usize)>>;
    }
}

mock! {
    pub QuoteWriter {}

    impl QuoteWriter for QuoteWriter {
        fn create_quote(&self, new_quote: &NewQuote) -> RepositoryResult<Quote>;
        fn update_quote(&self, quote_id: i32, updates: &UpdateQuote) -> RepositoryResult<Quote>;
        fn delete_quote(&self, quote_id: i32) -> RepositoryResult<()>;
    }
}
