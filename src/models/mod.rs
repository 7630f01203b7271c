pub mod attribute_node;
pub mod configuration;
pub mod customer;
pub mod manufacturing_type;
pub mod quote;
pub mod session;
pub mod user;
