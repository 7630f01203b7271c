pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Cookie used by the admin console to carry the access token.
pub const AUTH_COOKIE: &str = "auth_token";
