use chrono::{Local, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::user::{
    NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub full_name: Option<&'a str>,
    pub is_superuser: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser<'a> {
    pub full_name: Option<Option<&'a str>>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<User> for DomainUser {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            email: value.email,
            username: value.username,
            password_hash: value.password_hash,
            full_name: value.full_name,
            is_active: value.is_active,
            is_superuser: value.is_superuser,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(value: &'a DomainNewUser) -> Self {
        Self {
            email: value.email.as_str(),
            username: value.username.as_str(),
            password_hash: value.password_hash.as_str(),
            full_name: value.full_name.as_deref(),
            is_superuser: value.is_superuser,
        }
    }
}

impl<'a> From<&'a DomainUpdateUser> for UpdateUser<'a> {
    fn from(value: &'a DomainUpdateUser) -> Self {
        Self {
            full_name: value
                .full_name
                .as_ref()
                .map(|inner| inner.as_deref()),
            is_active: value.is_active,
            is_superuser: value.is_superuser,
            updated_at: Local::now().naive_utc(),
        }
    }
}
