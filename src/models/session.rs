use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::session::{NewSession as DomainNewSession, Session as DomainSession};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct Session {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub is_active: bool,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: i32,
    pub token: &'a str,
    pub ip_address: Option<&'a str>,
    pub user_agent: Option<&'a str>,
    pub expires_at: NaiveDateTime,
}

impl From<Session> for DomainSession {
    fn from(value: Session) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            token: value.token,
            ip_address: value.ip_address,
            user_agent: value.user_agent,
            is_active: value.is_active,
            expires_at: value.expires_at,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewSession> for NewSession<'a> {
    fn from(value: &'a DomainNewSession) -> Self {
        Self {
            user_id: value.user_id,
            token: value.token.as_str(),
            ip_address: value.ip_address.as_deref(),
            user_agent: value.user_agent.as_deref(),
            expires_at: value.expires_at,
        }
    }
}
