use diesel::prelude::*;

use crate::{
    domain::session::{NewSession as DomainNewSession, Session as DomainSession},
    models::session::{NewSession as DbNewSession, Session as DbSession},
    repository::{
        DieselRepository, RepositoryError, RepositoryResult, SessionReader, SessionWriter,
    },
};

impl SessionReader for DieselRepository {
    fn get_session_by_token(&self, token: &str) -> RepositoryResult<Option<DomainSession>> {
        use crate::schema::sessions;

        let mut conn = self.conn()?;
        let session = sessions::table
            .filter(sessions::token.eq(token))
            .first::<DbSession>(&mut conn)
            .optional()?;

        Ok(session.map(Into::into))
    }
}

impl SessionWriter for DieselRepository {
    fn create_session(&self, new_session: &DomainNewSession) -> RepositoryResult<DomainSession> {
        use crate::schema::sessions;

        let mut conn = self.conn()?;
        let db_new = DbNewSession::from(new_session);

        let created = diesel::insert_into(sessions::table)
            .values(&db_new)
            .get_result::<DbSession>(&mut conn)?;

        Ok(created.into())
    }

    fn deactivate_session(&self, token: &str) -> RepositoryResult<()> {
        use crate::schema::sessions;

        let mut conn = self.conn()?;
        let updated = diesel::update(sessions::table.filter(sessions::token.eq(token)))
            .set(sessions::is_active.eq(false))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn deactivate_user_sessions(&self, user_id: i32) -> RepositoryResult<usize> {
        use crate::schema::sessions;

        let mut conn = self.conn()?;
        let updated = diesel::update(
            sessions::table
                .filter(sessions::user_id.eq(user_id))
                .filter(sessions::is_active.eq(true)),
        )
        .set(sessions::is_active.eq(false))
        .execute(&mut conn)?;

        Ok(updated)
    }
}
