use chrono::{Duration, Utc};

use crate::auth::{self, Claims};
use crate::config::ServerConfig;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::session::NewSession;
use crate::domain::user::User;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::repository::{SessionReader, SessionWriter, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Everything a successful login hands back to the route layer.
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Request metadata captured on the session row at login.
#[derive(Debug, Default, Clone)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Create a user account.
///
/// The very first account bootstraps a superuser so the console can be set
/// up; after that only superusers may register further accounts.
pub fn register<R>(
    repo: &R,
    requester: Option<&AuthenticatedUser>,
    form: RegisterForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let existing_users = repo.count_users().map_err(ServiceError::from)?;

    if existing_users > 0 && !requester.is_some_and(|user| user.is_superuser) {
        return Err(ServiceError::Unauthorized);
    }

    let password_hash = auth::hash_password(&form.password)?;
    let mut new_user = form
        .into_new_user(password_hash)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if existing_users == 0 {
        new_user = new_user.superuser();
    }

    if repo
        .get_user_by_email(&new_user.email)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Conflict);
    }

    // Usernames are unique too; caught here so the caller can tell the two
    // conflicts apart instead of relying on the database constraint.
    if repo
        .get_user_by_username(&new_user.username)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Form(format!(
            "username `{}` is already taken",
            new_user.username
        )));
    }

    repo.create_user(&new_user).map_err(ServiceError::from)
}

/// Verify credentials, issue a token and record the session row.
pub fn login<R>(
    repo: &R,
    config: &ServerConfig,
    form: LoginForm,
    client: ClientInfo,
) -> ServiceResult<LoginOutcome>
where
    R: UserReader + SessionWriter + ?Sized,
{
    let (email, password) = form
        .into_credentials()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let Some(user) = repo.get_user_by_email(&email).map_err(ServiceError::from)? else {
        return Err(ServiceError::Unauthorized);
    };

    if !user.is_active || !auth::verify_password(&password, &user.password_hash) {
        return Err(ServiceError::Unauthorized);
    }

    let claims = Claims::new(user.id, &user.email, config.session_ttl_minutes);
    let token = auth::issue_token(&claims, &config.secret)?;

    let expires_at = (Utc::now() + Duration::minutes(config.session_ttl_minutes)).naive_utc();
    let mut new_session = NewSession::new(user.id, &token, expires_at);
    if let Some(ip_address) = client.ip_address {
        new_session = new_session.with_ip_address(ip_address);
    }
    if let Some(user_agent) = client.user_agent {
        new_session = new_session.with_user_agent(user_agent);
    }

    repo.create_session(&new_session).map_err(ServiceError::from)?;

    Ok(LoginOutcome { token, user })
}

/// Deactivate the session row backing the presented token. The token itself
/// stays structurally valid until expiry, so the row is what ends access.
pub fn logout<R>(repo: &R, token: &str) -> ServiceResult<()>
where
    R: SessionWriter + ?Sized,
{
    repo.deactivate_session(token).map_err(ServiceError::from)
}

/// Resolve a presented token into an authenticated user.
///
/// Both checks must pass: the token decodes under the server secret and the
/// matching session row is still active and unexpired. The user must also
/// still be active.
pub fn authenticate<R>(repo: &R, secret: &str, token: &str) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader + SessionReader + ?Sized,
{
    let claims = auth::decode_token(token, secret)?;

    let Some(session) = repo
        .get_session_by_token(token)
        .map_err(ServiceError::from)?
    else {
        return Err(ServiceError::Unauthorized);
    };

    if session.user_id != claims.sub || !session.is_valid_at(Utc::now().naive_utc()) {
        return Err(ServiceError::Unauthorized);
    }

    let Some(user) = repo
        .get_user_by_id(claims.sub)
        .map_err(ServiceError::from)?
    else {
        return Err(ServiceError::Unauthorized);
    };

    if !user.is_active {
        return Err(ServiceError::Unauthorized);
    }

    Ok(AuthenticatedUser {
        user_id: user.id,
        email: user.email,
        username: user.username,
        is_superuser: user.is_superuser,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::session::Session;
    use crate::repository::mock::{MockSessionReader, MockUserReader};
    use crate::repository::{SessionReader, UserReader};

    struct AuthRepo {
        users: MockUserReader,
        sessions: MockSessionReader,
    }

    impl UserReader for AuthRepo {
        fn get_user_by_id(&self, id: i32) -> crate::repository::RepositoryResult<Option<User>> {
            self.users.get_user_by_id(id)
        }
        fn get_user_by_email(
            &self,
            email: &str,
        ) -> crate::repository::RepositoryResult<Option<User>> {
            self.users.get_user_by_email(email)
        }
        fn get_user_by_username(
            &self,
            username: &str,
        ) -> crate::repository::RepositoryResult<Option<User>> {
            self.users.get_user_by_username(username)
        }
        fn count_users(&self) -> crate::repository::RepositoryResult<usize> {
            self.users.count_users()
        }
        fn list_users(
            &self,
            query: crate::domain::user::UserListQuery,
        ) -> crate::repository::RepositoryResult<(usize, Vec<User>)> {
            self.users.list_users(query)
        }
    }

    impl SessionReader for AuthRepo {
        fn get_session_by_token(
            &self,
            token: &str,
        ) -> crate::repository::RepositoryResult<Option<Session>> {
            self.sessions.get_session_by_token(token)
        }
    }

    fn sample_user(id: i32, is_active: bool) -> User {
        let now = Utc::now().naive_utc();
        User {
            id,
            email: "admin@example.com".to_string(),
            username: "admin".to_string(),
            password_hash: "hash".to_string(),
            full_name: None,
            is_active,
            is_superuser: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_session(user_id: i32, token: &str, is_active: bool) -> Session {
        let now = Utc::now().naive_utc();
        Session {
            id: 1,
            user_id,
            token: token.to_string(),
            ip_address: None,
            user_agent: None,
            is_active,
            expires_at: now + Duration::minutes(30),
            created_at: now,
        }
    }

    fn issued_token(user_id: i32, secret: &str) -> String {
        let claims = Claims::new(user_id, "admin@example.com", 30);
        auth::issue_token(&claims, secret).expect("issue token")
    }

    #[test]
    fn authenticate_accepts_valid_token_with_active_session() {
        let secret = "secret";
        let token = issued_token(7, secret);

        let mut users = MockUserReader::new();
        users
            .expect_get_user_by_id()
            .with(eq(7))
            .returning(|id| Ok(Some(sample_user(id, true))));

        let mut sessions = MockSessionReader::new();
        let session_token = token.clone();
        sessions
            .expect_get_session_by_token()
            .returning(move |_| Ok(Some(sample_session(7, &session_token, true))));

        let repo = AuthRepo { users, sessions };
        let user = authenticate(&repo, secret, &token).expect("authenticated");
        assert_eq!(user.user_id, 7);
        assert!(user.is_superuser);
        assert_eq!(user.token, token);
    }

    #[test]
    fn authenticate_rejects_deactivated_session() {
        let secret = "secret";
        let token = issued_token(7, secret);

        let users = MockUserReader::new();
        let mut sessions = MockSessionReader::new();
        let session_token = token.clone();
        sessions
            .expect_get_session_by_token()
            .returning(move |_| Ok(Some(sample_session(7, &session_token, false))));

        let repo = AuthRepo { users, sessions };
        assert!(matches!(
            authenticate(&repo, secret, &token),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn authenticate_rejects_valid_token_without_session_row() {
        let secret = "secret";
        let token = issued_token(7, secret);

        let users = MockUserReader::new();
        let mut sessions = MockSessionReader::new();
        sessions
            .expect_get_session_by_token()
            .returning(|_| Ok(None));

        let repo = AuthRepo { users, sessions };
        assert!(matches!(
            authenticate(&repo, secret, &token),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn authenticate_rejects_inactive_user() {
        let secret = "secret";
        let token = issued_token(7, secret);

        let mut users = MockUserReader::new();
        users
            .expect_get_user_by_id()
            .returning(|id| Ok(Some(sample_user(id, false))));

        let mut sessions = MockSessionReader::new();
        let session_token = token.clone();
        sessions
            .expect_get_session_by_token()
            .returning(move |_| Ok(Some(sample_session(7, &session_token, true))));

        let repo = AuthRepo { users, sessions };
        assert!(matches!(
            authenticate(&repo, secret, &token),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn authenticate_rejects_tampered_token() {
        let token = issued_token(7, "other-secret");

        let users = MockUserReader::new();
        let sessions = MockSessionReader::new();

        let repo = AuthRepo { users, sessions };
        assert!(matches!(
            authenticate(&repo, "secret", &token),
            Err(ServiceError::Auth(_))
        ));
    }
}
