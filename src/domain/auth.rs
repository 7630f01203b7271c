use serde::{Deserialize, Serialize};

/// The user context attached to a request once the token and its session row
/// have both been verified. Handlers receive it via the actix extractor in
/// [`crate::auth`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
    pub username: String,
    pub is_superuser: bool,
    /// The raw token the request presented, kept for logout.
    #[serde(skip_serializing)]
    pub token: String,
}
