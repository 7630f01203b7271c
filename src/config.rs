/// Server-wide settings shared with handlers via `web::Data`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Secret used to sign and verify access tokens.
    pub secret: String,
    /// Lifetime of issued tokens and their session rows, in minutes.
    pub session_ttl_minutes: i64,
}

impl ServerConfig {
    pub fn new(secret: impl Into<String>, session_ttl_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            session_ttl_minutes,
        }
    }
}
