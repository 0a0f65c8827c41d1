use async_trait::async_trait;
use sqlx::{MySql, Pool};
use uuid::Uuid;

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Resolves a session token to the user it belongs to, `None` when the
    /// token is not recognised.
    async fn verify(&self, token: &str) -> anyhow::Result<Option<Uuid>>;
}

/// Tokens are the `jwt` column of the `users` table.
pub struct MySqlIdentityVerifier {
    db: Pool<MySql>,
}

impl MySqlIdentityVerifier {
    pub fn new(db: Pool<MySql>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityVerifier for MySqlIdentityVerifier {
    async fn verify(&self, token: &str) -> anyhow::Result<Option<Uuid>> {
        const QUERY: &str = "SELECT user_id FROM users WHERE jwt = ?";
        let Ok(token) = Uuid::parse_str(token) else {
            return Ok(None);
        };
        let user_id = sqlx::query_scalar(QUERY)
            .bind(token)
            .fetch_optional(&self.db)
            .await?;
        Ok(user_id)
    }
}
