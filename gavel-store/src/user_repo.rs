use async_trait::async_trait;
use gavel_core::{BoxError, User, UserRepository};
use sqlx::PgPool;
use uuid::Uuid;

pub struct StoreUserRepository {
    pool: PgPool,
}

impl StoreUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    has_valid_payment_method: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            has_valid_payment_method: row.has_valid_payment_method,
        }
    }
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, BoxError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, has_valid_payment_method FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }
}
