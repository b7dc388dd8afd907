use sqlx::PgPool;
use uuid::Uuid;

use crate::users::User;

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, bio, \
     photo_url, country, receive_notifications, receive_updates, completed_onboarding, \
     created_at, updated_at";

impl User {
    /// Create a new user with hashed password.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE username = $1
            "#
        ))
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Write the mutable profile columns back and return the fresh row.
    ///
    /// Last write wins; concurrent saves for the same user are resolved by
    /// the database, not coordinated here.
    pub async fn save_profile(&self, db: &PgPool) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = $2,
                last_name = $3,
                bio = $4,
                photo_url = $5,
                country = $6,
                receive_notifications = $7,
                receive_updates = $8,
                completed_onboarding = $9,
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(self.id)
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(&self.bio)
        .bind(&self.photo_url)
        .bind(&self.country)
        .bind(self.receive_notifications)
        .bind(self.receive_updates)
        .bind(self.completed_onboarding)
        .fetch_one(db)
        .await
    }
}
