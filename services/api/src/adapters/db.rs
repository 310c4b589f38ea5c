//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete
//! implementation of the `ProfileStore` port from the `linkfolio_core` crate.
//! It handles all interactions with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use linkfolio_core::domain::{
    AnalyticsEvent, AuthIdentity, NewLink, Profile, SocialLink, UserCredentials,
};
use linkfolio_core::ports::{CoreError, CoreResult, ProfileStore};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `ProfileStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Maps driver errors onto the core taxonomy. Unique violations become
/// `DuplicateField` so inserts racing past the conflict probe still report
/// the colliding field; a stalled pool acquisition becomes `Timeout`.
fn map_sqlx(e: sqlx::Error) -> CoreError {
    match &e {
        sqlx::Error::PoolTimedOut => CoreError::Timeout,
        sqlx::Error::Database(db) => match db.constraint() {
            Some("users_username_key") => CoreError::DuplicateField("username".to_string()),
            Some("users_email_key") => CoreError::DuplicateField("email".to_string()),
            _ => CoreError::Storage(e.to_string()),
        },
        _ => CoreError::Storage(e.to_string()),
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct IdentityRecord {
    id: Uuid,
    email: String,
}
impl IdentityRecord {
    fn to_domain(self) -> AuthIdentity {
        AuthIdentity {
            user_id: self.id,
            email: self.email,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRecord {
    id: Uuid,
    username: String,
    email: String,
    password_hash: Option<String>,
}
impl CredentialsRecord {
    fn to_domain(self) -> UserCredentials {
        UserCredentials {
            user_id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

#[derive(FromRow)]
struct ProfileRecord {
    id: Uuid,
    username: String,
    full_name: Option<String>,
    bio: Option<String>,
    industry: Option<String>,
    theme_preference: Option<String>,
}

#[derive(FromRow)]
struct LinkRecord {
    platform: String,
    url: String,
    button_text: Option<String>,
}
impl LinkRecord {
    fn to_domain(self) -> SocialLink {
        SocialLink {
            platform: self.platform,
            url: self.url,
            button_text: self.button_text,
        }
    }
}

//=========================================================================================
// `ProfileStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ProfileStore for DbAdapter {
    async fn find_conflict(&self, username: &str, email: &str) -> CoreResult<Option<String>> {
        // One probe for both fields; the ORDER BY makes a row matching the
        // username win when separate rows collide on each field.
        let found = sqlx::query_scalar::<_, String>(
            "SELECT username FROM users \
             WHERE username = $1 OR email = $2 \
             ORDER BY (username = $1) DESC LIMIT 1",
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(found.map(|existing| {
            if existing == username {
                "username".to_string()
            } else {
                "email".to_string()
            }
        }))
    }

    async fn create_user(&self, username: &str, email: &str) -> CoreResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, username, email) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(username)
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(id)
    }

    async fn store_auth_token(&self, user_id: Uuid, token: &str) -> CoreResult<()> {
        let result = sqlx::query("UPDATE users SET auth_token = $1 WHERE id = $2")
            .bind(token)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }

    async fn identity_by_token(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> CoreResult<Option<AuthIdentity>> {
        let record = sqlx::query_as::<_, IdentityRecord>(
            "SELECT id, email FROM users WHERE id = $1 AND auth_token = $2",
        )
        .bind(user_id)
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(record.map(IdentityRecord::to_domain))
    }

    async fn credentials_by_email(&self, email: &str) -> CoreResult<Option<UserCredentials>> {
        let record = sqlx::query_as::<_, CredentialsRecord>(
            "SELECT id, username, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(record.map(CredentialsRecord::to_domain))
    }

    async fn set_password_hash(&self, user_id: Uuid, password_hash: &str) -> CoreResult<()> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }

    async fn set_industry(&self, user_id: Uuid, industry: &str) -> CoreResult<()> {
        let result = sqlx::query("UPDATE users SET industry = $1 WHERE id = $2")
            .bind(industry)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }

    async fn set_profile_info(&self, user_id: Uuid, full_name: &str, bio: &str) -> CoreResult<()> {
        let result = sqlx::query("UPDATE users SET full_name = $1, bio = $2 WHERE id = $3")
            .bind(full_name)
            .bind(bio)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }

    async fn set_theme(&self, user_id: Uuid, theme: &str) -> CoreResult<()> {
        let result = sqlx::query("UPDATE users SET theme_preference = $1 WHERE id = $2")
            .bind(theme)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }

    async fn mark_onboarding_complete(&self, user_id: Uuid) -> CoreResult<()> {
        // COALESCE keeps the first completion time on repeat calls.
        let result = sqlx::query(
            "UPDATE users SET onboarding_completed = TRUE, \
             onboarding_completed_at = COALESCE(onboarding_completed_at, NOW()) \
             WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }

    async fn replace_links(&self, user_id: Uuid, links: &[NewLink]) -> CoreResult<()> {
        // Delete and reinsert under one transaction so a concurrent profile
        // read sees either the old set or the new one, never a mix. The
        // transaction rolls back on drop if any statement fails.
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sqlx::query("DELETE FROM social_links WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        for link in links {
            sqlx::query(
                "INSERT INTO social_links (user_id, platform, url, button_text) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(user_id)
            .bind(&link.platform)
            .bind(&link.url)
            .bind(&link.button_text)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }
        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }

    async fn profile_by_username(&self, username: &str) -> CoreResult<Option<Profile>> {
        let Some(record) = sqlx::query_as::<_, ProfileRecord>(
            "SELECT id, username, full_name, bio, industry, theme_preference \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        else {
            return Ok(None);
        };

        let links = sqlx::query_as::<_, LinkRecord>(
            "SELECT platform, url, button_text FROM social_links \
             WHERE user_id = $1 ORDER BY id",
        )
        .bind(record.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(Some(Profile {
            username: record.username,
            full_name: record.full_name,
            bio: record.bio,
            industry: record.industry,
            theme_preference: record.theme_preference,
            links: links.into_iter().map(LinkRecord::to_domain).collect(),
        }))
    }

    async fn insert_event(&self, event: &AnalyticsEvent) -> CoreResult<()> {
        let link_data = event
            .link_data
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| CoreError::Storage(e.to_string()))?;

        sqlx::query(
            "INSERT INTO profile_analytics (\
                 id, profile_username, visitor_id, session_id, event_type, \
                 link_data, referrer, user_agent, country, city, device, browser\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(event.id)
        .bind(&event.profile_username)
        .bind(&event.visitor_id)
        .bind(&event.session_id)
        .bind(event.event_type.as_str())
        .bind(link_data)
        .bind(&event.referrer)
        .bind(&event.user_agent)
        .bind(&event.country)
        .bind(&event.city)
        .bind(&event.device)
        .bind(&event.browser)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }
}
