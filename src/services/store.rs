use crate::models::{
    CustomOption, Gender, NewProfile, Profile, ProfileSearchQuery, ProfileStats, User,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// PostgreSQL-backed store for admin users, candidate profiles and custom
/// form options.
pub struct ProfileStore {
    pool: PgPool,
}

impl ProfileStore {
    /// Connect and run pending migrations.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    // ---- users ----

    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
    ) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, email)
            VALUES ($1, $2, $3)
            RETURNING id, username, password, email
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, email FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, email FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn update_user_email(
        &self,
        id: i32,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET email = $2 WHERE id = $1
            RETURNING id, username, password, email
            "#,
        )
        .bind(id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn update_user_password(
        &self,
        id: i32,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET password = $2 WHERE id = $1
            RETURNING id, username, password, email
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    // ---- profiles ----

    pub async fn create_profile(&self, profile: &NewProfile) -> Result<Profile, StoreError> {
        let created = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (
                name, age, gender, profession, qualification, marital_status,
                religion, height, birth_year, profile_picture,
                profile_picture_original, document, document_original
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&profile.name)
        .bind(profile.age)
        .bind(profile.gender)
        .bind(&profile.profession)
        .bind(&profile.qualification)
        .bind(&profile.marital_status)
        .bind(&profile.religion)
        .bind(&profile.height)
        .bind(profile.birth_year)
        .bind(&profile.profile_picture)
        .bind(&profile.profile_picture_original)
        .bind(&profile.document)
        .bind(&profile.document_original)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn get_profile(&self, id: i32) -> Result<Option<Profile>, StoreError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    pub async fn get_all_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let profiles =
            sqlx::query_as::<_, Profile>("SELECT * FROM profiles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(profiles)
    }

    /// Candidate feed for the matchmaking endpoint; order irrelevant.
    pub async fn get_profiles_by_gender(&self, gender: Gender) -> Result<Vec<Profile>, StoreError> {
        let profiles = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE gender = $1")
            .bind(gender)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            "Fetched {} {} candidate profiles",
            profiles.len(),
            gender.as_str()
        );

        Ok(profiles)
    }

    pub async fn update_profile(
        &self,
        id: i32,
        profile: &NewProfile,
    ) -> Result<Option<Profile>, StoreError> {
        let updated = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles SET
                name = $2, age = $3, gender = $4, profession = $5,
                qualification = $6, marital_status = $7, religion = $8,
                height = $9, birth_year = $10, profile_picture = $11,
                profile_picture_original = $12, document = $13,
                document_original = $14
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&profile.name)
        .bind(profile.age)
        .bind(profile.gender)
        .bind(&profile.profession)
        .bind(&profile.qualification)
        .bind(&profile.marital_status)
        .bind(&profile.religion)
        .bind(&profile.height)
        .bind(profile.birth_year)
        .bind(&profile.profile_picture)
        .bind(&profile.profile_picture_original)
        .bind(&profile.document)
        .bind(&profile.document_original)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete_profile(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Search profiles by any combination of filters; absent filters are
    /// ignored.
    pub async fn search_profiles(
        &self,
        filters: &ProfileSearchQuery,
    ) -> Result<Vec<Profile>, StoreError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM profiles WHERE 1 = 1");

        if let Some(gender) = filters.gender {
            query.push(" AND gender = ").push_bind(gender);
        }
        if let Some(profession) = &filters.profession {
            query
                .push(" AND profession ILIKE ")
                .push_bind(format!("%{}%", profession));
        }
        if let Some(birth_year) = filters.birth_year {
            query.push(" AND birth_year = ").push_bind(birth_year);
        }
        if let Some(height) = &filters.height {
            query.push(" AND height = ").push_bind(height);
        }
        if let Some(age) = filters.age {
            query.push(" AND age = ").push_bind(age);
        }
        if let Some(date) = filters.date {
            query.push(" AND created_at::date = ").push_bind(date);
        }

        query.push(" ORDER BY created_at DESC");

        let profiles = query
            .build_query_as::<Profile>()
            .fetch_all(&self.pool)
            .await?;

        Ok(profiles)
    }

    pub async fn get_profile_stats(&self) -> Result<ProfileStats, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE gender = 'Male') AS male,
                COUNT(*) FILTER (WHERE gender = 'Female') AS female,
                COUNT(*) FILTER (WHERE created_at > NOW() - INTERVAL '30 days') AS recent
            FROM profiles
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(ProfileStats {
            total: row.get("total"),
            male: row.get("male"),
            female: row.get("female"),
            recent: row.get("recent"),
        })
    }

    // ---- custom options ----

    pub async fn get_custom_options(
        &self,
        field_type: &str,
    ) -> Result<Vec<CustomOption>, StoreError> {
        let options = sqlx::query_as::<_, CustomOption>(
            "SELECT * FROM custom_options WHERE field_type = $1 ORDER BY value",
        )
        .bind(field_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }

    pub async fn create_custom_option(
        &self,
        field_type: &str,
        value: &str,
    ) -> Result<CustomOption, StoreError> {
        let option = sqlx::query_as::<_, CustomOption>(
            r#"
            INSERT INTO custom_options (field_type, value)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(field_type)
        .bind(value)
        .fetch_one(&self.pool)
        .await?;

        Ok(option)
    }

    pub async fn delete_custom_option(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM custom_options WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
