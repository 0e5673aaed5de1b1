//! Profile persistence behind the `RecordStore` trait.
//!
//! `AppState` holds an `Arc<dyn RecordStore>`; production uses `PgRecordStore`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{PortfolioItemRow, ProfileInput, ProfileRecord, ProfileRow};

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the single (oldest) profile, if any.
    async fn load_profile(&self) -> Result<Option<ProfileRecord>, AppError>;

    /// Creates the profile or overwrites it, replacing its whole portfolio.
    async fn save_profile(&self, input: &ProfileInput) -> Result<ProfileRecord, AppError>;
}

pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn load_profile(&self) -> Result<Option<ProfileRecord>, AppError> {
        let profile = sqlx::query_as::<_, ProfileRow>(
            "SELECT * FROM profiles ORDER BY created_at ASC, id ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(profile) = profile else {
            return Ok(None);
        };

        let portfolio_items = sqlx::query_as::<_, PortfolioItemRow>(
            "SELECT * FROM portfolio_items WHERE profile_id = $1 ORDER BY position ASC",
        )
        .bind(profile.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ProfileRecord {
            profile,
            portfolio_items,
        }))
    }

    /// Runs in one transaction. Every `?` below drops `tx` uncommitted, which
    /// rolls the whole save back.
    async fn save_profile(&self, input: &ProfileInput) -> Result<ProfileRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, ProfileRow>(
            "SELECT * FROM profiles ORDER BY created_at ASC, id ASC LIMIT 1 FOR UPDATE",
        )
        .fetch_optional(&mut *tx)
        .await?;

        let profile = match existing {
            None => {
                sqlx::query_as::<_, ProfileRow>(
                    r#"
                    INSERT INTO profiles (id, description, skills)
                    VALUES ($1, $2, $3)
                    RETURNING *
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(&input.description)
                .bind(&input.skills)
                .fetch_one(&mut *tx)
                .await?
            }
            Some(existing) => {
                let updated = sqlx::query_as::<_, ProfileRow>(
                    r#"
                    UPDATE profiles
                    SET description = $1, skills = $2, updated_at = NOW()
                    WHERE id = $3
                    RETURNING *
                    "#,
                )
                .bind(&input.description)
                .bind(&input.skills)
                .bind(existing.id)
                .fetch_one(&mut *tx)
                .await?;

                sqlx::query("DELETE FROM portfolio_items WHERE profile_id = $1")
                    .bind(existing.id)
                    .execute(&mut *tx)
                    .await?;

                updated
            }
        };

        let mut portfolio_items = Vec::with_capacity(input.portfolio_items.len());
        for (position, item) in input.portfolio_items.iter().enumerate() {
            let row = sqlx::query_as::<_, PortfolioItemRow>(
                r#"
                INSERT INTO portfolio_items (id, profile_id, position, title, link, description)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(profile.id)
            .bind(position as i32)
            .bind(&item.title)
            .bind(&item.link)
            .bind(&item.description)
            .fetch_one(&mut *tx)
            .await?;
            portfolio_items.push(row);
        }

        tx.commit().await?;

        info!(
            "Saved profile {} with {} portfolio items",
            profile.id,
            portfolio_items.len()
        );

        Ok(ProfileRecord {
            profile,
            portfolio_items,
        })
    }
}
