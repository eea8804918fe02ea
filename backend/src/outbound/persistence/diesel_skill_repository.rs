//! PostgreSQL-backed `SkillRepository` implementation using Diesel.
//!
//! First use of a new skill name races with concurrent callers; the unique
//! index on `skills.name_key` plus `ON CONFLICT DO NOTHING` makes the
//! insert-then-fetch sequence safe without an advisory lock.

use async_trait::async_trait;
use diesel::dsl::count_distinct;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{SkillRepository, SkillRepositoryError};
use crate::domain::{DEFAULT_SKILL_CATEGORY, Skill, SkillDirection, skill_name_key};

use super::models::{NewSkillRow, SkillRow};
use super::pool::{DbPool, PoolError};
use super::schema::{skills, user_skills};

/// Diesel-backed implementation of the `SkillRepository` port.
#[derive(Clone)]
pub struct DieselSkillRepository {
    pool: DbPool,
}

impl DieselSkillRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SkillRepositoryError {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => {
            SkillRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> SkillRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            SkillRepositoryError::connection("database connection error")
        }
        _ => SkillRepositoryError::query("database error"),
    }
}

#[async_trait]
impl SkillRepository for DieselSkillRepository {
    async fn get_or_create(&self, name: &str) -> Result<Skill, SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let display_name = name.trim();
        let key = skill_name_key(name);
        let row = NewSkillRow {
            id: Uuid::new_v4(),
            name: display_name,
            name_key: &key,
            category: DEFAULT_SKILL_CATEGORY,
            description: None,
        };

        // A lost race lands on the conflict arm and falls through to the
        // fetch, which then observes the winner's row.
        diesel::insert_into(skills::table)
            .values(&row)
            .on_conflict(skills::name_key)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let stored: SkillRow = skills::table
            .filter(skills::name_key.eq(&key))
            .select(SkillRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Skill::from(stored))
    }

    async fn count_distinct_offered(&self) -> Result<u64, SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = user_skills::table
            .filter(user_skills::direction.eq(SkillDirection::Offered.as_str()))
            .select(count_distinct(user_skills::skill_id))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(total.max(0) as u64)
    }
}
