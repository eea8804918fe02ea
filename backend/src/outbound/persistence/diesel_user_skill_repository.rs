//! PostgreSQL-backed `UserSkillRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserSkillRepository, UserSkillRepositoryError};
use crate::domain::{SkillDirection, SkillId, UserId};

use super::models::NewUserSkillRow;
use super::pool::{DbPool, PoolError};
use super::schema::{skills, user_skills};

/// Diesel-backed implementation of the `UserSkillRepository` port.
#[derive(Clone)]
pub struct DieselUserSkillRepository {
    pool: DbPool,
}

impl DieselUserSkillRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserSkillRepositoryError {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => {
            UserSkillRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserSkillRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserSkillRepositoryError::connection("database connection error")
        }
        _ => UserSkillRepositoryError::query("database error"),
    }
}

#[async_trait]
impl UserSkillRepository for DieselUserSkillRepository {
    async fn skill_names(
        &self,
        user_id: &UserId,
        direction: SkillDirection,
    ) -> Result<Vec<String>, UserSkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        user_skills::table
            .inner_join(skills::table)
            .filter(user_skills::user_id.eq(*user_id.as_uuid()))
            .filter(user_skills::direction.eq(direction.as_str()))
            .select(skills::name)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn replace_links(
        &self,
        user_id: &UserId,
        offered: Vec<SkillId>,
        wanted: Vec<SkillId>,
    ) -> Result<(), UserSkillRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_uuid = *user_id.as_uuid();
        let rows: Vec<NewUserSkillRow<'_>> = offered
            .iter()
            .map(|skill| (skill, SkillDirection::Offered))
            .chain(wanted.iter().map(|skill| (skill, SkillDirection::Wanted)))
            .map(|(skill, direction)| NewUserSkillRow {
                id: Uuid::new_v4(),
                user_id: user_uuid,
                skill_id: *skill.as_uuid(),
                direction: direction.as_str(),
            })
            .collect();

        // Delete and reinsert in one transaction so a failure cannot leave a
        // user with half their links gone.
        conn.transaction(|conn| {
            async move {
                diesel::delete(user_skills::table.filter(user_skills::user_id.eq(user_uuid)))
                    .execute(conn)
                    .await?;

                if !rows.is_empty() {
                    diesel::insert_into(user_skills::table)
                        .values(&rows)
                        .execute(conn)
                        .await?;
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(error, UserSkillRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_errors_map_to_query_errors() {
        let error = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(error, UserSkillRepositoryError::Query { .. }));
    }
}
