//! PostgreSQL-backed `UserRepository` implementation using Diesel.
//!
//! Simple lookups go through the typed DSL; the discovery search joins the
//! skill tables with a raw parameterised query because the optional-filter
//! shape (`$1 = '' OR …`) is clearer as SQL than as a boxed DSL expression.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel_async::RunQueryDsl;
use pagination::Page;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{ProfileChanges, ProfileSearchFilter, User, UserId};

use super::models::{CountRow, UserProfileChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// One page of eligible users matching the optional text and availability
/// filters, ranked by rating. An empty string disables the corresponding
/// filter, mirroring how the service normalises absent input.
const SEARCH_PAGE_SQL: &str = "\
    SELECT DISTINCT u.id, u.first_name, u.last_name, u.email, u.bio, u.location, \
           u.profile_public, u.active, u.email_verified, u.availability, \
           u.average_rating, u.total_reviews, u.completed_swaps, u.created_at, u.updated_at \
    FROM users u \
    LEFT JOIN user_skills us ON us.user_id = u.id \
    LEFT JOIN skills s ON s.id = us.skill_id \
    WHERE u.profile_public AND u.active AND u.email_verified \
      AND ($1 = '' OR u.first_name ILIKE '%' || $1 || '%' \
                   OR u.last_name ILIKE '%' || $1 || '%' \
                   OR s.name ILIKE '%' || $1 || '%') \
      AND ($2 = '' OR u.availability = $2) \
    ORDER BY u.average_rating DESC \
    LIMIT $3 OFFSET $4";

/// Companion count for [`SEARCH_PAGE_SQL`], deduplicated per user.
const SEARCH_COUNT_SQL: &str = "\
    SELECT COUNT(DISTINCT u.id) AS count \
    FROM users u \
    LEFT JOIN user_skills us ON us.user_id = u.id \
    LEFT JOIN skills s ON s.id = us.skill_id \
    WHERE u.profile_public AND u.active AND u.email_verified \
      AND ($1 = '' OR u.first_name ILIKE '%' || $1 || '%' \
                   OR u.last_name ILIKE '%' || $1 || '%' \
                   OR s.name ILIKE '%' || $1 || '%') \
      AND ($2 = '' OR u.availability = $2)";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        _ => UserRepositoryError::query("database error"),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(*id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(User::from))
    }

    async fn find_discoverable(
        &self,
        filter: &ProfileSearchFilter,
    ) -> Result<Page<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        if filter.search_text.is_none() && filter.availability.is_none() {
            // No filters: the plain table scan needs neither join nor dedup.
            let total: i64 = users::table
                .filter(users::profile_public.eq(true))
                .filter(users::active.eq(true))
                .filter(users::email_verified.eq(true))
                .count()
                .get_result(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            let rows: Vec<UserRow> = users::table
                .filter(users::profile_public.eq(true))
                .filter(users::active.eq(true))
                .filter(users::email_verified.eq(true))
                .order(users::average_rating.desc())
                .offset(filter.page.offset() as i64)
                .limit(filter.page.limit() as i64)
                .select(UserRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;

            let users = rows.into_iter().map(User::from).collect();
            return Ok(Page::new(users, filter.page, total.max(0) as u64));
        }

        let needle = filter.search_text.as_deref().unwrap_or("");
        let availability = filter
            .availability
            .map(|value| value.as_str())
            .unwrap_or("");

        let counted: CountRow = sql_query(SEARCH_COUNT_SQL)
            .bind::<Text, _>(needle)
            .bind::<Text, _>(availability)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<UserRow> = sql_query(SEARCH_PAGE_SQL)
            .bind::<Text, _>(needle)
            .bind::<Text, _>(availability)
            .bind::<BigInt, _>(filter.page.limit() as i64)
            .bind::<BigInt, _>(filter.page.offset() as i64)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let users = rows.into_iter().map(User::from).collect();
        Ok(Page::new(users, filter.page, counted.count.max(0) as u64))
    }

    async fn apply_profile_changes(
        &self,
        id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = UserProfileChangeset {
            first_name: changes.first_name.as_deref(),
            last_name: changes.last_name.as_deref(),
            bio: changes.bio.as_deref(),
            location: changes.location.as_deref(),
            profile_public: changes.profile_public,
            availability: changes.availability.map(|value| value.as_str()),
            updated_at: Utc::now(),
        };

        let updated = diesel::update(users::table.filter(users::id.eq(*id.as_uuid())))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn count_active_verified(&self) -> Result<u64, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = users::table
            .filter(users::active.eq(true).and(users::email_verified.eq(true)))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(total.max(0) as u64)
    }
}
