//! PostgreSQL-backed `ConnectionRequestRepository` implementation using
//! Diesel.
//!
//! Two storage-level guards uphold the ledger invariants under concurrency:
//! the partial unique index on the unordered sender/receiver pair (restricted
//! to `PENDING`/`ACCEPTED` rows) makes `create_pending` atomic, and the
//! conditional `UPDATE … WHERE status = 'PENDING'` in `resolve` lets exactly
//! one of two racing responders win.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    ConnectionRepositoryError, ConnectionRequestRepository, NewConnectionRequest,
};
use crate::domain::{
    ConnectionRequest, ConnectionRequestId, RequestDecision, RequestStatus, UserId,
};

use super::models::{ConnectionRequestRow, NewConnectionRequestRow};
use super::pool::{DbPool, PoolError};
use super::schema::connection_requests;

/// Diesel-backed implementation of the `ConnectionRequestRepository` port.
#[derive(Clone)]
pub struct DieselConnectionRepository {
    pool: DbPool,
}

impl DieselConnectionRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ConnectionRepositoryError {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => {
            ConnectionRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ConnectionRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ConnectionRepositoryError::connection("database connection error")
        }
        _ => ConnectionRepositoryError::query("database error"),
    }
}

/// A unique violation on the insert means a concurrent caller won the race
/// for the same pair; report it as the duplicate it is.
fn map_insert_error(error: diesel::result::Error) -> ConnectionRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if matches!(
        &error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    ) {
        return ConnectionRepositoryError::DuplicatePair;
    }
    map_diesel_error(error)
}

fn row_to_request(row: ConnectionRequestRow) -> Result<ConnectionRequest, ConnectionRepositoryError> {
    ConnectionRequest::try_from(row).map_err(|err| ConnectionRepositoryError::query(err.to_string()))
}

const BLOCKING_STATUSES: [&str; 2] = [
    RequestStatus::Pending.as_str(),
    RequestStatus::Accepted.as_str(),
];

#[async_trait]
impl ConnectionRequestRepository for DieselConnectionRepository {
    async fn create_pending(
        &self,
        request: NewConnectionRequest,
    ) -> Result<ConnectionRequest, ConnectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let sender = *request.sender_id.as_uuid();
        let receiver = *request.receiver_id.as_uuid();

        // Friendly pre-check covering both directions; the partial unique
        // index is the authoritative guard when two sends race.
        let existing: i64 = connection_requests::table
            .filter(
                connection_requests::sender_id
                    .eq(sender)
                    .and(connection_requests::receiver_id.eq(receiver))
                    .or(connection_requests::sender_id
                        .eq(receiver)
                        .and(connection_requests::receiver_id.eq(sender))),
            )
            .filter(connection_requests::status.eq_any(BLOCKING_STATUSES))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if existing > 0 {
            return Err(ConnectionRepositoryError::DuplicatePair);
        }

        let row = NewConnectionRequestRow {
            id: Uuid::new_v4(),
            sender_id: sender,
            receiver_id: receiver,
            message: request.message.as_deref(),
            status: RequestStatus::Pending.as_str(),
        };

        let created: ConnectionRequestRow = diesel::insert_into(connection_requests::table)
            .values(&row)
            .get_result(&mut conn)
            .await
            .map_err(map_insert_error)?;

        row_to_request(created)
    }

    async fn find_by_id(
        &self,
        id: &ConnectionRequestId,
    ) -> Result<Option<ConnectionRequest>, ConnectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ConnectionRequestRow> = connection_requests::table
            .filter(connection_requests::id.eq(*id.as_uuid()))
            .select(ConnectionRequestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_request).transpose()
    }

    async fn list_for_receiver(
        &self,
        receiver_id: &UserId,
        status: RequestStatus,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ConnectionRequestRow> = connection_requests::table
            .filter(connection_requests::receiver_id.eq(*receiver_id.as_uuid()))
            .filter(connection_requests::status.eq(status.as_str()))
            .order(connection_requests::created_at.asc())
            .select(ConnectionRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_request).collect()
    }

    async fn list_for_sender(
        &self,
        sender_id: &UserId,
        status: RequestStatus,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ConnectionRequestRow> = connection_requests::table
            .filter(connection_requests::sender_id.eq(*sender_id.as_uuid()))
            .filter(connection_requests::status.eq(status.as_str()))
            .order(connection_requests::created_at.asc())
            .select(ConnectionRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_request).collect()
    }

    async fn resolve(
        &self,
        id: &ConnectionRequestId,
        decision: RequestDecision,
    ) -> Result<ConnectionRequest, ConnectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated: Option<ConnectionRequestRow> = diesel::update(
            connection_requests::table
                .filter(connection_requests::id.eq(*id.as_uuid()))
                .filter(connection_requests::status.eq(RequestStatus::Pending.as_str())),
        )
        .set((
            connection_requests::status.eq(decision.terminal_status().as_str()),
            connection_requests::responded_at.eq(Utc::now()),
        ))
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        if let Some(row) = updated {
            return row_to_request(row);
        }

        // The conditional update missed: either the row is gone or another
        // responder got there first. Read back to report which.
        let current: Option<ConnectionRequestRow> = connection_requests::table
            .filter(connection_requests::id.eq(*id.as_uuid()))
            .select(ConnectionRequestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match current {
            Some(row) => {
                let request = row_to_request(row)?;
                Err(ConnectionRepositoryError::StaleStatus {
                    status: request.status,
                })
            }
            None => Err(ConnectionRepositoryError::query(
                "connection request not found",
            )),
        }
    }

    async fn count_all(&self) -> Result<u64, ConnectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = connection_requests::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(total.max(0) as u64)
    }

    async fn count_accepted(&self) -> Result<u64, ConnectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = connection_requests::table
            .filter(connection_requests::status.eq(RequestStatus::Accepted.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(total.max(0) as u64)
    }
}
