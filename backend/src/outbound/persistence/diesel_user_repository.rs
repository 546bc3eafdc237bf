//! PostgreSQL-backed [`UserRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId};

/// Diesel repository reading principals from the `users` table.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::id.eq(id.get()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(into_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(into_user).transpose()
    }
}

fn into_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    User::try_from(row).map_err(|reason| {
        warn!(user_id = id, %reason, "stored user record is invalid");
        UserPersistenceError::query("stored user record is invalid")
    })
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::NotFound | DieselError::QueryBuilderError(_) => {
            UserPersistenceError::query("database query error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_checkout_maps_to_connection_error() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    #[case(DieselError::NotFound, UserPersistenceError::query("database query error"))]
    #[case(
        DieselError::BrokenTransactionManager,
        UserPersistenceError::connection("database connection error")
    )]
    #[case(DieselError::RollbackTransaction, UserPersistenceError::query("database error"))]
    fn diesel_errors_map_to_port_errors(
        #[case] error: DieselError,
        #[case] expected: UserPersistenceError,
    ) {
        assert_eq!(map_diesel_error(error), expected);
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(String::from("server closed the connection")),
        );
        assert_eq!(
            map_diesel_error(error),
            UserPersistenceError::connection("database connection error")
        );
    }

    #[rstest]
    fn corrupt_row_is_a_query_error() {
        let row = UserRow {
            id: 1,
            email: "ada@example.com".to_owned(),
            password_digest: "not a phc string".to_owned(),
        };
        assert_eq!(
            into_user(row).map(|user| user.id()),
            Err(UserPersistenceError::query("stored user record is invalid"))
        );
    }
}
