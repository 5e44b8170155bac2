//! Shared Diesel error mapping for the registry repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

/// Map common Diesel error variants into query/connection constructors.
///
/// `NotFound` and query-builder failures map to query errors; a closed
/// connection maps to a connection error.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    log_diesel_error(&error);

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Like [`map_basic_diesel_error`], but routes unique-constraint violations
/// to `unique`.
pub fn map_unique_diesel_error<E, U, Q, C>(
    error: DieselError,
    unique: U,
    query: Q,
    connection: C,
) -> E
where
    U: FnOnce() -> E,
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    if matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    ) {
        log_diesel_error(&error);
        return unique();
    }
    map_basic_diesel_error(error, query, connection)
}

#[cfg(test)]
mod tests {
    //! Mapping coverage for the shared Diesel helpers.

    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Unique,
        Query(&'static str),
        Connection(String),
    }

    struct Info;

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "constraint failed"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info))
    }

    fn map(error: DieselError) -> Mapped {
        map_unique_diesel_error(
            error,
            || Mapped::Unique,
            Mapped::Query,
            |message| Mapped::Connection(message.to_owned()),
        )
    }

    #[rstest]
    fn unique_violation_maps_to_unique() {
        assert_eq!(
            map(database_error(DatabaseErrorKind::UniqueViolation)),
            Mapped::Unique
        );
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        assert_eq!(
            map(database_error(DatabaseErrorKind::ClosedConnection)),
            Mapped::Connection("database connection error".to_owned())
        );
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(database_error(DatabaseErrorKind::CheckViolation), "database error")]
    fn other_errors_map_to_query(#[case] error: DieselError, #[case] expected: &'static str) {
        assert_eq!(map(error), Mapped::Query(expected));
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped: Mapped = map_basic_pool_error(PoolError::checkout("timed out"), |message| {
            Mapped::Connection(message)
        });
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }
}
