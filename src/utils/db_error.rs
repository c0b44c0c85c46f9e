use sqlx::error::DatabaseError;

/// Returns the database error if `e` is a unique-constraint violation.
///
/// The caller decides which constraint was hit; PostgreSQL reports a
/// constraint name, SQLite only a `table.column` fragment in the message.
pub fn unique_violation(e: &sqlx::Error) -> Option<&(dyn DatabaseError + 'static)> {
    let Some(db_err) = e.as_database_error() else {
        return None;
    };

    if !db_err.is_unique_violation() {
        return None;
    }

    Some(db_err)
}
