pub mod connection;
pub mod models;
pub mod participants;
pub mod players;
pub mod predictions;
pub mod results;
pub mod setup;
pub mod tournaments;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;

/// True when a database error comes from a UNIQUE, PRIMARY KEY or CHECK constraint.
pub fn is_constraint_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<rusqlite::Error>(),
            Some(rusqlite::Error::SqliteFailure(e, _)) if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    })
}

#[cfg(test)]
pub(crate) fn test_connection() -> DbConn {
    let pool = create_memory_pool().expect("in-memory pool");
    let mut conn = get_connection(&pool).expect("connection");
    setup::init_database(&mut conn).expect("schema");
    conn
}
