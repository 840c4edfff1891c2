//! Named savepoints that nest inside whatever transaction the caller holds.
//!
//! On a connection with no open transaction the outermost `SAVEPOINT` starts
//! one and `RELEASE` commits it. Inside a caller's transaction the work only
//! becomes durable when the caller commits.

use rusqlite::Connection;

use crate::error::BlogError;

/// Runs `f` inside the savepoint `name`, releasing it on success and rolling
/// back to it on error.
pub(crate) fn with_savepoint<T>(
    conn: &Connection,
    name: &str,
    f: impl FnOnce(&Connection) -> Result<T, BlogError>,
) -> Result<T, BlogError> {
    conn.execute_batch(&format!("SAVEPOINT {name};"))?;

    match f(conn) {
        Ok(value) => {
            conn.execute_batch(&format!("RELEASE {name};"))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) =
                conn.execute_batch(&format!("ROLLBACK TO {name}; RELEASE {name};"))
            {
                tracing::warn!(savepoint = name, error = %rollback_err, "savepoint rollback failed");
            }
            Err(err)
        }
    }
}
