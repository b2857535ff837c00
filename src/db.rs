use rusqlite::Connection;
use std::path::Path;

/// Opens (creating if needed) the student database and ensures the schema
/// exists. Every statement is idempotent, so re-opening an already populated
/// database is safe.
pub fn open_db(db_path: &Path) -> anyhow::Result<Connection> {
    if let Some(dir) = db_path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let conn = Connection::open(db_path)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// In-memory database with the same schema. Used by tests.
pub fn open_in_memory() -> anyhow::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

fn create_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS student(
            roll_no TEXT PRIMARY KEY,
            sname TEXT NOT NULL,
            class TEXT NOT NULL,
            birth_date TEXT NOT NULL
        )",
        [],
    )?;

    // No FOREIGN KEY on roll_no: the student-exists invariant is checked at
    // insert time by the service, and deleting a student leaves its mark
    // rows in place. Orphaned marks are tolerated.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS marks(
            roll_no TEXT NOT NULL,
            subject TEXT NOT NULL,
            marks INTEGER NOT NULL,
            PRIMARY KEY(roll_no, subject)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_marks_roll_no ON marks(roll_no)",
        [],
    )?;

    Ok(())
}
