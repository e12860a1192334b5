use chrono::Datelike;
use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: &str) -> anyhow::Result<()> {
    if let Some(parent) = std::path::Path::new(db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_path).is_absolute() {
        std::path::PathBuf::from(db_path)
    } else {
        std::env::current_dir()?.join(db_path)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    create_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Bootstrap the schema on a fresh or existing database.
///
/// Kept separate from [`initialize_database`] so tests can run against an
/// in-memory connection.
pub async fn create_schema<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    const TABLES: &[&str] = &[
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            building_name TEXT NOT NULL,
            capacity INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS room_tags (
            room_id TEXT NOT NULL,
            tag_id TEXT NOT NULL,
            PRIMARY KEY (room_id, tag_id)
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS timeslots (
            id TEXT PRIMARY KEY NOT NULL,
            day TEXT NOT NULL,
            slot INTEGER NOT NULL
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS timeslot_tags (
            timeslot_id TEXT NOT NULL,
            tag_id TEXT NOT NULL,
            PRIMARY KEY (timeslot_id, tag_id)
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS lessons (
            id INTEGER PRIMARY KEY NOT NULL,
            year INTEGER NOT NULL,
            room_id TEXT NOT NULL,
            timeslot_id TEXT NOT NULL
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS timetables (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS timetable_lessons (
            timetable_id TEXT NOT NULL,
            lesson_id INTEGER NOT NULL,
            PRIMARY KEY (timetable_id, lesson_id)
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS constraint_signatures (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS constraint_instances (
            id TEXT PRIMARY KEY NOT NULL,
            signature_id TEXT NOT NULL,
            arguments TEXT NOT NULL DEFAULT '[]'
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS server_settings (
            id INTEGER PRIMARY KEY NOT NULL,
            current_year INTEGER NOT NULL
        );
        "#,
    ];

    for sql in TABLES {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            (*sql).to_string(),
        ))
        .await?;
    }

    // Seed the single settings row; existing installations keep their year
    let year = chrono::Utc::now().year();
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        format!("INSERT OR IGNORE INTO server_settings (id, current_year) VALUES (1, {year});"),
    ))
    .await?;

    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
