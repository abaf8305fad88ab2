use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS department (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            is_active   INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS app_user (
            user_id       TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            lastname      TEXT NOT NULL,
            email         TEXT NOT NULL UNIQUE,
            avatar        TEXT NOT NULL DEFAULT '',
            department_id INTEGER,
            valid_from    TEXT,
            valid_to      TEXT,
            created_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (department_id) REFERENCES department(id)
        );

        CREATE TABLE IF NOT EXISTS user_role (
            user_id  TEXT NOT NULL,
            role     TEXT NOT NULL,
            PRIMARY KEY (user_id, role),
            FOREIGN KEY (user_id) REFERENCES app_user(user_id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS subject (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_code  TEXT NOT NULL UNIQUE,
            name          TEXT NOT NULL,
            is_active     INTEGER NOT NULL DEFAULT 1,
            department_id INTEGER NOT NULL,
            FOREIGN KEY (department_id) REFERENCES department(id)
        );

        CREATE INDEX IF NOT EXISTS idx_user_department
            ON app_user(department_id);

        CREATE INDEX IF NOT EXISTS idx_subject_department
            ON subject(department_id);
        ",
    )
    .context("failed to initialize schema")?;

    info!(db = %db_path.display(), "database schema ready");
    Ok(())
}
