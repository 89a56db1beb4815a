//! Connection readiness checks run before a repository is handed out.

use crate::db::migrations::{current_user_version, latest_version};
use crate::repo::content_repo::{RepoError, RepoResult};
use rusqlite::Connection;

const REQUIRED_TABLES: &[&str] = &[
    "accounts",
    "authors",
    "categories",
    "posts",
    "post_categories",
    "comments",
];

pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
