use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use crate::domain::Participant;

fn parse_participant_row(row: &rusqlite::Row) -> rusqlite::Result<Participant> {
    Ok(Participant {
        name: row.get(0)?,
        created_at: row.get(1)?,
    })
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Participant>> {
    let mut stmt = conn.prepare("SELECT name, created_at FROM participants ORDER BY rowid")?;
    let rows = stmt
        .query_map([], parse_participant_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn find_case_insensitive(conn: &mut DbConn, name: &str) -> Result<Option<Participant>> {
    conn.query_row(
        "SELECT name, created_at FROM participants WHERE lower(name) = lower(?1)",
        params![name],
        parse_participant_row,
    )
    .optional()
    .context("Failed to query participant")
}

pub fn insert_participant(conn: &mut DbConn, name: &str, created_at: DateTime<Utc>) -> Result<Participant> {
    conn.query_row(
        "INSERT INTO participants (name, created_at) VALUES (?1, ?2) RETURNING name, created_at",
        params![name, created_at],
        parse_participant_row,
    )
    .context("Failed to insert participant")
}

pub fn delete_participant(conn: &mut DbConn, name: &str) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM participants WHERE name = ?1", params![name])
        .context("Failed to delete participant")?;
    Ok(deleted > 0)
}
