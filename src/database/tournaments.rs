use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::TournamentUpdate;
use crate::domain::Tournament;

const SELECT_COLUMNS: &str = "SELECT id, name, year, is_active, submission_deadline FROM tournaments";

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<Tournament> {
    Ok(Tournament {
        id: row.get(0)?,
        name: row.get(1)?,
        year: row.get(2)?,
        is_active: row.get(3)?,
        submission_deadline: row.get(4)?,
    })
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Tournament>> {
    let sql = format!("{SELECT_COLUMNS} ORDER BY year DESC, rowid");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_tournament_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn find_by_id(conn: &mut DbConn, id: &str) -> Result<Option<Tournament>> {
    let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_tournament_row)
        .optional()
        .context("Failed to query tournament by id")
}

pub fn find_active(conn: &mut DbConn) -> Result<Option<Tournament>> {
    let sql = format!("{SELECT_COLUMNS} WHERE is_active = 1 ORDER BY rowid LIMIT 1");

    conn.query_row(&sql, [], parse_tournament_row)
        .optional()
        .context("Failed to query active tournament")
}

/// Inserts the tournament as the only active one.
pub fn create_active(
    conn: &mut DbConn,
    id: &str,
    name: &str,
    year: i32,
    submission_deadline: Option<DateTime<Utc>>,
) -> Result<Tournament> {
    let tx = conn.transaction()?;
    tx.execute("UPDATE tournaments SET is_active = 0", [])?;
    let tournament = tx
        .query_row(
            "INSERT INTO tournaments (id, name, year, is_active, submission_deadline) VALUES (?1, ?2, ?3, 1, ?4) RETURNING id, name, year, is_active, submission_deadline",
            params![id, name, year, submission_deadline],
            parse_tournament_row,
        )
        .context("Failed to insert tournament")?;
    tx.commit()?;
    Ok(tournament)
}

/// Activating a tournament deactivates every other one.
pub fn update(conn: &mut DbConn, id: &str, update: &TournamentUpdate) -> Result<Option<Tournament>> {
    if find_by_id(conn, id)?.is_none() {
        return Ok(None);
    }

    let tx = conn.transaction()?;
    if let Some(active) = update.is_active {
        if active {
            tx.execute("UPDATE tournaments SET is_active = 0 WHERE id != ?1", params![id])?;
        }
        tx.execute("UPDATE tournaments SET is_active = ?1 WHERE id = ?2", params![active, id])?;
    }
    if let Some(deadline) = update.submission_deadline {
        tx.execute(
            "UPDATE tournaments SET submission_deadline = ?1 WHERE id = ?2",
            params![deadline, id],
        )?;
    }
    tx.commit().context("Failed to update tournament")?;

    find_by_id(conn, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_connection;
    use chrono::TimeZone;

    #[test]
    fn test_create_keeps_single_active() {
        let mut conn = test_connection();
        create_active(&mut conn, "australian-open-2025", "Australian Open", 2025, None).unwrap();
        create_active(&mut conn, "roland-garros-2025", "Roland Garros", 2025, None).unwrap();

        let active = find_active(&mut conn).unwrap().unwrap();
        assert_eq!(active.id, "roland-garros-2025");
        let all = list_all(&mut conn).unwrap();
        assert_eq!(all.iter().filter(|t| t.is_active).count(), 1);
    }

    #[test]
    fn test_duplicate_create_is_constraint_violation() {
        let mut conn = test_connection();
        create_active(&mut conn, "australian-open-2025", "Australian Open", 2025, None).unwrap();
        create_active(&mut conn, "roland-garros-2025", "Roland Garros", 2025, None).unwrap();

        let err = create_active(&mut conn, "australian-open-2025", "Australian Open", 2025, None).unwrap_err();
        assert!(crate::database::is_constraint_violation(&err));
        // the failed insert rolls back the deactivation
        assert_eq!(find_active(&mut conn).unwrap().unwrap().id, "roland-garros-2025");
    }

    #[test]
    fn test_update_active_and_deadline() {
        let mut conn = test_connection();
        let deadline = Utc.with_ymd_and_hms(2025, 1, 12, 10, 0, 0).unwrap();
        create_active(&mut conn, "australian-open-2025", "Australian Open", 2025, Some(deadline)).unwrap();
        create_active(&mut conn, "roland-garros-2025", "Roland Garros", 2025, None).unwrap();

        let reactivated = update(
            &mut conn,
            "australian-open-2025",
            &TournamentUpdate { is_active: Some(true), submission_deadline: None },
        )
        .unwrap()
        .unwrap();
        assert!(reactivated.is_active);
        assert_eq!(reactivated.submission_deadline, Some(deadline));
        assert!(!find_by_id(&mut conn, "roland-garros-2025").unwrap().unwrap().is_active);

        let cleared = update(
            &mut conn,
            "australian-open-2025",
            &TournamentUpdate { is_active: None, submission_deadline: Some(None) },
        )
        .unwrap()
        .unwrap();
        assert_eq!(cleared.submission_deadline, None);

        assert!(update(&mut conn, "us-open-2025", &TournamentUpdate::default()).unwrap().is_none());
    }
}
