use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::{ResultUpdate, UpsertOutcome};
use crate::domain::{Round, TournamentResult};

const SELECT_COLUMNS: &str = "SELECT tournament_id, player_id, round_reached, eliminated FROM results";

fn parse_result_row(row: &rusqlite::Row) -> rusqlite::Result<TournamentResult> {
    let round: i64 = row.get(2)?;
    Ok(TournamentResult {
        tournament_id: row.get(0)?,
        player_id: row.get(1)?,
        round_reached: Round::try_from(round).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Integer, Box::new(e))
        })?,
        eliminated: row.get(3)?,
    })
}

pub fn list(conn: &mut DbConn, tournament_id: Option<&str>) -> Result<Vec<TournamentResult>> {
    let sql = format!("{SELECT_COLUMNS} WHERE (?1 IS NULL OR tournament_id = ?1) ORDER BY rowid");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_result_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn find(conn: &mut DbConn, tournament_id: &str, player_id: &str) -> Result<Option<TournamentResult>> {
    let sql = format!("{SELECT_COLUMNS} WHERE tournament_id = ?1 AND player_id = ?2");

    conn.query_row(&sql, params![tournament_id, player_id], parse_result_row)
        .optional()
        .context("Failed to query result")
}

/// Existing records only change the fields given. A new record needs a round;
/// `Ok(None)` is returned when it is missing.
pub fn upsert_result(
    conn: &mut DbConn,
    tournament_id: &str,
    player_id: &str,
    update: &ResultUpdate,
) -> Result<Option<(TournamentResult, UpsertOutcome)>> {
    let (merged, outcome) = match find(conn, tournament_id, player_id)? {
        Some(existing) => (
            TournamentResult {
                round_reached: update.round_reached.unwrap_or(existing.round_reached),
                eliminated: update.eliminated.unwrap_or(existing.eliminated),
                ..existing
            },
            UpsertOutcome::Updated,
        ),
        None => match update.round_reached {
            Some(round_reached) => (
                TournamentResult {
                    tournament_id: tournament_id.to_string(),
                    player_id: player_id.to_string(),
                    round_reached,
                    eliminated: update.eliminated.unwrap_or(false),
                },
                UpsertOutcome::Created,
            ),
            None => return Ok(None),
        },
    };

    conn.execute(
        "INSERT INTO results (tournament_id, player_id, round_reached, eliminated) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (tournament_id, player_id) DO UPDATE SET round_reached = excluded.round_reached, eliminated = excluded.eliminated",
        params![merged.tournament_id, merged.player_id, merged.round_reached.number(), merged.eliminated],
    )
    .context("Failed to upsert result")?;

    Ok(Some((merged, outcome)))
}

pub fn delete_result(conn: &mut DbConn, tournament_id: &str, player_id: &str) -> Result<bool> {
    let deleted = conn
        .execute(
            "DELETE FROM results WHERE tournament_id = ?1 AND player_id = ?2",
            params![tournament_id, player_id],
        )
        .context("Failed to delete result")?;
    Ok(deleted > 0)
}
