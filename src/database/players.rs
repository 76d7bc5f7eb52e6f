use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use crate::domain::{Gender, Player};

const SELECT_COLUMNS: &str = "SELECT id, name, ranking, gender FROM players";

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    let gender: String = row.get(3)?;
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        ranking: row.get(2)?,
        gender: gender.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?,
    })
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Player>> {
    let sql = format!("{SELECT_COLUMNS} ORDER BY gender, ranking, rowid");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_gender(conn: &mut DbConn, gender: Gender) -> Result<Vec<Player>> {
    let sql = format!("{SELECT_COLUMNS} WHERE gender = ?1 ORDER BY ranking, rowid");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![gender.as_str()], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn find_by_id(conn: &mut DbConn, id: &str) -> Result<Option<Player>> {
    let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

/// Next free id for the gender: prefix plus one more than the highest numeric suffix.
pub fn next_id(conn: &mut DbConn, gender: Gender) -> Result<String> {
    let highest = list_by_gender(conn, gender)?
        .iter()
        .filter_map(|p| p.id.get(1..).and_then(|n| n.parse::<u32>().ok()))
        .max()
        .unwrap_or(0);
    Ok(gender.player_id(highest + 1))
}

pub fn insert_player(conn: &mut DbConn, player: &Player) -> Result<Player> {
    let sql = "INSERT INTO players (id, name, ranking, gender) VALUES (?1, ?2, ?3, ?4) RETURNING id, name, ranking, gender";

    conn.query_row(
        sql,
        params![player.id, player.name, player.ranking, player.gender.as_str()],
        parse_player_row,
    )
    .context("Failed to insert player")
}

pub fn update_player(conn: &mut DbConn, id: &str, name: &str, ranking: u32) -> Result<Option<Player>> {
    let sql = "UPDATE players SET name = ?1, ranking = ?2 WHERE id = ?3 RETURNING id, name, ranking, gender";

    conn.query_row(sql, params![name, ranking, id], parse_player_row)
        .optional()
        .context("Failed to update player")
}

pub fn delete_player(conn: &mut DbConn, id: &str) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM players WHERE id = ?1", params![id])
        .context("Failed to delete player")?;
    Ok(deleted > 0)
}

/// Swaps a gender's whole roster in one transaction.
pub fn replace_gender(conn: &mut DbConn, gender: Gender, players: &[Player]) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM players WHERE gender = ?1", params![gender.as_str()])?;
    {
        let mut stmt = tx.prepare("INSERT INTO players (id, name, ranking, gender) VALUES (?1, ?2, ?3, ?4)")?;
        for player in players {
            stmt.execute(params![player.id, player.name, player.ranking, gender.as_str()])
                .with_context(|| format!("Failed to insert player {}", player.id))?;
        }
    }
    tx.commit().context("Failed to commit roster replacement")
}
