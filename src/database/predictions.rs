use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::PredictionFilter;
use crate::domain::Prediction;

const SELECT_COLUMNS: &str = "SELECT participant_name, tournament_id, men_picks, women_picks, predicted_men_champion, predicted_women_champion, submitted_at FROM predictions";

fn parse_picks(idx: usize, json: String) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(&json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_prediction_row(row: &rusqlite::Row) -> rusqlite::Result<Prediction> {
    Ok(Prediction {
        participant_name: row.get(0)?,
        tournament_id: row.get(1)?,
        men_picks: parse_picks(2, row.get(2)?)?,
        women_picks: parse_picks(3, row.get(3)?)?,
        predicted_men_champion: row.get(4)?,
        predicted_women_champion: row.get(5)?,
        submitted_at: row.get(6)?,
    })
}

/// Rows come back in first-submission order; a resubmission keeps its original slot.
pub fn list(conn: &mut DbConn, filter: &PredictionFilter) -> Result<Vec<Prediction>> {
    let sql = format!(
        "{SELECT_COLUMNS} WHERE (?1 IS NULL OR tournament_id = ?1) AND (?2 IS NULL OR participant_name = ?2) ORDER BY rowid"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(
            params![filter.tournament_id, filter.participant_name],
            parse_prediction_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_tournament(conn: &mut DbConn, tournament_id: &str) -> Result<Vec<Prediction>> {
    list(
        conn,
        &PredictionFilter {
            tournament_id: Some(tournament_id.to_string()),
            participant_name: None,
        },
    )
}

pub fn find(conn: &mut DbConn, participant_name: &str, tournament_id: &str) -> Result<Option<Prediction>> {
    let sql = format!("{SELECT_COLUMNS} WHERE participant_name = ?1 AND tournament_id = ?2");

    conn.query_row(&sql, params![participant_name, tournament_id], parse_prediction_row)
        .optional()
        .context("Failed to query prediction")
}

/// Replaces any earlier prediction of the participant for the same tournament.
pub fn upsert_prediction(conn: &mut DbConn, prediction: &Prediction) -> Result<Prediction> {
    let sql = "INSERT INTO predictions (participant_name, tournament_id, men_picks, women_picks, predicted_men_champion, predicted_women_champion, submitted_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT (participant_name, tournament_id) DO UPDATE SET
            men_picks = excluded.men_picks,
            women_picks = excluded.women_picks,
            predicted_men_champion = excluded.predicted_men_champion,
            predicted_women_champion = excluded.predicted_women_champion,
            submitted_at = excluded.submitted_at";

    conn.execute(
        sql,
        params![
            prediction.participant_name,
            prediction.tournament_id,
            serde_json::to_string(&prediction.men_picks)?,
            serde_json::to_string(&prediction.women_picks)?,
            prediction.predicted_men_champion,
            prediction.predicted_women_champion,
            prediction.submitted_at,
        ],
    )
    .context("Failed to upsert prediction")?;

    find(conn, &prediction.participant_name, &prediction.tournament_id)?
        .context("Prediction missing after upsert")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_connection;
    use chrono::{TimeZone, Utc};

    fn prediction(name: &str, tournament_id: &str, champion: &str) -> Prediction {
        Prediction {
            participant_name: name.to_string(),
            tournament_id: tournament_id.to_string(),
            men_picks: vec!["h1".to_string(), "h40".to_string()],
            women_picks: vec!["d2".to_string(), "d50".to_string()],
            predicted_men_champion: champion.to_string(),
            predicted_women_champion: "d2".to_string(),
            submitted_at: Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_resubmission_overwrites_in_place() {
        let mut conn = test_connection();
        upsert_prediction(&mut conn, &prediction("Anna", "ao-2025", "h1")).unwrap();
        upsert_prediction(&mut conn, &prediction("Ben", "ao-2025", "h1")).unwrap();
        let stored = upsert_prediction(&mut conn, &prediction("Anna", "ao-2025", "h40")).unwrap();
        assert_eq!(stored.predicted_men_champion, "h40");

        let all = list_by_tournament(&mut conn, "ao-2025").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].participant_name, "Anna");
        assert_eq!(all[0].predicted_men_champion, "h40");
        assert_eq!(all[0].men_picks, vec!["h1", "h40"]);
    }

    #[test]
    fn test_filters() {
        let mut conn = test_connection();
        upsert_prediction(&mut conn, &prediction("Anna", "ao-2025", "h1")).unwrap();
        upsert_prediction(&mut conn, &prediction("Anna", "rg-2025", "h1")).unwrap();
        upsert_prediction(&mut conn, &prediction("Ben", "rg-2025", "h1")).unwrap();

        assert_eq!(list(&mut conn, &PredictionFilter::default()).unwrap().len(), 3);
        let anna = PredictionFilter { tournament_id: None, participant_name: Some("Anna".to_string()) };
        assert_eq!(list(&mut conn, &anna).unwrap().len(), 2);
        assert_eq!(list_by_tournament(&mut conn, "rg-2025").unwrap().len(), 2);
        assert!(find(&mut conn, "Ben", "ao-2025").unwrap().is_none());
    }
}
