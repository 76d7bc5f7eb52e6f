use std::collections::{HashMap, HashSet};

use anyhow::Context;
use log::{info, warn};

use crate::database::{self, DbConn};
use crate::domain::{Gender, Player};

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub roster_size: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("No valid players found in CSV")]
    Empty,
    #[error("ranking {ranking} is given to both {first} and {second}")]
    DuplicateRanking {
        ranking: u32,
        first: String,
        second: String,
    },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

struct RosterLine {
    name: String,
    ranking: Option<u32>,
    line_number: u32,
}

/// Parses one player per line: `ranking,name`, `ranking;name`, `name,ranking` or a bare
/// name. Without a usable ranking the 1-based line number is used, moved up to the next
/// ranking nobody else holds. Ids follow ranking order.
pub fn parse_roster_csv(csv: &str, gender: Gender) -> Result<Vec<Player>, ImportError> {
    let lines: Vec<RosterLine> = csv
        .trim()
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(line.trim(), idx as u32 + 1))
        .collect();
    if lines.is_empty() {
        return Err(ImportError::Empty);
    }

    let mut explicit: HashMap<u32, &str> = HashMap::new();
    for line in &lines {
        if let Some(ranking) = line.ranking {
            if let Some(first) = explicit.insert(ranking, &line.name) {
                return Err(ImportError::DuplicateRanking {
                    ranking,
                    first: first.to_string(),
                    second: line.name.clone(),
                });
            }
        }
    }
    let mut taken: HashSet<u32> = explicit.into_keys().collect();

    let mut players: Vec<Player> = lines
        .into_iter()
        .map(|line| {
            let ranking = line.ranking.unwrap_or_else(|| {
                let mut fallback = line.line_number;
                while taken.contains(&fallback) {
                    fallback += 1;
                }
                taken.insert(fallback);
                fallback
            });
            Player {
                id: String::new(),
                name: line.name,
                ranking,
                gender,
            }
        })
        .collect();

    players.sort_by_key(|p| p.ranking);
    assign_ids(&mut players, gender);
    Ok(players)
}

fn parse_line(line: &str, line_number: u32) -> Option<RosterLine> {
    if line.is_empty() {
        return None;
    }

    let parts: Vec<&str> = line.split([',', ';']).map(str::trim).collect();
    let (name, ranking) = match parts.as_slice() {
        [first, second, ..] => match parse_ranking(first) {
            Some(ranking) => (*second, Some(ranking)),
            None => (*first, parse_ranking(second)),
        },
        _ => (line, None),
    };

    if name.is_empty() {
        return None;
    }

    Some(RosterLine {
        name: name.to_string(),
        ranking,
        line_number,
    })
}

fn parse_ranking(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|r| *r > 0)
}

fn assign_ids(players: &mut [Player], gender: Gender) {
    for (idx, player) in players.iter_mut().enumerate() {
        player.id = gender.player_id(idx as u32 + 1);
    }
}

/// Either replaces the roster or appends players with unseen names (case-insensitive).
/// An appended player may not take a ranking already in the roster.
/// The result is re-sorted by ranking and renumbered.
pub fn merge_roster(
    existing: Vec<Player>,
    incoming: Vec<Player>,
    gender: Gender,
    replace: bool,
) -> Result<Vec<Player>, ImportError> {
    let mut roster = if replace {
        incoming
    } else {
        let mut roster = existing;
        for player in incoming {
            let name = player.name.to_lowercase();
            if roster.iter().any(|p| p.name.to_lowercase() == name) {
                continue;
            }
            if let Some(holder) = roster.iter().find(|p| p.ranking == player.ranking) {
                return Err(ImportError::DuplicateRanking {
                    ranking: player.ranking,
                    first: holder.name.clone(),
                    second: player.name,
                });
            }
            roster.push(player);
        }
        roster
    };

    roster.sort_by_key(|p| p.ranking);
    assign_ids(&mut roster, gender);
    Ok(roster)
}

/// Loads a CSV roster for one gender into the database.
pub struct RosterImportService<'a> {
    conn: &'a mut DbConn,
}

impl<'a> RosterImportService<'a> {
    pub fn new(conn: &'a mut DbConn) -> Self {
        Self { conn }
    }

    pub fn run(&mut self, csv: &str, gender: Gender, replace: bool) -> Result<ImportSummary, ImportError> {
        info!("=== Importing {} roster ===", gender);

        let incoming = parse_roster_csv(csv, gender)?;
        let imported = incoming.len();
        info!("  → Parsed {} players", imported);

        let existing = database::players::list_by_gender(self.conn, gender)?;
        let roster = merge_roster(existing, incoming, gender, replace)?;

        self.warn_about_stale_references()?;

        database::players::replace_gender(self.conn, gender, &roster)
            .with_context(|| format!("Failed to store {} roster", gender))?;
        info!("  → Stored roster of {} players", roster.len());

        Ok(ImportSummary {
            imported,
            roster_size: roster.len(),
        })
    }

    fn warn_about_stale_references(&mut self) -> anyhow::Result<()> {
        let Some(active) = database::tournaments::find_active(self.conn)? else {
            return Ok(());
        };

        let predictions = database::predictions::list_by_tournament(self.conn, &active.id)?.len();
        let results = database::results::list(self.conn, Some(&active.id))?.len();
        if predictions > 0 || results > 0 {
            warn!(
                "Roster import renumbers player ids while {} has {} predictions and {} results referencing them",
                active.id, predictions, results
            );
        }
        Ok(())
    }
}
