use crate::domain::{Round, TournamentResult};

use super::types::{PlayerPoints, Points};

/// Extra point for actually winning the final, on top of the final's base value.
pub const CHAMPION_ROUND_BONUS: Points = 1.0;

pub fn round_points(round: Round) -> Points {
    match round {
        Round::First => 0.0,
        Round::Second => 0.5,
        Round::Third => 1.0,
        Round::RoundOf16 => 2.0,
        Round::QuarterFinal => 3.0,
        Round::SemiFinal => 4.0,
        Round::Final => 5.0,
    }
}

pub fn find_result<'a>(
    player_id: &str,
    results: &'a [TournamentResult],
    tournament_id: &str,
) -> Option<&'a TournamentResult> {
    results
        .iter()
        .find(|r| r.player_id == player_id && r.tournament_id == tournament_id)
}

/// Points credited to one player. A player without a result has not scored yet.
pub fn points_for_player(
    player_id: &str,
    results: &[TournamentResult],
    tournament_id: &str,
) -> Points {
    find_result(player_id, results, tournament_id)
        .map(points_for_result)
        .unwrap_or(0.0)
}

fn points_for_result(result: &TournamentResult) -> Points {
    let base = round_points(result.round_reached);
    if result.is_champion() {
        base + CHAMPION_ROUND_BONUS
    } else {
        base
    }
}

pub fn player_point_details(
    player_ids: &[String],
    results: &[TournamentResult],
    tournament_id: &str,
) -> Vec<PlayerPoints> {
    player_ids
        .iter()
        .map(|player_id| match find_result(player_id, results, tournament_id) {
            Some(result) => PlayerPoints {
                player_id: player_id.clone(),
                round_reached: Some(result.round_reached),
                points: points_for_result(result),
                is_champion: result.is_champion(),
                eliminated: result.eliminated,
            },
            None => PlayerPoints {
                player_id: player_id.clone(),
                round_reached: None,
                points: 0.0,
                is_champion: false,
                eliminated: false,
            },
        })
        .collect()
}
