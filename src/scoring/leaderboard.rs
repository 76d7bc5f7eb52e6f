use crate::domain::{Gender, Prediction, TournamentResult};

use super::points::{find_result, points_for_player};
use super::types::{LeaderboardEntry, Points};

/// Every result that marks a champion of `gender` in the tournament, in input order.
/// More than one entry means the results were entered inconsistently.
pub fn champion_candidates<'a>(
    results: &'a [TournamentResult],
    tournament_id: &str,
    gender: Gender,
) -> Vec<&'a TournamentResult> {
    results
        .iter()
        .filter(|r| r.tournament_id == tournament_id && r.is_champion() && gender.owns(&r.player_id))
        .collect()
}

/// The first champion result found wins when there are several.
pub fn find_champion<'a>(
    results: &'a [TournamentResult],
    tournament_id: &str,
    gender: Gender,
) -> Option<&'a TournamentResult> {
    champion_candidates(results, tournament_id, gender)
        .into_iter()
        .next()
}

pub fn score_prediction(
    prediction: &Prediction,
    results: &[TournamentResult],
    compute_remaining: bool,
) -> LeaderboardEntry {
    let tournament_id = prediction.tournament_id.as_str();
    let tournament_results: Vec<TournamentResult> = results
        .iter()
        .filter(|r| r.tournament_id == tournament_id)
        .cloned()
        .collect();

    let men_points = sum_points(prediction.picks(Gender::Men), &tournament_results, tournament_id);
    let women_points = sum_points(prediction.picks(Gender::Women), &tournament_results, tournament_id);

    let men_champion_bonus = champion_bonus(prediction, &tournament_results, Gender::Men);
    let women_champion_bonus = champion_bonus(prediction, &tournament_results, Gender::Women);

    let (men_players_remaining, women_players_remaining) = if compute_remaining {
        (
            Some(count_remaining(prediction.picks(Gender::Men), &tournament_results, tournament_id)),
            Some(count_remaining(prediction.picks(Gender::Women), &tournament_results, tournament_id)),
        )
    } else {
        (None, None)
    };

    LeaderboardEntry {
        participant_name: prediction.participant_name.clone(),
        men_points,
        women_points,
        total_points: men_points
            + women_points
            + Points::from(men_champion_bonus)
            + Points::from(women_champion_bonus),
        men_champion_bonus,
        women_champion_bonus,
        men_players_remaining,
        women_players_remaining,
    }
}

/// Scores every prediction of the tournament and sorts by total points, highest first.
/// The sort is stable: tied entries keep the order the predictions were supplied in.
pub fn build_leaderboard(
    predictions: &[Prediction],
    results: &[TournamentResult],
    tournament_id: &str,
    compute_remaining: bool,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = predictions
        .iter()
        .filter(|p| p.tournament_id == tournament_id)
        .map(|p| score_prediction(p, results, compute_remaining))
        .collect();

    entries.sort_by(|a, b| b.total_points.total_cmp(&a.total_points));
    entries
}

fn sum_points(picks: &[String], results: &[TournamentResult], tournament_id: &str) -> Points {
    picks
        .iter()
        .map(|player_id| points_for_player(player_id, results, tournament_id))
        .sum()
}

fn champion_bonus(prediction: &Prediction, results: &[TournamentResult], gender: Gender) -> u32 {
    match find_champion(results, &prediction.tournament_id, gender) {
        Some(champion) if champion.player_id == prediction.predicted_champion(gender) => 1,
        _ => 0,
    }
}

fn count_remaining(picks: &[String], results: &[TournamentResult], tournament_id: &str) -> usize {
    picks
        .iter()
        .filter(|player_id| {
            find_result(player_id, results, tournament_id).is_none_or(|r| !r.eliminated)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Round;
    use chrono::{TimeZone, Utc};

    const TOURNAMENT: &str = "australian-open-2025";

    fn result(player_id: &str, round: i64, eliminated: bool) -> TournamentResult {
        TournamentResult {
            tournament_id: TOURNAMENT.to_string(),
            player_id: player_id.to_string(),
            round_reached: Round::try_from(round).unwrap(),
            eliminated,
        }
    }

    fn ids(prefix: char, numbers: &[u32]) -> Vec<String> {
        numbers.iter().map(|n| format!("{prefix}{n}")).collect()
    }

    fn prediction(name: &str, men: &[u32], women: &[u32], men_champion: &str, women_champion: &str) -> Prediction {
        Prediction {
            participant_name: name.to_string(),
            tournament_id: TOURNAMENT.to_string(),
            men_picks: ids('h', men),
            women_picks: ids('d', women),
            predicted_men_champion: men_champion.to_string(),
            predicted_women_champion: women_champion.to_string(),
            submitted_at: Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap(),
        }
    }

    fn sample_results() -> Vec<TournamentResult> {
        vec![
            result("h3", 7, false),
            result("h1", 7, true),
            result("h2", 6, true),
            result("h40", 4, true),
            result("h50", 2, true),
            result("d1", 7, false),
            result("d5", 7, true),
            result("d33", 3, true),
        ]
    }

    #[test]
    fn test_correct_champion_pick_earns_bonus() {
        let results = vec![result("h3", 7, false)];
        let p = prediction("Anna", &[1, 2, 3, 4, 33, 40, 50, 60], &[1, 2, 3, 4, 33, 40, 50, 60], "h3", "d1");

        let entry = score_prediction(&p, &results, false);
        assert_eq!(entry.men_points, 6.0);
        assert_eq!(entry.men_champion_bonus, 1);
        assert_eq!(entry.women_points, 0.0);
        assert_eq!(entry.women_champion_bonus, 0);
        assert_eq!(entry.total_points, 7.0);
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let results = sample_results();
        let predictions = vec![
            prediction("Anna", &[1, 2, 3, 4, 33, 40, 50, 60], &[1, 2, 5, 6, 33, 34, 35, 36], "h3", "d1"),
            prediction("Ben", &[1, 2, 5, 6, 33, 40, 50, 61], &[1, 3, 5, 6, 33, 34, 35, 37], "h1", "d1"),
            prediction("Cleo", &[5, 6, 7, 8, 34, 35, 36, 37], &[2, 3, 4, 6, 38, 39, 40, 41], "h5", "d2"),
        ];

        for entry in build_leaderboard(&predictions, &results, TOURNAMENT, true) {
            assert_eq!(
                entry.total_points,
                entry.men_points
                    + entry.women_points
                    + Points::from(entry.men_champion_bonus)
                    + Points::from(entry.women_champion_bonus)
            );
        }
    }

    #[test]
    fn test_leaderboard_sorted_by_total() {
        let results = sample_results();
        let predictions = vec![
            prediction("Cleo", &[5, 6, 7, 8, 34, 35, 36, 37], &[2, 3, 4, 6, 38, 39, 40, 41], "h5", "d2"),
            prediction("Anna", &[1, 2, 3, 4, 33, 40, 50, 60], &[1, 2, 5, 6, 33, 34, 35, 36], "h3", "d1"),
            prediction("Ben", &[1, 2, 5, 6, 33, 40, 50, 61], &[1, 3, 5, 6, 33, 34, 35, 37], "h1", "d1"),
        ];

        let board = build_leaderboard(&predictions, &results, TOURNAMENT, false);
        let names: Vec<&str> = board.iter().map(|e| e.participant_name.as_str()).collect();
        assert_eq!(names, vec!["Anna", "Ben", "Cleo"]);

        // Anna: h1 5 + h2 4 + h3 6 + h40 2 + h50 0.5 = 17.5, d1 6 + d5 5 + d33 1 = 12, bonuses 2
        assert_eq!(board[0].men_points, 17.5);
        assert_eq!(board[0].women_points, 12.0);
        assert_eq!(board[0].total_points, 31.5);
        assert_eq!(board[2].total_points, 0.0);
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let results = sample_results();
        let a = prediction("A", &[1, 2, 3, 4, 33, 40, 50, 60], &[1, 2, 5, 6, 33, 34, 35, 36], "h3", "d1");
        let b = prediction("B", &[1, 2, 3, 4, 33, 40, 50, 60], &[1, 2, 5, 6, 33, 34, 35, 36], "h3", "d1");

        let board = build_leaderboard(&[a.clone(), b.clone()], &results, TOURNAMENT, false);
        assert_eq!(board[0].participant_name, "A");
        assert_eq!(board[1].participant_name, "B");

        let board = build_leaderboard(&[b, a], &results, TOURNAMENT, false);
        assert_eq!(board[0].participant_name, "B");
    }

    #[test]
    fn test_result_order_does_not_matter() {
        let predictions = vec![
            prediction("Anna", &[1, 2, 3, 4, 33, 40, 50, 60], &[1, 2, 5, 6, 33, 34, 35, 36], "h3", "d1"),
            prediction("Ben", &[1, 2, 5, 6, 33, 40, 50, 61], &[1, 3, 5, 6, 33, 34, 35, 37], "h1", "d1"),
        ];
        let results = sample_results();
        let mut reversed = results.clone();
        reversed.reverse();

        assert_eq!(
            build_leaderboard(&predictions, &results, TOURNAMENT, true),
            build_leaderboard(&predictions, &reversed, TOURNAMENT, true)
        );
    }

    #[test]
    fn test_idempotent_output() {
        let predictions = vec![
            prediction("Anna", &[1, 2, 3, 4, 33, 40, 50, 60], &[1, 2, 5, 6, 33, 34, 35, 36], "h3", "d1"),
            prediction("Ben", &[1, 2, 5, 6, 33, 40, 50, 61], &[1, 3, 5, 6, 33, 34, 35, 37], "h1", "d1"),
        ];
        let results = sample_results();

        let first = serde_json::to_vec(&build_leaderboard(&predictions, &results, TOURNAMENT, true)).unwrap();
        let second = serde_json::to_vec(&build_leaderboard(&predictions, &results, TOURNAMENT, true)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_other_tournaments_are_ignored() {
        let mut other = prediction("Other", &[3], &[1], "h3", "d1");
        other.tournament_id = "wimbledon-2025".to_string();
        let mut stray = result("h3", 7, false);
        stray.tournament_id = "wimbledon-2025".to_string();

        let board = build_leaderboard(&[other.clone()], &sample_results(), TOURNAMENT, false);
        assert!(board.is_empty());

        let entry = score_prediction(&other, &[stray], false);
        assert_eq!(entry.men_points, 6.0);
        assert_eq!(entry.men_champion_bonus, 1);
    }

    #[test]
    fn test_remaining_players() {
        let results = vec![result("h1", 3, true), result("h2", 4, false), result("d1", 2, true)];
        let p = prediction("Anna", &[1, 2, 3, 4, 33, 40, 50, 60], &[1, 2, 3, 4, 33, 40, 50, 60], "h2", "d2");

        let entry = score_prediction(&p, &results, true);
        assert_eq!(entry.men_players_remaining, Some(7));
        assert_eq!(entry.women_players_remaining, Some(7));

        let entry = score_prediction(&p, &results, false);
        assert_eq!(entry.men_players_remaining, None);
    }

    #[test]
    fn test_duplicate_champions_first_wins() {
        let results = vec![result("h3", 7, false), result("h1", 7, false), result("d2", 7, false)];

        assert_eq!(champion_candidates(&results, TOURNAMENT, Gender::Men).len(), 2);
        assert_eq!(find_champion(&results, TOURNAMENT, Gender::Men).unwrap().player_id, "h3");
        assert_eq!(find_champion(&results, TOURNAMENT, Gender::Women).unwrap().player_id, "d2");

        let p = prediction("Ben", &[1, 2, 3, 4, 33, 40, 50, 60], &[1, 2, 3, 4, 33, 40, 50, 60], "h1", "d2");
        let entry = score_prediction(&p, &results, false);
        assert_eq!(entry.men_champion_bonus, 0);
        assert_eq!(entry.women_champion_bonus, 1);
    }

    #[test]
    fn test_unknown_player_ids_score_zero() {
        let p = prediction("Anna", &[999], &[998], "h999", "d998");
        let entry = score_prediction(&p, &sample_results(), true);
        assert_eq!(entry.total_points, 0.0);
        assert_eq!(entry.men_players_remaining, Some(1));
    }
}
