use std::collections::HashSet;

use serde::Serialize;

use crate::config::settings::RosterSettings;
use crate::domain::{Gender, Player};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Bucket counts of a selection and how much of each quota is left.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionStats {
    pub top8: usize,
    pub top32: usize,
    pub outside_top32: usize,
    pub top8_remaining: i64,
    pub top32_remaining: i64,
    pub outside_top32_needed: usize,
}

pub fn selection_stats(players: &[Player], rules: &RosterSettings) -> SelectionStats {
    let top8 = count_within(players, rules.top_tier_cutoff);
    let top32 = count_within(players, rules.mid_tier_cutoff);
    let outside_top32 = players.len() - top32;

    SelectionStats {
        top8,
        top32,
        outside_top32,
        top8_remaining: rules.max_top_tier as i64 - top8 as i64,
        top32_remaining: rules.max_mid_tier as i64 - top32 as i64,
        outside_top32_needed: rules.min_outside_mid_tier.saturating_sub(outside_top32),
    }
}

fn count_within(players: &[Player], cutoff: u32) -> usize {
    players.iter().filter(|p| p.ranking <= cutoff).count()
}

/// Checks one gender's picks against the ranking quotas. Reports every broken rule.
pub fn validate_selection(
    players: &[Player],
    gender: Gender,
    rules: &RosterSettings,
) -> ValidationResult {
    let label = gender.label();
    let mut errors = Vec::new();

    if players.len() != rules.roster_size {
        errors.push(format!(
            "{label}: exactly {} players must be selected (currently: {})",
            rules.roster_size,
            players.len()
        ));
    }

    let distinct: HashSet<&str> = players.iter().map(|p| p.id.as_str()).collect();
    if distinct.len() != players.len() {
        errors.push(format!("{label}: players must be distinct"));
    }

    if players.iter().any(|p| p.gender != gender) {
        errors.push(format!("{label}: players of the wrong gender selected"));
    }

    let stats = selection_stats(players, rules);

    if stats.top8 > rules.max_top_tier {
        errors.push(format!(
            "{label}: at most {} players from the top {} allowed (currently: {})",
            rules.max_top_tier, rules.top_tier_cutoff, stats.top8
        ));
    }

    if stats.top32 > rules.max_mid_tier {
        errors.push(format!(
            "{label}: at most {} players from the top {} allowed (currently: {})",
            rules.max_mid_tier, rules.mid_tier_cutoff, stats.top32
        ));
    }

    if stats.outside_top32 < rules.min_outside_mid_tier {
        errors.push(format!(
            "{label}: at least {} players from outside the top {} required (currently: {})",
            rules.min_outside_mid_tier, rules.mid_tier_cutoff, stats.outside_top32
        ));
    }

    ValidationResult::from_errors(errors)
}

pub fn validate_champion_pick(champion_id: &str, selection: &[Player]) -> ValidationResult {
    let mut errors = Vec::new();
    if !selection.iter().any(|p| p.id == champion_id) {
        errors.push("the predicted champion must be one of the selected players".to_string());
    }
    ValidationResult::from_errors(errors)
}

/// Champion membership is only checked for a gender whose roster already passed.
pub fn validate_full_prediction(
    men: &[Player],
    women: &[Player],
    men_champion: &str,
    women_champion: &str,
    rules: &RosterSettings,
) -> ValidationResult {
    let mut errors = Vec::new();

    let selections = [(Gender::Men, men, men_champion), (Gender::Women, women, women_champion)];
    let roster_results: Vec<ValidationResult> = selections
        .iter()
        .map(|(gender, players, _)| validate_selection(players, *gender, rules))
        .collect();

    for result in &roster_results {
        errors.extend(result.errors.iter().cloned());
    }

    for ((gender, players, champion), roster) in selections.iter().zip(&roster_results) {
        if roster.valid {
            let champion_result = validate_champion_pick(champion, players);
            errors.extend(
                champion_result
                    .errors
                    .into_iter()
                    .map(|e| format!("{}: {e}", gender.label())),
            );
        }
    }

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(gender: Gender, ranking: u32) -> Player {
        Player {
            id: gender.player_id(ranking),
            name: format!("Player {ranking}"),
            ranking,
            gender,
        }
    }

    fn roster(gender: Gender, rankings: &[u32]) -> Vec<Player> {
        rankings.iter().map(|&r| player(gender, r)).collect()
    }

    #[test]
    fn test_valid_selection() {
        let rules = RosterSettings::default();
        let men = roster(Gender::Men, &[1, 2, 3, 4, 10, 20, 40, 50]);

        let result = validate_selection(&men, Gender::Men, &rules);
        assert!(result.valid, "{:?}", result.errors);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_too_many_top8_reports_single_error() {
        let rules = RosterSettings::default();
        let men = roster(Gender::Men, &[1, 2, 3, 4, 5, 20, 40, 50]);

        let result = validate_selection(&men, Gender::Men, &rules);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("top 8"), "{}", result.errors[0]);
    }

    #[test]
    fn test_all_violations_reported_together() {
        let rules = RosterSettings::default();
        let mut women = roster(Gender::Women, &[1, 2, 3, 4, 5, 6, 7]);
        women.push(player(Gender::Men, 9));

        let result = validate_selection(&women, Gender::Women, &rules);
        assert!(!result.valid);
        // wrong gender, top-8 quota, top-32 quota, outside top-32 minimum
        assert_eq!(result.errors.len(), 4);
        assert!(result.errors.iter().all(|e| e.starts_with("Women:")));
    }

    #[test]
    fn test_wrong_count() {
        let rules = RosterSettings::default();
        let men = roster(Gender::Men, &[1, 10, 40, 50]);

        let result = validate_selection(&men, Gender::Men, &rules);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("exactly 8"));
    }

    #[test]
    fn test_top32_quota_counts_top8_players() {
        let rules = RosterSettings::default();
        let men = roster(Gender::Men, &[1, 2, 3, 4, 10, 20, 30, 50]);

        let result = validate_selection(&men, Gender::Men, &rules);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].contains("top 32"));
        assert!(result.errors[1].contains("outside the top 32"));
    }

    #[test]
    fn test_repeated_player_is_rejected() {
        let rules = RosterSettings::default();
        let men = vec![player(Gender::Men, 40); 8];

        let result = validate_selection(&men, Gender::Men, &rules);
        assert!(!result.valid);
        assert!(result.errors.contains(&"Men: players must be distinct".to_string()));

        let mut women = roster(Gender::Women, &[1, 2, 3, 4, 10, 20, 40, 50]);
        women[7] = player(Gender::Women, 40);
        let result = validate_selection(&women, Gender::Women, &rules);
        assert_eq!(result.errors, vec!["Women: players must be distinct".to_string()]);
    }

    #[test]
    fn test_champion_pick() {
        let men = roster(Gender::Men, &[1, 2, 3, 4, 10, 20, 40, 50]);
        assert!(validate_champion_pick("h3", &men).valid);
        assert!(!validate_champion_pick("h5", &men).valid);
    }

    #[test]
    fn test_full_prediction_skips_champion_check_for_invalid_roster() {
        let rules = RosterSettings::default();
        let men = roster(Gender::Men, &[1, 2, 3, 4, 5, 20, 40, 50]);
        let women = roster(Gender::Women, &[1, 2, 3, 4, 10, 20, 40, 50]);

        let result = validate_full_prediction(&men, &women, "h99", "d99", &rules);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].starts_with("Men: at most 4"));
        assert_eq!(
            result.errors[1],
            "Women: the predicted champion must be one of the selected players"
        );
    }

    #[test]
    fn test_full_prediction_valid() {
        let rules = RosterSettings::default();
        let men = roster(Gender::Men, &[1, 2, 3, 4, 10, 20, 40, 50]);
        let women = roster(Gender::Women, &[5, 6, 7, 8, 9, 31, 33, 100]);

        let result = validate_full_prediction(&men, &women, "h1", "d100", &rules);
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn test_selection_stats() {
        let rules = RosterSettings::default();
        let men = roster(Gender::Men, &[1, 2, 10, 40]);

        let stats = selection_stats(&men, &rules);
        assert_eq!(stats.top8, 2);
        assert_eq!(stats.top32, 3);
        assert_eq!(stats.outside_top32, 1);
        assert_eq!(stats.top8_remaining, 2);
        assert_eq!(stats.top32_remaining, 3);
        assert_eq!(stats.outside_top32_needed, 1);
    }
}
