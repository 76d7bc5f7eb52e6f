pub mod roster;

pub use roster::{
    SelectionStats, ValidationResult, selection_stats, validate_champion_pick,
    validate_full_prediction, validate_selection,
};
