//! Pairwise compatibility scoring.
//!
//! Three independent sub-scores, each in [0, 1]:
//! - **Game preference overlap**: Jaccard index over the two game libraries
//! - **Time-slot compatibility**: shared minutes relative to combined
//!   declared minutes across two flat schedules
//! - **Success rate**: weighted acceptance history, neutral prior for
//!   players with no history
//!
//! All functions are pure and total: every input combination, including
//! empty lists, maps to a defined numeric result.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::availability::{flatten_days, DaySlot};
use crate::error::ValidationError;
use crate::player::{InteractionKind, InteractionRecord, PlayerProfile};

/// Contribution of an accepted interaction to the success rate.
const ACCEPTED_WEIGHT: f64 = 1.2;
/// Contribution of an interested interaction to the success rate.
const INTERESTED_WEIGHT: f64 = 1.0;
/// Success-rate score for players with no interaction history.
const NEUTRAL_SUCCESS_RATE: f64 = 0.5;

/// Jaccard similarity of two game-id lists, treated as sets.
///
/// Duplicate entries never change the result. Either list being empty maps
/// to `0.0` (no data means no match, and avoids an empty union).
pub fn game_preference_overlap(games_a: &[String], games_b: &[String]) -> f64 {
    let a: HashSet<&str> = games_a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = games_b.iter().map(String::as_str).collect();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();
    intersection as f64 / union as f64
}

/// Time-slot compatibility of two flat schedules.
///
/// Sums same-date pairwise overlap minutes, divides by the combined raw
/// minutes of both schedules, doubles, and caps at 1. The denominator is the
/// raw concatenation (not deduplicated, not merged), which double-counts
/// self-overlapping input and penalizes asymmetric availability sizes; a
/// pair with near-identical slots approaches 1. Either schedule being empty
/// maps to `0.0`.
pub fn time_slot_compatibility(schedule_a: &[DaySlot], schedule_b: &[DaySlot]) -> f64 {
    if schedule_a.is_empty() || schedule_b.is_empty() {
        return 0.0;
    }

    let mut overlap_minutes: u64 = 0;
    for a in schedule_a {
        for b in schedule_b {
            if a.date != b.date {
                continue;
            }
            let start = a.start.max(b.start);
            let end = a.end.min(b.end);
            if start < end {
                overlap_minutes += (end - start) as u64;
            }
        }
    }

    let total_minutes: u64 = schedule_a
        .iter()
        .chain(schedule_b.iter())
        .map(|slot| slot.duration_minutes() as u64)
        .sum();

    if total_minutes == 0 {
        return 0.0;
    }

    ((2 * overlap_minutes) as f64 / total_minutes as f64).min(1.0)
}

/// Interaction counters for one player's history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementSummary {
    pub total: u32,
    pub accepted: u32,
    pub interested: u32,
    pub declined: u32,
}

impl EngagementSummary {
    /// The success-rate score these counters produce.
    ///
    /// Accepted interactions weigh 1.2, interested 1.0, declined 0; the sum
    /// is normalized by `total * 1.2` and clamped to 1. No history at all
    /// scores the neutral prior 0.5.
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            return NEUTRAL_SUCCESS_RATE;
        }

        let score =
            self.accepted as f64 * ACCEPTED_WEIGHT + self.interested as f64 * INTERESTED_WEIGHT;
        (score / (self.total as f64 * ACCEPTED_WEIGHT)).min(1.0)
    }
}

/// Count one player's interactions by kind.
pub fn summarize_engagement(player_id: &str, interactions: &[InteractionRecord]) -> EngagementSummary {
    let mut summary = EngagementSummary::default();

    for record in interactions.iter().filter(|r| r.player_id == player_id) {
        summary.total += 1;
        match record.kind {
            InteractionKind::Accepted => summary.accepted += 1,
            InteractionKind::Interested => summary.interested += 1,
            InteractionKind::Declined => summary.declined += 1,
        }
    }

    summary
}

/// Historical success rate for one player, `0.5` when no history exists.
pub fn success_rate(player_id: &str, interactions: &[InteractionRecord]) -> f64 {
    summarize_engagement(player_id, interactions).rate()
}

/// Weights combining the three sub-scores into the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub preference: f64,
    pub time_compatibility: f64,
    pub success_rate: f64,
}

impl ScoreWeights {
    /// Combine sub-scores into the weighted overall score.
    ///
    /// The default weights sum to 1, so no renormalization happens here.
    pub fn combine(&self, preference: f64, time_compatibility: f64, success_rate: f64) -> f64 {
        self.preference * preference
            + self.time_compatibility * time_compatibility
            + self.success_rate * success_rate
    }

    /// Validate that all weights are in [0.0, 1.0].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let weights = [
            ("preference", self.preference),
            ("time_compatibility", self.time_compatibility),
            ("success_rate", self.success_rate),
        ];

        for (field, value) in weights {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::InvalidWeight { field, value });
            }
        }

        Ok(())
    }
}

impl Default for ScoreWeights {
    /// The fixed production weights: 0.5 preference, 0.3 time, 0.2 success.
    fn default() -> Self {
        Self {
            preference: 0.5,
            time_compatibility: 0.3,
            success_rate: 0.2,
        }
    }
}

/// Complete compatibility breakdown for one subject/candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub preference: f64,
    pub time_compatibility: f64,
    pub success_rate: f64,
    pub overall: f64,
}

/// Score a subject/candidate pair.
///
/// Each profile's availability is flattened to a per-date slot list first.
/// The success rate is the candidate's: scored against the candidate's id
/// over the candidate's supplied interaction list.
pub fn score_pair(
    subject: &PlayerProfile,
    candidate: &PlayerProfile,
    candidate_interactions: &[InteractionRecord],
    weights: &ScoreWeights,
) -> MatchScore {
    let preference = game_preference_overlap(&subject.game_ids(), &candidate.game_ids());
    let time_compatibility = time_slot_compatibility(
        &flatten_days(&subject.availability),
        &flatten_days(&candidate.availability),
    );
    let success = success_rate(&candidate.id, candidate_interactions);

    MatchScore {
        preference,
        time_compatibility,
        success_rate: success,
        overall: weights.combine(preference, time_compatibility, success),
    }
}
