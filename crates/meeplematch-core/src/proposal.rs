//! Session proposal generation.
//!
//! Scores a subject player against a candidate pool and materializes ranked
//! proposals for the pairs that clear every gate:
//! - Overall compatibility above the configured threshold
//! - At least one game in common
//! - At least one overlapping time slot
//!
//! The engine only ever produces `pending` proposals; every later status
//! transition belongs to collaborators (persistence, notification handling).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::availability::{flatten_days, overlap_slots};
use crate::player::{PlayerId, PlayerRecord};
use crate::scoring::{score_pair, MatchScore, ScoreWeights};

/// How long a proposal stays open before it expires.
pub const PROPOSAL_TTL_DAYS: i64 = 7;

/// Lifecycle state of a session proposal.
///
/// `pending` can move to any of the other states; all of those are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Declined,
    Expired,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Expired => "expired",
        }
    }

    /// Whether this state admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether the state machine allows moving to `next`.
    pub fn can_transition_to(&self, next: ProposalStatus) -> bool {
        matches!(self, Self::Pending) && next != Self::Pending
    }
}

/// Threshold category a pair's scores triggered.
///
/// Signals are the source of truth for *why* a pair matched; the reason
/// string is presentation rendered over them via [`MatchSignal::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSignal {
    StrongPreference,
    GoodOverlap,
    ExcellentSchedule,
    GoodSchedule,
    HighEngagement,
}

impl MatchSignal {
    pub fn label(&self) -> &'static str {
        match self {
            Self::StrongPreference => "Strong game preference match",
            Self::GoodOverlap => "Good game overlap",
            Self::ExcellentSchedule => "Excellent schedule compatibility",
            Self::GoodSchedule => "Good availability match",
            Self::HighEngagement => "High engagement history",
        }
    }
}

/// Derive the triggered signals from a pair's score breakdown.
pub fn signals_for(score: &MatchScore) -> Vec<MatchSignal> {
    let mut signals = Vec::new();

    if score.preference > 0.7 {
        signals.push(MatchSignal::StrongPreference);
    } else if score.preference > 0.4 {
        signals.push(MatchSignal::GoodOverlap);
    }

    if score.time_compatibility > 0.7 {
        signals.push(MatchSignal::ExcellentSchedule);
    } else if score.time_compatibility > 0.4 {
        signals.push(MatchSignal::GoodSchedule);
    }

    if score.success_rate > 0.8 {
        signals.push(MatchSignal::HighEngagement);
    }

    signals
}

/// Render the joined reason text for a set of signals.
pub fn build_reason(signals: &[MatchSignal]) -> String {
    if signals.is_empty() {
        return "Potential match based on overall compatibility".to_string();
    }

    signals
        .iter()
        .map(MatchSignal::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Supporting detail attached to a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalMetadata {
    /// All shared game ids, in the subject's library order.
    pub common_games: Vec<String>,
    /// Raw overlap-fragment count between the two schedules.
    pub overlapping_slot_count: usize,
}

/// A pending session proposal emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionProposal {
    pub id: String,
    pub proposed_to: PlayerId,
    /// Subject first, candidate second.
    pub participants: Vec<PlayerId>,
    pub game_id: String,
    pub game_name: String,
    pub game_image: Option<String>,
    /// Start of the selected overlap slot.
    pub proposed_at: DateTime<Utc>,
    pub status: ProposalStatus,
    pub signals: Vec<MatchSignal>,
    pub reason: String,
    #[serde(flatten)]
    pub score: MatchScore,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub metadata: ProposalMetadata,
}

impl SessionProposal {
    /// Check whether this proposal has passed its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Proposal generation configuration.
#[derive(Debug, Clone)]
pub struct ProposalConfig {
    /// Pairs scoring at or below this overall value are discarded.
    pub min_overall_score: f64,
    /// Sub-score weights for the overall score.
    pub weights: ScoreWeights,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            min_overall_score: 0.3,
            weights: ScoreWeights::default(),
        }
    }
}

/// Match proposal engine.
pub struct ProposalEngine {
    config: ProposalConfig,
}

impl ProposalEngine {
    /// Create a new engine with default config
    pub fn new() -> Self {
        Self {
            config: ProposalConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: ProposalConfig) -> Self {
        Self { config }
    }

    /// Generate session proposals for a subject against a candidate pool.
    ///
    /// # Arguments
    /// * `subject` - The player proposals are generated for
    /// * `candidates` - Candidate pool, each with their own interaction history
    /// * `limit` - Maximum number of proposals to emit
    /// * `now` - Creation instant, also anchors the expiry
    ///
    /// # Returns
    /// Proposals sorted by overall score descending (ties keep candidate
    /// order), truncated to `limit`. Candidates that fail a gate are silently
    /// omitted; the subject never matches itself.
    pub fn generate_proposals(
        &self,
        subject: &PlayerRecord,
        candidates: &[PlayerRecord],
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<SessionProposal> {
        let subject_schedule = flatten_days(&subject.profile.availability);
        let mut proposals = Vec::new();

        for candidate in candidates {
            if candidate.profile.id == subject.profile.id {
                continue;
            }

            let score = score_pair(
                &subject.profile,
                &candidate.profile,
                &candidate.interactions,
                &self.config.weights,
            );
            if score.overall <= self.config.min_overall_score {
                continue;
            }

            let common_games = subject.profile.common_games(&candidate.profile);
            let Some(first_game_id) = common_games.first() else {
                continue;
            };

            let candidate_schedule = flatten_days(&candidate.profile.availability);
            let overlapping = overlap_slots(&subject_schedule, &candidate_schedule);
            let Some(slot) = overlapping.first() else {
                continue;
            };

            // First in list order, not ranked by quality.
            let Some(game) = subject.profile.find_game(first_game_id) else {
                continue;
            };

            let signals = signals_for(&score);
            let reason = build_reason(&signals);

            proposals.push(SessionProposal {
                id: Uuid::new_v4().to_string(),
                proposed_to: subject.profile.id.clone(),
                participants: vec![subject.profile.id.clone(), candidate.profile.id.clone()],
                game_id: game.game_id.clone(),
                game_name: game.name.clone(),
                game_image: game.image.clone(),
                proposed_at: slot.start_datetime(),
                status: ProposalStatus::Pending,
                signals,
                reason,
                score,
                created_at: now,
                expires_at: now + Duration::days(PROPOSAL_TTL_DAYS),
                metadata: ProposalMetadata {
                    overlapping_slot_count: overlapping.len(),
                    common_games,
                },
            });
        }

        // Stable sort: equal overall scores keep candidate input order.
        proposals.sort_by(|a, b| b.score.overall.total_cmp(&a.score.overall));
        proposals.truncate(limit);

        proposals
    }
}

impl Default for ProposalEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to generate proposals with default settings
pub fn generate_proposals(
    subject: &PlayerRecord,
    candidates: &[PlayerRecord],
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<SessionProposal> {
    ProposalEngine::new().generate_proposals(subject, candidates, limit, now)
}
