//! # MeepleMatch Core Library
//!
//! This library provides the core matching logic for MeepleMatch, a scheduling
//! and social application for board gamers. It is a pure compute library: the
//! surrounding application (persistence, notifications, game-metadata clients,
//! UI) feeds it plain value objects and owns everything the engine emits.
//!
//! ## Architecture
//!
//! - **Availability**: An interval-based model of free time per calendar day,
//!   with normalization, splitting, and intersection over minute-of-day ranges
//! - **Scoring**: Three independent [0, 1] compatibility sub-scores (game
//!   preference overlap, time-slot compatibility, historical success rate)
//!   combined into a weighted overall score
//! - **Proposal**: A generator that scores a candidate pool against a subject
//!   player and materializes ranked, pending session proposals
//!
//! ## Key Components
//!
//! - [`TimeInterval`]: Minute-of-day range, the unit of the availability model
//! - [`PlayerProfile`]: A player's game library and availability
//! - [`MatchScore`]: The per-pair compatibility breakdown
//! - [`ProposalEngine`]: Candidate iteration, filtering, and ranking

pub mod availability;
pub mod player;
pub mod scoring;
pub mod proposal;
pub mod error;

pub use availability::{DayAvailability, DaySlot, TimeInterval};
pub use player::{
    ExpertiseLevel, GameEntry, InteractionKind, InteractionRecord, PlayerProfile, PlayerRecord,
};
pub use scoring::{EngagementSummary, MatchScore, ScoreWeights};
pub use proposal::{
    MatchSignal, ProposalConfig, ProposalEngine, ProposalMetadata, ProposalStatus, SessionProposal,
};
pub use error::ValidationError;
