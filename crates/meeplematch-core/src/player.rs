//! Player profiles and interaction history.
//!
//! Plain value objects the engine consumes: a player's game library and
//! availability, plus the append-only interaction log the success-rate score
//! aggregates. The engine never mutates any of these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::availability::DayAvailability;

/// Unique identifier for a player.
pub type PlayerId = String;

/// Self-reported expertise with a game.
///
/// Not consulted by scoring; carried for collaborators (display, seeding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpertiseLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl ExpertiseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }
}

/// One game in a player's library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    pub game_id: String,
    pub name: String,
    pub image: Option<String>,
    pub expertise: ExpertiseLevel,
}

impl GameEntry {
    pub fn new(game_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            name: name.into(),
            image: None,
            expertise: ExpertiseLevel::Beginner,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_expertise(mut self, expertise: ExpertiseLevel) -> Self {
        self.expertise = expertise;
        self
    }
}

/// A player's profile: identity, game library, and declared availability.
///
/// The raw library may contain duplicate game ids; scoring treats it as a
/// set, and the ordered helpers deduplicate on first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub game_library: Vec<GameEntry>,
    pub availability: Vec<DayAvailability>,
}

impl PlayerProfile {
    pub fn new(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            game_library: Vec::new(),
            availability: Vec::new(),
        }
    }

    pub fn with_games(mut self, games: Vec<GameEntry>) -> Self {
        self.game_library = games;
        self
    }

    pub fn with_availability(mut self, availability: Vec<DayAvailability>) -> Self {
        self.availability = availability;
        self
    }

    /// The raw game ids in library order, duplicates included.
    pub fn game_ids(&self) -> Vec<String> {
        self.game_library
            .iter()
            .map(|entry| entry.game_id.clone())
            .collect()
    }

    /// Look up a library entry by game id (first occurrence).
    pub fn find_game(&self, game_id: &str) -> Option<&GameEntry> {
        self.game_library
            .iter()
            .find(|entry| entry.game_id == game_id)
    }

    /// Game ids shared with another player's library.
    ///
    /// Order follows this player's library; first occurrence wins for
    /// duplicates.
    pub fn common_games(&self, other: &PlayerProfile) -> Vec<String> {
        let theirs: HashSet<&str> = other
            .game_library
            .iter()
            .map(|entry| entry.game_id.as_str())
            .collect();

        let mut seen = HashSet::new();
        self.game_library
            .iter()
            .filter(|entry| theirs.contains(entry.game_id.as_str()))
            .filter(|entry| seen.insert(entry.game_id.as_str()))
            .map(|entry| entry.game_id.clone())
            .collect()
    }
}

/// How a player responded to a proposed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Interested,
    Declined,
    Accepted,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interested => "interested",
            Self::Declined => "declined",
            Self::Accepted => "accepted",
        }
    }
}

/// One entry in the append-only interaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub player_id: PlayerId,
    pub session_id: String,
    pub kind: InteractionKind,
    pub created_at: DateTime<Utc>,
}

impl InteractionRecord {
    pub fn new(
        player_id: impl Into<PlayerId>,
        session_id: impl Into<String>,
        kind: InteractionKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            session_id: session_id.into(),
            kind,
            created_at,
        }
    }
}

/// A profile plus that player's interaction history.
///
/// The generator consumes one of these for the subject and one per candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub profile: PlayerProfile,
    pub interactions: Vec<InteractionRecord>,
}

impl PlayerRecord {
    pub fn new(profile: PlayerProfile, interactions: Vec<InteractionRecord>) -> Self {
        Self {
            profile,
            interactions,
        }
    }
}
