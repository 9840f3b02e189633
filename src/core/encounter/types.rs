//! Encounter Data Model
//!
//! Plain values shared by every part of the engine. The engine reads an
//! `Encounter` snapshot and hands back a new one; nothing here performs I/O.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::RulesConfig;

// ============================================================================
// Rules Selection
// ============================================================================

/// Game system an encounter is run under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameSystem {
    #[default]
    Dnd5e,
    DrawSteel,
}

impl GameSystem {
    /// Turn model used by this system
    pub fn initiative_type(self) -> InitiativeType {
        match self {
            GameSystem::Dnd5e => InitiativeType::Linear,
            GameSystem::DrawSteel => InitiativeType::Group,
        }
    }
}

/// The two turn models an encounter can be played with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeType {
    /// One active participant advancing through initiative order
    Linear,
    /// Participants (or turn groups) are marked as played, in any order
    Group,
}

impl fmt::Display for InitiativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitiativeType::Linear => write!(f, "linear"),
            InitiativeType::Group => write!(f, "group"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EncounterStatus {
    #[default]
    Prep,
    Run,
}

// ============================================================================
// Creature
// ============================================================================

/// The template a participant was copied from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Creature {
    pub id: String,
    pub name: String,
    pub max_hp: i32,
    /// Players stay in the rotation even at 0 HP
    pub is_player: bool,
    /// Scenery and trackers that sit in the encounter but never take a turn
    #[serde(default)]
    pub is_inanimate: bool,
}

impl Creature {
    /// Create a monster template
    pub fn new(name: impl Into<String>, max_hp: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            max_hp,
            is_player: false,
            is_inanimate: false,
        }
    }

    /// Create a player character template
    pub fn player(name: impl Into<String>, max_hp: i32) -> Self {
        Self {
            is_player: true,
            ..Self::new(name, max_hp)
        }
    }

    pub fn inanimate(mut self) -> Self {
        self.is_inanimate = true;
        self
    }
}

// ============================================================================
// Participant
// ============================================================================

/// What kind of combatant a participant is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParticipantKind {
    #[default]
    Standard,
    /// A swarm of identical minions tracked as one participant
    Minion { count: u32 },
    /// Member of a turn group that acts as one unit in grouped play
    Grouped { group_id: String },
}

/// One combatant's presence in one encounter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub encounter_id: String,
    pub creature_id: String,
    pub creature: Creature,
    /// Higher acts first
    pub initiative: i32,
    /// Tiebreaker for equal initiative, earlier acts first
    pub created_at: DateTime<Utc>,
    pub hp: i32,
    #[serde(default)]
    pub max_hp_override: Option<i32>,
    pub is_active: bool,
    #[serde(default)]
    pub has_surprise: bool,
    #[serde(default)]
    pub has_played_this_round: bool,
    #[serde(default)]
    pub kind: ParticipantKind,
    #[serde(default)]
    pub column_id: Option<String>,
}

impl Participant {
    /// Create a participant from a creature template at full HP
    pub fn new(encounter_id: impl Into<String>, creature: Creature, initiative: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            encounter_id: encounter_id.into(),
            creature_id: creature.id.clone(),
            hp: creature.max_hp,
            creature,
            initiative,
            created_at: Utc::now(),
            max_hp_override: None,
            is_active: false,
            has_surprise: false,
            has_played_this_round: false,
            kind: ParticipantKind::Standard,
            column_id: None,
        }
    }

    /// Override the starting (and maximum) HP
    pub fn with_hp_override(mut self, hp: i32) -> Self {
        self.max_hp_override = Some(hp);
        self.hp = hp;
        self
    }

    pub fn with_kind(mut self, kind: ParticipantKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_surprise(mut self) -> Self {
        self.has_surprise = true;
        self
    }

    /// Turn group this participant belongs to, if any
    pub fn turn_group_id(&self) -> Option<&str> {
        match &self.kind {
            ParticipantKind::Grouped { group_id } => Some(group_id),
            _ => None,
        }
    }

    /// Remaining minions, if this participant is a swarm
    pub fn minion_count(&self) -> Option<u32> {
        match self.kind {
            ParticipantKind::Minion { count } => Some(count),
            _ => None,
        }
    }
}

// ============================================================================
// Turn Groups, Columns, Sessions
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub has_played_this_round: bool,
}

impl TurnGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            has_played_this_round: false,
        }
    }
}

/// A stat block column in the encounter layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatColumn {
    pub id: String,
    pub percent_width: f64,
    /// The column holding the encounter description and roster
    #[serde(default)]
    pub is_home_column: bool,
}

impl StatColumn {
    /// A new column; its width is assigned when it is added to a layout
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            percent_width: 0.0,
            is_home_column: false,
        }
    }

    pub fn home() -> Self {
        Self {
            is_home_column: true,
            ..Self::new()
        }
    }
}

impl Default for StatColumn {
    fn default() -> Self {
        Self::new()
    }
}

/// The play session an encounter is run in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSession {
    pub id: String,
    /// Victories the heroes have banked this session
    pub victory_count: i32,
}

// ============================================================================
// Encounter
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Encounter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub system: GameSystem,
    #[serde(default)]
    pub status: EncounterStatus,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// Round 0 is the surprise round when anyone has surprise
    pub current_round: u32,
    /// Stable store of participants; turn order is derived on every call
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub turn_groups: Vec<TurnGroup>,
    #[serde(default)]
    pub columns: Vec<StatColumn>,
    #[serde(default)]
    pub malice: i32,
    #[serde(default)]
    pub average_victories: Option<i32>,
}

impl Encounter {
    /// Create an empty encounter in preparation
    pub fn new(name: impl Into<String>, system: GameSystem) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            system,
            status: EncounterStatus::Prep,
            started_at: None,
            current_round: 0,
            participants: vec![],
            turn_groups: vec![],
            columns: vec![],
            malice: 0,
            average_victories: None,
        }
    }

    /// Create an empty encounter using the configured default system
    pub fn from_rules(name: impl Into<String>, rules: &RulesConfig) -> Self {
        Self::new(name, rules.default_system)
    }

    pub fn initiative_type(&self) -> InitiativeType {
        self.system.initiative_type()
    }
}

/// Result of a turn transition: the new encounter snapshot and the
/// participant the transition landed on.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnUpdate {
    pub encounter: Encounter,
    pub newly_active_participant: Participant,
}

impl TurnUpdate {
    pub fn updated_participants(&self) -> &[Participant] {
        &self.encounter.participants
    }

    pub fn updated_round_number(&self) -> u32 {
        self.encounter.current_round
    }
}
