//! Encounter Engine
//!
//! Pure state transitions over an encounter snapshot: linear and surprise
//! turn order, grouped turns with malice, minion swarms, and the stat column
//! layout.

pub mod columns;
pub mod error;
pub mod group_turn;
pub mod participant;
pub mod roster;
pub mod turn_order;
pub mod types;

pub use error::EncounterError;
pub use group_turn::{
    alive_player_count, calculate_initial_malice, calculate_malice_for_round,
    move_to_next_group_turn_round, participant_has_played, participants_by_turn_group,
    toggle_group_turn,
};
pub use participant::{sort_linearly, update_minion_count};
pub use roster::TurnAction;
pub use turn_order::{cycle_next_turn, cycle_previous_turn, initiative_order};
pub use types::{
    Creature, Encounter, EncounterStatus, GameSession, GameSystem, InitiativeType, Participant,
    ParticipantKind, StatColumn, TurnGroup, TurnUpdate,
};
