//! Encounter engine errors

use miette::Diagnostic;
use thiserror::Error;

use super::types::InitiativeType;

/// Failures the engine reports instead of inventing data.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum EncounterError {
    #[error("Encounter has no participants")]
    #[diagnostic(
        code(encounter::no_participants),
        help("Add at least one participant before running the encounter")
    )]
    NoParticipants,

    #[error("No participant can take a turn")]
    #[diagnostic(
        code(encounter::no_candidates),
        help("Every participant is defeated; heal someone or end the encounter")
    )]
    NoCandidates,

    #[error("Participant not found: {0}")]
    #[diagnostic(code(encounter::participant_not_found))]
    ParticipantNotFound(String),

    #[error("Turn group not found: {0}")]
    #[diagnostic(
        code(encounter::turn_group_not_found),
        help("The participant references a turn group missing from the encounter")
    )]
    TurnGroupNotFound(String),

    #[error("Encounter has more than one active participant: {}", .0.join(", "))]
    #[diagnostic(code(encounter::multiple_active))]
    MultipleActiveParticipants(Vec<String>),

    #[error("Participant is not a minion: {0}")]
    #[diagnostic(code(encounter::not_a_minion))]
    NotAMinion(String),

    #[error("Column not found: {0}")]
    #[diagnostic(code(encounter::column_not_found))]
    ColumnNotFound(String),

    #[error("Cannot remove the only remaining column")]
    #[diagnostic(code(encounter::last_column))]
    LastColumn,

    #[error("Cannot apply {action} to an encounter using {model} initiative")]
    #[diagnostic(code(encounter::wrong_turn_model))]
    WrongTurnModel {
        action: String,
        model: InitiativeType,
    },
}
