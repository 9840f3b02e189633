//! Grouped Turn Model
//!
//! Nobody holds "the" turn. Each participant (or whole turn group) is marked
//! as played, in any order, and the round advances once everyone has gone.
//! Rounds also feed malice, the director's resource in Draw Steel.

use std::collections::BTreeMap;

use super::error::EncounterError;
use super::types::{Encounter, GameSession, Participant, TurnUpdate};

// ============================================================================
// Played State
// ============================================================================

/// Whether a participant counts as done for this round.
///
/// Inanimate participants never hold up a round. Grouped participants read
/// their group's flag when the group exists.
pub fn participant_has_played(encounter: &Encounter, participant: &Participant) -> bool {
    if participant.is_inanimate() {
        return true;
    }
    participant
        .turn_group_id()
        .and_then(|group_id| encounter.turn_groups.iter().find(|g| g.id == group_id))
        .map(|group| group.has_played_this_round)
        .unwrap_or(participant.has_played_this_round)
}

/// Members of each turn group, keyed by group id.
pub fn participants_by_turn_group(encounter: &Encounter) -> BTreeMap<&str, Vec<&Participant>> {
    let mut groups: BTreeMap<&str, Vec<&Participant>> = BTreeMap::new();
    for participant in &encounter.participants {
        if let Some(group_id) = participant.turn_group_id() {
            groups.entry(group_id).or_default().push(participant);
        }
    }
    groups
}

/// Mark a participant (and its whole turn group) as played or unplayed.
///
/// Completing the last unplayed slot starts the next round in the same call:
/// every flag resets and malice grows.
pub fn toggle_group_turn(
    encounter: &Encounter,
    participant_id: &str,
    session: Option<&GameSession>,
) -> Result<TurnUpdate, EncounterError> {
    let toggled = encounter
        .participants
        .iter()
        .find(|p| p.id == participant_id)
        .ok_or_else(|| EncounterError::ParticipantNotFound(participant_id.to_string()))?;

    let mut updated = encounter.clone();
    match toggled.turn_group_id() {
        Some(group_id) => {
            let group = updated
                .turn_groups
                .iter_mut()
                .find(|g| g.id == group_id)
                .ok_or_else(|| EncounterError::TurnGroupNotFound(group_id.to_string()))?;
            group.has_played_this_round = !group.has_played_this_round;
            let played = group.has_played_this_round;

            for member in updated
                .participants
                .iter_mut()
                .filter(|p| p.turn_group_id() == Some(group_id))
            {
                member.has_played_this_round = played;
            }
        }
        None => {
            for p in updated.participants.iter_mut().filter(|p| p.id == participant_id) {
                p.has_played_this_round = !p.has_played_this_round;
            }
        }
    }

    let all_have_played = updated
        .participants
        .iter()
        .all(|p| participant_has_played(&updated, p));

    if all_have_played {
        updated = move_to_next_group_turn_round(&updated);
        let gained = calculate_malice_for_round(&updated, session);
        updated.malice += gained;
        tracing::debug!(
            encounter_id = %updated.id,
            round = updated.current_round,
            malice = updated.malice,
            gained,
            "Grouped round complete"
        );
    }

    let newly_active_participant = updated
        .participants
        .iter()
        .find(|p| p.id == participant_id)
        .cloned()
        .ok_or_else(|| EncounterError::ParticipantNotFound(participant_id.to_string()))?;

    Ok(TurnUpdate {
        encounter: updated,
        newly_active_participant,
    })
}

/// Advance one round and clear every played flag.
pub fn move_to_next_group_turn_round(encounter: &Encounter) -> Encounter {
    let mut next = encounter.clone();
    next.current_round = next.current_round.saturating_add(1);
    for participant in &mut next.participants {
        participant.has_played_this_round = false;
    }
    for group in &mut next.turn_groups {
        group.has_played_this_round = false;
    }
    next
}

// ============================================================================
// Malice
// ============================================================================

/// Players still standing.
pub fn alive_player_count(participants: &[Participant]) -> i32 {
    participants
        .iter()
        .filter(|p| p.is_player() && p.hp > 0)
        .count() as i32
}

/// Malice at the start of combat: average victories, living heroes, and 1 for
/// the opening round.
pub fn calculate_initial_malice(encounter: &Encounter) -> i32 {
    encounter.average_victories.unwrap_or(0) + alive_player_count(&encounter.participants) + 1
}

/// Malice gained when `encounter.current_round` begins.
pub fn calculate_malice_for_round(encounter: &Encounter, session: Option<&GameSession>) -> i32 {
    let victories = session.map(|s| s.victory_count).unwrap_or(0);
    alive_player_count(&encounter.participants) + encounter.current_round as i32 + victories
}
