//! Linear Turn Order
//!
//! One participant holds the turn and it moves forward or backward through
//! the initiative order. When any participant has surprise, round 0 is a
//! surprise round that only they take part in.
//!
//! The participant store is never reordered in place to find positions.
//! Each call sorts a fresh list of indices into it and works from there.

use super::error::EncounterError;
use super::participant::sort_linearly;
use super::types::{Encounter, Participant, TurnUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

/// Indices into `participants`, in turn order.
pub fn initiative_order(participants: &[Participant]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..participants.len()).collect();
    order.sort_by(|&a, &b| sort_linearly(&participants[a], &participants[b]));
    order
}

/// Pass the turn to the next participant, starting a new round after the last.
pub fn cycle_next_turn(encounter: &Encounter) -> Result<TurnUpdate, EncounterError> {
    cycle_turn(encounter, Direction::Next)
}

/// Hand the turn back to the previous participant, stepping back a round
/// before the first. Stepping back from the very first turn of round 0
/// changes nothing.
pub fn cycle_previous_turn(encounter: &Encounter) -> Result<TurnUpdate, EncounterError> {
    cycle_turn(encounter, Direction::Previous)
}

fn cycle_turn(encounter: &Encounter, direction: Direction) -> Result<TurnUpdate, EncounterError> {
    let participants = &encounter.participants;
    let order = initiative_order(participants);
    if order.is_empty() {
        return Err(EncounterError::NoParticipants);
    }

    let round = encounter.current_round;
    let has_surprise_round = participants.iter().any(|p| p.has_surprise);
    let in_surprise_round = has_surprise_round && round == 0;

    let candidates: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| {
            let p = &participants[i];
            if in_surprise_round {
                p.has_surprise
            } else {
                p.is_activatable()
            }
        })
        .collect();
    let first = *candidates.first().ok_or(EncounterError::NoCandidates)?;
    let last = candidates.len() - 1;

    let Some(active) = order.iter().copied().find(|&i| participants[i].is_active) else {
        log::warn!(
            "Encounter {} has no active participant, activating {}",
            encounter.id,
            participants[first].id
        );
        return Ok(activate(encounter, &order, first, round));
    };

    let (chosen, new_round) = match (candidates.iter().position(|&i| i == active), direction) {
        // holder is out of the rotation, e.g. a non-surprise participant in round 0
        (None, _) => (first, round),
        (Some(pos), Direction::Next) if pos == last => (first, round.saturating_add(1)),
        (Some(pos), Direction::Next) => (candidates[pos + 1], round),
        (Some(0), Direction::Previous) if round == 0 => (active, 0),
        (Some(0), Direction::Previous) => (candidates[last], round - 1),
        (Some(pos), Direction::Previous) => (candidates[pos - 1], round),
    };

    // Crossing between the surprise round and round 1 in either direction
    // lands on the last surprise participant.
    let chosen = if has_surprise_round && matches!((round, new_round), (0, 1) | (1, 0)) {
        order
            .iter()
            .rev()
            .copied()
            .find(|&i| participants[i].has_surprise)
            .unwrap_or(chosen)
    } else {
        chosen
    };

    if new_round != round {
        log::debug!(
            "Encounter {} moved from round {} to round {}",
            encounter.id,
            round,
            new_round
        );
    }

    Ok(activate(encounter, &order, chosen, new_round))
}

/// Build the next snapshot: participants in turn order with only `chosen`
/// active.
fn activate(encounter: &Encounter, order: &[usize], chosen: usize, round: u32) -> TurnUpdate {
    let participants: Vec<Participant> = order
        .iter()
        .map(|&i| Participant {
            is_active: i == chosen,
            ..encounter.participants[i].clone()
        })
        .collect();

    let newly_active_participant = Participant {
        is_active: true,
        ..encounter.participants[chosen].clone()
    };

    TurnUpdate {
        encounter: Encounter {
            participants,
            current_round: round,
            ..encounter.clone()
        },
        newly_active_participant,
    }
}
