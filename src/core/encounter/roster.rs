//! Encounter Roster
//!
//! Operations over a whole encounter: starting it, managing who is in it,
//! HP changes, column layout, and routing turn actions to the turn model the
//! encounter's game system uses. Every operation returns a new `Encounter`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::columns;
use super::error::EncounterError;
use super::group_turn::{self, calculate_initial_malice};
use super::participant::update_minion_count;
use super::turn_order::{self, initiative_order};
use super::types::{
    Encounter, EncounterStatus, GameSession, InitiativeType, Participant, ParticipantKind,
    StatColumn, TurnUpdate,
};
use crate::config::RulesConfig;

// ============================================================================
// Turn Actions
// ============================================================================

/// A turn transition requested by the table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TurnAction {
    Next,
    Previous,
    ToggleGroup { participant_id: String },
}

impl TurnAction {
    fn name(&self) -> &'static str {
        match self {
            TurnAction::Next => "next",
            TurnAction::Previous => "previous",
            TurnAction::ToggleGroup { .. } => "toggle_group",
        }
    }

    fn initiative_type(&self) -> InitiativeType {
        match self {
            TurnAction::Next | TurnAction::Previous => InitiativeType::Linear,
            TurnAction::ToggleGroup { .. } => InitiativeType::Group,
        }
    }
}

impl Encounter {
    // ========================================================================
    // Turn Model Dispatch
    // ========================================================================

    /// Apply a turn action using the encounter's own turn model.
    pub fn apply_turn_action(
        &self,
        action: &TurnAction,
        session: Option<&GameSession>,
    ) -> Result<TurnUpdate, EncounterError> {
        let model = self.initiative_type();
        if action.initiative_type() != model {
            return Err(EncounterError::WrongTurnModel {
                action: action.name().to_string(),
                model,
            });
        }

        match action {
            TurnAction::Next => self.cycle_next_turn(),
            TurnAction::Previous => self.cycle_previous_turn(),
            TurnAction::ToggleGroup { participant_id } => {
                self.toggle_group_turn(participant_id, session)
            }
        }
    }

    pub fn cycle_next_turn(&self) -> Result<TurnUpdate, EncounterError> {
        turn_order::cycle_next_turn(self)
    }

    pub fn cycle_previous_turn(&self) -> Result<TurnUpdate, EncounterError> {
        turn_order::cycle_previous_turn(self)
    }

    pub fn toggle_group_turn(
        &self,
        participant_id: &str,
        session: Option<&GameSession>,
    ) -> Result<TurnUpdate, EncounterError> {
        group_turn::toggle_group_turn(self, participant_id, session)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Who takes the first turn and which round play opens in.
    ///
    /// With anyone holding surprise, play opens in round 0 with the first
    /// surprise participant. Otherwise round 1 with the first participant
    /// able to act.
    pub fn first_active_and_round_number(&self) -> Result<(&Participant, u32), EncounterError> {
        let ordered = self.participants_in_initiative_order();
        if ordered.is_empty() {
            return Err(EncounterError::NoParticipants);
        }

        if let Some(&first) = ordered.iter().find(|p| p.has_surprise) {
            return Ok((first, 0));
        }
        ordered
            .into_iter()
            .find(|p| p.is_activatable())
            .map(|p| (p, 1))
            .ok_or(EncounterError::NoCandidates)
    }

    /// Move the encounter from prep into play.
    pub fn start(&self, now: DateTime<Utc>) -> Result<Encounter, EncounterError> {
        if self.participants.is_empty() {
            return Err(EncounterError::NoParticipants);
        }

        let mut started = self.clone();
        match self.initiative_type() {
            InitiativeType::Linear => {
                let (first, round) = self.first_active_and_round_number()?;
                let first_id = first.id.clone();
                for p in &mut started.participants {
                    p.is_active = p.id == first_id;
                }
                started.current_round = round;
            }
            InitiativeType::Group => {
                for p in &mut started.participants {
                    p.is_active = false;
                    p.has_played_this_round = false;
                }
                for group in &mut started.turn_groups {
                    group.has_played_this_round = false;
                }
                started.current_round = 1;
                started.malice = calculate_initial_malice(self);
            }
        }
        started.status = EncounterStatus::Run;
        started.started_at = Some(now);

        log::info!(
            "Started encounter {} ({}) at round {} with {} participants",
            started.name,
            started.id,
            started.current_round,
            started.participants.len()
        );
        Ok(started)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn participants_in_initiative_order(&self) -> Vec<&Participant> {
        initiative_order(&self.participants)
            .into_iter()
            .map(|i| &self.participants[i])
            .collect()
    }

    pub fn participant(&self, participant_id: &str) -> Result<&Participant, EncounterError> {
        self.participants
            .iter()
            .find(|p| p.id == participant_id)
            .ok_or_else(|| EncounterError::ParticipantNotFound(participant_id.to_string()))
    }

    /// The participant holding the turn, if any.
    pub fn active_participant(&self) -> Result<Option<&Participant>, EncounterError> {
        let active: Vec<&Participant> = self
            .participants_in_initiative_order()
            .into_iter()
            .filter(|p| p.is_active)
            .collect();

        match active.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(*only)),
            many => Err(EncounterError::MultipleActiveParticipants(
                many.iter().map(|p| p.id.clone()).collect(),
            )),
        }
    }

    // ========================================================================
    // Participants
    // ========================================================================

    /// Add a participant to the encounter.
    ///
    /// Non-players without a column join the column already showing their
    /// creature, otherwise the least crowded non-home column. Minion swarms
    /// added without a count get the configured swarm size, and the swarm's
    /// HP pool covers every member.
    pub fn add_participant(&self, mut participant: Participant, rules: &RulesConfig) -> Encounter {
        participant.encounter_id = self.id.clone();

        if participant.column_id.is_none() && !participant.is_player() {
            participant.column_id = self.destination_column_for(&participant.creature_id);
        }

        if let ParticipantKind::Minion { count } = &mut participant.kind {
            if *count == 0 {
                *count = rules.minion_swarm_size;
            }
            if participant.max_hp_override.is_none() {
                let pool = participant
                    .creature
                    .max_hp
                    .saturating_mul(i32::try_from(*count).unwrap_or(i32::MAX));
                participant.max_hp_override = Some(pool);
                participant.hp = pool;
            }
        }

        let mut updated = self.clone();
        updated.participants.push(participant);
        updated
    }

    fn destination_column_for(&self, creature_id: &str) -> Option<String> {
        let same_creature = self
            .participants_in_initiative_order()
            .into_iter()
            .filter(|p| p.creature_id == creature_id)
            .find_map(|p| p.column_id.clone());
        if same_creature.is_some() {
            return same_creature;
        }

        // min_by_key keeps the first column on ties
        self.columns
            .iter()
            .filter(|c| !c.is_home_column)
            .min_by_key(|c| {
                self.participants
                    .iter()
                    .filter(|p| p.column_id.as_deref() == Some(c.id.as_str()))
                    .count()
            })
            .map(|c| c.id.clone())
    }

    pub fn remove_participant(&self, participant_id: &str) -> Result<Encounter, EncounterError> {
        self.participant(participant_id)?;
        let mut updated = self.clone();
        updated.participants.retain(|p| p.id != participant_id);
        Ok(updated)
    }

    /// Replace the stored participant with the same id.
    pub fn update_participant(&self, participant: Participant) -> Result<Encounter, EncounterError> {
        let participant_id = participant.id.clone();
        self.with_participant(&participant_id, move |p| *p = participant)
    }

    pub fn damage_participant(
        &self,
        participant_id: &str,
        amount: i32,
    ) -> Result<Encounter, EncounterError> {
        self.with_participant(participant_id, |p| {
            p.apply_damage(amount);
        })
    }

    pub fn heal_participant(
        &self,
        participant_id: &str,
        amount: i32,
    ) -> Result<Encounter, EncounterError> {
        self.with_participant(participant_id, |p| {
            p.heal(amount);
        })
    }

    /// Hit a minion swarm, slaying as many members as the damage cleaves
    /// through.
    pub fn damage_minions(
        &self,
        participant_id: &str,
        minions_in_overkill_range: u32,
        damage: i32,
    ) -> Result<Encounter, EncounterError> {
        let target = self.participant(participant_id)?;
        let remaining = update_minion_count(target, minions_in_overkill_range, damage)
            .ok_or_else(|| EncounterError::NotAMinion(participant_id.to_string()))?;

        self.with_participant(participant_id, |p| {
            p.kind = ParticipantKind::Minion { count: remaining };
            if remaining == 0 {
                p.hp = 0;
            }
        })
    }

    /// Drop defeated monsters. Players and the turn holder always stay.
    pub fn remove_defeated(&self) -> Encounter {
        let mut updated = self.clone();
        updated.participants.retain(Participant::is_activatable);
        updated
    }

    fn with_participant(
        &self,
        participant_id: &str,
        update: impl FnOnce(&mut Participant),
    ) -> Result<Encounter, EncounterError> {
        let mut updated = self.clone();
        let target = updated
            .participants
            .iter_mut()
            .find(|p| p.id == participant_id)
            .ok_or_else(|| EncounterError::ParticipantNotFound(participant_id.to_string()))?;
        update(target);
        Ok(updated)
    }

    // ========================================================================
    // Columns
    // ========================================================================

    pub fn add_column(&self, column: StatColumn) -> Encounter {
        let mut updated = self.clone();
        updated.columns = columns::add(&self.columns, column);
        updated
    }

    /// Remove a column; its participants are left without one.
    pub fn remove_column(&self, column_id: &str) -> Result<Encounter, EncounterError> {
        let mut updated = self.clone();
        updated.columns = columns::remove(&self.columns, column_id)?;
        for p in &mut updated.participants {
            if p.column_id.as_deref() == Some(column_id) {
                p.column_id = None;
            }
        }
        tracing::debug!(encounter_id = %self.id, column_id, "Removed column");
        Ok(updated)
    }

    pub fn equalize_columns(&self) -> Encounter {
        let mut updated = self.clone();
        updated.columns = columns::equalize(&self.columns);
        updated
    }
}
