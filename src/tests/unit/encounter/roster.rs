//! Encounter Roster Tests

use crate::config::RulesConfig;
use crate::core::encounter::{
    Encounter, EncounterError, EncounterStatus, GameSystem, InitiativeType, ParticipantKind,
    TurnAction,
};
use crate::tests::common::*;

// =============================================================================
// Start
// =============================================================================

#[test]
fn test_start_linear_activates_first_in_order() {
    let encounter = Encounter {
        status: EncounterStatus::Prep,
        started_at: None,
        ..create_encounter(
            vec![create_participant("slow", 3), create_participant("fast", 18)],
            0,
        )
    };

    let started = encounter.start(seconds_after_base(30)).unwrap();

    assert_eq!(started.status, EncounterStatus::Run);
    assert_eq!(started.started_at, Some(seconds_after_base(30)));
    assert_eq!(started.current_round, 1);
    assert_eq!(active_ids(&started), vec!["fast"]);
}

#[test]
fn test_start_with_surprise_opens_round_zero() {
    let encounter = create_encounter(
        vec![
            create_participant("a", 20),
            surprised(create_participant("b", 15)),
            surprised(create_participant("c", 10)),
        ],
        0,
    );

    let started = encounter.start(base_time()).unwrap();

    assert_eq!(started.current_round, 0);
    assert_eq!(active_ids(&started), vec!["b"]);
}

#[test]
fn test_start_group_sets_initial_malice() {
    let mut encounter = create_group_encounter(
        vec![
            create_player("p1", 20, 50),
            create_player("p2", 18, 45),
            create_player("p3", 16, 40),
            played(create_participant("m1", 15)),
        ],
        vec![played_group("g1")],
        0,
    );
    encounter.average_victories = Some(0);

    let started = encounter.start(base_time()).unwrap();

    assert_eq!(started.malice, 4);
    assert_eq!(started.current_round, 1);
    assert_eq!(started.status, EncounterStatus::Run);
    assert!(active_ids(&started).is_empty());
    assert!(started.participants.iter().all(|p| !p.has_played_this_round));
    assert!(!started.turn_groups[0].has_played_this_round);
}

#[test]
fn test_start_empty_encounter_fails() {
    let encounter = create_encounter(vec![], 0);
    assert_eq!(
        encounter.start(base_time()).unwrap_err(),
        EncounterError::NoParticipants
    );
}

// =============================================================================
// Lookups
// =============================================================================

#[test]
fn test_active_participant() {
    let none = create_encounter(vec![create_participant("a", 1)], 1);
    assert_eq!(none.active_participant().unwrap(), None);

    let one = create_encounter(vec![create_participant("a", 1), create_active("b", 2)], 1);
    assert_eq!(one.active_participant().unwrap().map(|p| p.id.as_str()), Some("b"));

    let two = create_encounter(vec![create_active("a", 1), create_active("b", 2)], 1);
    assert_eq!(
        two.active_participant().unwrap_err(),
        EncounterError::MultipleActiveParticipants(vec!["b".to_string(), "a".to_string()])
    );
}

#[test]
fn test_participants_in_initiative_order_does_not_reorder_store() {
    let encounter = create_encounter(
        vec![create_participant("a", 1), create_participant("b", 9)],
        1,
    );

    let ordered: Vec<&str> = encounter
        .participants_in_initiative_order()
        .iter()
        .map(|p| p.id.as_str())
        .collect();

    assert_eq!(ordered, vec!["b", "a"]);
    assert_eq!(ids(&encounter.participants), vec!["a", "b"]);
}

// =============================================================================
// Adding Participants
// =============================================================================

#[test]
fn test_add_participant_joins_column_of_same_creature() {
    let mut encounter = create_encounter(
        vec![
            in_column(create_participant("goblin-1", 12), "right"),
            create_participant("bystander", 3),
        ],
        1,
    );
    encounter.columns = vec![home_column("home", 40.0), column("left", 30.0), column("right", 30.0)];

    let mut goblin_2 = create_participant("goblin-2", 8);
    goblin_2.creature = encounter.participants[0].creature.clone();
    goblin_2.creature_id = goblin_2.creature.id.clone();

    let updated = encounter.add_participant(goblin_2, &RulesConfig::default());

    assert_eq!(
        updated.participant("goblin-2").unwrap().column_id.as_deref(),
        Some("right")
    );
}

#[test]
fn test_add_participant_picks_least_crowded_non_home_column() {
    let mut encounter = create_encounter(
        vec![
            in_column(create_participant("a", 12), "left"),
            in_column(create_participant("b", 10), "home"),
            in_column(create_participant("c", 9), "home"),
        ],
        1,
    );
    encounter.columns = vec![home_column("home", 40.0), column("left", 30.0), column("right", 30.0)];

    let updated = encounter.add_participant(create_participant("new", 5), &RulesConfig::default());

    let added = updated.participant("new").unwrap();
    assert_eq!(added.column_id.as_deref(), Some("right"));
    assert_eq!(added.encounter_id, TEST_ENCOUNTER_ID);
}

#[test]
fn test_add_player_is_not_assigned_a_column() {
    let mut encounter = create_encounter(vec![], 0);
    encounter.columns = vec![column("left", 100.0)];

    let updated = encounter.add_participant(create_player("hero", 14, 30), &RulesConfig::default());

    assert_eq!(updated.participant("hero").unwrap().column_id, None);
}

#[test]
fn test_add_minion_without_count_uses_swarm_size() {
    let encounter = create_encounter(vec![], 0);
    let rules = RulesConfig {
        minion_swarm_size: 6,
        ..RulesConfig::default()
    };

    let updated = encounter.add_participant(create_minion("swarm", 5, 0), &rules);

    let swarm = updated.participant("swarm").unwrap();
    assert_eq!(swarm.kind, ParticipantKind::Minion { count: 6 });
    assert_eq!(swarm.max_hp(), 30);
    assert_eq!(swarm.hp, 30);
}

// =============================================================================
// Updating and Removing
// =============================================================================

#[test]
fn test_damage_and_heal_participant() {
    let encounter = create_encounter(vec![create_participant("a", 1)], 1);

    let hurt = encounter.damage_participant("a", 7).unwrap();
    assert_eq!(hurt.participant("a").unwrap().hp, 3);

    let healed = hurt.heal_participant("a", 50).unwrap();
    assert_eq!(healed.participant("a").unwrap().hp, 10);

    assert_eq!(
        encounter.damage_participant("zzz", 1).unwrap_err(),
        EncounterError::ParticipantNotFound("zzz".to_string())
    );
}

#[test]
fn test_update_and_remove_participant() {
    let encounter = create_encounter(vec![create_participant("a", 1), create_participant("b", 2)], 1);

    let mut changed = encounter.participant("a").unwrap().clone();
    changed.initiative = 30;
    let updated = encounter.update_participant(changed).unwrap();
    assert_eq!(updated.participant("a").unwrap().initiative, 30);

    let removed = updated.remove_participant("b").unwrap();
    assert_eq!(ids(&removed.participants), vec!["a"]);

    assert_eq!(
        removed.remove_participant("b").unwrap_err(),
        EncounterError::ParticipantNotFound("b".to_string())
    );
}

#[test]
fn test_remove_defeated_keeps_players_and_turn_holder() {
    let encounter = create_encounter(
        vec![
            defeated(create_participant("dead", 1)),
            defeated(create_active("dying", 2)),
            create_player("down", 3, 0),
            create_participant("fine", 4),
        ],
        1,
    );

    let cleaned = encounter.remove_defeated();

    assert_eq!(ids(&cleaned.participants), vec!["dying", "down", "fine"]);
}

// =============================================================================
// Turn Actions
// =============================================================================

#[test]
fn test_apply_turn_action_routes_by_system() {
    let linear = create_encounter(vec![create_active("a", 2), create_participant("b", 1)], 1);
    let result = linear.apply_turn_action(&TurnAction::Next, None).unwrap();
    assert_eq!(result.newly_active_participant.id, "b");

    let grouped = create_group_encounter(vec![create_participant("a", 2)], vec![], 1);
    let action = TurnAction::ToggleGroup {
        participant_id: "a".to_string(),
    };
    let result = grouped.apply_turn_action(&action, None).unwrap();
    assert_eq!(result.updated_round_number(), 2);
}

#[test]
fn test_apply_turn_action_rejects_other_model() {
    let linear = create_encounter(vec![create_active("a", 2)], 1);
    let toggle = TurnAction::ToggleGroup {
        participant_id: "a".to_string(),
    };
    assert_eq!(
        linear.apply_turn_action(&toggle, None).unwrap_err(),
        EncounterError::WrongTurnModel {
            action: "toggle_group".to_string(),
            model: InitiativeType::Linear,
        }
    );

    let grouped = create_group_encounter(vec![create_participant("a", 2)], vec![], 1);
    assert_eq!(
        grouped
            .apply_turn_action(&TurnAction::Previous, None)
            .unwrap_err(),
        EncounterError::WrongTurnModel {
            action: "previous".to_string(),
            model: InitiativeType::Group,
        }
    );
}

#[test]
fn test_from_rules_uses_default_system() {
    let rules = RulesConfig {
        default_system: GameSystem::DrawSteel,
        ..RulesConfig::default()
    };

    let encounter = Encounter::from_rules("Bridge Ambush", &rules);

    assert_eq!(encounter.system, GameSystem::DrawSteel);
    assert_eq!(encounter.initiative_type(), InitiativeType::Group);
    assert_eq!(encounter.status, EncounterStatus::Prep);
    assert!(encounter.participants.is_empty());
}
