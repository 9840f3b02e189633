//! Participant predicates, sort order, and HP/minion math.

use std::cmp::Ordering;

use super::types::{Participant, ParticipantKind};

impl Participant {
    pub fn is_player(&self) -> bool {
        self.creature.is_player
    }

    pub fn is_minion(&self) -> bool {
        matches!(self.kind, ParticipantKind::Minion { .. })
    }

    pub fn is_inanimate(&self) -> bool {
        self.creature.is_inanimate
    }

    /// Whether this participant stays in the active rotation.
    ///
    /// Dead monsters drop out; players and whoever currently holds the turn
    /// never do.
    pub fn is_activatable(&self) -> bool {
        self.hp > 0 || self.is_active || self.is_player()
    }

    /// Effective maximum HP, preferring the override chosen at creation
    pub fn max_hp(&self) -> i32 {
        self.max_hp_override.unwrap_or(self.creature.max_hp)
    }

    /// Apply damage, clamping HP at zero.
    /// Non-positive amounts are ignored.
    /// Returns the new HP.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return self.hp;
        }
        self.hp = self.hp.saturating_sub(amount).max(0);
        self.hp
    }

    /// Heal up to the effective maximum HP.
    /// Returns the new HP.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return self.hp;
        }
        let healed = self.hp.saturating_add(amount).min(self.max_hp());
        // never lowers HP that is already above max
        self.hp = healed.max(self.hp);
        self.hp
    }
}

/// Turn order: higher initiative first, then earlier arrival, then id.
pub fn sort_linearly(a: &Participant, b: &Participant) -> Ordering {
    b.initiative
        .cmp(&a.initiative)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Minions left in a swarm after one hit.
///
/// A hit can cleave through every minion within `minions_in_overkill_range`
/// of the struck one, each absorbing up to the creature's max HP. Returns
/// `None` for participants that are not minions.
pub fn update_minion_count(
    participant: &Participant,
    minions_in_overkill_range: u32,
    damage: i32,
) -> Option<u32> {
    let count = participant.minion_count()?;
    if damage <= 0 {
        return Some(count);
    }

    let slayable = minions_in_overkill_range.saturating_add(1);
    let per_minion_hp = participant.creature.max_hp;
    let max_slain = if per_minion_hp <= 0 {
        slayable
    } else {
        // both operands are positive here
        (damage as u32).div_ceil(per_minion_hp as u32)
    };

    Some(count.saturating_sub(slayable.min(max_slain)))
}
