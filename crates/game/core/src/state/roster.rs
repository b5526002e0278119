//! Unit roster shared by both sides of an encounter.

use crate::error::RosterError;

use super::unit::{Side, Unit};

/// All units taking part in the current stage.
///
/// Units are stored allies first, then enemies. That order is the roster
/// iteration order used as the tie-break whenever several units become ready
/// in the same tick, and when ranking allies by HP percentage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    units: Vec<Unit>,
    ally_count: usize,
}

impl Roster {
    /// Builds a roster, rejecting empty sides and duplicate ids.
    pub fn new(allies: Vec<Unit>, enemies: Vec<Unit>) -> Result<Self, RosterError> {
        if allies.is_empty() {
            return Err(RosterError::EmptySide { side: Side::Ally });
        }
        if enemies.is_empty() {
            return Err(RosterError::EmptySide { side: Side::Enemy });
        }

        let ally_count = allies.len();
        let mut units = allies;
        units.extend(enemies);

        for (i, unit) in units.iter().enumerate() {
            if units[..i].iter().any(|u| u.id == unit.id) {
                return Err(RosterError::DuplicateId { id: unit.id });
            }
        }

        Ok(Self { units, ally_count })
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Unit> {
        self.units.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Unit> {
        self.units.get_mut(index)
    }

    pub fn allies(&self) -> &[Unit] {
        &self.units[..self.ally_count]
    }

    pub fn enemies(&self) -> &[Unit] {
        &self.units[self.ally_count..]
    }

    pub fn allies_mut(&mut self) -> &mut [Unit] {
        &mut self.units[..self.ally_count]
    }

    pub fn side(&self, side: Side) -> &[Unit] {
        match side {
            Side::Ally => self.allies(),
            Side::Enemy => self.enemies(),
        }
    }

    /// Roster indices of living units on `side`, in roster order.
    pub fn living(&self, side: Side) -> Vec<usize> {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, u)| u.side == side && u.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    /// True if every unit on `side` has 0 HP.
    pub fn is_defeated(&self, side: Side) -> bool {
        self.side(side).iter().all(|u| !u.is_alive())
    }

    /// Replaces the enemy side wholesale (stage transitions).
    pub fn replace_enemies(&mut self, enemies: Vec<Unit>) {
        self.units.truncate(self.ally_count);
        self.units.extend(enemies);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::state::{BaseStats, Skill, SkillSet, UnitId};

    fn unit(id: u32, side: Side) -> Unit {
        Unit::new(
            UnitId(id),
            format!("u{id}"),
            side,
            BaseStats::default(),
            None,
            SkillSet::new(Skill::new("Strike", 1.0)),
            &BattleConfig::default(),
        )
    }

    #[test]
    fn allies_come_first() {
        let roster = Roster::new(
            vec![unit(0, Side::Ally), unit(1, Side::Ally)],
            vec![unit(2, Side::Enemy)],
        )
        .unwrap();

        assert_eq!(roster.allies().len(), 2);
        assert_eq!(roster.enemies()[0].id, UnitId(2));
        assert_eq!(roster.living(Side::Enemy), vec![2]);
    }

    #[test]
    fn rejects_empty_sides_and_duplicates() {
        assert_eq!(
            Roster::new(vec![], vec![unit(0, Side::Enemy)]).unwrap_err(),
            RosterError::EmptySide { side: Side::Ally }
        );
        assert_eq!(
            Roster::new(vec![unit(0, Side::Ally)], vec![unit(0, Side::Enemy)]).unwrap_err(),
            RosterError::DuplicateId { id: UnitId(0) }
        );
    }

    #[test]
    fn defeat_requires_every_unit_down() {
        let mut roster = Roster::new(
            vec![unit(0, Side::Ally)],
            vec![unit(1, Side::Enemy), unit(2, Side::Enemy)],
        )
        .unwrap();

        roster.get_mut(1).unwrap().hp = 0;
        assert!(!roster.is_defeated(Side::Enemy));
        roster.get_mut(2).unwrap().hp = 0;
        assert!(roster.is_defeated(Side::Enemy));
        assert!(!roster.is_defeated(Side::Ally));
    }
}
