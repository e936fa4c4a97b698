//! Actors: the player and the monsters.
//!
//! Actors are owned by the world's registry. The grid and the scheduler
//! only hold their [`ActorId`]s.

use umbra_core::{report_invariant, ActorId, InvariantViolation, ItemId, LevelId, Position, Team};

/// A monster's current frame of mind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Nothing to chase.
    #[default]
    Idle,
    /// Chasing the player by sight or by scent.
    Pursuing,
}

/// Who decides an actor's intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// Driven by queued input.
    Player,
    /// Driven by the built-in AI.
    Monster {
        /// Current behaviour state.
        behavior: Behavior,
    },
}

impl ActorKind {
    /// A monster that has not noticed anything yet.
    pub const fn idle_monster() -> Self {
        ActorKind::Monster {
            behavior: Behavior::Idle,
        }
    }

    /// Whether this actor waits for input.
    pub fn is_player(self) -> bool {
        matches!(self, ActorKind::Player)
    }
}

/// A bounded integer resource such as health or energy.
///
/// `0 <= current <= max` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gauge {
    current: i32,
    max: i32,
}

impl Gauge {
    /// A gauge filled to `max`.
    pub fn full(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    /// An empty gauge with ceiling `max`.
    pub fn empty(max: i32) -> Self {
        Self {
            current: 0,
            max: max.max(0),
        }
    }

    /// Current value.
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Ceiling.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Whether the gauge reads zero.
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Add `amount`, stopping at the ceiling. Returns the new value.
    pub fn fill(&mut self, amount: i32) -> i32 {
        self.current = self.current.saturating_add(amount.max(0)).min(self.max);
        self.current
    }

    /// Remove `amount`, stopping at zero. Returns the new value.
    pub fn drain(&mut self, amount: i32) -> i32 {
        self.current = self.current.saturating_sub(amount.max(0)).max(0);
        self.current
    }

    /// Set the value outright. A value above the ceiling is clamped and
    /// handed back as `Err` so the owner can report it.
    fn set(&mut self, value: i32) -> Result<(), i32> {
        if value > self.max {
            self.current = self.max;
            return Err(value);
        }
        self.current = value.max(0);
        Ok(())
    }
}

/// Stats an actor is spawned with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorTemplate {
    /// Display name, for logs and the presentation layer.
    pub name: String,
    /// Maximum (and starting) health.
    pub max_health: i32,
    /// Experience level; scales melee damage.
    pub level: u32,
    /// Energy on arrival. Default: 0.
    pub energy: i32,
}

impl ActorTemplate {
    /// A level-zero template with no starting energy.
    pub fn new(name: impl Into<String>, max_health: i32) -> Self {
        Self {
            name: name.into(),
            max_health,
            level: 0,
            energy: 0,
        }
    }

    /// Set the experience level.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Set the starting energy.
    pub fn with_energy(mut self, energy: i32) -> Self {
        self.energy = energy;
        self
    }
}

/// A creature on some level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    id: ActorId,
    name: String,
    kind: ActorKind,
    team: Team,
    level_id: LevelId,
    pos: Position,
    level: u32,
    health: Gauge,
    energy: Gauge,
    inventory: Vec<ItemId>,
}

impl Actor {
    pub(crate) fn new(
        id: ActorId,
        kind: ActorKind,
        team: Team,
        level_id: LevelId,
        pos: Position,
        template: &ActorTemplate,
        max_energy: i32,
    ) -> Self {
        let mut actor = Self {
            id,
            name: template.name.clone(),
            kind,
            team,
            level_id,
            pos,
            level: template.level,
            health: Gauge::full(template.max_health),
            energy: Gauge::empty(max_energy),
            inventory: Vec::new(),
        };
        actor.set_energy(template.energy);
        actor
    }

    /// Registry id.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Who drives this actor.
    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    /// Allegiance.
    pub fn team(&self) -> Team {
        self.team
    }

    /// Whether `other` is an enemy of this actor.
    pub fn is_hostile_to(&self, other: &Actor) -> bool {
        self.team.is_hostile_to(other.team)
    }

    /// Level the actor is on.
    pub fn level_id(&self) -> LevelId {
        self.level_id
    }

    /// Cell the actor stands on.
    pub fn pos(&self) -> Position {
        self.pos
    }

    /// Experience level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Health gauge.
    pub fn health(&self) -> Gauge {
        self.health
    }

    /// Energy gauge.
    pub fn energy(&self) -> Gauge {
        self.energy
    }

    /// Items carried, in pickup order.
    pub fn inventory(&self) -> &[ItemId] {
        &self.inventory
    }

    /// Whether health has reached zero.
    pub fn is_dead(&self) -> bool {
        self.health.is_empty()
    }

    /// Overwrite current energy. Values above the ceiling are an
    /// invariant violation and are clamped.
    pub fn set_energy(&mut self, value: i32) {
        if let Err(energy) = self.energy.set(value) {
            report_invariant(InvariantViolation::EnergyOverflow {
                actor: self.id,
                energy,
                max: self.energy.max(),
            });
        }
    }

    /// Overwrite current health. Values above the maximum are an
    /// invariant violation and are clamped.
    pub fn set_health(&mut self, value: i32) {
        if let Err(health) = self.health.set(value) {
            report_invariant(InvariantViolation::HealthOverflow {
                actor: self.id,
                health,
                max: self.health.max(),
            });
        }
    }

    pub(crate) fn set_behavior(&mut self, behavior: Behavior) {
        if let ActorKind::Monster { behavior: b } = &mut self.kind {
            *b = behavior;
        }
    }

    pub(crate) fn set_location(&mut self, level_id: LevelId, pos: Position) {
        self.level_id = level_id;
        self.pos = pos;
    }

    pub(crate) fn energy_mut(&mut self) -> &mut Gauge {
        &mut self.energy
    }

    pub(crate) fn health_mut(&mut self) -> &mut Gauge {
        &mut self.health
    }

    pub(crate) fn carry(&mut self, item: ItemId) {
        self.inventory.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin(energy: i32) -> Actor {
        Actor::new(
            ActorId(3),
            ActorKind::idle_monster(),
            Team::Monster,
            LevelId(0),
            Position::new(1, 1),
            &ActorTemplate::new("goblin", 6).with_energy(energy),
            200,
        )
    }

    #[test]
    fn gauge_clamps_both_ends() {
        let mut g = Gauge::empty(10);
        assert_eq!(g.fill(25), 10);
        assert_eq!(g.drain(4), 6);
        assert_eq!(g.drain(100), 0);
        assert!(g.is_empty());
        assert_eq!(g.fill(-5), 0);
    }

    #[test]
    fn template_sets_starting_stats() {
        let a = goblin(40);
        assert_eq!(a.energy().current(), 40);
        assert_eq!(a.health().current(), 6);
        assert_eq!(a.health().max(), 6);
        assert!(!a.is_dead());
    }

    #[test]
    fn behaviour_only_changes_monsters() {
        let mut a = goblin(0);
        a.set_behavior(Behavior::Pursuing);
        assert_eq!(
            a.kind(),
            ActorKind::Monster {
                behavior: Behavior::Pursuing
            }
        );
        a.kind = ActorKind::Player;
        a.set_behavior(Behavior::Idle);
        assert_eq!(a.kind(), ActorKind::Player);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "invariant violated"))]
    fn energy_above_ceiling_is_reported_and_clamped() {
        let mut a = goblin(0);
        a.set_energy(500);
        assert_eq!(a.energy().current(), 200);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "invariant violated"))]
    fn health_above_max_is_reported_and_clamped() {
        let mut a = goblin(0);
        a.set_health(7);
        assert_eq!(a.health().current(), 6);
    }
}
