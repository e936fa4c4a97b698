//! The world: levels, actors, scheduling and event fan-out.
//!
//! [`World`] owns every level and every actor. Each call to
//! [`tick`](World::tick) resolves exactly one scheduler slot; the
//! presentation layer usually drives it through
//! [`run_until_input`](World::run_until_input) and feeds player input
//! with [`queue_input`](World::queue_input).

use std::error::Error;
use std::fmt;

use indexmap::IndexMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use umbra_core::{
    ActorId, EventBus, EventSink, GameEvent, ItemId, LevelId, Position, SchedulerError, Team,
    TurnNumber,
};
use umbra_sense::Visibility;
use umbra_space::{SpaceError, Tile, TileKind};

use crate::actor::{Actor, ActorKind, ActorTemplate};
use crate::ai::{AiView, Decision};
use crate::config::{ConfigError, WorldConfig};
use crate::intent::{Intent, Menu};
use crate::level::{Level, LevelError};
use crate::resolver::{commit_move, resolve_attack, try_move, MoveOutcome};
use crate::scheduler::TurnScheduler;

// ── SpawnError ─────────────────────────────────────────────────────

/// Errors placing actors or items into the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpawnError {
    /// No level with this id is registered.
    UnknownLevel(LevelId),
    /// The position is outside the level.
    Space(SpaceError),
    /// The tile cannot hold an actor.
    Blocked {
        /// Requested position.
        pos: Position,
        /// Terrain found there.
        kind: TileKind,
    },
    /// Another actor already stands there.
    Occupied {
        /// Requested position.
        pos: Position,
        /// The actor in the way.
        by: ActorId,
    },
    /// A live player already exists.
    PlayerExists(ActorId),
    /// Players are only created through [`World::spawn_player`].
    PlayerKind,
    /// The template cannot describe a living actor.
    InvalidTemplate {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLevel(id) => write!(f, "level {id} not registered"),
            Self::Space(e) => write!(f, "space: {e}"),
            Self::Blocked { pos, kind } => write!(f, "cannot stand on {kind:?} at {pos}"),
            Self::Occupied { pos, by } => write!(f, "{pos} already occupied by {by}"),
            Self::PlayerExists(id) => write!(f, "player {id} already exists"),
            Self::PlayerKind => write!(f, "players are created with spawn_player"),
            Self::InvalidTemplate { reason } => write!(f, "invalid actor template: {reason}"),
        }
    }
}

impl Error for SpawnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for SpawnError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── Outcomes ───────────────────────────────────────────────────────

/// What an actor's intent amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Stepped to an adjacent cell.
    Moved {
        /// Cell left.
        from: Position,
        /// Cell entered.
        to: Position,
    },
    /// Struck a hostile actor.
    Attacked {
        /// The struck actor.
        defender: ActorId,
        /// Health removed.
        damage: i32,
        /// Whether the blow was fatal.
        killed: bool,
    },
    /// Passed the turn.
    Waited,
    /// Picked up the item underfoot.
    PickedUp(ItemId),
    /// Took a stair to another level.
    ChangedLevel {
        /// Level left.
        from: LevelId,
        /// Level entered.
        to: LevelId,
    },
    /// Asked for a menu.
    OpenedMenu(Menu),
    /// The move or stair destination was not enterable.
    Blocked {
        /// The refused cell.
        target: Position,
    },
    /// The player bumped a hostile but bump attacks are disabled.
    AttackDeclined {
        /// The actor that was not attacked.
        defender: ActorId,
    },
    /// Nothing to pick up here.
    NothingToPickUp,
    /// No usable stair here.
    NoStairs,
}

impl Action {
    /// Whether this spends the actor's turn.
    pub fn consumes_turn(&self) -> bool {
        matches!(
            self,
            Action::Moved { .. }
                | Action::Attacked { .. }
                | Action::Waited
                | Action::PickedUp(_)
                | Action::ChangedLevel { .. }
        )
    }
}

/// Result of resolving one scheduler slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotOutcome {
    /// The actor under the cursor acted.
    Acted {
        /// Who acted.
        actor: ActorId,
        /// What happened.
        action: Action,
    },
    /// The actor lacked energy and was passed over.
    Skipped(ActorId),
    /// The player is eligible but no input is queued.
    AwaitingInput(ActorId),
    /// The player asked for a menu; the turn is not spent.
    MenuRequested {
        /// The player.
        actor: ActorId,
        /// Requested menu.
        menu: Menu,
    },
    /// No living player remains.
    PlayerDead,
}

/// Why [`World::run_until_input`] stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The player needs input.
    AwaitingInput(ActorId),
    /// The player asked for a menu.
    MenuRequested {
        /// The player.
        actor: ActorId,
        /// Requested menu.
        menu: Menu,
    },
    /// No living player remains.
    PlayerDead,
}

// ── World ──────────────────────────────────────────────────────────

/// The whole simulation state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    levels: IndexMap<LevelId, Level>,
    current_level: LevelId,
    actors: IndexMap<ActorId, Actor>,
    scheduler: TurnScheduler,
    events: EventBus,
    rng: ChaCha8Rng,
    turn: TurnNumber,
    next_actor: u32,
    next_item: u32,
    player: Option<ActorId>,
    pending: Option<Intent>,
}

impl World {
    /// Build a world whose active level is `first_level`.
    pub fn new(config: WorldConfig, first_level: Level) -> Result<Self, ConfigError> {
        config.validate()?;
        let current_level = first_level.id();
        let mut levels = IndexMap::new();
        levels.insert(current_level, first_level);
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            levels,
            current_level,
            actors: IndexMap::new(),
            scheduler: TurnScheduler::new(),
            events: EventBus::new(),
            turn: TurnNumber::FIRST,
            next_actor: 0,
            next_item: 0,
            player: None,
            pending: None,
        })
    }

    /// The configuration the world was built with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Register another level.
    pub fn add_level(&mut self, level: Level) -> Result<(), LevelError> {
        let id = level.id();
        if self.levels.contains_key(&id) {
            return Err(LevelError::DuplicateLevel(id));
        }
        self.levels.insert(id, level);
        Ok(())
    }

    /// Add an event subscriber.
    pub fn subscribe(&mut self, sink: Box<dyn EventSink + Send>) {
        self.events.subscribe(sink);
    }

    // ── Spawning ───────────────────────────────────────────────────

    /// Create the player on `level` and make that level active.
    ///
    /// The scheduler is rebuilt for the level with the player first, and
    /// the player's view and scent are laid for the current turn.
    pub fn spawn_player(
        &mut self,
        level: LevelId,
        pos: Position,
        template: &ActorTemplate,
    ) -> Result<ActorId, SpawnError> {
        if let Some(existing) = self.player().map(Actor::id) {
            return Err(SpawnError::PlayerExists(existing));
        }
        let id = self.register(ActorKind::Player, Team::Player, level, pos, template)?;
        self.player = Some(id);
        self.current_level = level;
        let roster = self.roster(level);
        self.scheduler.rebuild(roster);
        self.observe();
        Ok(id)
    }

    /// Create an idle monster on `level`.
    pub fn spawn_monster(
        &mut self,
        level: LevelId,
        pos: Position,
        template: &ActorTemplate,
    ) -> Result<ActorId, SpawnError> {
        self.spawn(ActorKind::idle_monster(), Team::Monster, level, pos, template)
    }

    /// Create a non-player actor of any kind and team.
    ///
    /// Actors on the active level join the end of the schedule; others
    /// wait until the player arrives on their level. A player kind is
    /// refused with [`SpawnError::PlayerKind`].
    pub fn spawn(
        &mut self,
        kind: ActorKind,
        team: Team,
        level: LevelId,
        pos: Position,
        template: &ActorTemplate,
    ) -> Result<ActorId, SpawnError> {
        if kind.is_player() {
            return Err(SpawnError::PlayerKind);
        }
        self.register(kind, team, level, pos, template)
    }

    fn register(
        &mut self,
        kind: ActorKind,
        team: Team,
        level: LevelId,
        pos: Position,
        template: &ActorTemplate,
    ) -> Result<ActorId, SpawnError> {
        self.check_template(template)?;
        let grid = self
            .levels
            .get(&level)
            .ok_or(SpawnError::UnknownLevel(level))?
            .grid();
        let tile = grid.tile_at(pos)?;
        if !tile.kind.is_walkable() {
            return Err(SpawnError::Blocked {
                pos,
                kind: tile.kind,
            });
        }
        if let Some(by) = tile.occupant {
            return Err(SpawnError::Occupied { pos, by });
        }

        let id = ActorId(self.next_actor);
        self.next_actor += 1;
        self.levels[&level].grid_mut().place_occupant(pos, id)?;
        let max_energy = self.config.scheduler.max_energy;
        let actor = Actor::new(id, kind, team, level, pos, template, max_energy);
        log::info!("spawned {} {id} ({kind:?}) at {pos} on level {level}", actor.name());
        self.actors.insert(id, actor);
        if level == self.current_level && !kind.is_player() {
            self.scheduler.push(id);
        }
        Ok(id)
    }

    fn check_template(&self, template: &ActorTemplate) -> Result<(), SpawnError> {
        if template.max_health <= 0 {
            return Err(SpawnError::InvalidTemplate {
                reason: format!("max_health {} must be positive", template.max_health),
            });
        }
        let max_energy = self.config.scheduler.max_energy;
        if !(0..=max_energy).contains(&template.energy) {
            return Err(SpawnError::InvalidTemplate {
                reason: format!("energy {} outside 0..={max_energy}", template.energy),
            });
        }
        Ok(())
    }

    /// Remove an actor from the registry, its tile and the schedule.
    pub fn despawn(&mut self, id: ActorId) -> Option<Actor> {
        let actor = self.actors.shift_remove(&id)?;
        if let Some(level) = self.levels.get_mut(&actor.level_id()) {
            let grid = level.grid_mut();
            if grid.occupant_at(actor.pos()) == Some(id) {
                // In bounds: the occupant check above succeeded.
                let _ = grid.clear_occupant(actor.pos());
            }
        }
        self.scheduler.remove(id);
        log::debug!("despawned {} {id}", actor.name());
        Some(actor)
    }

    /// Put a new item on the floor at `pos`.
    pub fn place_item(&mut self, level: LevelId, pos: Position) -> Result<ItemId, SpawnError> {
        let grid = self
            .levels
            .get_mut(&level)
            .ok_or(SpawnError::UnknownLevel(level))?
            .grid_mut();
        let kind = grid.kind_at(pos)?;
        if !kind.is_walkable() {
            return Err(SpawnError::Blocked { pos, kind });
        }
        let item = ItemId(self.next_item);
        if let Some(displaced) = grid.place_item(pos, item)? {
            log::warn!("item {item} replaced item {displaced} at {pos}");
        }
        self.next_item += 1;
        Ok(item)
    }

    /// Actors on `level`, player first, then in registration order.
    fn roster(&self, level: LevelId) -> Vec<ActorId> {
        let player = self
            .player
            .filter(|id| self.actors.get(id).is_some_and(|a| a.level_id() == level));
        player
            .into_iter()
            .chain(
                self.actors
                    .values()
                    .filter(|a| a.level_id() == level && Some(a.id()) != player)
                    .map(Actor::id),
            )
            .collect()
    }

    // ── Input and scheduling ───────────────────────────────────────

    /// Queue the player's next intent, replacing any unconsumed one.
    pub fn queue_input(&mut self, intent: Intent) -> Option<Intent> {
        let previous = self.pending.replace(intent);
        if let Some(previous) = previous {
            log::debug!("input {previous:?} replaced by {intent:?}");
        }
        previous
    }

    /// The queued, not yet consumed, player intent.
    pub fn pending_input(&self) -> Option<Intent> {
        self.pending
    }

    /// Resolve the slot under the action cursor.
    pub fn tick(&mut self) -> Result<SlotOutcome, SchedulerError> {
        if self.player().is_none() {
            return Ok(SlotOutcome::PlayerDead);
        }
        if self.scheduler.wrap_if_done() && !self.scheduler.is_empty() {
            self.begin_turn();
        }
        self.grant_energy();
        let Some(id) = self.scheduler.current() else {
            return Err(self.scheduler.starved());
        };
        let Some(actor) = self.actors.get(&id) else {
            log::warn!("scheduled actor {id} is not registered, unscheduling");
            self.scheduler.remove(id);
            return Ok(SlotOutcome::Skipped(id));
        };

        let threshold = self.config.scheduler.action_threshold;
        if actor.energy().current() < threshold {
            self.scheduler.note_idle(&self.config.scheduler)?;
            self.advance();
            return Ok(SlotOutcome::Skipped(id));
        }

        let kind = actor.kind();
        let view = AiView {
            level: &self.levels[&actor.level_id()],
            actors: &self.actors,
            turn: self.turn,
        };
        let (intent, behavior) = match kind.decide(actor, &view, &mut self.pending, &mut self.rng) {
            Decision::AwaitInput => return Ok(SlotOutcome::AwaitingInput(id)),
            Decision::Act { intent, behavior } => (intent, behavior),
        };
        if let (Some(behavior), Some(actor)) = (behavior, self.actors.get_mut(&id)) {
            actor.set_behavior(behavior);
        }

        let mut action = self.perform(id, kind, intent);
        if !kind.is_player() && !action.consumes_turn() {
            action = Action::Waited;
        }
        if let Action::OpenedMenu(menu) = action {
            return Ok(SlotOutcome::MenuRequested { actor: id, menu });
        }
        log::debug!("turn {}: {id} {intent:?} -> {action:?}", self.turn);

        if action.consumes_turn() {
            if let Some(actor) = self.actors.get_mut(&id) {
                actor.energy_mut().drain(threshold);
            }
            self.scheduler.note_action();
            if matches!(action, Action::ChangedLevel { .. }) {
                self.grant_energy();
            } else {
                self.advance();
            }
        }
        Ok(SlotOutcome::Acted { actor: id, action })
    }

    /// Tick until the player needs input, asks for a menu, or dies.
    pub fn run_until_input(&mut self) -> Result<RunOutcome, SchedulerError> {
        loop {
            match self.tick()? {
                SlotOutcome::AwaitingInput(actor) => return Ok(RunOutcome::AwaitingInput(actor)),
                SlotOutcome::MenuRequested { actor, menu } => {
                    return Ok(RunOutcome::MenuRequested { actor, menu })
                }
                SlotOutcome::PlayerDead => return Ok(RunOutcome::PlayerDead),
                SlotOutcome::Acted { .. } | SlotOutcome::Skipped(_) => {}
            }
        }
    }

    fn advance(&mut self) {
        if self.scheduler.advance() {
            self.begin_turn();
        }
        self.grant_energy();
    }

    fn grant_energy(&mut self) {
        let Some(id) = self.scheduler.take_grant() else {
            return;
        };
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.energy_mut().fill(self.config.scheduler.energy_increment);
        }
    }

    fn begin_turn(&mut self) {
        self.turn = self.turn.next();
        log::debug!("turn {} begins", self.turn);
        self.observe();
    }

    /// Refresh the player's view and lay scent on the active level.
    fn observe(&mut self) {
        let Some((level, pos)) = self.player().map(|p| (p.level_id(), p.pos())) else {
            return;
        };
        let Some(level) = self.levels.get_mut(&level) else {
            return;
        };
        if let Err(e) = level.observe(self.turn, pos, &self.config.vision) {
            log::warn!("vision refresh from {pos} failed: {e}");
        }
    }

    // ── Actions ────────────────────────────────────────────────────

    fn perform(&mut self, id: ActorId, kind: ActorKind, intent: Intent) -> Action {
        match intent {
            Intent::Wait => Action::Waited,
            Intent::Move(dir) => self.perform_move(id, kind, dir),
            Intent::PickUp => self.perform_pickup(id),
            Intent::TakeStairs => self.perform_stairs(id),
            Intent::OpenMenu(menu) => Action::OpenedMenu(menu),
        }
    }

    fn perform_move(&mut self, id: ActorId, kind: ActorKind, dir: umbra_core::Direction) -> Action {
        let actor = &self.actors[&id];
        let (level_id, from) = (actor.level_id(), actor.pos());
        let target = from.step(dir);
        match try_move(actor, target, self.levels[&level_id].grid(), &self.actors) {
            MoveOutcome::Invalid => Action::Blocked { target },
            MoveOutcome::Success => {
                let grid = self.levels[&level_id].grid_mut();
                if let Err(e) = commit_move(&mut self.actors[&id], target, grid) {
                    log::warn!("move of {id} to {target} rejected: {e}");
                    return Action::Blocked { target };
                }
                self.events.notify(&GameEvent::ActorMoved {
                    actor: id,
                    from,
                    to: target,
                });
                Action::Moved { from, to: target }
            }
            MoveOutcome::WouldAttackOccupant(defender) => {
                if kind.is_player() && !self.config.combat.player_bump_attacks {
                    return Action::AttackDeclined { defender };
                }
                self.attack(id, defender)
            }
        }
    }

    fn attack(&mut self, attacker: ActorId, defender: ActorId) -> Action {
        let striker = self.actors[&attacker].clone();
        let Some(target) = self.actors.get_mut(&defender) else {
            return Action::Blocked { target: striker.pos() };
        };
        let outcome = resolve_attack(&striker, target, &self.config.combat);
        let defender_is_player = target.kind().is_player();
        let max = target.health().max();

        self.events.notify(&GameEvent::ActorAttacked {
            attacker,
            defender,
            damage: outcome.damage,
        });
        if defender_is_player {
            self.events.notify(&GameEvent::PlayerHealthChanged {
                actor: defender,
                old: outcome.old_health,
                new: outcome.new_health,
                max,
            });
        }
        if outcome.killed {
            log::info!("{} {attacker} killed {defender}", striker.name());
            self.events.notify(&GameEvent::ActorKilled { attacker, defender });
            if defender_is_player {
                self.events.notify(&GameEvent::PlayerDied { actor: defender });
            }
            self.despawn(defender);
        }
        Action::Attacked {
            defender,
            damage: outcome.damage,
            killed: outcome.killed,
        }
    }

    fn perform_pickup(&mut self, id: ActorId) -> Action {
        let (level_id, pos) = {
            let actor = &self.actors[&id];
            (actor.level_id(), actor.pos())
        };
        let item = match self.levels[&level_id].grid_mut().take_item(pos) {
            Ok(Some(item)) => item,
            Ok(None) => return Action::NothingToPickUp,
            Err(e) => {
                log::warn!("pickup by {id} at {pos} failed: {e}");
                return Action::NothingToPickUp;
            }
        };
        self.actors[&id].carry(item);
        self.events.notify(&GameEvent::ItemPickedUp { actor: id, item, at: pos });
        Action::PickedUp(item)
    }

    fn perform_stairs(&mut self, id: ActorId) -> Action {
        if self.player != Some(id) {
            return Action::NoStairs;
        }
        let (from_level, pos) = {
            let actor = &self.actors[&id];
            (actor.level_id(), actor.pos())
        };
        let Some(stair) = self.levels[&from_level].stair_at(pos).copied() else {
            return Action::NoStairs;
        };
        let Some(dest) = self.levels.get_mut(&stair.destination) else {
            log::warn!("stair at {pos} leads to unregistered level {}", stair.destination);
            return Action::NoStairs;
        };
        let arrival = stair.arrival;
        if !dest.grid().tile_at(arrival).is_ok_and(Tile::is_free) {
            log::debug!("arrival {arrival} on level {} is not free", stair.destination);
            return Action::Blocked { target: arrival };
        }
        if let Err(e) = dest.grid_mut().place_occupant(arrival, id) {
            log::warn!("arrival of {id} at {arrival} rejected: {e}");
            return Action::Blocked { target: arrival };
        }
        // The player stood here, so the position is in bounds.
        let _ = self.levels[&from_level].grid_mut().clear_occupant(pos);
        self.actors[&id].set_location(stair.destination, arrival);

        self.current_level = stair.destination;
        let roster = self.roster(stair.destination);
        self.scheduler.rebuild(roster);
        self.turn = self.turn.next();
        self.observe();
        log::info!(
            "{id} took stairs from level {from_level} to level {} at {arrival}",
            stair.destination
        );
        self.events.notify(&GameEvent::LevelChanged {
            actor: id,
            from_level,
            to_level: stair.destination,
            at: arrival,
        });
        Action::ChangedLevel {
            from: from_level,
            to: stair.destination,
        }
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Current world turn.
    pub fn turn(&self) -> TurnNumber {
        self.turn
    }

    /// The level the player is on.
    pub fn current_level(&self) -> &Level {
        &self.levels[&self.current_level]
    }

    /// A registered level.
    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(&id)
    }

    /// The active schedule.
    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    /// Tile at `pos` on the active level.
    pub fn tile_at(&self, pos: Position) -> Result<&Tile, SpaceError> {
        self.current_level().grid().tile_at(pos)
    }

    /// What the player knows about `pos` on the active level.
    pub fn visibility_at(&self, pos: Position) -> Result<Visibility, SpaceError> {
        self.current_level().visibility().visibility_at(pos)
    }

    /// Raw scent value at `pos` on the active level.
    pub fn scent_at(&self, pos: Position) -> Result<f64, SpaceError> {
        self.current_level().scent().scent_at(pos)
    }

    /// Actor standing at `pos` on the active level.
    pub fn actor_at(&self, pos: Position) -> Option<&Actor> {
        let id = self.current_level().grid().occupant_at(pos)?;
        self.actors.get(&id)
    }

    /// A registered actor.
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Mutable access to a registered actor's gauges and inventory.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// All registered actors in registration order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// The living player, if any.
    pub fn player(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actors.get(&id))
    }
}
