//! Intent selection for every actor kind.
//!
//! Players replay queued input. Monsters chase what they can see, then
//! what they can smell, and otherwise idle.

use indexmap::IndexMap;
use rand::Rng;
use smallvec::SmallVec;
use umbra_core::{ActorId, Position, TurnNumber};
use umbra_sense::ScentCandidate;

use crate::actor::{Actor, ActorKind, Behavior};
use crate::intent::Intent;
use crate::level::Level;

/// Read-only slice of the world an actor decides against.
#[derive(Clone, Copy, Debug)]
pub struct AiView<'a> {
    /// The level the actor is on.
    pub level: &'a Level,
    /// The actor registry.
    pub actors: &'a IndexMap<ActorId, Actor>,
    /// Current world turn.
    pub turn: TurnNumber,
}

/// What an actor's slot should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// A player-controlled actor has no queued intent.
    AwaitInput,
    /// Carry out `intent`, switching to `behavior` if given.
    Act {
        /// The chosen intent.
        intent: Intent,
        /// New behaviour state for monsters.
        behavior: Option<Behavior>,
    },
}

impl ActorKind {
    /// Choose an intent for `actor`.
    ///
    /// Players consume `input`. Monsters ignore it and may draw from
    /// `rng` to break ties between equally fresh scent trails.
    pub fn decide<R: Rng>(
        self,
        actor: &Actor,
        view: &AiView<'_>,
        input: &mut Option<Intent>,
        rng: &mut R,
    ) -> Decision {
        match self {
            ActorKind::Player => match input.take() {
                Some(intent) => Decision::Act {
                    intent,
                    behavior: None,
                },
                None => Decision::AwaitInput,
            },
            ActorKind::Monster { .. } => monster_decision(actor, view, rng),
        }
    }
}

fn monster_decision<R: Rng>(actor: &Actor, view: &AiView<'_>, rng: &mut R) -> Decision {
    let (intent, behavior) = if let Some(intent) = chase_by_sight(actor, view) {
        (intent, Behavior::Pursuing)
    } else if let Some(intent) = chase_by_scent(actor, view, rng) {
        (intent, Behavior::Pursuing)
    } else {
        (Intent::Wait, Behavior::Idle)
    };
    log::debug!("{} {} chooses {intent:?} ({behavior:?})", actor.name(), actor.id());
    Decision::Act {
        intent,
        behavior: Some(behavior),
    }
}

/// Whether `actor` could step onto `pos`: walkable and either empty or
/// held by an enemy.
fn enterable(actor: &Actor, pos: Position, view: &AiView<'_>) -> bool {
    let grid = view.level.grid();
    if !grid.is_walkable(pos) {
        return false;
    }
    match grid.occupant_at(pos) {
        None => true,
        Some(id) => view.actors.get(&id).is_some_and(|other| actor.is_hostile_to(other)),
    }
}

fn nearest_hostile(actor: &Actor, view: &AiView<'_>) -> Option<Position> {
    view.actors
        .values()
        .filter(|other| other.level_id() == actor.level_id() && actor.is_hostile_to(other))
        .min_by_key(|other| other.pos().chebyshev(actor.pos()))
        .map(Actor::pos)
}

fn step_towards(from: Position, to: Position) -> Intent {
    from.direction_to(to).map_or(Intent::Wait, Intent::Move)
}

/// A monster the player can see can see the player: close the distance.
fn chase_by_sight(actor: &Actor, view: &AiView<'_>) -> Option<Intent> {
    if !view.level.visibility().is_visible(actor.pos()) {
        return None;
    }
    let target = nearest_hostile(actor, view)?;
    let step = view
        .level
        .grid()
        .extent()
        .neighbours(actor.pos())
        .into_iter()
        .filter(|p| enterable(actor, *p, view))
        .min_by_key(|p| p.chebyshev(target));
    Some(step.map_or(Intent::Wait, |p| step_towards(actor.pos(), p)))
}

/// Follow the trail uphill. A monster already on the freshest cell of
/// its neighbourhood stays put.
fn chase_by_scent<R: Rng>(actor: &Actor, view: &AiView<'_>, rng: &mut R) -> Option<Intent> {
    let scent = view.level.scent();
    let here = scent.strength(view.turn, actor.pos());
    let candidates: SmallVec<[ScentCandidate; 8]> = scent
        .track(view.turn, actor.pos())
        .into_iter()
        .filter(|c| c.strength > here && enterable(actor, c.pos, view))
        .collect();
    let next = choose_trail(&candidates, rng)?;
    Some(step_towards(actor.pos(), next))
}

/// Pick among the strongest of `candidates`, which must be sorted
/// strongest first. Equal strengths are broken with `rng`.
fn choose_trail<R: Rng>(candidates: &[ScentCandidate], rng: &mut R) -> Option<Position> {
    let best = candidates.first()?.strength;
    let tied = candidates.iter().take_while(|c| c.strength == best).count();
    let pick = if tied > 1 { rng.random_range(0..tied) } else { 0 };
    Some(candidates[pick].pos)
}
