//! World configuration, validation, and error types.
//!
//! [`WorldConfig`] aggregates the tunables of every subsystem. Each
//! sub-config has a `Default` matching classic roguelike pacing and a
//! `validate()` pass; [`World::new`](crate::World::new) refuses an
//! invalid configuration instead of misbehaving later.

use std::error::Error;
use std::fmt;

// ── SchedulerConfig ────────────────────────────────────────────────

/// Energy economy of the turn scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Energy granted to an actor each time the energy cursor reaches it.
    /// Default: 100.
    pub energy_increment: i32,
    /// Energy an actor needs to act, and the cost of a turn-consuming
    /// action. Default: 100.
    pub action_threshold: i32,
    /// Ceiling on stored energy. Default: 200.
    pub max_energy: i32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            energy_increment: 100,
            action_threshold: 100,
            max_energy: 200,
        }
    }
}

impl SchedulerConfig {
    /// Check the energy economy can make progress.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.energy_increment <= 0 {
            return Err(ConfigError::NonPositive {
                name: "energy_increment",
                value: i64::from(self.energy_increment),
            });
        }
        if self.action_threshold <= 0 {
            return Err(ConfigError::NonPositive {
                name: "action_threshold",
                value: i64::from(self.action_threshold),
            });
        }
        if self.max_energy < self.action_threshold {
            return Err(ConfigError::MaxEnergyBelowThreshold {
                max_energy: self.max_energy,
                action_threshold: self.action_threshold,
            });
        }
        Ok(())
    }

    /// Grants an actor starting from zero energy needs before it may act.
    pub fn grants_to_act(&self) -> usize {
        let increment = self.energy_increment.max(1) as usize;
        (self.action_threshold.max(0) as usize).div_ceil(increment)
    }

    /// Consecutive idle slots tolerated on a schedule of `actors` before
    /// the scheduler reports starvation.
    pub fn idle_limit(&self, actors: usize) -> usize {
        actors.saturating_mul(self.grants_to_act() + 1)
    }
}

// ── VisionConfig ───────────────────────────────────────────────────

/// Field-of-view parameters for the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisionConfig {
    /// Chebyshev radius of the square field of view. Default: 8.
    pub radius: u32,
    /// Extra ring of ray targets cast beyond the radius. Default: 1.
    pub overscan: u32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            radius: 8,
            overscan: 1,
        }
    }
}

impl VisionConfig {
    /// Largest accepted radius plus overscan.
    pub const MAX_REACH: u32 = 1 << 12;

    /// Check the view fits in the coordinate space.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reach = self.radius.saturating_add(self.overscan);
        if reach > Self::MAX_REACH {
            return Err(ConfigError::VisionTooWide {
                reach,
                max: Self::MAX_REACH,
            });
        }
        Ok(())
    }

    /// Greatest Euclidean distance from the observer to a visible cell.
    pub fn max_sight_distance(&self) -> f64 {
        f64::from(self.radius) * std::f64::consts::SQRT_2
    }
}

// ── ScentConfig ────────────────────────────────────────────────────

/// Shape of the scent trail.
#[derive(Clone, Debug, PartialEq)]
pub struct ScentConfig {
    /// Value band reserved for each world turn. Must exceed the largest
    /// deposit distance so a newer turn always outranks an older one.
    /// Default: 100.
    pub turn_scale: f64,
    /// Turns after which a trail stops being followed. `None` keeps
    /// trails forever. Default: `Some(50)`.
    pub lifetime: Option<u32>,
}

impl Default for ScentConfig {
    fn default() -> Self {
        Self {
            turn_scale: 100.0,
            lifetime: Some(50),
        }
    }
}

impl ScentConfig {
    /// Check the band is usable for trails laid within `vision`.
    pub fn validate(&self, vision: &VisionConfig) -> Result<(), ConfigError> {
        if !self.turn_scale.is_finite() || self.turn_scale <= 0.0 {
            return Err(ConfigError::InvalidTurnScale {
                value: self.turn_scale,
            });
        }
        let min = vision.max_sight_distance();
        if self.turn_scale <= min {
            return Err(ConfigError::TurnScaleTooSmall {
                turn_scale: self.turn_scale,
                min,
            });
        }
        Ok(())
    }
}

// ── CombatConfig ───────────────────────────────────────────────────

/// Deterministic melee damage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatConfig {
    /// Damage dealt by a level-zero attacker. Default: 2.
    pub base_damage: i32,
    /// Extra damage per attacker experience level. Default: 1.
    pub damage_per_level: i32,
    /// Whether the player attacks a hostile by walking into it. When
    /// `false` such a bump is declined without spending the turn.
    /// Default: `true`.
    pub player_bump_attacks: bool,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            base_damage: 2,
            damage_per_level: 1,
            player_bump_attacks: true,
        }
    }
}

impl CombatConfig {
    /// Reject damage terms that could heal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_damage < 0 {
            return Err(ConfigError::NegativeDamage {
                name: "base_damage",
                value: self.base_damage,
            });
        }
        if self.damage_per_level < 0 {
            return Err(ConfigError::NegativeDamage {
                name: "damage_per_level",
                value: self.damage_per_level,
            });
        }
        Ok(())
    }

    /// Damage dealt by an attacker of experience level `level`.
    pub fn damage_for(&self, level: u32) -> i32 {
        let level = i32::try_from(level).unwrap_or(i32::MAX);
        self.base_damage
            .saturating_add(self.damage_per_level.saturating_mul(level))
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`WorldConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A setting that must be strictly positive was not.
    NonPositive {
        /// Which setting.
        name: &'static str,
        /// The configured value.
        value: i64,
    },
    /// No actor could ever store enough energy to act.
    MaxEnergyBelowThreshold {
        /// Configured ceiling.
        max_energy: i32,
        /// Configured cost of an action.
        action_threshold: i32,
    },
    /// Vision radius plus overscan is unreasonably large.
    VisionTooWide {
        /// Configured radius plus overscan.
        reach: u32,
        /// Accepted maximum.
        max: u32,
    },
    /// Scent turn scale is NaN, infinite, zero, or negative.
    InvalidTurnScale {
        /// The invalid value.
        value: f64,
    },
    /// Scent turn scale would let deposits of consecutive turns overlap.
    TurnScaleTooSmall {
        /// Configured scale.
        turn_scale: f64,
        /// Exclusive lower bound implied by the vision radius.
        min: f64,
    },
    /// A damage term is negative.
    NegativeDamage {
        /// Which term.
        name: &'static str,
        /// The configured value.
        value: i32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
            Self::MaxEnergyBelowThreshold {
                max_energy,
                action_threshold,
            } => write!(
                f,
                "max_energy {max_energy} is below action_threshold {action_threshold}"
            ),
            Self::VisionTooWide { reach, max } => {
                write!(f, "vision reach {reach} exceeds maximum of {max}")
            }
            Self::InvalidTurnScale { value } => {
                write!(f, "scent turn_scale must be finite and positive, got {value}")
            }
            Self::TurnScaleTooSmall { turn_scale, min } => write!(
                f,
                "scent turn_scale {turn_scale} must exceed the sight distance {min:.2}"
            ),
            Self::NegativeDamage { name, value } => {
                write!(f, "{name} must not be negative, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── WorldConfig ────────────────────────────────────────────────────

/// Everything needed to construct a [`World`](crate::World).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct WorldConfig {
    /// Energy economy.
    pub scheduler: SchedulerConfig,
    /// Player field of view.
    pub vision: VisionConfig,
    /// Scent trail shape.
    pub scent: ScentConfig,
    /// Melee damage.
    pub combat: CombatConfig,
    /// Seed of the RNG used to break pursuit ties.
    pub seed: u64,
}

impl WorldConfig {
    /// Validate every sub-config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduler.validate()?;
        self.vision.validate()?;
        self.scent.validate(&self.vision)?;
        self.combat.validate()?;
        Ok(())
    }
}
