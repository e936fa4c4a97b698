//! Allegiance used for friend/foe checks.

/// Which side an actor fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Team {
    /// The player and anything allied with them.
    Player,
    /// Hostile dungeon inhabitants.
    Monster,
    /// Creatures allied with nobody.
    Neutral,
}

impl Team {
    /// Two actors are hostile exactly when their teams differ.
    pub fn is_hostile_to(self, other: Team) -> bool {
        self != other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostility_is_symmetric_and_irreflexive() {
        let teams = [Team::Player, Team::Monster, Team::Neutral];
        for a in teams {
            assert!(!a.is_hostile_to(a));
            for b in teams {
                assert_eq!(a.is_hostile_to(b), b.is_hostile_to(a));
            }
        }
    }
}
