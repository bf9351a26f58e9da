//! Contact classification
//!
//! The host resolves its collision shapes to logical tags; this module only
//! decides what a contact between two tags means for the run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::state::GamePhase;

/// Logical identity of a body taking part in a contact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactTag {
    /// Pass-through volume between obstacle columns
    Goal,
    Ground,
    Obstacle,
    /// The player body
    Hero,
    /// Anything else the host reports
    Other(String),
}

impl ContactTag {
    pub fn as_str(&self) -> &str {
        match self {
            ContactTag::Goal => "goal",
            ContactTag::Ground => "ground",
            ContactTag::Obstacle => "obstacle",
            ContactTag::Hero => "hero",
            ContactTag::Other(name) => name,
        }
    }

    /// Map a host node name to a tag. Unknown names become [`ContactTag::Other`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "goal" => ContactTag::Goal,
            "ground" => ContactTag::Ground,
            "obstacle" => ContactTag::Obstacle,
            "hero" | "player" | "body" => ContactTag::Hero,
            other => ContactTag::Other(other.to_string()),
        }
    }
}

impl FromStr for ContactTag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for ContactTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a contact does to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOutcome {
    /// A goal was touched
    Score,
    /// Contact after the run already ended
    Ignore,
    /// Fatal contact while active
    Terminate,
}

/// Classify a contact between `a` and `b` in the given phase.
///
/// Goal contacts score in every phase, including after game over.
pub fn classify(a: &ContactTag, b: &ContactTag, phase: GamePhase) -> ContactOutcome {
    if *a == ContactTag::Goal || *b == ContactTag::Goal {
        return ContactOutcome::Score;
    }
    if phase != GamePhase::Active {
        return ContactOutcome::Ignore;
    }
    ContactOutcome::Terminate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_scores_in_any_phase() {
        for phase in [GamePhase::Active, GamePhase::GameOver] {
            assert_eq!(
                classify(&ContactTag::Goal, &ContactTag::Hero, phase),
                ContactOutcome::Score
            );
            assert_eq!(
                classify(&ContactTag::Hero, &ContactTag::Goal, phase),
                ContactOutcome::Score
            );
        }
    }

    #[test]
    fn test_fatal_only_while_active() {
        let ground = ContactTag::Ground;
        let hero = ContactTag::Hero;
        assert_eq!(
            classify(&hero, &ground, GamePhase::Active),
            ContactOutcome::Terminate
        );
        assert_eq!(
            classify(&hero, &ground, GamePhase::GameOver),
            ContactOutcome::Ignore
        );
    }

    #[test]
    fn test_unknown_tags_are_fatal() {
        let a = ContactTag::from_name("ceiling");
        assert_eq!(a, ContactTag::Other("ceiling".to_string()));
        assert_eq!(
            classify(&a, &ContactTag::Hero, GamePhase::Active),
            ContactOutcome::Terminate
        );
    }

    #[test]
    fn test_name_round_trip() {
        for name in ["goal", "ground", "obstacle", "hero", "ceiling"] {
            let tag: ContactTag = name.parse().unwrap();
            assert_eq!(tag.to_string(), name);
        }
        assert_eq!(ContactTag::from_name("player"), ContactTag::Hero);
    }
}
