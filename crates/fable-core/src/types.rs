use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle for the actor a node is being evaluated for.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle for the controller driving the actor.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ControllerId(pub String);

impl From<&str> for ControllerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle phase a node is being dispatched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Enter,
    Exit,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => write!(f, "enter"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// Which lifecycle phases an event fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireOn {
    #[default]
    Enter,
    Exit,
    Both,
}

impl FireOn {
    /// Whether an event tagged with `self` runs when `phase` is dispatched.
    pub fn fires_on(self, phase: Phase) -> bool {
        match self {
            Self::Both => true,
            Self::Enter => phase == Phase::Enter,
            Self::Exit => phase == Phase::Exit,
        }
    }
}

impl fmt::Display for FireOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => write!(f, "enter"),
            Self::Exit => write!(f, "exit"),
            Self::Both => write!(f, "both"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_on_matches_phase() {
        assert!(FireOn::Enter.fires_on(Phase::Enter));
        assert!(!FireOn::Enter.fires_on(Phase::Exit));
        assert!(FireOn::Exit.fires_on(Phase::Exit));
        assert!(!FireOn::Exit.fires_on(Phase::Enter));
        assert!(FireOn::Both.fires_on(Phase::Enter));
        assert!(FireOn::Both.fires_on(Phase::Exit));
    }

    #[test]
    fn test_fire_on_serde() {
        let tag: FireOn = serde_json::from_str(r#""both""#).unwrap();
        assert_eq!(tag, FireOn::Both);
        assert_eq!(serde_json::to_string(&Phase::Exit).unwrap(), r#""exit""#);
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(ActorId::from("hero").to_string(), "hero");
        assert_eq!(ControllerId::from("player-0").to_string(), "player-0");
    }
}
