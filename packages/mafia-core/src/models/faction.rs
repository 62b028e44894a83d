use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Adversary,   // マフィア
    Townsperson, // 市民
}

impl Faction {
    pub fn is_adversary(&self) -> bool {
        matches!(self, Faction::Adversary)
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Adversary => write!(f, "Adversary"),
            Faction::Townsperson => write!(f, "Townsperson"),
        }
    }
}
