use std::fmt;

use thiserror::Error;

use crate::models::resident::ResidentId;

/// 候補を選ぶフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Assassination,
    Lynch,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Assassination => write!(f, "assassination"),
            Phase::Lynch => write!(f, "lynch"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TownError {
    #[error("population of {population} cannot hold at least one adversary and one townsperson")]
    InvalidConstruction { population: usize },
    #[error("no eligible target during {phase} (resident: {resident:?})")]
    EmptyCandidatePool {
        phase: Phase,
        resident: Option<ResidentId>,
    },
    #[error("open vote reached no majority after {attempts} attempts")]
    NonTerminatingMajority { attempts: usize },
    #[error("unknown resident: {0}")]
    UnknownResident(ResidentId),
    #[error("resident {0} is already dead")]
    AlreadyEliminated(ResidentId),
}
