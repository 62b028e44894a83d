use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::faction::Faction;
use crate::error::{Phase, TownError};

pub type ResidentId = u32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    pub id: ResidentId,
    pub faction: Faction,
    pub alive: bool,
}

/// One ballot: the voter and whom they picked. `target` is `None` when the
/// voter was already dead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: ResidentId,
    pub target: Option<ResidentId>,
}

impl Resident {
    pub fn new(id: ResidentId, faction: Faction) -> Self {
        Self {
            id,
            faction,
            alive: true,
        }
    }

    pub fn is_adversary(&self) -> bool {
        self.faction.is_adversary()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Picks a target among `residents` according to this resident's faction.
    ///
    /// Adversaries only vote for living townspeople; townspeople vote for any
    /// other living resident.
    pub fn cast_vote<R: Rng + ?Sized>(
        &self,
        residents: &[Resident],
        rng: &mut R,
    ) -> Result<Vote, TownError> {
        if !self.alive {
            return Ok(Vote {
                voter: self.id,
                target: None,
            });
        }

        let candidates: Vec<ResidentId> = residents
            .iter()
            .filter(|r| r.alive && r.id != self.id)
            .filter(|r| !(self.is_adversary() && r.is_adversary()))
            .map(|r| r.id)
            .collect();

        let target = candidates
            .choose(rng)
            .copied()
            .ok_or(TownError::EmptyCandidatePool {
                phase: Phase::Lynch,
                resident: Some(self.id),
            })?;

        Ok(Vote {
            voter: self.id,
            target: Some(target),
        })
    }

    /// Marks the resident dead. Returns `false` if they already were.
    pub fn eliminate(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

impl fmt::Display for Resident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.alive { "Alive" } else { "Dead" };
        write!(f, "( {} , {}, {} )", self.id, self.faction, status)
    }
}
