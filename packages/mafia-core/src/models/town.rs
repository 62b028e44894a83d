use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{
    faction::Faction,
    ledger::{majority, VotingLedger},
    resident::{Resident, ResidentId, Vote},
    rule::Rule,
};
use crate::error::{Phase, TownError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cause {
    Assassination,
    Lynch { attempts: usize, votes: usize },
    /// `Town::eliminate` による直接の除外
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    pub round: usize,
    pub victim: ResidentId,
    pub faction: Faction,
    pub cause: Cause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// マフィアが市民の数に並んだ、または上回った
    AdversaryParity,
    /// マフィア全滅 (`Rule::town_victory` のときのみ)
    AdversariesEliminated,
}

#[derive(Debug, Clone)]
pub struct Town {
    residents: Vec<Resident>,
    ledger: VotingLedger,
    round_count: usize,
    eliminations: Vec<Elimination>,
    rule: Rule,
}

impl Town {
    pub fn new(population: usize) -> Result<Self, TownError> {
        Self::with_rule(population, Rule::default())
    }

    /// Builds `population` residents with IDs `1..=population`; the first
    /// `floor(0.2 * population)` are adversaries.
    pub fn with_rule(population: usize, rule: Rule) -> Result<Self, TownError> {
        let adversaries = adversary_count(population);
        if adversaries == 0 || population - adversaries == 0 {
            return Err(TownError::InvalidConstruction { population });
        }
        let last = ResidentId::try_from(population)
            .map_err(|_| TownError::InvalidConstruction { population })?;

        let residents: Vec<Resident> = (1..=last)
            .map(|id| {
                let faction = if (id as usize) <= adversaries {
                    Faction::Adversary
                } else {
                    Faction::Townsperson
                };
                Resident::new(id, faction)
            })
            .collect();

        tracing::debug!(population, adversaries, "town created");

        Ok(Town {
            ledger: VotingLedger::new(residents.iter().map(|r| r.id)),
            residents,
            round_count: 0,
            eliminations: Vec::new(),
            rule,
        })
    }

    /// 夜のフェーズ: 生存している市民から一人をランダムに殺害する
    pub fn covert_elimination<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<ResidentId, TownError> {
        let candidates: Vec<ResidentId> = self
            .residents
            .iter()
            .filter(|r| r.alive && !r.is_adversary())
            .map(|r| r.id)
            .collect();

        let victim = *candidates
            .choose(rng)
            .ok_or(TownError::EmptyCandidatePool {
                phase: Phase::Assassination,
                resident: None,
            })?;

        self.kill(victim, Cause::Assassination)?;
        Ok(victim)
    }

    /// 昼のフェーズ: 過半数が出るまで投票を繰り返し、選ばれた住人を処刑する
    pub fn open_vote<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<ResidentId, TownError> {
        for attempt in 1..=self.rule.max_vote_retries {
            let votes = self.collect_votes(rng)?;
            let column = self.ledger.record_column(&votes);
            let tally = self.ledger.tally(column);
            let alive = self.alive_count();

            tracing::debug!(column, attempt, alive, ?tally, "votes tallied");

            if let Some(target) = majority(&tally, alive) {
                let cause = Cause::Lynch {
                    attempts: attempt,
                    votes: tally[&target],
                };
                self.kill(target, cause)?;
                return Ok(target);
            }
        }

        tracing::warn!(
            attempts = self.rule.max_vote_retries,
            alive = self.alive_count(),
            "open vote did not converge"
        );
        Err(TownError::NonTerminatingMajority {
            attempts: self.rule.max_vote_retries,
        })
    }

    /// Runs covert and open phases until the stop condition holds.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Outcome, TownError> {
        loop {
            if let Some(outcome) = self.outcome() {
                tracing::info!(rounds = self.round_count, ?outcome, "simulation finished");
                return Ok(outcome);
            }

            self.covert_elimination(rng)?;
            if self.is_deadlocked_pair() {
                tracing::debug!(round = self.round_count + 1, "open vote skipped: one against one");
                continue;
            }
            self.open_vote(rng)?;
            self.round_count += 1;
        }
    }

    // マフィア1人と市民1人は互いに投票するしかなく、過半数にならない
    fn is_deadlocked_pair(&self) -> bool {
        self.alive_adversaries() == 1 && self.alive_townspeople() == 1
    }

    /// Returns the outcome if the game is over in the current state.
    pub fn outcome(&self) -> Option<Outcome> {
        let adversaries = self.alive_adversaries();
        if self.rule.town_victory && adversaries == 0 {
            return Some(Outcome::AdversariesEliminated);
        }
        (adversaries >= self.alive_townspeople()).then_some(Outcome::AdversaryParity)
    }

    /// Kills `id` outside of the normal phases.
    pub fn eliminate(&mut self, id: ResidentId) -> Result<(), TownError> {
        self.kill(id, Cause::Removed)
    }

    fn kill(&mut self, id: ResidentId, cause: Cause) -> Result<(), TownError> {
        let round = self.round_count + 1;
        let resident = self
            .residents
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(TownError::UnknownResident(id))?;

        if !resident.eliminate() {
            tracing::warn!(resident = id, "double elimination");
            return Err(TownError::AlreadyEliminated(id));
        }

        tracing::info!(round, victim = id, faction = %resident.faction, ?cause, "resident eliminated");
        self.eliminations.push(Elimination {
            round,
            victim: id,
            faction: resident.faction,
            cause,
        });
        Ok(())
    }

    // 全員分の票を集めてから台帳に書き込む
    fn collect_votes<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Vote>, TownError> {
        self.residents
            .iter()
            .map(|r| r.cast_vote(&self.residents, rng))
            .collect()
    }

    pub fn alive_adversaries(&self) -> usize {
        self.residents
            .iter()
            .filter(|r| r.alive && r.is_adversary())
            .count()
    }

    pub fn alive_townspeople(&self) -> usize {
        self.residents
            .iter()
            .filter(|r| r.alive && !r.is_adversary())
            .count()
    }

    pub fn alive_count(&self) -> usize {
        self.residents.iter().filter(|r| r.alive).count()
    }

    pub fn residents(&self) -> &[Resident] {
        &self.residents
    }

    pub fn resident(&self, id: ResidentId) -> Option<&Resident> {
        self.residents.iter().find(|r| r.id == id)
    }

    pub fn ledger(&self) -> &VotingLedger {
        &self.ledger
    }

    pub fn ledger_snapshot(&self) -> BTreeMap<ResidentId, Vec<Option<ResidentId>>> {
        self.ledger.snapshot()
    }

    pub fn round_count(&self) -> usize {
        self.round_count
    }

    pub fn eliminations(&self) -> &[Elimination] {
        &self.eliminations
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn roster(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Town {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for resident in &self.residents {
            writeln!(f, "{}", resident)?;
        }
        Ok(())
    }
}

pub fn adversary_count(population: usize) -> usize {
    population / 5
}
