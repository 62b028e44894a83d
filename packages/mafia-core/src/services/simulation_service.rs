use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{
    error::TownError,
    models::{
        config::SimulationConfig,
        resident::{Resident, ResidentId},
        town::{Elimination, Outcome, Town},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub population: usize,
    pub seed: u64,
    pub rounds: usize,
    pub outcome: Outcome,
    pub alive_adversaries: usize,
    pub alive_townspeople: usize,
    pub residents: Vec<Resident>,
    pub ledger: BTreeMap<ResidentId, Vec<Option<ResidentId>>>,
    pub eliminations: Vec<Elimination>,
}

impl SimulationReport {
    fn from_town(town: &Town, seed: u64, outcome: Outcome) -> Self {
        SimulationReport {
            population: town.residents().len(),
            seed,
            rounds: town.round_count(),
            outcome,
            alive_adversaries: town.alive_adversaries(),
            alive_townspeople: town.alive_townspeople(),
            residents: town.residents().to_vec(),
            ledger: town.ledger_snapshot(),
            eliminations: town.eliminations().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: usize,
    pub completed: usize,
    pub non_terminating: usize,
    pub no_candidates: usize,
    pub adversary_parity: usize,
    pub adversaries_eliminated: usize,
    pub min_rounds: Option<usize>,
    pub max_rounds: Option<usize>,
    pub mean_rounds: Option<f64>,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.non_terminating + self.no_candidates
    }
}

pub fn resolve_seed(config: &SimulationConfig) -> u64 {
    config.seed.unwrap_or_else(|| rand::thread_rng().gen())
}

/// Runs one game to completion with a `StdRng` seeded from the config.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport, TownError> {
    let seed = resolve_seed(config);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut town = Town::with_rule(config.population, config.rule.clone())?;

    tracing::info!(population = config.population, seed, "starting simulation");
    let outcome = town.run(&mut rng)?;

    Ok(SimulationReport::from_town(&town, seed, outcome))
}

/// Runs `runs` games with consecutive seeds starting at the configured one.
///
/// Games that fail mid-play (an open vote that never converges, or a phase
/// left with nobody to pick) are counted, not propagated. Any other error
/// aborts the batch.
pub fn run_batch(config: &SimulationConfig, runs: usize) -> Result<BatchSummary, TownError> {
    let base_seed = resolve_seed(config);
    let mut summary = BatchSummary {
        runs,
        ..BatchSummary::default()
    };
    let mut total_rounds = 0;

    for offset in 0..runs as u64 {
        let run_config = SimulationConfig {
            seed: Some(base_seed.wrapping_add(offset)),
            ..config.clone()
        };

        let report = match run_simulation(&run_config) {
            Ok(report) => report,
            Err(TownError::NonTerminatingMajority { attempts }) => {
                tracing::debug!(seed = ?run_config.seed, attempts, "run did not converge");
                summary.non_terminating += 1;
                continue;
            }
            Err(TownError::EmptyCandidatePool { phase, resident }) => {
                tracing::debug!(seed = ?run_config.seed, %phase, ?resident, "run ran out of candidates");
                summary.no_candidates += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        summary.completed += 1;
        match report.outcome {
            Outcome::AdversaryParity => summary.adversary_parity += 1,
            Outcome::AdversariesEliminated => summary.adversaries_eliminated += 1,
        }
        total_rounds += report.rounds;
        summary.min_rounds = Some(summary.min_rounds.map_or(report.rounds, |m| m.min(report.rounds)));
        summary.max_rounds = Some(summary.max_rounds.map_or(report.rounds, |m| m.max(report.rounds)));
    }

    if summary.completed > 0 {
        summary.mean_rounds = Some(total_rounds as f64 / summary.completed as f64);
    }
    tracing::info!(
        runs,
        completed = summary.completed,
        non_terminating = summary.non_terminating,
        no_candidates = summary.no_candidates,
        "batch finished"
    );
    Ok(summary)
}
