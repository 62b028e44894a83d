use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    error::TownError,
    models::{resident::ResidentId, rule::Rule, town::Town},
};

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// テスト用: 指定した住人を殺害済みの町を作る
pub fn town_with_dead(population: usize, dead: &[ResidentId]) -> Result<Town, TownError> {
    town_with_rule_and_dead(population, Rule::default(), dead)
}

pub fn town_with_rule_and_dead(
    population: usize,
    rule: Rule,
    dead: &[ResidentId],
) -> Result<Town, TownError> {
    let mut town = Town::with_rule(population, rule)?;
    for &id in dead {
        town.eliminate(id)?;
    }
    Ok(town)
}
