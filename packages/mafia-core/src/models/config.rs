use serde::{Deserialize, Serialize};
use std::env;

use super::rule::{Rule, DEFAULT_MAX_VOTE_RETRIES};

pub const DEFAULT_POPULATION: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub population: usize,
    // 指定がなければ実行時に決めて記録する
    pub seed: Option<u64>,
    pub rule: Rule,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population: DEFAULT_POPULATION,
            seed: None,
            rule: Rule::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_env() -> Self {
        let population = env::var("MAFIA_POPULATION")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_POPULATION);
        let seed = env::var("MAFIA_SEED")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());
        let max_vote_retries = env::var("MAFIA_MAX_VOTE_RETRIES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_VOTE_RETRIES);
        let town_victory = env::var("MAFIA_TOWN_VICTORY")
            .map(|v| v == "true")
            .unwrap_or(false);

        Self {
            population,
            seed,
            rule: Rule {
                max_vote_retries,
                town_victory,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "MAFIA_POPULATION",
        "MAFIA_SEED",
        "MAFIA_MAX_VOTE_RETRIES",
        "MAFIA_TOWN_VICTORY",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn from_env_without_variables_matches_default() {
        clear_env();
        assert_eq!(SimulationConfig::from_env(), SimulationConfig::default());
    }

    #[test]
    #[serial]
    fn from_env_reads_every_variable() {
        clear_env();
        env::set_var("MAFIA_POPULATION", "25");
        env::set_var("MAFIA_SEED", "1234");
        env::set_var("MAFIA_MAX_VOTE_RETRIES", "50");
        env::set_var("MAFIA_TOWN_VICTORY", "true");

        let config = SimulationConfig::from_env();
        clear_env();

        assert_eq!(config.population, 25);
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.rule.max_vote_retries, 50);
        assert!(config.rule.town_victory);
    }

    #[test]
    #[serial]
    fn unparsable_values_fall_back() {
        clear_env();
        env::set_var("MAFIA_POPULATION", "many");
        env::set_var("MAFIA_SEED", "-3");

        let config = SimulationConfig::from_env();
        clear_env();

        assert_eq!(config.population, DEFAULT_POPULATION);
        assert_eq!(config.seed, None);
    }
}
