use structopt::StructOpt;

use mafia_core::models::config::SimulationConfig;

#[derive(Debug, StructOpt)]
#[structopt(name = "mafia-sim", about = "usage of mafia-sim commands.")]
pub struct Opt {
    /// enable debug logging
    #[structopt(short, long, global = true)]
    pub verbose: bool,
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// play one game to completion
    #[structopt(name = "run")]
    Run {
        #[structopt(flatten)]
        settings: Settings,
        /// print the full report as JSON
        #[structopt(long)]
        json: bool,
    },
    /// play many games and summarise them
    #[structopt(name = "batch")]
    Batch {
        #[structopt(flatten)]
        settings: Settings,
        /// number of games
        #[structopt(long, default_value = "100")]
        runs: usize,
        /// print the summary as JSON
        #[structopt(long)]
        json: bool,
    },
}

/// Overrides for values otherwise taken from the environment.
#[derive(Debug, StructOpt)]
pub struct Settings {
    /// number of residents
    #[structopt(short = "n", long)]
    pub population: Option<usize>,
    /// RNG seed
    #[structopt(long)]
    pub seed: Option<u64>,
    /// open vote attempts before giving up
    #[structopt(long)]
    pub max_vote_retries: Option<usize>,
    /// also end the game once every adversary is dead
    #[structopt(long, conflicts_with = "no-town-victory")]
    pub town_victory: bool,
    /// keep playing after every adversary is dead
    #[structopt(long)]
    pub no_town_victory: bool,
}

impl Settings {
    pub fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(population) = self.population {
            config.population = population;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(max_vote_retries) = self.max_vote_retries {
            config.rule.max_vote_retries = max_vote_retries;
        }
        if self.town_victory {
            config.rule.town_victory = true;
        } else if self.no_town_victory {
            config.rule.town_victory = false;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let opt = Opt::from_iter(&[
            "mafia-sim",
            "run",
            "-n",
            "12",
            "--seed",
            "9",
            "--town-victory",
        ]);
        let Command::Run { settings, json } = opt.command else {
            panic!("expected run command");
        };

        let config = settings.apply(SimulationConfig::default());
        assert!(!json);
        assert_eq!(config.population, 12);
        assert_eq!(config.seed, Some(9));
        assert!(config.rule.town_victory);
    }

    #[test]
    fn no_town_victory_overrides_config() {
        let opt = Opt::from_iter(&["mafia-sim", "run", "--no-town-victory"]);
        let Command::Run { settings, .. } = opt.command else {
            panic!("expected run command");
        };

        let mut base = SimulationConfig::default();
        base.rule.town_victory = true;
        assert!(!settings.apply(base).rule.town_victory);
    }

    #[test]
    fn town_victory_flags_conflict() {
        let result =
            Opt::from_iter_safe(&["mafia-sim", "run", "--town-victory", "--no-town-victory"]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_flags_keep_config() {
        let opt = Opt::from_iter(&["mafia-sim", "batch", "--runs", "5"]);
        let Command::Batch { settings, runs, .. } = opt.command else {
            panic!("expected batch command");
        };

        let base = SimulationConfig {
            population: 7,
            seed: Some(3),
            ..SimulationConfig::default()
        };
        assert_eq!(runs, 5);
        assert_eq!(settings.apply(base.clone()), base);
    }
}
