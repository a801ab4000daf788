//! Configuration of [`Acs2Agent`](super::Acs2Agent).
use crate::Acs2Explorer;
use acs2_core::Acs2Config;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Acs2Agent`](super::Acs2Agent).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct AgentConfig {
    /// Parameters of the learning passes.
    pub acs2: Acs2Config,

    /// Action selection strategy used in explore trials.
    pub explorer: Acs2Explorer,

    /// The maximum number of environment steps in a trial.
    pub max_steps_per_trial: usize,

    /// Interval of recording metrics in trials.
    pub metrics_trial_frequency: usize,

    /// Seed of the random number generator of the agent.
    pub seed: u64,
}

impl AgentConfig {
    /// Constructs a configuration with default values for the given
    /// perception length and number of actions.
    pub fn new(classifier_length: usize, number_of_possible_actions: usize) -> Self {
        Self {
            acs2: Acs2Config::new(classifier_length, number_of_possible_actions),
            explorer: Acs2Explorer::default(),
            max_steps_per_trial: 50,
            metrics_trial_frequency: 5,
            seed: 42,
        }
    }

    /// Sets the parameters of the learning passes.
    pub fn acs2(mut self, v: Acs2Config) -> Self {
        self.acs2 = v;
        self
    }

    /// Sets the explorer.
    pub fn explorer(mut self, v: Acs2Explorer) -> Self {
        self.explorer = v;
        self
    }

    /// Sets the maximum number of environment steps in a trial.
    pub fn max_steps_per_trial(mut self, v: usize) -> Self {
        self.max_steps_per_trial = v;
        self
    }

    /// Sets the interval of recording metrics in trials.
    pub fn metrics_trial_frequency(mut self, v: usize) -> Self {
        self.metrics_trial_frequency = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Constructs [`AgentConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`AgentConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
