//! Configuration of the learning passes.
use crate::{
    Acs2Error, Action, Classifier, Condition, Effect, Pattern, Perception, Symbol,
    DEFAULT_WILDCARD,
};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of ALP, RL and GA.
///
/// Exploration knobs belong to the action selection strategy and are not
/// part of this struct.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Acs2Config {
    /// Number of attributes of perceptions, conditions and effects.
    pub classifier_length: usize,

    /// Number of possible actions, actions are `0..number_of_possible_actions`.
    pub number_of_possible_actions: usize,

    /// The "don't care" symbol used when parsing and formatting classifiers.
    pub classifier_wildcard: Symbol,

    /// Learning rate.
    pub beta: f64,

    /// Discount factor.
    pub gamma: f64,

    /// Inadequacy threshold of the quality.
    pub theta_i: f64,

    /// Reliability threshold of the quality.
    pub theta_r: f64,

    /// Maximum number of specified unchanging attributes in a condition.
    pub u_max: usize,

    /// Experience a classifier needs to become a subsumer.
    pub theta_exp: u64,

    /// GA application threshold in time steps.
    pub theta_ga: u64,

    /// Maximum numerosity of an action set, enforced by GA deletion.
    pub theta_as: usize,

    /// Mutation rate.
    pub mu: f64,

    /// Crossover probability.
    pub chi: f64,

    /// Applies the genetic generalization.
    pub do_ga: bool,

    /// Merges new classifiers into trusted, more general ones.
    ///
    /// Only GA insertions follow this switch. ALP insertions always look for
    /// a subsumer first.
    pub do_subsumption: bool,

    /// Searches goal sequences over reliable classifiers during exploration.
    pub do_action_planning: bool,

    /// Interval in time steps between action planning phases.
    pub action_planning_frequency: u64,
}

impl Default for Acs2Config {
    fn default() -> Self {
        Self {
            classifier_length: 0,
            number_of_possible_actions: 0,
            classifier_wildcard: DEFAULT_WILDCARD,
            beta: 0.05,
            gamma: 0.95,
            theta_i: 0.1,
            theta_r: 0.9,
            u_max: 100_000,
            theta_exp: 20,
            theta_ga: 100,
            theta_as: 20,
            mu: 0.3,
            chi: 0.8,
            do_ga: false,
            do_subsumption: true,
            do_action_planning: false,
            action_planning_frequency: 50,
        }
    }
}

impl Acs2Config {
    /// Constructs a configuration with default parameters.
    pub fn new(classifier_length: usize, number_of_possible_actions: usize) -> Self {
        Self {
            classifier_length,
            number_of_possible_actions,
            ..Self::default()
        }
    }

    /// Sets the wildcard symbol.
    pub fn classifier_wildcard(mut self, v: Symbol) -> Self {
        self.classifier_wildcard = v;
        self
    }

    /// Sets the learning rate.
    pub fn beta(mut self, v: f64) -> Self {
        self.beta = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the inadequacy threshold.
    pub fn theta_i(mut self, v: f64) -> Self {
        self.theta_i = v;
        self
    }

    /// Sets the reliability threshold.
    pub fn theta_r(mut self, v: f64) -> Self {
        self.theta_r = v;
        self
    }

    /// Sets the maximum number of specified unchanging attributes.
    pub fn u_max(mut self, v: usize) -> Self {
        self.u_max = v;
        self
    }

    /// Sets the subsumption experience threshold.
    pub fn theta_exp(mut self, v: u64) -> Self {
        self.theta_exp = v;
        self
    }

    /// Sets the GA application threshold.
    pub fn theta_ga(mut self, v: u64) -> Self {
        self.theta_ga = v;
        self
    }

    /// Sets the maximum action set numerosity.
    pub fn theta_as(mut self, v: usize) -> Self {
        self.theta_as = v;
        self
    }

    /// Sets the mutation rate.
    pub fn mu(mut self, v: f64) -> Self {
        self.mu = v;
        self
    }

    /// Sets the crossover probability.
    pub fn chi(mut self, v: f64) -> Self {
        self.chi = v;
        self
    }

    /// Enables or disables the genetic generalization.
    pub fn do_ga(mut self, v: bool) -> Self {
        self.do_ga = v;
        self
    }

    /// Enables or disables subsumption.
    pub fn do_subsumption(mut self, v: bool) -> Self {
        self.do_subsumption = v;
        self
    }

    /// Enables or disables action planning.
    pub fn do_action_planning(mut self, v: bool) -> Self {
        self.do_action_planning = v;
        self
    }

    /// Sets the interval between action planning phases.
    pub fn action_planning_frequency(mut self, v: u64) -> Self {
        self.action_planning_frequency = v;
        self
    }

    /// Checks that the parameters are in range.
    pub fn validate(&self) -> crate::Result<()> {
        let invalid = |msg: String| Err(Acs2Error::InvalidConfig(msg));

        if self.classifier_length == 0 {
            return invalid("classifier_length must be positive".to_string());
        }
        if self.number_of_possible_actions == 0 {
            return invalid("number_of_possible_actions must be positive".to_string());
        }
        for (name, v) in [
            ("beta", self.beta),
            ("gamma", self.gamma),
            ("theta_i", self.theta_i),
            ("theta_r", self.theta_r),
            ("mu", self.mu),
            ("chi", self.chi),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return invalid(format!("{} must be in [0, 1], got {}", name, v));
            }
        }
        if self.theta_i >= self.theta_r {
            return invalid(format!(
                "theta_i ({}) must be smaller than theta_r ({})",
                self.theta_i, self.theta_r
            ));
        }
        if self.do_action_planning && self.action_planning_frequency == 0 {
            return invalid("action_planning_frequency must be positive".to_string());
        }
        Ok(())
    }

    /// Checks the length of a perception.
    pub fn check_perception(&self, perception: &Perception) -> crate::Result<()> {
        self.check_length(perception.len())
    }

    /// Checks that an action is one of the possible actions.
    pub fn check_action(&self, action: Action) -> crate::Result<()> {
        if action >= self.number_of_possible_actions {
            return Err(Acs2Error::ActionOutOfRange {
                action,
                actions: self.number_of_possible_actions,
            });
        }
        Ok(())
    }

    /// Checks the lengths of the condition and the effect of a classifier,
    /// and its action.
    pub fn check_classifier(&self, cl: &Classifier) -> crate::Result<()> {
        self.check_length(cl.condition.len())?;
        self.check_length(cl.effect.len())?;
        self.check_action(cl.action)
    }

    /// Parses a condition using the configured wildcard.
    pub fn parse_condition(&self, s: &str) -> crate::Result<Condition> {
        let condition = Condition::parse(s, self.classifier_wildcard);
        self.check_length(condition.len())?;
        Ok(condition)
    }

    /// Parses an effect using the configured wildcard.
    pub fn parse_effect(&self, s: &str) -> crate::Result<Effect> {
        let effect = Effect::parse(s, self.classifier_wildcard);
        self.check_length(effect.len())?;
        Ok(effect)
    }

    /// Formats a classifier using the configured wildcard.
    pub fn format_classifier(&self, cl: &Classifier) -> String {
        cl.format_with(self.classifier_wildcard)
    }

    fn check_length(&self, found: usize) -> crate::Result<()> {
        if found != self.classifier_length {
            return Err(Acs2Error::LengthMismatch {
                expected: self.classifier_length,
                found,
            });
        }
        Ok(())
    }

    /// Constructs [`Acs2Config`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`Acs2Config`].
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
