//! Action selection strategies.
//!
//! All strategies exploit with probability `1 - epsilon`, choosing the
//! action of the fittest classifier in the match set that anticipates a
//! change. They differ in how they explore.
use acs2_core::{Action, MatchSet, Population, RandomSource};
use serde::{Deserialize, Serialize};

/// Explorers for ACS2.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum Acs2Explorer {
    /// Epsilon-greedy action selection.
    EpsilonGreedy(EpsilonGreedy),

    /// Exploration biased towards the action executed longest ago.
    ActionDelay(ActionDelay),

    /// Exploration biased towards the action known least about.
    KnowledgeArray(KnowledgeArray),
}

impl Default for Acs2Explorer {
    fn default() -> Self {
        Self::EpsilonGreedy(EpsilonGreedy::new())
    }
}

impl Acs2Explorer {
    /// Chooses an action for the given match set.
    pub fn action<R: RandomSource + ?Sized>(
        &self,
        population: &Population,
        match_set: &MatchSet,
        n_actions: usize,
        rng: &mut R,
    ) -> Action {
        match self {
            Self::EpsilonGreedy(e) => e.action(population, match_set, n_actions, rng),
            Self::ActionDelay(e) => e.action(population, match_set, n_actions, rng),
            Self::KnowledgeArray(e) => e.action(population, match_set, n_actions, rng),
        }
    }
}

/// Action of the fittest classifier anticipating a change, or a random
/// action if there is none.
pub fn best_action<R: RandomSource + ?Sized>(
    population: &Population,
    match_set: &MatchSet,
    n_actions: usize,
    rng: &mut R,
) -> Action {
    let mut best: Option<(f64, Action)> = None;
    for (_, cl) in population.members(match_set) {
        if !cl.does_anticipate_change() {
            continue;
        }
        let fitness = cl.fitness();
        if best.map_or(true, |(f, _)| fitness > f) {
            best = Some((fitness, cl.action));
        }
    }

    match best {
        Some((_, action)) => action,
        None => random_action(n_actions, rng),
    }
}

/// Uniformly random action.
pub fn random_action<R: RandomSource + ?Sized>(n_actions: usize, rng: &mut R) -> Action {
    rng.below(n_actions)
}

/// Epsilon-greedy explorer.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    /// Probability of a random action.
    pub epsilon: f64,
}

#[allow(clippy::new_without_default)]
impl EpsilonGreedy {
    /// Constructs epsilon-greedy explorer.
    pub fn new() -> Self {
        Self { epsilon: 0.5 }
    }

    /// Set the probability of a random action.
    pub fn epsilon(mut self, v: f64) -> Self {
        self.epsilon = v;
        self
    }

    /// Takes an action based on the match set.
    pub fn action<R: RandomSource + ?Sized>(
        &self,
        population: &Population,
        match_set: &MatchSet,
        n_actions: usize,
        rng: &mut R,
    ) -> Action {
        if rng.uniform() < self.epsilon {
            random_action(n_actions, rng)
        } else {
            best_action(population, match_set, n_actions, rng)
        }
    }
}

/// Action-delay bias.
///
/// When exploring, with probability `biased_exploration_prob` the explorer
/// picks an action no classifier of the match set advocates, or else the
/// action of the classifier whose last ALP update lies furthest back.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ActionDelay {
    /// Probability of exploration.
    pub epsilon: f64,

    /// Probability of a biased choice when exploring.
    pub biased_exploration_prob: f64,
}

#[allow(clippy::new_without_default)]
impl ActionDelay {
    /// Constructs action-delay explorer.
    pub fn new() -> Self {
        Self {
            epsilon: 0.5,
            biased_exploration_prob: 0.05,
        }
    }

    /// Set the probability of exploration.
    pub fn epsilon(mut self, v: f64) -> Self {
        self.epsilon = v;
        self
    }

    /// Set the probability of a biased choice.
    pub fn biased_exploration_prob(mut self, v: f64) -> Self {
        self.biased_exploration_prob = v;
        self
    }

    /// Takes an action based on the match set.
    pub fn action<R: RandomSource + ?Sized>(
        &self,
        population: &Population,
        match_set: &MatchSet,
        n_actions: usize,
        rng: &mut R,
    ) -> Action {
        if rng.uniform() >= self.epsilon {
            return best_action(population, match_set, n_actions, rng);
        }
        if rng.uniform() >= self.biased_exploration_prob {
            return random_action(n_actions, rng);
        }

        let mut numerosity = vec![0; n_actions];
        let mut latest: Option<(u64, Action)> = None;
        for (_, cl) in population.members(match_set) {
            if let Some(n) = numerosity.get_mut(cl.action) {
                *n += cl.num;
            }
            if latest.map_or(true, |(talp, _)| cl.talp < talp) {
                latest = Some((cl.talp, cl.action));
            }
        }

        if let Some(action) = numerosity.iter().position(|&n| n == 0) {
            return action;
        }
        match latest {
            Some((_, action)) => action,
            None => random_action(n_actions, rng),
        }
    }
}

/// Knowledge-array bias.
///
/// When exploring, with probability `biased_exploration_prob` the explorer
/// picks the action with the lowest numerosity-weighted mean quality in the
/// match set. Actions without classifiers count as zero quality.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct KnowledgeArray {
    /// Probability of exploration.
    pub epsilon: f64,

    /// Probability of a biased choice when exploring.
    pub biased_exploration_prob: f64,
}

#[allow(clippy::new_without_default)]
impl KnowledgeArray {
    /// Constructs knowledge-array explorer.
    pub fn new() -> Self {
        Self {
            epsilon: 0.5,
            biased_exploration_prob: 0.05,
        }
    }

    /// Set the probability of exploration.
    pub fn epsilon(mut self, v: f64) -> Self {
        self.epsilon = v;
        self
    }

    /// Set the probability of a biased choice.
    pub fn biased_exploration_prob(mut self, v: f64) -> Self {
        self.biased_exploration_prob = v;
        self
    }

    /// Takes an action based on the match set.
    pub fn action<R: RandomSource + ?Sized>(
        &self,
        population: &Population,
        match_set: &MatchSet,
        n_actions: usize,
        rng: &mut R,
    ) -> Action {
        if rng.uniform() >= self.epsilon {
            return best_action(population, match_set, n_actions, rng);
        }
        if rng.uniform() >= self.biased_exploration_prob {
            return random_action(n_actions, rng);
        }

        let mut quality = vec![0.0; n_actions];
        let mut numerosity = vec![0usize; n_actions];
        for (_, cl) in population.members(match_set) {
            if cl.action < n_actions {
                quality[cl.action] += cl.q * cl.num as f64;
                numerosity[cl.action] += cl.num;
            }
        }

        let knowledge = quality
            .iter()
            .zip(numerosity.iter())
            .map(|(q, &n)| if n == 0 { 0.0 } else { q / n as f64 });
        let mut least: Option<(f64, Action)> = None;
        for (action, k) in knowledge.enumerate() {
            if least.map_or(true, |(l, _)| k < l) {
                least = Some((k, action));
            }
        }
        least.map_or_else(|| random_action(n_actions, rng), |(_, action)| action)
    }
}
