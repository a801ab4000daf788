//! Environment.
use acs2_core::{Action, Perception};
use anyhow::Result;

/// Outcome of an environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Perception after the step.
    pub perception: Perception,

    /// Reward of the step.
    pub reward: f64,

    /// Flag denoting if the episode is terminated.
    pub is_terminated: bool,
}

impl Step {
    /// Constructs a [`Step`] object.
    pub fn new(perception: Perception, reward: f64, is_terminated: bool) -> Self {
        Self {
            perception,
            reward,
            is_terminated,
        }
    }
}

/// Represents an environment the agent interacts with, one step at a time.
///
/// Perceptions must have the classifier length the agent is configured with
/// and actions are in `0..number_of_possible_actions`.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Starts a new episode and returns the initial perception.
    fn reset(&mut self) -> Result<Perception>;

    /// Performs an environment step.
    fn step(&mut self, action: Action) -> Result<Step>;

    /// Returns a goal for action planning, `None` if there is none.
    ///
    /// During a planning phase the agent asks for goals until this returns
    /// `None` or a goal can not be reached, so an implementation must
    /// eventually return `None`.
    fn goal_state(&mut self) -> Result<Option<Perception>> {
        Ok(None)
    }
}
