//! A small deterministic environment used for tests.
use crate::{Env, Step};
use acs2_core::{Action, Perception};
use anyhow::{bail, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Action moving the agent one cell to the left.
pub const LEFT: Action = 0;

/// Action moving the agent one cell to the right.
pub const RIGHT: Action = 1;

/// Configuration of [`Corridor`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CorridorConfig {
    /// Number of cells, including the goal.
    pub length: usize,

    /// Reward for reaching the goal.
    pub reward: f64,

    /// If `true`, episodes start in a random non-goal cell, otherwise in
    /// the leftmost cell.
    pub random_start: bool,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            length: 5,
            reward: 1000.0,
            random_start: false,
        }
    }
}

impl CorridorConfig {
    /// Sets the number of cells.
    pub fn length(mut self, v: usize) -> Self {
        self.length = v;
        self
    }

    /// Sets the reward for reaching the goal.
    pub fn reward(mut self, v: f64) -> Self {
        self.reward = v;
        self
    }

    /// Sets if episodes start in a random cell.
    pub fn random_start(mut self, v: bool) -> Self {
        self.random_start = v;
        self
    }
}

/// A one-dimensional corridor with the goal in the rightmost cell.
///
/// The perception is a single attribute holding the current cell as a
/// base-36 digit. Moving left in the leftmost cell does nothing.
///
/// [`Env::goal_state`] alternates between the goal cell and `None`, one goal
/// per planning phase.
pub struct Corridor {
    config: CorridorConfig,
    position: usize,
    goal_given: bool,
    rng: StdRng,
}

impl Corridor {
    /// Current cell.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Cell of the goal.
    pub fn goal(&self) -> usize {
        self.config.length - 1
    }

    fn perception(&self) -> Result<Perception> {
        Self::cell(self.position)
    }

    fn cell(position: usize) -> Result<Perception> {
        match char::from_digit(position as u32, 36) {
            Some(c) => Ok(Perception::new(vec![c])),
            None => bail!("Cell {} can not be perceived", position),
        }
    }
}

impl Env for Corridor {
    type Config = CorridorConfig;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        if !(2..=36).contains(&config.length) {
            bail!("Corridor length must be in 2..=36, got {}", config.length);
        }

        Ok(Self {
            config: config.clone(),
            position: 0,
            goal_given: false,
            rng: StdRng::seed_from_u64(seed as u64),
        })
    }

    fn reset(&mut self) -> Result<Perception> {
        let goal = self.goal();
        self.position = if self.config.random_start {
            self.rng.gen_range(0..goal)
        } else {
            0
        };
        self.perception()
    }

    fn step(&mut self, action: Action) -> Result<Step> {
        self.position = match action {
            LEFT => self.position.saturating_sub(1),
            RIGHT => (self.position + 1).min(self.goal()),
            _ => bail!("Invalid action {} in the corridor", action),
        };

        let is_terminated = self.position == self.goal();
        let reward = if is_terminated { self.config.reward } else { 0.0 };
        Ok(Step::new(self.perception()?, reward, is_terminated))
    }

    fn goal_state(&mut self) -> Result<Option<Perception>> {
        self.goal_given = !self.goal_given;
        if self.goal_given {
            Ok(Some(Self::cell(self.goal())?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corridor() -> Result<()> {
        let mut env = Corridor::build(&CorridorConfig::default().length(3), 0)?;
        assert_eq!(env.reset()?, Perception::from("0"));

        let step = env.step(LEFT)?;
        assert_eq!(step, Step::new(Perception::from("0"), 0.0, false));

        let step = env.step(RIGHT)?;
        assert_eq!(step, Step::new(Perception::from("1"), 0.0, false));

        let step = env.step(RIGHT)?;
        assert_eq!(step, Step::new(Perception::from("2"), 1000.0, true));

        assert!(env.step(2).is_err());
        Ok(())
    }

    #[test]
    fn test_random_start_avoids_goal() -> Result<()> {
        let config = CorridorConfig::default().length(12).random_start(true);
        let mut env = Corridor::build(&config, 42)?;
        for _ in 0..100 {
            env.reset()?;
            assert!(env.position() < env.goal());
        }
        Ok(())
    }

    #[test]
    fn test_goal_state_alternates() -> Result<()> {
        let mut env = Corridor::build(&CorridorConfig::default().length(4), 0)?;
        assert_eq!(env.goal_state()?, Some(Perception::from("3")));
        assert_eq!(env.goal_state()?, None);
        assert_eq!(env.goal_state()?, Some(Perception::from("3")));
        Ok(())
    }

    #[test]
    fn test_invalid_length() {
        assert!(Corridor::build(&CorridorConfig::default().length(1), 0).is_err());
        assert!(Corridor::build(&CorridorConfig::default().length(37), 0).is_err());
    }
}
