#![warn(missing_docs)]
//! Core of the ACS2 anticipatory classifier system.
//!
//! An ACS2 agent models its environment with a population of
//! condition-action-effect rules ([`Classifier`]). Every environment step the
//! rules of the last action set are refined by three coupled passes working on
//! the same [`Population`]:
//!
//! * [`apply_alp`] - the Anticipatory Learning Process, which discovers,
//!   specializes and prunes rules from observed transitions,
//! * [`apply_reinforcement_learning`] - one-step Q-learning style credit
//!   assignment to the reward predictions,
//! * [`apply_ga`] - the genetic generalization process, which proposes more
//!   general offspring and keeps the action set bounded.
//!
//! Reliable classifiers also serve as a model to plan with, see
//! [`search_goal_sequence`].
//!
//! Match sets and action sets are [`ClassifierSet`]s, i.e. ordered sets of
//! [`ClassifierId`]s into the population arena, so an update made through one
//! view is seen through all of them.
//!
//! ```rust
//! use acs2_core::{apply_alp, Acs2Config, ClassifierSet, Perception, Population};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! # fn main() -> acs2_core::Result<()> {
//! let cfg = Acs2Config::new(4, 2).beta(0.2);
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut population = Population::new();
//!
//! let p0 = Perception::from("1211");
//! let p1 = Perception::from("2211");
//! let mut match_set = population.form_match_set(&p0);
//! let mut action_set = population.form_action_set(&match_set, 1);
//!
//! apply_alp(
//!     &p0, 1, &p1, 0, &mut population, Some(&mut match_set), &mut action_set, &cfg, &mut rng,
//! )?;
//! assert_eq!(population.len(), 1);
//! # Ok(())
//! # }
//! ```
pub mod alp;
pub mod ga;
pub mod planning;
pub mod record;
pub mod rl;
pub mod subsumption;

mod classifier;
mod condition;
mod config;
mod effect;
mod error;
mod mark;
mod perception;
mod population;
mod random;

pub use alp::apply_alp;
pub use classifier::{Action, Classifier};
pub use condition::{Condition, Pattern};
pub use config::Acs2Config;
pub use effect::Effect;
pub use error::{Acs2Error, Result};
pub use ga::apply_ga;
pub use mark::Mark;
pub use perception::{Perception, Symbol, DEFAULT_WILDCARD};
pub use planning::search_goal_sequence;
pub use population::{
    select_preferred_to_delete, ActionSet, ClassifierId, ClassifierSet, Credit, Insertion,
    MatchSet, Population, PopulationStats, DELETION_CANDIDATE_PROBABILITY,
};
pub use random::{RandomSource, ScriptedRandom};
pub use rl::apply_reinforcement_learning;
