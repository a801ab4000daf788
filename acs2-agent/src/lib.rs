#![warn(missing_docs)]
//! Agent side of ACS2: environment interface, action selection and trial
//! loops built on top of [`acs2_core`].
//!
//! ```rust
//! use acs2_agent::{
//!     dummy::{Corridor, CorridorConfig},
//!     Acs2Agent, AgentConfig, Env,
//! };
//! use acs2_core::record::BufferedRecorder;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut env = Corridor::build(&CorridorConfig::default().length(4), 0)?;
//! let mut agent = Acs2Agent::build(AgentConfig::new(1, 2))?;
//! let mut recorder = BufferedRecorder::new();
//!
//! agent.explore(&mut env, 10, &mut recorder)?;
//! assert!(!agent.population().is_empty());
//! # Ok(())
//! # }
//! ```
mod agent;
mod config;
pub mod dummy;
mod env;
mod explorer;

pub use agent::{Acs2Agent, TrialResult};
pub use config::AgentConfig;
pub use env::{Env, Step};
pub use explorer::{
    best_action, random_action, ActionDelay, Acs2Explorer, EpsilonGreedy, KnowledgeArray,
};
