//! Population of classifiers and its match set / action set views.
//!
//! The population is an arena of classifiers addressed by stable
//! [`ClassifierId`]s. A [`MatchSet`] or [`ActionSet`] only holds ids, so an
//! update made through one view is visible through all of them. Removing a
//! classifier must touch every view that holds it, see
//! [`Population::remove_everywhere`].
mod base;
mod deletion;
mod insertion;
mod set;
mod stats;
pub use base::{ClassifierId, Population};
pub use deletion::{select_preferred_to_delete, DELETION_CANDIDATE_PROBABILITY};
pub use insertion::{Credit, Insertion};
pub use set::{ActionSet, ClassifierSet, MatchSet};
pub use stats::PopulationStats;
