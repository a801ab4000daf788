//! Insertion with subsumption check.
use super::{ClassifierId, ClassifierSet, Population};
use crate::{Acs2Config, Classifier, RandomSource};
use log::trace;

/// How an existing classifier is credited when it takes the place of a
/// candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credit {
    /// Increase the quality, used by ALP.
    ///
    /// A subsumer is always looked for first.
    Quality,

    /// Increment the numerosity unless the classifier is marked, used by GA.
    ///
    /// A subsumer is looked for only if [`Acs2Config::do_subsumption`] is
    /// set.
    Numerosity,
}

impl Credit {
    fn subsume(&self, cfg: &Acs2Config) -> bool {
        match self {
            Self::Quality => true,
            Self::Numerosity => cfg.do_subsumption,
        }
    }
}

/// Outcome of [`Population::insert_with_subsumption_check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The candidate was merged into this classifier.
    Existing(ClassifierId),

    /// The candidate was added to the population under this id.
    Added(ClassifierId),
}

impl Insertion {
    /// Id of the classifier standing for the candidate.
    pub fn id(&self) -> ClassifierId {
        match self {
            Self::Existing(id) | Self::Added(id) => *id,
        }
    }

    /// Returns `true` if the candidate was added.
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

impl Population {
    /// Inserts `candidate` unless a classifier in `lists` subsumes it or is
    /// similar to it.
    ///
    /// In the latter case that classifier is credited according to `credit`
    /// and the candidate is dropped. Adding the new id to match sets and
    /// action sets is up to the caller.
    ///
    /// Fails without touching the population if the candidate does not fit
    /// `cfg`.
    pub fn insert_with_subsumption_check<R: RandomSource + ?Sized>(
        &mut self,
        candidate: Classifier,
        lists: &[&ClassifierSet],
        credit: Credit,
        cfg: &Acs2Config,
        rng: &mut R,
    ) -> crate::Result<Insertion> {
        cfg.check_classifier(&candidate)?;
        let old = self.find_old_classifier(&candidate, lists, credit.subsume(cfg), cfg, rng);

        match old.and_then(|id| self.get_mut(id).map(|cl| (id, cl))) {
            Some((id, cl)) => {
                match credit {
                    Credit::Quality => cl.increase_quality(cfg.beta),
                    Credit::Numerosity => {
                        if !cl.is_marked() {
                            cl.num += 1;
                        }
                    }
                }
                trace!(
                    "{} takes the place of {}",
                    id,
                    cfg.format_classifier(&candidate)
                );
                Ok(Insertion::Existing(id))
            }
            None => Ok(Insertion::Added(self.insert(candidate))),
        }
    }
}
