//! Deletion of classifiers from an action set.
use super::{ActionSet, ClassifierId, MatchSet, Population};
use crate::{Classifier, RandomSource};
use log::debug;

/// Probability of a micro-classifier to become a deletion candidate in a
/// sampling pass.
pub const DELETION_CANDIDATE_PROBABILITY: f64 = 1.0 / 3.0;

/// Number of sampling passes before the candidate is chosen among all
/// classifiers of the action set.
const MAX_DELETION_PASSES: usize = 64;

/// Quality gap below which two classifiers are considered equally good.
const QUALITY_TOLERANCE: f64 = 0.1;

/// Returns the one of `cl` and `to_delete` that should rather be deleted.
///
/// A clearly worse quality is deleted first. With similar qualities a
/// marked classifier goes before an unmarked one, and otherwise the one
/// applied less often (larger `tav`).
pub fn select_preferred_to_delete<'a>(
    cl: &'a Classifier,
    to_delete: &'a Classifier,
) -> &'a Classifier {
    let gap = cl.q - to_delete.q;
    if gap < -QUALITY_TOLERANCE {
        return cl;
    }
    if gap.abs() <= QUALITY_TOLERANCE {
        match (cl.is_marked(), to_delete.is_marked()) {
            (true, false) => return cl,
            (false, true) => return to_delete,
            _ => {
                if cl.tav > to_delete.tav {
                    return cl;
                }
            }
        }
    }
    to_delete
}

impl Population {
    /// Removes one micro-classifier of `action_set`.
    ///
    /// Every micro-classifier becomes a candidate with probability
    /// [`DELETION_CANDIDATE_PROBABILITY`]; candidates are compared with
    /// [`select_preferred_to_delete`]. Passes are repeated until a candidate
    /// was found. If none was found after a bounded number of passes, the
    /// preferred classifier among the whole action set is taken.
    ///
    /// The numerosity of the chosen classifier is decremented; at zero it is
    /// removed from the population and both sets. Returns `None` if the
    /// action set is empty.
    pub fn delete_one_classifier<R: RandomSource + ?Sized>(
        &mut self,
        action_set: &mut ActionSet,
        match_set: Option<&mut MatchSet>,
        rng: &mut R,
    ) -> Option<ClassifierId> {
        let micro = self.expand(action_set);
        if micro.is_empty() {
            return None;
        }

        let mut selected = None;
        for _ in 0..MAX_DELETION_PASSES {
            for &id in micro.iter() {
                if rng.uniform() < DELETION_CANDIDATE_PROBABILITY {
                    selected = Some(self.prefer(id, selected));
                }
            }
            if selected.is_some() {
                break;
            }
        }

        let id = match selected {
            Some(id) => id,
            None => action_set
                .iter()
                .fold(None, |acc, id| Some(self.prefer(id, acc)))?,
        };

        let cl = self.get_mut(id)?;
        if cl.num > 1 {
            cl.num -= 1;
            debug!("decrement numerosity of {} to {}", id, cl.num);
        } else {
            debug!("delete {}", id);
            self.remove_everywhere(id, action_set, match_set);
        }
        Some(id)
    }

    /// Deletes micro-classifiers of `action_set` until its numerosity plus
    /// `incoming` does not exceed `theta_as` or the set is empty.
    pub fn delete_classifiers<R: RandomSource + ?Sized>(
        &mut self,
        action_set: &mut ActionSet,
        mut match_set: Option<&mut MatchSet>,
        incoming: usize,
        theta_as: usize,
        rng: &mut R,
    ) {
        while self.set_numerosity(action_set) + incoming > theta_as {
            let deleted = self.delete_one_classifier(action_set, match_set.as_deref_mut(), rng);
            if deleted.is_none() {
                break;
            }
        }
    }

    fn prefer(&self, id: ClassifierId, current: Option<ClassifierId>) -> ClassifierId {
        let current = match current {
            Some(current) => current,
            None => return id,
        };
        match (self.get(id), self.get(current)) {
            (Some(cl), Some(to_delete)) => {
                if std::ptr::eq(select_preferred_to_delete(cl, to_delete), cl) {
                    id
                } else {
                    current
                }
            }
            _ => current,
        }
    }
}
