//! Anticipatory Learning Process.
//!
//! ALP compares the anticipation of every classifier of the last action set
//! with the transition that was actually observed:
//!
//! * a classifier anticipating correctly gains quality, or, if its mark
//!   tells in which attributes it failed before, proposes a more specific
//!   child (expected case),
//! * a classifier anticipating incorrectly loses quality, is marked and
//!   proposes a child explaining the transition (unexpected case); an
//!   inadequate classifier is removed,
//! * if no classifier anticipated correctly, a covering classifier is
//!   created.
//!
//! Children are inserted with [`Credit::Quality`], so a child that already
//! exists, or is subsumed by a classifier of the action set, strengthens the
//! existing classifier instead. Subsumption here does not depend on
//! [`Acs2Config::do_subsumption`].
use crate::{
    Acs2Config, Action, ActionSet, Classifier, ClassifierSet, Credit, Insertion, MatchSet,
    Pattern, Perception, Population, RandomSource,
};
use log::debug;

/// Applies ALP to the action set formed in `p0` after `action` led to `p1`.
///
/// New classifiers are added to the population and the action set, and to
/// the match set if they match `p1`.
#[allow(clippy::too_many_arguments)]
pub fn apply_alp<R: RandomSource + ?Sized>(
    p0: &Perception,
    action: Action,
    p1: &Perception,
    time: u64,
    population: &mut Population,
    mut match_set: Option<&mut MatchSet>,
    action_set: &mut ActionSet,
    cfg: &Acs2Config,
    rng: &mut R,
) -> crate::Result<()> {
    cfg.check_perception(p0)?;
    cfg.check_perception(p1)?;
    cfg.check_action(action)?;
    population.check_members(action_set, cfg)?;
    if let Some(match_set) = match_set.as_deref() {
        population.check_members(match_set, cfg)?;
    }

    let mut new_list = ClassifierSet::new();
    let mut was_expected_case = false;

    for id in action_set.clone().iter() {
        let cl = match population.get_mut(id) {
            Some(cl) => cl,
            None => continue,
        };
        cl.increase_experience();
        cl.set_alp_timestamp(time, cfg.beta);

        let child = if cl.anticipates_correctly(p0, p1) {
            was_expected_case = true;
            expected_case(cl, p0, time, cfg, rng)
        } else {
            let child = unexpected_case(cl, p0, p1, time, cfg);
            if cl.is_inadequate(cfg.theta_i) {
                debug!("remove inadequate classifier {}", id);
                population.remove_everywhere(id, action_set, match_set.as_deref_mut());
            }
            child
        };

        if let Some(mut child) = child {
            child.tga = time;
            add_child(child, population, action_set, &mut new_list, cfg, rng)?;
        }
    }

    if !was_expected_case {
        let child = Classifier::cover(p0, action, p1, time);
        debug!("cover {}", cfg.format_classifier(&child));
        add_child(child, population, action_set, &mut new_list, cfg, rng)?;
    }

    for id in new_list.iter() {
        action_set.push(id);
        if let Some(match_set) = match_set.as_deref_mut() {
            if population
                .get(id)
                .map_or(false, |cl| cl.condition.matches(p1))
            {
                match_set.push(id);
            }
        }
    }

    Ok(())
}

/// Handles a classifier that anticipated correctly.
///
/// Returns the child specialized with the mark differences, if any.
fn expected_case<R: RandomSource + ?Sized>(
    cl: &mut Classifier,
    p0: &Perception,
    time: u64,
    cfg: &Acs2Config,
    rng: &mut R,
) -> Option<Classifier> {
    let mut diff = cl.mark.differences(p0, rng);
    if diff.is_general() {
        cl.increase_quality(cfg.beta);
        return None;
    }

    let mut child = cl.copy_from(time);
    let mut no_spec = child.specified_unchanging_attributes().len();
    let mut no_spec_new = diff.specificity();

    if no_spec >= cfg.u_max {
        while no_spec >= cfg.u_max && child.generalize_unchanging_condition_attribute(rng) {
            no_spec -= 1;
        }
        while no_spec + no_spec_new > cfg.u_max {
            if no_spec > 0 && (no_spec_new == 0 || rng.uniform() < 0.5) {
                child.generalize_unchanging_condition_attribute(rng);
                no_spec -= 1;
            } else {
                diff.generalize_specific_attribute_randomly(rng);
                no_spec_new -= 1;
            }
        }
    } else {
        while no_spec + no_spec_new > cfg.u_max && diff.generalize_specific_attribute_randomly(rng)
        {
            no_spec_new -= 1;
        }
    }

    child.condition.specialize(&diff);
    child.q = child.q.max(0.5);
    Some(child)
}

/// Handles a classifier that anticipated incorrectly.
///
/// Returns the child explaining the transition if the effect can be
/// specialized.
fn unexpected_case(
    cl: &mut Classifier,
    p0: &Perception,
    p1: &Perception,
    time: u64,
    cfg: &Acs2Config,
) -> Option<Classifier> {
    cl.decrease_quality(cfg.beta);
    cl.set_mark(p0);

    if !cl.effect.is_specializable(p0, p1) {
        return None;
    }

    let mut child = cl.copy_from(time);
    child.specialize(p0, p1, true);
    child.q = child.q.max(0.5);
    Some(child)
}

fn add_child<R: RandomSource + ?Sized>(
    child: Classifier,
    population: &mut Population,
    action_set: &ActionSet,
    new_list: &mut ClassifierSet,
    cfg: &Acs2Config,
    rng: &mut R,
) -> crate::Result<()> {
    let insertion = population.insert_with_subsumption_check(
        child,
        &[action_set, &*new_list],
        Credit::Quality,
        cfg,
        rng,
    )?;
    if let Insertion::Added(id) = insertion {
        debug!("new classifier {}", id);
        new_list.push(id);
    }
    Ok(())
}
