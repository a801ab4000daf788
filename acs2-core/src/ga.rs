//! Genetic generalization.
//!
//! The GA runs in an action set once the average time since its members took
//! part in a GA exceeds `theta_ga`. Two parents are selected with a roulette
//! wheel weighted by `q^3 * num`; their children are generalized by
//! mutation, optionally recombined, and inserted with
//! [`Credit::Numerosity`]. Deletion keeps the numerosity of the action set
//! within `theta_as`.
use crate::{
    Acs2Config, ActionSet, Classifier, ClassifierId, Credit, Insertion, MatchSet, Pattern,
    Perception, Population, RandomSource,
};
use log::debug;

/// Applies the GA to `action_set` at `time`.
///
/// Children added to the population join the action set, and the match set
/// if they match `situation`. Returns `true` if the GA fired.
#[allow(clippy::too_many_arguments)]
pub fn apply_ga<R: RandomSource + ?Sized>(
    time: u64,
    population: &mut Population,
    mut match_set: Option<&mut MatchSet>,
    action_set: &mut ActionSet,
    situation: &Perception,
    cfg: &Acs2Config,
    rng: &mut R,
) -> crate::Result<bool> {
    cfg.check_perception(situation)?;
    population.check_members(action_set, cfg)?;

    if !should_apply(population, action_set, time, cfg.theta_ga) {
        return Ok(false);
    }
    debug!("apply GA at time {} to {} classifiers", time, action_set.len());

    for id in action_set.iter() {
        if let Some(cl) = population.get_mut(id) {
            cl.tga = time;
        }
    }

    let (parent1, parent2) = match (
        roulette_wheel_selection(population, action_set, rng),
        roulette_wheel_selection(population, action_set, rng),
    ) {
        (Some(p1), Some(p2)) => (p1, p2),
        _ => return Ok(false),
    };
    let (mut child1, mut child2) = match (population.get(parent1), population.get(parent2)) {
        (Some(p1), Some(p2)) => (p1.copy_from(time), p2.copy_from(time)),
        _ => return Ok(false),
    };

    generalizing_mutation(&mut child1, cfg.mu, rng);
    generalizing_mutation(&mut child2, cfg.mu, rng);

    if rng.uniform() < cfg.chi && child1.effect == child2.effect {
        two_point_crossover(&mut child1, &mut child2, rng);

        let q = (child1.q + child2.q) / 2.0;
        let r = (child1.r + child2.r) / 2.0;
        child1.q = q;
        child2.q = q;
        child1.r = r;
        child2.r = r;
    }

    child1.q /= 2.0;
    child2.q /= 2.0;

    let mut children = vec![];
    for child in [child1, child2] {
        if child.condition.is_general() {
            continue;
        }
        if children.iter().any(|c: &Classifier| c.is_similar(&child)) {
            continue;
        }
        children.push(child);
    }

    population.delete_classifiers(
        action_set,
        match_set.as_deref_mut(),
        children.len(),
        cfg.theta_as,
        rng,
    );

    for child in children {
        let matches = child.condition.matches(situation);
        let insertion = population.insert_with_subsumption_check(
            child,
            &[&*action_set],
            Credit::Numerosity,
            cfg,
            rng,
        )?;
        if let Insertion::Added(id) = insertion {
            debug!("GA child {}", id);
            action_set.push(id);
            if matches {
                if let Some(match_set) = match_set.as_deref_mut() {
                    match_set.push(id);
                }
            }
        }
    }

    Ok(true)
}

/// Returns `true` if the numerosity-weighted average GA timestamp of
/// `action_set` lies more than `theta_ga` steps before `time`.
pub fn should_apply(
    population: &Population,
    action_set: &ActionSet,
    time: u64,
    theta_ga: u64,
) -> bool {
    let (sum_tga, sum_num) = population
        .members(action_set)
        .fold((0.0, 0usize), |(tga, num), (_, cl)| {
            (tga + (cl.tga as f64) * (cl.num as f64), num + cl.num)
        });
    if sum_num == 0 {
        return false;
    }
    time as f64 - sum_tga / sum_num as f64 > theta_ga as f64
}

/// Selects a classifier of `set` with probability proportional to
/// `q^3 * num`.
///
/// Falls back to a uniform choice if all weights are zero. Returns `None`
/// for an empty set.
pub fn roulette_wheel_selection<R: RandomSource + ?Sized>(
    population: &Population,
    set: &ActionSet,
    rng: &mut R,
) -> Option<ClassifierId> {
    let weighted = population
        .members(set)
        .map(|(id, cl)| (id, cl.q.powi(3) * cl.num as f64))
        .collect::<Vec<_>>();
    if weighted.is_empty() {
        return None;
    }

    let total: f64 = weighted.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return Some(weighted[rng.below(weighted.len())].0);
    }

    let choice = rng.uniform() * total;
    let mut acc = 0.0;
    for (id, w) in weighted.iter() {
        acc += w;
        if acc > choice {
            return Some(*id);
        }
    }
    weighted.last().map(|(id, _)| *id)
}

/// Generalizes every specified condition attribute with probability `mu`.
pub fn generalizing_mutation<R: RandomSource + ?Sized>(cl: &mut Classifier, mu: f64, rng: &mut R) {
    for i in 0..cl.condition.len() {
        if cl.condition.get(i).is_some() && rng.uniform() < mu {
            cl.condition.generalize(i);
        }
    }
}

/// Swaps the condition attributes of the two classifiers between two
/// distinct crossover points.
pub fn two_point_crossover<R: RandomSource + ?Sized>(
    cl1: &mut Classifier,
    cl2: &mut Classifier,
    rng: &mut R,
) {
    let len = cl1.condition.len();
    debug_assert_eq!(len, cl2.condition.len());
    if len == 0 {
        return;
    }

    let left = rng.below(len + 1);
    let mut right = rng.below(len);
    if right >= left {
        right += 1;
    }
    let (left, right) = if left < right { (left, right) } else { (right, left) };

    for i in left..right {
        let a = cl1.condition.get(i);
        let b = cl2.condition.get(i);
        set_attribute(cl1, i, b);
        set_attribute(cl2, i, a);
    }
}

fn set_attribute(cl: &mut Classifier, idx: usize, value: Option<crate::Symbol>) {
    match value {
        Some(symbol) => cl.condition.specialize_at(idx, symbol),
        None => cl.condition.generalize(idx),
    }
}
